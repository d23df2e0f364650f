//! Hexlanes - a lane-connection board game engine
//!
//! This crate provides the core rules engine for Hexlanes, including:
//! - Hex coordinate system for the game board
//! - Board representation with lane tiles, rotations, and origins
//! - Placement legality, including the fork-support flow invariant
//! - Connectivity scoring with shortest-path and origin-to-origin policies
//! - Bot players from first-legal up to Monte Carlo search
//!
//! # Architecture
//!
//! The engine is platform-agnostic and free of I/O: an external
//! turn-sequencing host owns turn order and transport, and calls in with a
//! player id and a move. Every public operation is a pure function or a
//! single in-place mutation that is legality-checked up front.
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and the six edge directions
//! - [`board`]: Colors, tiles, and the board arena
//! - [`rules`]: The immutable rule configuration
//! - [`cards`]: Cards and the weighted deck builder
//! - [`placement`]: The `can_place` predicate and rotation legality
//! - [`flow`]: Max-flow analysis behind the fork-support rule
//! - [`scoring`]: Per-color connectivity scoring
//! - [`player`]: Player state and scoring preferences
//! - [`actions`]: The move vocabulary
//! - [`game`]: Game state, setup, and the host-facing interface
//! - [`bot`]: Bot move selection

pub mod actions;
pub mod board;
pub mod bot;
pub mod cards;
pub mod flow;
pub mod game;
pub mod hex;
pub mod placement;
pub mod player;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use actions::Move;
pub use board::{Board, BoardJson, Color, PlayerId, Tile};
pub use bot::{Bot, BotDifficulty};
pub use cards::{build_deck, Card};
pub use game::{GameState, GameStateJson, MoveError};
pub use hex::{HexCoord, DIRECTIONS};
pub use placement::{apply_place, can_place, can_rotate};
pub use player::{Player, PlayerPrefs};
pub use rules::{
    ConfigError, DirectionRule, Mode, OriginLayout, RotationPolicy, Rules, BASE_EDGE_ORDER,
};
pub use scoring::{compute_scores, ScoreMap};
