//! Moves a player can submit to the engine.
//!
//! The turn host hands these to [`crate::game::GameState::apply_move`];
//! bots produce them through the same vocabulary.

use crate::board::Color;
use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// All moves accepted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place one color from a held card onto the board; the card is spent
    /// to the discard pile
    PlayCard {
        hand_index: usize,
        color: Color,
        coord: HexCoord,
    },

    /// Rotate an occupied tile clockwise, paying one discarded card.
    /// `rotation_delta` must be 1, 2, 4, or 5.
    RotateTile {
        coord: HexCoord,
        rotation_delta: u8,
        discard_hand_index: usize,
    },

    /// Move a card from hand into the shared treasure stash
    StashToTreasure { hand_index: usize },

    /// Take a card out of the treasure stash
    TakeFromTreasure { index: usize },

    /// Finish the turn and refill the hand from the deck
    EndTurn,
}
