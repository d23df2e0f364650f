//! Core game state and the host-facing interface.
//!
//! The engine is called by an external turn-sequencing host: the host names
//! a player and a move, the engine either applies the transition in place or
//! rejects it with a [`MoveError`]. Legality is always checked before any
//! mutation, so a rejected move leaves the state untouched and nothing is
//! ever rolled back.

use crate::actions::Move;
use crate::board::{Board, BoardJson, PlayerId};
use crate::cards::{build_deck, Card};
use crate::hex::HexCoord;
use crate::placement;
use crate::player::{Player, PlayerPrefs};
use crate::rules::{ConfigError, OriginLayout, Rules};
use crate::scoring::{compute_scores, ScoreMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounded attempts for min-distance origin sampling
const MAX_ORIGIN_ATTEMPTS: usize = 1000;

/// Rejections returned by [`GameState::apply_move`]. All are recoverable:
/// the caller simply receives the rejection and may retry another move.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,

    #[error("not your turn")]
    NotYourTurn,

    #[error("no such player")]
    NoSuchPlayer,

    #[error("no card at that hand index")]
    NoSuchCard,

    #[error("picked color is not on the card")]
    ColorNotOnCard,

    #[error("illegal placement")]
    IllegalPlacement,

    #[error("illegal rotation")]
    IllegalRotation,

    #[error("treasure stash is full")]
    TreasureFull,

    #[error("no card at that treasure index")]
    NoSuchTreasureCard,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Effective rules for this game; the edge order is resolved (possibly
    /// shuffled) at setup and then constant for the game's lifetime
    pub rules: Rules,
    /// The game board
    pub board: Board,
    /// All players, indexed by id
    pub players: Vec<Player>,
    /// Whose turn it is
    pub current_player: PlayerId,
    /// Turn number (starts at 1)
    pub turn_number: u32,
    /// Draw pile, top at the back
    pub deck: Vec<Card>,
    /// Spent cards
    pub discard: Vec<Card>,
    /// Shared treasure stash, bounded by `rules.treasure_max`
    pub treasure: Vec<Card>,
    /// Total lanes placed over the game
    pub placements: u32,
    /// Turn on which the deck first ran dry, once set never cleared
    pub deck_exhausted_at: Option<u32>,
    /// Seed used at setup (for deterministic replays)
    rng_seed: u64,
}

impl GameState {
    /// Create a new game: validate the configuration, resolve the edge
    /// order, place origins, build the deck, and deal opening hands.
    pub fn setup(player_names: Vec<String>, rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        rules.validate()?;
        if player_names.is_empty() || player_names.len() > rules.max_players {
            return Err(ConfigError::BadPlayerCount(rules.max_players));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut rules = rules;
        if rules.randomize_edge_order {
            rules.edge_order.shuffle(&mut rng);
        }

        let origins = generate_origins(&rules, &mut rng);
        let board = Board::new(rules.radius, origins);
        let deck = build_deck(&rules, &mut rng);

        let players: Vec<Player> = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        let mut state = Self {
            rules,
            board,
            players,
            current_player: 0,
            turn_number: 1,
            deck,
            discard: Vec::new(),
            treasure: Vec::new(),
            placements: 0,
            deck_exhausted_at: None,
            rng_seed: seed,
        };
        for i in 0..state.players.len() {
            state.refill_hand(i);
        }
        Ok(state)
    }

    /// Get a player by id
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// Replace a player's scoring preferences (host-driven, outside the
    /// move vocabulary)
    pub fn set_player_prefs(&mut self, id: PlayerId, prefs: PlayerPrefs) -> Result<(), MoveError> {
        match self.players.get_mut(id as usize) {
            Some(p) => {
                p.prefs = prefs;
                Ok(())
            }
            None => Err(MoveError::NoSuchPlayer),
        }
    }

    /// The seed this game was set up with
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }

    /// Total cards across deck, discard, hands, and treasure. Constant for
    /// the lifetime of a game.
    pub fn card_total(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.treasure.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Validate a move without applying it.
    pub fn check_move(&self, player: PlayerId, mv: &Move) -> Result<(), MoveError> {
        if self.is_game_over().is_some() {
            return Err(MoveError::GameOver);
        }
        let p = self.player(player).ok_or(MoveError::NoSuchPlayer)?;
        if player != self.current_player {
            return Err(MoveError::NotYourTurn);
        }

        match mv {
            Move::PlayCard {
                hand_index,
                color,
                coord,
            } => {
                let card = p.hand.get(*hand_index).ok_or(MoveError::NoSuchCard)?;
                if self.rules.one_color_per_card_play && !card.has_color(*color) {
                    return Err(MoveError::ColorNotOnCard);
                }
                if !placement::can_place(&self.board, *coord, *color, &self.rules) {
                    return Err(MoveError::IllegalPlacement);
                }
            }

            Move::RotateTile {
                coord,
                rotation_delta,
                discard_hand_index,
            } => {
                let card = p
                    .hand
                    .get(*discard_hand_index)
                    .ok_or(MoveError::NoSuchCard)?;
                if !placement::can_rotate(&self.board, *coord, *rotation_delta, card, &self.rules) {
                    return Err(MoveError::IllegalRotation);
                }
            }

            Move::StashToTreasure { hand_index } => {
                if self.treasure.len() >= self.rules.treasure_max {
                    return Err(MoveError::TreasureFull);
                }
                p.hand.get(*hand_index).ok_or(MoveError::NoSuchCard)?;
            }

            Move::TakeFromTreasure { index } => {
                self.treasure
                    .get(*index)
                    .ok_or(MoveError::NoSuchTreasureCard)?;
            }

            Move::EndTurn => {}
        }
        Ok(())
    }

    /// Whether a move would be accepted right now. This is the
    /// re-validation hook for callers that searched on a snapshot.
    pub fn is_move_legal(&self, player: PlayerId, mv: &Move) -> bool {
        self.check_move(player, mv).is_ok()
    }

    /// Apply a move for a player, mutating the state on success.
    pub fn apply_move(&mut self, player: PlayerId, mv: Move) -> Result<(), MoveError> {
        self.check_move(player, &mv)?;
        let idx = player as usize;

        match mv {
            Move::PlayCard {
                hand_index,
                color,
                coord,
            } => {
                placement::apply_place(&mut self.board, coord, color);
                self.placements += 1;
                let used = self.players[idx].hand.remove(hand_index);
                self.discard.push(used);
            }

            Move::RotateTile {
                coord,
                rotation_delta,
                discard_hand_index,
            } => {
                placement::apply_rotate(&mut self.board, coord, rotation_delta);
                let used = self.players[idx].hand.remove(discard_hand_index);
                self.discard.push(used);
            }

            Move::StashToTreasure { hand_index } => {
                let card = self.players[idx].hand.remove(hand_index);
                self.treasure.push(card);
                self.players[idx].stash_bonus += 1;
            }

            Move::TakeFromTreasure { index } => {
                let card = self.treasure.remove(index);
                self.players[idx].hand.push(card);
            }

            Move::EndTurn => {
                self.refill_hand(idx);
                if self.rules.end_on_deck_exhaust
                    && self.deck.is_empty()
                    && self.deck_exhausted_at.is_none()
                {
                    self.deck_exhausted_at = Some(self.turn_number);
                }
                self.turn_number += 1;
                self.current_player = (self.current_player + 1) % self.players.len() as PlayerId;
            }
        }
        Ok(())
    }

    /// Enumerate every move the engine would accept from `player`: all
    /// legal placements, stashes while the treasure has room, and ending
    /// the turn. Never errors; a finished game yields nothing.
    pub fn enumerate_moves(&self, player: PlayerId) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.is_game_over().is_some() {
            return moves;
        }
        let p = match self.player(player) {
            Some(p) => p,
            None => return moves,
        };

        for (hand_index, card) in p.hand.iter().enumerate() {
            for &color in &card.colors {
                for coord in self.board.coords() {
                    if placement::can_place(&self.board, coord, color, &self.rules) {
                        moves.push(Move::PlayCard {
                            hand_index,
                            color,
                            coord,
                        });
                    }
                }
            }
        }

        if self.treasure.len() < self.rules.treasure_max {
            for hand_index in 0..p.hand.len() {
                moves.push(Move::StashToTreasure { hand_index });
            }
        }

        moves.push(Move::EndTurn);
        moves
    }

    /// Whether the game has ended; returns final scores once the deck has
    /// been exhausted and (with `equal_turns`) every player has had an
    /// equal number of turns since.
    pub fn is_game_over(&self) -> Option<ScoreMap> {
        if !self.rules.end_on_deck_exhaust {
            return None;
        }
        let exhausted_at = self.deck_exhausted_at?;
        if !self.rules.equal_turns
            || self.turn_number - exhausted_at >= self.players.len() as u32
        {
            return Some(self.scores());
        }
        None
    }

    /// Current scores, recomputable at any time
    pub fn scores(&self) -> ScoreMap {
        compute_scores(&self.board, &self.players, &self.rules)
    }

    fn refill_hand(&mut self, idx: usize) {
        let limit = self.players[idx].hand_limit(self.rules.hand_size);
        while self.players[idx].hand.len() < limit {
            match self.deck.pop() {
                Some(card) => self.players[idx].hand.push(card),
                None => break,
            }
        }
    }

    /// Convert to a plain structural snapshot
    pub fn to_json_friendly(&self) -> GameStateJson {
        GameStateJson {
            board: self.board.to_json_friendly(),
            players: self
                .players
                .iter()
                .map(|p| PlayerJson {
                    id: p.id,
                    name: p.name.clone(),
                    prefs: p.prefs,
                    hand: p.hand.clone(),
                    stash_bonus: p.stash_bonus,
                })
                .collect(),
            current_player: self.current_player,
            turn_number: self.turn_number,
            deck: self.deck.clone(),
            discard: self.discard.clone(),
            treasure: self.treasure.clone(),
            placements: self.placements,
            deck_exhausted_at: self.deck_exhausted_at,
        }
    }

    /// Serialize the plain structural snapshot to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_json_friendly())
    }
}

/// Place origins per the configured layout. Random layouts sample with a
/// bounded number of attempts, keeping `min_distance` cells between origins
/// and between any origin and the rim; if nothing can be placed the center
/// is used so every game has at least one origin.
fn generate_origins<R: Rng>(rules: &Rules, rng: &mut R) -> Vec<HexCoord> {
    let center = HexCoord::new(0, 0);
    let mut origins = Vec::new();

    match rules.origins.layout {
        OriginLayout::Center => origins.push(center),
        OriginLayout::Random | OriginLayout::RandomAndCenter => {
            if matches!(rules.origins.layout, OriginLayout::RandomAndCenter) {
                origins.push(center);
            }
            let min_distance = rules.origins.min_distance as i32;
            let max_ring = (rules.radius - min_distance).max(0);
            let placed_target =
                origins.len() + rules.origins.count;

            let mut attempts = 0;
            while origins.len() < placed_target && attempts < MAX_ORIGIN_ATTEMPTS {
                attempts += 1;
                let q = rng.gen_range(-max_ring..=max_ring);
                let r = rng.gen_range(-max_ring..=max_ring);
                let candidate = HexCoord::new(q, r);
                if candidate.ring() > max_ring {
                    continue;
                }
                if matches!(rules.origins.layout, OriginLayout::Random) && candidate == center {
                    continue;
                }
                if origins
                    .iter()
                    .any(|o| (o.distance_to(&candidate) as i32) <= min_distance)
                {
                    continue;
                }
                origins.push(candidate);
            }
            if origins.is_empty() {
                origins.push(center);
            }
        }
    }
    origins
}

/// JSON-friendly game snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateJson {
    pub board: BoardJson,
    pub players: Vec<PlayerJson>,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub deck: Vec<Card>,
    pub discard: Vec<Card>,
    pub treasure: Vec<Card>,
    pub placements: u32,
    pub deck_exhausted_at: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerJson {
    pub id: PlayerId,
    pub name: String,
    pub prefs: PlayerPrefs,
    pub hand: Vec<Card>,
    pub stash_bonus: u32,
}
