//! Player state and scoring preferences.

use crate::board::{Color, PlayerId};
use crate::cards::Card;
use crate::rules::ConfigError;
use serde::{Deserialize, Serialize};

/// An ordered triple of distinct colors a player is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPrefs {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
}

impl PlayerPrefs {
    /// Create preferences, rejecting repeated colors
    pub fn new(primary: Color, secondary: Color, tertiary: Color) -> Result<Self, ConfigError> {
        if primary == secondary || primary == tertiary || secondary == tertiary {
            return Err(ConfigError::DuplicatePrefColors);
        }
        Ok(Self {
            primary,
            secondary,
            tertiary,
        })
    }

    /// Default preferences for a seat: the color wheel rotated by seat
    /// index, so adjacent seats chase different colors.
    pub fn default_for_seat(seat: usize) -> Self {
        let all = Color::ALL;
        Self {
            primary: all[seat % 6],
            secondary: all[(seat + 1) % 6],
            tertiary: all[(seat + 2) % 6],
        }
    }

    /// Rank of a color within the triple (0 = primary), if present
    pub fn rank_of(&self, color: Color) -> Option<usize> {
        if color == self.primary {
            Some(0)
        } else if color == self.secondary {
            Some(1)
        } else if color == self.tertiary {
            Some(2)
        } else {
            None
        }
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Scoring preferences
    pub prefs: PlayerPrefs,
    /// Cards currently held
    pub hand: Vec<Card>,
    /// Lifetime stash count; raises the end-of-turn refill ceiling
    pub stash_bonus: u32,
}

impl Player {
    /// Create a new player with seat-rotated default preferences
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            prefs: PlayerPrefs::default_for_seat(id as usize),
            hand: Vec::new(),
            stash_bonus: 0,
        }
    }

    /// Cards this player refills to at end of turn
    pub fn hand_limit(&self, hand_size: usize) -> usize {
        hand_size + self.stash_bonus as usize
    }
}
