//! Rule configuration.
//!
//! Every branch of the engine reads from a single immutable `Rules` value
//! passed explicitly to the functions that need it; there is no global rule
//! state. The presets [`Rules::hex`] and [`Rules::path`] describe the two
//! shipped game modes.

use crate::board::Color;
use crate::hex::{HexCoord, DIRECTIONS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game mode, selecting the capacity table and placement extras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Classic mode: capacity 2 on the first rings, 1 outside
    Hex,
    /// Dot-to-dot mode: uniform capacity, fork support enforced
    Path,
}

/// Which neighbors justify a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectionRule {
    /// No directional restriction
    None,
    /// Some occupied neighbor must sit on the same or a lower ring
    OutwardOnly,
    /// Some occupied or origin neighbor must face the cell with an edge of
    /// the placed color
    DirOnly,
    /// Either of the above
    DirOrOutward,
}

/// Discard-to-rotate rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPolicy {
    /// Rotation moves are not available
    Disabled,
    /// Any card may be discarded to rotate
    Any,
    /// The discarded card must share a color with the rotated tile
    MatchColor,
}

/// Where origins are placed at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginLayout {
    /// Single origin at the board center
    Center,
    /// Randomly placed origins, excluding the center
    Random,
    /// The center plus randomly placed origins
    RandomAndCenter,
}

/// Placement-rule knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    pub direction_rule: DirectionRule,
    pub rotation_policy: RotationPolicy,
    /// Rings 1..=N get capacity 2 in hex mode (center and origins excluded)
    pub multi_cap_first_rings: i32,
    /// Hard cap on lanes per cell
    pub max_lanes_per_tile: usize,
    /// Enforce the fork-support flow invariant (path mode)
    pub fork_support: bool,
    /// The color-implied source of a new lane may not sit on the rim
    pub no_build_from_rim: bool,
    /// All lanes at a cell must share one color-implied source
    pub no_intersect: bool,
}

/// Scoring-rule knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Count only tiles on a shortest origin-to-rim path
    pub shortest_path: bool,
    /// Additionally score tiles linking two distinct origins
    pub origin_to_origin: bool,
    /// Points per preference rank (primary, secondary, tertiary)
    pub color_points: [i32; 3],
}

/// Origin-placement knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRules {
    pub layout: OriginLayout,
    /// Number of randomly placed origins (the center, when present, is extra)
    pub count: usize,
    /// Minimum spacing between origins and between an origin and the rim
    pub min_distance: u32,
}

/// Deck composition weights per card size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub two_color: u32,
    pub three_color: u32,
    pub four_color: u32,
}

/// The complete rule configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub mode: Mode,
    /// Maximum ring index; the board is a hex of this radius
    pub radius: i32,
    /// Edge colors clockwise from North (edges 0-5); binds each color to a
    /// neighbor direction and defines the default tile orientation
    pub edge_order: [Color; 6],
    /// Shuffle `edge_order` once per game instance at setup
    pub randomize_edge_order: bool,
    /// Cards each player holds at the start of a turn
    pub hand_size: usize,
    /// Capacity of the shared treasure stash
    pub treasure_max: usize,
    /// Target total number of cards in the deck
    pub deck_size: usize,
    /// Relative weights used to fill the deck, scaled to `deck_size`
    pub deck_counts: DeckCounts,
    /// When playing a multi-color card, exactly one of its colors is placed
    pub one_color_per_card_play: bool,
    /// The game ends once the deck runs out
    pub end_on_deck_exhaust: bool,
    /// After exhaustion, every player gets an equal number of turns
    pub equal_turns: bool,
    pub max_players: usize,
    pub placement: PlacementRules,
    pub scoring: ScoringRules,
    pub origins: OriginRules,
}

/// Default edge colors clockwise from North: Y G B V R O
pub const BASE_EDGE_ORDER: [Color; 6] = [
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Violet,
    Color::Red,
    Color::Orange,
];

impl Rules {
    /// The classic hex-mode ruleset
    pub fn hex() -> Self {
        Self {
            mode: Mode::Hex,
            radius: 6,
            edge_order: BASE_EDGE_ORDER,
            randomize_edge_order: true,
            hand_size: 3,
            treasure_max: 4,
            deck_size: 100,
            deck_counts: DeckCounts {
                two_color: 36,
                three_color: 18,
                four_color: 6,
            },
            one_color_per_card_play: true,
            end_on_deck_exhaust: true,
            equal_turns: true,
            max_players: 6,
            placement: PlacementRules {
                direction_rule: DirectionRule::DirOnly,
                rotation_policy: RotationPolicy::Any,
                multi_cap_first_rings: 2,
                max_lanes_per_tile: 2,
                fork_support: false,
                no_build_from_rim: false,
                no_intersect: false,
            },
            scoring: ScoringRules {
                shortest_path: true,
                origin_to_origin: true,
                color_points: [3, 2, 1],
            },
            origins: OriginRules {
                layout: OriginLayout::Center,
                count: 1,
                min_distance: 2,
            },
        }
    }

    /// The dot-to-dot path-mode ruleset: smaller board, deeper cells,
    /// lane-symmetric scoring, fork support on.
    pub fn path() -> Self {
        let mut rules = Self::hex();
        rules.mode = Mode::Path;
        rules.radius = 4;
        rules.placement.max_lanes_per_tile = 3;
        rules.placement.fork_support = true;
        rules.scoring.color_points = [1, 1, 1];
        rules
    }

    /// Validate the configuration. Errors here are fatal at setup and are
    /// never produced at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = [false; 6];
        for &color in &self.edge_order {
            if seen[color as usize] {
                return Err(ConfigError::DuplicateEdgeColor);
            }
            seen[color as usize] = true;
        }
        if self.radius < 1 {
            return Err(ConfigError::BadRadius);
        }
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        if self.deck_size == 0 {
            return Err(ConfigError::BadDeckSize);
        }
        let weights =
            self.deck_counts.two_color + self.deck_counts.three_color + self.deck_counts.four_color;
        if weights == 0 {
            return Err(ConfigError::EmptyDeckWeights);
        }
        if self.max_players == 0 {
            return Err(ConfigError::BadPlayerCount(self.max_players));
        }
        if self.placement.max_lanes_per_tile == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !matches!(self.origins.layout, OriginLayout::Center) && self.origins.count == 0 {
            return Err(ConfigError::NoOrigins);
        }
        Ok(())
    }

    /// Lane capacity of a cell on the given ring; constant for the game's
    /// lifetime.
    pub fn capacity(&self, ring: i32) -> usize {
        let base = match self.mode {
            Mode::Path => self.placement.max_lanes_per_tile,
            Mode::Hex => {
                if ring >= 1 && ring <= self.placement.multi_cap_first_rings {
                    2
                } else {
                    1
                }
            }
        };
        base.min(self.placement.max_lanes_per_tile)
    }

    /// The edge index a color sits on at rotation 0
    pub fn edge_index_of(&self, color: Color) -> usize {
        self.edge_order
            .iter()
            .position(|&c| c == color)
            .expect("edge order covers every color")
    }

    /// The neighbor offset a color points along (rotation 0 mapping)
    pub fn direction_of(&self, color: Color) -> HexCoord {
        DIRECTIONS[self.edge_index_of(color)]
    }

    /// The color shown on a tile edge, accounting for the tile's clockwise
    /// rotation offset: rotating by one step moves each color to the next
    /// clockwise edge.
    pub fn edge_color(&self, edge_index: usize, rotation: u8) -> Color {
        self.edge_order[(edge_index % 6 + 6 - rotation as usize % 6) % 6]
    }
}

/// Errors raised by [`Rules::validate`] and preference construction
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("edge order must contain each color exactly once")]
    DuplicateEdgeColor,

    #[error("board radius must be at least 1")]
    BadRadius,

    #[error("hand size must be at least 1")]
    ZeroHandSize,

    #[error("deck size must be at least 1")]
    BadDeckSize,

    #[error("deck weights must not all be zero")]
    EmptyDeckWeights,

    #[error("player count must be between 1 and {0}")]
    BadPlayerCount(usize),

    #[error("max lanes per tile must be at least 1")]
    ZeroCapacity,

    #[error("origin count must be at least 1")]
    NoOrigins,

    #[error("preference colors must be distinct")]
    DuplicatePrefColors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(Rules::hex().validate().is_ok());
        assert!(Rules::path().validate().is_ok());
    }

    #[test]
    fn test_duplicate_edge_color_rejected() {
        let mut rules = Rules::hex();
        rules.edge_order[1] = Color::Yellow;
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::DuplicateEdgeColor)
        ));
    }

    #[test]
    fn test_bad_scalar_configs_rejected() {
        let mut rules = Rules::hex();
        rules.hand_size = 0;
        assert!(matches!(rules.validate(), Err(ConfigError::ZeroHandSize)));

        let mut rules = Rules::hex();
        rules.deck_counts = DeckCounts {
            two_color: 0,
            three_color: 0,
            four_color: 0,
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::EmptyDeckWeights)
        ));

        let mut rules = Rules::hex();
        rules.radius = 0;
        assert!(matches!(rules.validate(), Err(ConfigError::BadRadius)));
    }

    #[test]
    fn test_capacity_table_hex() {
        let rules = Rules::hex();
        assert_eq!(rules.capacity(0), 1);
        assert_eq!(rules.capacity(1), 2);
        assert_eq!(rules.capacity(2), 2);
        assert_eq!(rules.capacity(3), 1);
        assert_eq!(rules.capacity(6), 1);
    }

    #[test]
    fn test_capacity_table_path_is_uniform() {
        let rules = Rules::path();
        for ring in 0..=4 {
            assert_eq!(rules.capacity(ring), 3);
        }
    }

    #[test]
    fn test_direction_of_base_order() {
        let rules = Rules::hex();
        // Yellow sits on edge 0 (North) in the default order
        assert_eq!(rules.direction_of(Color::Yellow), HexCoord::new(0, -1));
        assert_eq!(rules.direction_of(Color::Green), HexCoord::new(1, -1));
        assert_eq!(rules.direction_of(Color::Orange), HexCoord::new(-1, 0));
    }

    #[test]
    fn test_edge_color_rotation() {
        let rules = Rules::hex();
        assert_eq!(rules.edge_color(0, 0), Color::Yellow);
        // One clockwise step moves Yellow from edge 0 to edge 1
        assert_eq!(rules.edge_color(1, 1), Color::Yellow);
        assert_eq!(rules.edge_color(0, 1), Color::Orange);
        // A full cycle restores the default orientation
        for i in 0..6 {
            assert_eq!(rules.edge_color(i, 0), rules.edge_order[i]);
        }
    }
}
