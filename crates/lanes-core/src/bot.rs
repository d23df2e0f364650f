//! Bot players.
//!
//! Three difficulty levels, cheapest first:
//! - Easy: play the first legal placement, otherwise stash, otherwise end
//!   the turn
//! - Medium: greedy over a hand-crafted move value, no search
//! - Hard: Monte Carlo playouts per candidate move, with re-validation
//!   against the live state before the pick is returned
//!
//! Bots only read the game state and produce moves; their moves go through
//! the same legality path as a human player's.

use crate::actions::Move;
use crate::board::PlayerId;
use crate::cards::Card;
use crate::game::GameState;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A bot player that can decide on moves
pub struct Bot {
    pub player_id: PlayerId,
    pub difficulty: BotDifficulty,
    /// Random playouts per candidate move (Hard)
    pub playouts: u32,
    /// Plies per playout (Hard)
    pub playout_depth: u32,
    rng: StdRng,
}

impl Bot {
    pub fn new(player_id: PlayerId, difficulty: BotDifficulty) -> Self {
        Self {
            player_id,
            difficulty,
            playouts: 12,
            playout_depth: 6,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player_id: PlayerId, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(player_id, difficulty)
        }
    }

    /// Choose a move from the current state. Returns `None` only when the
    /// game offers no moves at all (i.e. it is over).
    pub fn choose_move(&mut self, game: &GameState) -> Option<Move> {
        let moves = game.enumerate_moves(self.player_id);
        if moves.is_empty() {
            return None;
        }
        match self.difficulty {
            BotDifficulty::Easy => Some(first_legal(&moves)),
            BotDifficulty::Medium => Some(self.choose_greedy(game, moves)),
            BotDifficulty::Hard => Some(self.choose_monte_carlo(game, moves)),
        }
    }

    /// Medium: take the move with the best heuristic value.
    fn choose_greedy(&mut self, game: &GameState, moves: Vec<Move>) -> Move {
        let mut best = Move::EndTurn;
        let mut best_value = f64::NEG_INFINITY;
        for mv in moves {
            let value = self.heuristic_value(game, &mv);
            if value > best_value {
                best_value = value;
                best = mv;
            }
        }
        best
    }

    /// Hard: score each candidate by random playouts from a cloned state,
    /// then re-validate the winner against the live state. Candidates that
    /// fail re-validation are silently skipped; the fallback is ending the
    /// turn.
    fn choose_monte_carlo(&mut self, game: &GameState, moves: Vec<Move>) -> Move {
        let mut scored: Vec<(Move, f64)> = Vec::with_capacity(moves.len());

        for mv in moves {
            let mut branch = game.clone();
            if branch.apply_move(self.player_id, mv.clone()).is_err() {
                continue;
            }
            if !matches!(mv, Move::EndTurn) {
                // Simulate the turn ending so playouts start from the
                // opponent's perspective
                let _ = branch.apply_move(self.player_id, Move::EndTurn);
            }

            let mut total = 0.0;
            for _ in 0..self.playouts {
                total += self.random_playout(&branch);
            }
            let average = total / self.playouts.max(1) as f64;

            let bonus = self.heuristic_value(game, &mv);
            let hand_quality: f64 = branch
                .player(self.player_id)
                .map(|p| p.hand.iter().map(|c| self.card_value(&branch, c)).sum())
                .unwrap_or(0.0);

            scored.push((mv, average + 0.5 * bonus + 0.1 * hand_quality));
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        for (mv, _) in scored {
            if game.is_move_legal(self.player_id, &mv) {
                return mv;
            }
        }
        Move::EndTurn
    }

    /// One random playout on a deep clone: random legal move each ply until
    /// the depth budget or the end of the game, then this bot's score.
    fn random_playout(&mut self, start: &GameState) -> f64 {
        let mut sim = start.clone();
        for _ in 0..self.playout_depth {
            if sim.is_game_over().is_some() {
                break;
            }
            let mover = sim.current_player;
            let moves = sim.enumerate_moves(mover);
            let pick = match moves.choose(&mut self.rng) {
                Some(mv) => mv.clone(),
                None => break,
            };
            if sim.apply_move(mover, pick).is_err() {
                break;
            }
        }
        sim.scores().get(&self.player_id).copied().unwrap_or(0) as f64
    }

    /// Hand-crafted move value: preference weight and outward progress for
    /// placements; expected draw value against the surrendered card for
    /// stashes.
    fn heuristic_value(&self, game: &GameState, mv: &Move) -> f64 {
        match mv {
            Move::PlayCard { color, coord, .. } => {
                let progress = coord.ring() as f64 / game.board.radius().max(1) as f64;
                2.0 * self.color_weight(game, *color) + progress
            }
            Move::StashToTreasure { hand_index } => {
                let surrendered = game
                    .player(self.player_id)
                    .and_then(|p| p.hand.get(*hand_index))
                    .map(|c| self.card_value(game, c))
                    .unwrap_or(0.0);
                self.expected_draw_value(game) - surrendered
            }
            Move::TakeFromTreasure { index } => game
                .treasure
                .get(*index)
                .map(|c| 0.5 * self.card_value(game, c))
                .unwrap_or(0.0),
            Move::RotateTile { .. } => 0.0,
            Move::EndTurn => 0.1,
        }
    }

    /// Preference-rank points for a color, from this bot's own prefs
    fn color_weight(&self, game: &GameState, color: crate::board::Color) -> f64 {
        let points = game.rules.scoring.color_points;
        game.player(self.player_id)
            .and_then(|p| p.prefs.rank_of(color))
            .map(|rank| points[rank] as f64)
            .unwrap_or(0.0)
    }

    /// A card is worth its best color
    fn card_value(&self, game: &GameState, card: &Card) -> f64 {
        card.colors
            .iter()
            .map(|&c| self.color_weight(game, c))
            .fold(0.0, f64::max)
    }

    /// Average card value over the remaining deck composition
    fn expected_draw_value(&self, game: &GameState) -> f64 {
        if game.deck.is_empty() {
            return 0.0;
        }
        let total: f64 = game
            .deck
            .iter()
            .map(|c| self.card_value(game, c))
            .sum();
        total / game.deck.len() as f64
    }
}

/// Easy policy: first placement, else first stash, else end the turn
fn first_legal(moves: &[Move]) -> Move {
    moves
        .iter()
        .find(|m| matches!(m, Move::PlayCard { .. }))
        .or_else(|| {
            moves
                .iter()
                .find(|m| matches!(m, Move::StashToTreasure { .. }))
        })
        .cloned()
        .unwrap_or(Move::EndTurn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rules, BASE_EDGE_ORDER};

    fn fixed_rules() -> Rules {
        let mut rules = Rules::hex();
        rules.radius = 3;
        rules.edge_order = BASE_EDGE_ORDER;
        rules.randomize_edge_order = false;
        rules
    }

    fn fresh_game(seed: u64) -> GameState {
        GameState::setup(vec!["Bot".into(), "Human".into()], fixed_rules(), seed).unwrap()
    }

    #[test]
    fn test_bot_creation() {
        let bot = Bot::new(0, BotDifficulty::Easy);
        assert_eq!(bot.player_id, 0);
        assert_eq!(bot.difficulty, BotDifficulty::Easy);
    }

    #[test]
    fn test_easy_bot_move_is_legal() {
        let game = fresh_game(3);
        let mut bot = Bot::with_seed(0, BotDifficulty::Easy, 1);

        let mv = bot.choose_move(&game).expect("fresh game offers moves");
        assert!(game.is_move_legal(0, &mv));
    }

    #[test]
    fn test_medium_bot_move_is_legal() {
        let game = fresh_game(3);
        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);

        let mv = bot.choose_move(&game).expect("fresh game offers moves");
        assert!(game.is_move_legal(0, &mv));
    }

    #[test]
    fn test_hard_bot_move_is_legal() {
        let game = fresh_game(3);
        let mut bot = Bot::with_seed(0, BotDifficulty::Hard, 1);
        bot.playouts = 2;
        bot.playout_depth = 2;

        let mv = bot.choose_move(&game).expect("fresh game offers moves");
        assert!(game.is_move_legal(0, &mv));
    }

    #[test]
    fn test_bot_returns_none_when_game_over() {
        let mut game = fresh_game(3);
        game.rules.equal_turns = false;
        game.deck.clear();
        game.apply_move(0, Move::EndTurn).unwrap();
        assert!(game.is_game_over().is_some());

        let mut bot = Bot::with_seed(0, BotDifficulty::Easy, 1);
        assert!(bot.choose_move(&game).is_none());
    }

    #[test]
    fn test_medium_bot_prefers_preferred_color() {
        use crate::board::Color;
        use crate::cards::Card;
        use crate::hex::HexCoord;

        let mut game = fresh_game(3);
        // Yellow faces the origin from (0,-1); Red from (-1,1). Only the
        // preferred Yellow placement is worth points.
        game.players[0].prefs =
            crate::player::PlayerPrefs::new(Color::Yellow, Color::Green, Color::Blue).unwrap();
        game.players[0].hand = vec![Card::new(vec![Color::Yellow, Color::Red])];

        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);
        let mv = bot.choose_move(&game).expect("moves exist");
        match mv {
            Move::PlayCard { color, coord, .. } => {
                assert_eq!(color, Color::Yellow);
                assert_eq!(coord, HexCoord::new(0, -1));
            }
            other => panic!("expected a placement, got {other:?}"),
        }
    }
}
