//! Connectivity scoring.
//!
//! Scoring is a pure function of the board, the players' color preferences,
//! and the rules; it can be recomputed at any time and is idempotent. Each
//! color is scored independently:
//!
//! 1. Reachability from the origins runs over the *occupied* graph, so a
//!    path may change color on the way out; origins seed the search without
//!    holding tiles and chain through each other.
//! 2. Reachability from the rim runs over same-color tiles only.
//! 3. A tile of the color scores when both searches reach it; origins never
//!    score.
//! 4. With `shortest_path`, only tiles on a shortest origin-to-rim route
//!    count. With `origin_to_origin`, tiles linking two distinct origins
//!    count as well.

use crate::board::{Board, Color, PlayerId};
use crate::hex::HexCoord;
use crate::player::Player;
use crate::rules::Rules;
use std::collections::{HashMap, HashSet, VecDeque};

/// Final scores keyed by player
pub type ScoreMap = HashMap<PlayerId, i32>;

/// Compute every player's score from the board and their preferences.
pub fn compute_scores(board: &Board, players: &[Player], rules: &Rules) -> ScoreMap {
    let counts = color_counts(board, rules);
    let points = rules.scoring.color_points;
    players
        .iter()
        .map(|p| {
            let score = points[0] * counts[p.prefs.primary as usize]
                + points[1] * counts[p.prefs.secondary as usize]
                + points[2] * counts[p.prefs.tertiary as usize];
            (p.id, score)
        })
        .collect()
}

/// Scoring tile count per color, indexed by `Color as usize`.
pub fn color_counts(board: &Board, rules: &Rules) -> [i32; 6] {
    // Distance layers from the origins over the occupied graph, shared by
    // every color.
    let origin_reach = bfs_layers(board, board.origins(), |c| {
        board.is_origin(c) || board.is_occupied(c)
    });

    let mut counts = [0; 6];
    for color in Color::ALL {
        counts[color as usize] = count_for_color(board, rules, color, &origin_reach);
    }
    counts
}

fn count_for_color(
    board: &Board,
    rules: &Rules,
    color: Color,
    origin_reach: &HashMap<HexCoord, u32>,
) -> i32 {
    let rim_seeds: Vec<HexCoord> = board
        .rim_coords()
        .filter(|&c| board.has_lane(c, color))
        .collect();
    let rim_reach = bfs_layers(board, &rim_seeds, |c| board.has_lane(c, color));

    let connected: Vec<HexCoord> = board
        .coords()
        .filter(|&c| {
            board.has_lane(c, color)
                && origin_reach.contains_key(&c)
                && rim_reach.contains_key(&c)
        })
        .collect();

    let counted: HashSet<HexCoord> = if rules.scoring.shortest_path {
        let best = connected
            .iter()
            .map(|c| origin_reach[c] + rim_reach[c])
            .min();
        match best {
            Some(best) => connected
                .into_iter()
                .filter(|c| origin_reach[c] + rim_reach[c] == best)
                .collect(),
            None => HashSet::new(),
        }
    } else {
        connected.into_iter().collect()
    };

    let mut total = counted.len() as i32;

    if rules.scoring.origin_to_origin && board.origins().len() >= 2 {
        total += origin_to_origin_count(board, color, &counted, rules.scoring.shortest_path);
    }
    total
}

/// Extra credit for tiles linking two distinct origins of the color.
fn origin_to_origin_count(
    board: &Board,
    color: Color,
    counted: &HashSet<HexCoord>,
    shortest_path: bool,
) -> i32 {
    let passable = |c: HexCoord| board.is_origin(c) || board.has_lane(c, color);
    let origins = board.origins();

    if shortest_path {
        // Pairwise distances; a path of d edges crosses d - 1 tiles
        let mut extra = 0;
        for (i, &a) in origins.iter().enumerate() {
            let layers = bfs_layers(board, &[a], passable);
            for &b in origins.iter().skip(i + 1) {
                if let Some(&d) = layers.get(&b) {
                    extra += (d as i32 - 1).max(0);
                }
            }
        }
        extra
    } else {
        // Tiles reachable from two or more origins, minus those already
        // scored
        let mut reached_by: HashMap<HexCoord, u32> = HashMap::new();
        for &origin in origins {
            for (c, _) in bfs_layers(board, &[origin], passable) {
                if board.has_lane(c, color) {
                    *reached_by.entry(c).or_insert(0) += 1;
                }
            }
        }
        reached_by
            .iter()
            .filter(|(c, &n)| n >= 2 && !counted.contains(c))
            .count() as i32
    }
}

/// Multi-source BFS distance layers over cells accepted by `passable`.
/// Seeds are taken as given (distance 0) without consulting the predicate.
fn bfs_layers<F>(board: &Board, seeds: &[HexCoord], passable: F) -> HashMap<HexCoord, u32>
where
    F: Fn(HexCoord) -> bool,
{
    let mut dist: HashMap<HexCoord, u32> = HashMap::new();
    let mut queue = VecDeque::new();
    for &seed in seeds {
        if board.in_bounds(seed) && !dist.contains_key(&seed) {
            dist.insert(seed, 0);
            queue.push_back(seed);
        }
    }
    while let Some(cur) = queue.pop_front() {
        let d = dist[&cur];
        for n in cur.neighbors() {
            if board.in_bounds(n) && passable(n) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}
