//! Placement legality.
//!
//! `can_place` is the single predicate deciding whether a lane may be
//! placed; every failure is a plain `false`, never an error. `apply_place`
//! mutates the board without re-checking, so callers are expected to hold
//! the predicate before applying (the game layer does this on every move).

use crate::board::{Board, Color};
use crate::cards::Card;
use crate::flow;
use crate::hex::HexCoord;
use crate::rules::{DirectionRule, RotationPolicy, Rules};

/// Rotation deltas a rotate move may use; 0 and 3 (a half turn) are
/// deliberately excluded.
pub const ROTATION_DELTAS: [u8; 4] = [1, 2, 4, 5];

/// Whether a lane of `color` may be placed at `coord`.
pub fn can_place(board: &Board, coord: HexCoord, color: Color, rules: &Rules) -> bool {
    if !board.in_bounds(coord) {
        return false;
    }
    if board.is_origin(coord) {
        return false;
    }
    if board.lanes(coord).len() + 1 > rules.capacity(coord.ring()) {
        return false;
    }
    // Global connectivity: an occupied or origin neighbor, except on an
    // entirely empty board (first-move exception)
    let connected = coord
        .neighbors()
        .iter()
        .any(|&n| board.is_origin(n) || board.is_occupied(n));
    if !connected && board.any_lane() {
        return false;
    }
    if !direction_rule_ok(board, coord, color, rules) {
        return false;
    }
    if rules.placement.no_build_from_rim {
        let source = coord - rules.direction_of(color);
        if source.ring() == board.radius() {
            return false;
        }
    }
    if rules.placement.no_intersect {
        let source = coord - rules.direction_of(color);
        if board
            .lanes(coord)
            .iter()
            .any(|&lane| coord - rules.direction_of(lane) != source)
        {
            return false;
        }
    }
    if rules.placement.fork_support && !flow::fork_supported(board, coord, color, rules) {
        return false;
    }
    true
}

fn direction_rule_ok(board: &Board, coord: HexCoord, color: Color, rules: &Rules) -> bool {
    match rules.placement.direction_rule {
        DirectionRule::None => true,
        DirectionRule::OutwardOnly => outward_ok(board, coord),
        DirectionRule::DirOnly => dir_ok(board, coord, color, rules),
        DirectionRule::DirOrOutward => {
            outward_ok(board, coord) || dir_ok(board, coord, color, rules)
        }
    }
}

/// Some occupied neighbor sits on the same or a lower ring
fn outward_ok(board: &Board, coord: HexCoord) -> bool {
    coord
        .neighbors()
        .iter()
        .any(|&n| board.is_occupied(n) && n.ring() <= coord.ring())
}

/// Some occupied or origin neighbor faces `coord` with an edge of the
/// placed color. Origins sit at rotation 0.
fn dir_ok(board: &Board, coord: HexCoord, color: Color, rules: &Rules) -> bool {
    coord.neighbors().iter().any(|&n| {
        if !board.is_origin(n) && !board.is_occupied(n) {
            return false;
        }
        match HexCoord::edge_index_for(coord - n) {
            Some(edge) => rules.edge_color(edge, board.rotation(n)) == color,
            None => false,
        }
    })
}

/// Append the lane. No legality check; see [`can_place`].
pub fn apply_place(board: &mut Board, coord: HexCoord, color: Color) {
    board.push_lane(coord, color);
}

/// Whether the tile at `coord` may be rotated by `delta`, paying with
/// `discard`.
pub fn can_rotate(board: &Board, coord: HexCoord, delta: u8, discard: &Card, rules: &Rules) -> bool {
    if board.lanes(coord).is_empty() {
        return false;
    }
    if !ROTATION_DELTAS.contains(&delta) {
        return false;
    }
    match rules.placement.rotation_policy {
        RotationPolicy::Disabled => false,
        RotationPolicy::Any => true,
        RotationPolicy::MatchColor => board
            .lanes(coord)
            .iter()
            .any(|&lane| discard.has_color(lane)),
    }
}

/// Apply the rotation. No legality check; see [`can_rotate`].
pub fn apply_rotate(board: &mut Board, coord: HexCoord, delta: u8) {
    board.rotate_tile(coord, delta);
}
