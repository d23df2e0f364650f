//! Lane-flow analysis backing the fork-support rule.
//!
//! Every lane of color `c` at cell `dst` induces a directed unit-capacity
//! edge `(dst - direction_of(c)) -> dst` in a lane multigraph. A *fork* is a
//! node with two or more edges leading to strictly higher rings. The
//! fork-support rule demands that each fork receive at least as much flow
//! from the origins (which supply unbounded flow) as it has outward
//! branches, so a junction can never spread wider than its feed.
//!
//! The check runs Dinic's max-flow over an adjacency structure built fresh
//! per query; the board mutates between queries, so nothing is cached.

use crate::board::{Board, Color};
use crate::hex::HexCoord;
use crate::rules::Rules;
use std::collections::{HashMap, VecDeque};

/// Would the board still satisfy the fork-support rule after placing a lane
/// of `color` at `coord`?
pub fn fork_supported(board: &Board, coord: HexCoord, color: Color, rules: &Rules) -> bool {
    let mut edges = lane_edges(board, rules);
    edges.push((coord - rules.direction_of(color), coord));
    forks_have_support(&edges, board.origins())
}

/// Audit the board as it stands: every existing fork must already be
/// supported. Useful for consistency checks after a sequence of placements.
pub fn board_forks_supported(board: &Board, rules: &Rules) -> bool {
    forks_have_support(&lane_edges(board, rules), board.origins())
}

/// The lane multigraph of the current board, one `(source, dest)` pair per
/// lane
fn lane_edges(board: &Board, rules: &Rules) -> Vec<(HexCoord, HexCoord)> {
    let mut edges = Vec::new();
    for c in board.occupied_coords() {
        for &lane in board.lanes(c) {
            edges.push((c - rules.direction_of(lane), c));
        }
    }
    edges
}

fn forks_have_support(edges: &[(HexCoord, HexCoord)], origins: &[HexCoord]) -> bool {
    let mut ids: HashMap<HexCoord, usize> = HashMap::new();
    for &(src, dst) in edges {
        let n = ids.len();
        ids.entry(src).or_insert(n);
        let n = ids.len();
        ids.entry(dst).or_insert(n);
    }
    for &origin in origins {
        let n = ids.len();
        ids.entry(origin).or_insert(n);
    }

    let mut outward: HashMap<usize, u32> = HashMap::new();
    for &(src, dst) in edges {
        if dst.ring() > src.ring() {
            *outward.entry(ids[&src]).or_insert(0) += 1;
        }
    }

    let source = ids.len();
    // Origins supply unbounded flow; one more than the edge count is
    // effectively infinite since every lane carries at most one unit.
    let unbounded = edges.len() as u32 + 1;

    for (&fork, &branches) in &outward {
        if branches < 2 {
            continue;
        }
        let mut net = FlowNetwork::new(ids.len() + 1);
        for &(src, dst) in edges {
            net.add_edge(ids[&src], ids[&dst], 1);
        }
        for &origin in origins {
            net.add_edge(source, ids[&origin], unbounded);
        }
        if net.max_flow(source, fork) < branches {
            return false;
        }
    }
    true
}

/// Dinic's max-flow over an edge-list adjacency structure. Reverse edges are
/// stored at `edge_id ^ 1`.
struct FlowNetwork {
    adj: Vec<Vec<usize>>,
    to: Vec<usize>,
    cap: Vec<u32>,
}

impl FlowNetwork {
    fn new(nodes: usize) -> Self {
        Self {
            adj: vec![Vec::new(); nodes],
            to: Vec::new(),
            cap: Vec::new(),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: u32) {
        self.adj[from].push(self.to.len());
        self.to.push(to);
        self.cap.push(cap);
        self.adj[to].push(self.to.len());
        self.to.push(from);
        self.cap.push(0);
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> u32 {
        let mut flow = 0;
        loop {
            let levels = self.bfs_levels(source);
            if levels[sink].is_none() {
                return flow;
            }
            let mut iter = vec![0usize; self.adj.len()];
            loop {
                let pushed = self.blocking_flow(source, sink, u32::MAX, &levels, &mut iter);
                if pushed == 0 {
                    break;
                }
                flow += pushed;
            }
        }
    }

    fn bfs_levels(&self, source: usize) -> Vec<Option<u32>> {
        let mut levels = vec![None; self.adj.len()];
        levels[source] = Some(0);
        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            let level = match levels[u] {
                Some(l) => l,
                None => continue,
            };
            for &e in &self.adj[u] {
                let v = self.to[e];
                if self.cap[e] > 0 && levels[v].is_none() {
                    levels[v] = Some(level + 1);
                    queue.push_back(v);
                }
            }
        }
        levels
    }

    fn blocking_flow(
        &mut self,
        u: usize,
        sink: usize,
        limit: u32,
        levels: &[Option<u32>],
        iter: &mut [usize],
    ) -> u32 {
        if u == sink {
            return limit;
        }
        while iter[u] < self.adj[u].len() {
            let e = self.adj[u][iter[u]];
            let v = self.to[e];
            let advances = match (levels[u], levels[v]) {
                (Some(lu), Some(lv)) => lv == lu + 1,
                _ => false,
            };
            if self.cap[e] > 0 && advances {
                let pushed = self.blocking_flow(v, sink, limit.min(self.cap[e]), levels, iter);
                if pushed > 0 {
                    self.cap[e] -= pushed;
                    self.cap[e ^ 1] += pushed;
                    return pushed;
                }
            }
            iter[u] += 1;
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_rules() -> Rules {
        let mut rules = Rules::path();
        rules.edge_order = crate::rules::BASE_EDGE_ORDER;
        rules.randomize_edge_order = false;
        rules
    }

    /// Yellow points North in the base edge order, so a chain of Yellow
    /// lanes along the North axis is fed from the center origin.
    fn northward(n: i32) -> HexCoord {
        HexCoord::new(0, -n)
    }

    #[test]
    fn test_unforked_chain_is_supported() {
        let rules = path_rules();
        let mut board = Board::new(4, vec![HexCoord::new(0, 0)]);
        board.push_lane(northward(1), Color::Yellow);
        board.push_lane(northward(2), Color::Yellow);

        assert!(board_forks_supported(&board, &rules));
        assert!(fork_supported(&board, northward(3), Color::Yellow, &rules));
    }

    #[test]
    fn test_single_feed_fork_is_rejected() {
        let rules = path_rules();
        let mut board = Board::new(4, vec![HexCoord::new(0, 0)]);
        // One lane into (0,-1) and one branch already leaving it outward
        board.push_lane(northward(1), Color::Yellow);
        board.push_lane(northward(2), Color::Yellow);

        // A second outward branch from (0,-1): Green points NE, so a Green
        // lane at (1,-2) also sources from (0,-1)
        assert!(!fork_supported(
            &board,
            HexCoord::new(1, -2),
            Color::Green,
            &rules
        ));
    }

    #[test]
    fn test_double_feed_fork_is_supported() {
        let rules = path_rules();
        let mut board = Board::new(4, vec![HexCoord::new(0, 0)]);
        // Two parallel Yellow lanes feed (0,-1) from the origin
        board.push_lane(northward(1), Color::Yellow);
        board.push_lane(northward(1), Color::Yellow);
        board.push_lane(northward(2), Color::Yellow);

        assert!(fork_supported(
            &board,
            HexCoord::new(1, -2),
            Color::Green,
            &rules
        ));
    }

    #[test]
    fn test_fork_at_origin_is_always_supported() {
        let rules = path_rules();
        let mut board = Board::new(4, vec![HexCoord::new(0, 0)]);
        // Two branches leaving the origin itself
        board.push_lane(northward(1), Color::Yellow);

        assert!(fork_supported(
            &board,
            HexCoord::new(1, -1),
            Color::Green,
            &rules
        ));
    }

    #[test]
    fn test_dinic_on_hand_built_network() {
        // source -> a -> sink with parallel unit edges
        let mut net = FlowNetwork::new(3);
        net.add_edge(0, 1, 1);
        net.add_edge(0, 1, 1);
        net.add_edge(1, 2, 1);
        net.add_edge(1, 2, 1);
        net.add_edge(1, 2, 1);
        assert_eq!(net.max_flow(0, 2), 2);
    }
}
