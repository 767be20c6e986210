use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use ventmaze_core::{Cost, IMPASSABLE, Point, is_impassable};

use crate::path::Path;
use crate::traits::{Pather, Step};

// ---------------------------------------------------------------------------
// Per-search node state
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: Cost,
    parent: usize,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: IMPASSABLE,
            parent: usize::MAX,
            closed: false,
        }
    }
}

/// Frontier entry, ordered by `g` then by insertion sequence.
#[derive(Clone, Copy)]
struct NodeRef {
    idx: usize,
    g: Cost,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest g first, and the
        // earliest pushed among equals.
        other
            .g
            .total_cmp(&self.g)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// Minimum-cost path from `start` to `goal` by uniform-cost search.
///
/// Returns `None` when either endpoint is outside `pather.range()` or the
/// goal cannot be reached. `start == goal` yields a single-cell path of
/// cost 0. Equal-cost frontier entries are expanded in insertion order, so
/// results are deterministic.
///
/// All search state is local to the call.
pub fn dijkstra_path<P: Pather + ?Sized>(pather: &P, start: Point, goal: Point) -> Option<Path> {
    let rng = pather.range();
    let (Some(start_idx), Some(goal_idx)) = (rng.index(start), rng.index(goal)) else {
        debug!("search {start} -> {goal}: endpoint outside {rng}");
        return None;
    };

    if start_idx == goal_idx {
        return Some(Path::single(start));
    }

    let mut nodes = vec![Node::default(); rng.len()];
    nodes[start_idx].g = 0.0;

    let mut seq: u64 = 0;
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    open.push(NodeRef {
        idx: start_idx,
        g: 0.0,
        seq,
    });

    let mut nbuf: Vec<Step> = Vec::with_capacity(8);
    let mut expanded = 0usize;

    let found = 'search: loop {
        let Some(current) = open.pop() else {
            break 'search false;
        };

        let ci = current.idx;

        // Skip stale entries.
        if nodes[ci].closed || current.g > nodes[ci].g {
            continue;
        }

        if ci == goal_idx {
            break 'search true;
        }

        nodes[ci].closed = true;
        expanded += 1;
        let current_point = rng.point(ci);

        nbuf.clear();
        pather.successors(current_point, &mut nbuf);

        for step in nbuf.iter() {
            let Some(ni) = rng.index(step.to) else {
                continue;
            };
            if is_impassable(step.cost) {
                continue;
            }
            let n = &mut nodes[ni];
            if n.closed {
                continue;
            }
            let tentative = current.g + step.cost;
            if tentative >= n.g {
                continue;
            }
            n.g = tentative;
            n.parent = ci;
            seq += 1;
            open.push(NodeRef {
                idx: ni,
                g: tentative,
                seq,
            });
        }
    };

    if !found {
        debug!("search {start} -> {goal}: no path ({expanded} nodes expanded)");
        return None;
    }

    // Reconstruct path.
    let mut cells = Vec::new();
    let mut ci = goal_idx;
    while ci != usize::MAX {
        cells.push(rng.point(ci));
        ci = nodes[ci].parent;
    }
    cells.reverse();

    let cost = nodes[goal_idx].g;
    debug!(
        "search {start} -> {goal}: {} cells, cost {cost} ({expanded} nodes expanded)",
        cells.len()
    );
    Some(Path::new(cells, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::{Rng, RngExt, SeedableRng};
    use ventmaze_core::{LOW_WALL_COST, MapModel, Range};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn solve(map: &MapModel, start: Point, goal: Point) -> Option<Path> {
        dijkstra_path(&Graph::build(map), start, goal)
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let map = MapModel::open(3, 3).unwrap();
        let path = solve(&map, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.cost, 4.0);
        assert_eq!(path.start(), p(0, 0));
        assert_eq!(path.goal(), p(2, 2));
        for (a, b) in path.steps() {
            assert!(a.is_adjacent(b));
        }
    }

    #[test]
    fn routes_around_blocked_edge() {
        let map = MapModel::builder(3, 3)
            .hwall(p(1, 1), IMPASSABLE)
            .build()
            .unwrap();
        let path = solve(&map, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(path.cost, 4.0);
        assert_eq!(path.len(), 5);
        let crosses = path
            .steps()
            .any(|(a, b)| (a, b) == (p(1, 0), p(1, 1)) || (a, b) == (p(1, 1), p(1, 0)));
        assert!(!crosses);
    }

    #[test]
    fn prefers_teleport_when_cheaper() {
        let map = MapModel::builder(3, 3)
            .vent(p(0, 0), 2.0)
            .vent(p(2, 2), 2.0)
            .build()
            .unwrap();
        let path = solve(&map, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(path.cost, 2.0);
        assert_eq!(path.cells(), &[p(0, 0), p(2, 2)]);
    }

    #[test]
    fn walks_when_teleport_is_dearer() {
        let map = MapModel::builder(3, 3)
            .vent(p(0, 0), 10.0)
            .vent(p(2, 2), 10.0)
            .build()
            .unwrap();
        let path = solve(&map, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(path.cost, 4.0);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn climbs_low_wall_when_detour_costs_more() {
        // A 1-wide corridor: the only way east is over the low wall.
        let map = MapModel::builder(3, 1)
            .vwall(p(1, 0), LOW_WALL_COST)
            .build()
            .unwrap();
        let path = solve(&map, p(0, 0), p(2, 0)).unwrap();
        assert_eq!(path.cost, LOW_WALL_COST + 1.0);
    }

    #[test]
    fn start_equals_goal() {
        let map = MapModel::open(3, 3).unwrap();
        let path = solve(&map, p(1, 1), p(1, 1)).unwrap();
        assert_eq!(path.cells(), &[p(1, 1)]);
        assert_eq!(path.cost, 0.0);
        assert_eq!(path.moves(), 0);
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let map = MapModel::builder(3, 3)
            .hwall(p(2, 2), IMPASSABLE)
            .vwall(p(2, 2), IMPASSABLE)
            .build()
            .unwrap();
        assert!(solve(&map, p(0, 0), p(2, 2)).is_none());
        assert!(solve(&map, p(2, 2), p(0, 0)).is_none());
    }

    #[test]
    fn outside_endpoints_yield_none() {
        let map = MapModel::open(3, 3).unwrap();
        assert!(solve(&map, p(-1, 0), p(2, 2)).is_none());
        assert!(solve(&map, p(0, 0), p(3, 3)).is_none());
    }

    #[test]
    fn graph_and_map_searches_agree() {
        let map = random_map(&mut rand::rngs::StdRng::seed_from_u64(7), 6, 5);
        let graph = Graph::build(&map);
        for s in map.range() {
            for t in [p(0, 0), p(5, 4), p(3, 2)] {
                let a = dijkstra_path(&graph, s, t).map(|x| x.cost);
                let b = dijkstra_path(&map, s, t).map(|x| x.cost);
                assert_eq!(a, b, "{s} -> {t}");
            }
        }
    }

    #[test]
    fn reported_cost_replays_exactly() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let map = random_map(&mut rng, 5, 5);
            let graph = Graph::build(&map);
            for s in map.range() {
                let Some(path) = dijkstra_path(&graph, s, p(4, 4)) else {
                    continue;
                };
                assert_eq!(path.replay_cost(&graph), Some(path.cost));
                assert_eq!(path.replay_cost(&map), Some(path.cost));
            }
        }
    }

    #[test]
    fn optimal_against_brute_force() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..30 {
            let map = random_map(&mut rng, 3, 3);
            let graph = Graph::build(&map);
            for s in map.range() {
                for t in map.range() {
                    let best = brute_force(&graph, s, t);
                    let got = dijkstra_path(&graph, s, t).map(|x| x.cost);
                    match (best, got) {
                        (None, None) => {}
                        (Some(b), Some(g)) => assert!((b - g).abs() < 1e-9, "{s} -> {t}"),
                        other => panic!("{s} -> {t}: {other:?}"),
                    }
                }
            }
        }
    }

    /// Cheapest simple path by exhaustive DFS.
    fn brute_force(graph: &Graph, s: Point, t: Point) -> Option<Cost> {
        fn dfs(
            g: &Graph,
            cur: Point,
            t: Point,
            cost: Cost,
            seen: &mut Vec<Point>,
            best: &mut Option<Cost>,
        ) {
            if cur == t {
                *best = Some(best.map_or(cost, |b| b.min(cost)));
                return;
            }
            let mut buf = Vec::new();
            g.successors(cur, &mut buf);
            for step in buf {
                if seen.contains(&step.to) {
                    continue;
                }
                seen.push(step.to);
                dfs(g, step.to, t, cost + step.cost, seen, best);
                seen.pop();
            }
        }
        let mut best = None;
        dfs(graph, s, t, 0.0, &mut vec![s], &mut best);
        best
    }

    fn random_map(rng: &mut impl Rng, w: i32, h: i32) -> MapModel {
        const COSTS: [Cost; 4] = [1.0, LOW_WALL_COST, IMPASSABLE, 2.0];
        let mut b = MapModel::builder(w, h);
        for q in Range::new(0, 0, w, h) {
            if rng.random_range(0..3u32) == 0 {
                b = b.hwall(q, COSTS[rng.random_range(0..COSTS.len())]);
            }
            if rng.random_range(0..3u32) == 0 {
                b = b.vwall(q, COSTS[rng.random_range(0..COSTS.len())]);
            }
            if rng.random_range(0..8u32) == 0 {
                b = b.vent(q, rng.random_range(1..6u32) as Cost);
            }
        }
        b.build().unwrap()
    }
}
