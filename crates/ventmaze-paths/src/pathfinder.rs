use log::debug;
use ventmaze_core::{MapModel, MazeError, MazeResult, Point};

use crate::dijkstra::dijkstra_path;
use crate::graph::Graph;
use crate::movement;
use crate::path::Path;

/// Shortest path from `start` to `goal` on `map`, building a fresh graph.
///
/// Use a [`Pathfinder`] to reuse the graph across searches.
pub fn find_shortest_path(start: Point, goal: Point, map: &MapModel) -> Option<Path> {
    dijkstra_path(&Graph::build(map), start, goal)
}

/// The outcome of one search together with the graph it ran on, for
/// callers that want to draw what the engine saw.
#[derive(Debug, Clone)]
pub struct Search<'a> {
    pub start: Point,
    pub goal: Point,
    pub path: Option<Path>,
    pub graph: &'a Graph,
}

impl Search<'_> {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// The path, or [`MazeError::NoPath`].
    pub fn into_path(self) -> MazeResult<Path> {
        self.path.ok_or(MazeError::NoPath {
            start: self.start,
            goal: self.goal,
        })
    }
}

/// A map and its cached navigation graph.
///
/// Searches borrow the pathfinder immutably and keep their own scratch
/// state, so one pathfinder can serve many searches, including from several
/// threads. Replacing the map with [`set_map`](Self::set_map) rebuilds the
/// graph.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    map: MapModel,
    graph: Graph,
}

impl Pathfinder {
    pub fn new(map: MapModel) -> Self {
        let graph = Graph::build(&map);
        Self { map, graph }
    }

    pub fn map(&self) -> &MapModel {
        &self.map
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Swap in a new map and rebuild the graph.
    pub fn set_map(&mut self, map: MapModel) {
        debug!("pathfinder: map replaced, rebuilding graph");
        self.graph = Graph::build(&map);
        self.map = map;
    }

    pub fn find_shortest_path(&self, start: Point, goal: Point) -> Option<Path> {
        dijkstra_path(&self.graph, start, goal)
    }

    pub fn search(&self, start: Point, goal: Point) -> Search<'_> {
        Search {
            start,
            goal,
            path: self.find_shortest_path(start, goal),
            graph: &self.graph,
        }
    }

    /// Search for quest `index`. Fails only on a bad index; an unreachable
    /// goal is `Ok(None)`.
    pub fn quest_path(&self, index: usize) -> MazeResult<Option<Path>> {
        let quest = self.map.quest(index)?;
        Ok(self.find_shortest_path(quest.start, quest.goal))
    }

    pub fn is_movement_blocked(&self, from: Point, to: Point) -> bool {
        movement::is_movement_blocked(from, to, &self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ventmaze_core::IMPASSABLE;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn quest_paths() {
        let map = MapModel::builder(3, 3)
            .quest(p(0, 0), p(2, 2))
            .quest(p(2, 0), p(2, 0))
            .build()
            .unwrap();
        let pf = Pathfinder::new(map);
        assert_eq!(pf.quest_path(0).unwrap().unwrap().cost, 4.0);
        assert_eq!(pf.quest_path(1).unwrap().unwrap().len(), 1);
        assert!(matches!(
            pf.quest_path(2),
            Err(MazeError::InvalidQuestIndex { index: 2, count: 2 })
        ));
    }

    #[test]
    fn search_reports_no_path() {
        let map = MapModel::builder(2, 1)
            .vwall(p(1, 0), IMPASSABLE)
            .build()
            .unwrap();
        let pf = Pathfinder::new(map);
        let search = pf.search(p(0, 0), p(1, 0));
        assert!(!search.found());
        assert_eq!(search.graph.node_count(), 2);
        assert!(matches!(
            search.into_path(),
            Err(MazeError::NoPath { .. })
        ));
    }

    #[test]
    fn set_map_invalidates_graph() {
        let mut pf = Pathfinder::new(MapModel::open(3, 1).unwrap());
        assert_eq!(pf.find_shortest_path(p(0, 0), p(2, 0)).unwrap().cost, 2.0);
        assert!(!pf.is_movement_blocked(p(0, 0), p(1, 0)));

        let walled = MapModel::builder(3, 1)
            .vwall(p(1, 0), IMPASSABLE)
            .build()
            .unwrap();
        pf.set_map(walled);
        assert!(pf.find_shortest_path(p(0, 0), p(2, 0)).is_none());
        assert!(pf.is_movement_blocked(p(0, 0), p(1, 0)));
        assert_eq!(pf.graph(), &Graph::build(pf.map()));
    }

    #[test]
    fn cached_and_fresh_searches_match() {
        let map = MapModel::builder(4, 4)
            .hwall(p(1, 2), IMPASSABLE)
            .vwall(p(2, 1), 5.5)
            .vent(p(0, 3), 2.0)
            .vent(p(3, 0), 2.0)
            .build()
            .unwrap();
        let pf = Pathfinder::new(map.clone());
        for s in map.range() {
            for t in map.range() {
                assert_eq!(
                    pf.find_shortest_path(s, t),
                    find_shortest_path(s, t, &map)
                );
            }
        }
    }

    #[test]
    fn shared_across_threads() {
        let map = MapModel::builder(8, 8)
            .vent(p(0, 0), 3.0)
            .vent(p(7, 7), 3.0)
            .build()
            .unwrap();
        let pf = Pathfinder::new(map);
        let pf = &pf;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| s.spawn(move || pf.find_shortest_path(p(i, 0), p(7, 7)).map(|x| x.cost)))
                .collect();
            for h in handles {
                assert!(h.join().unwrap().is_some());
            }
        });
    }
}
