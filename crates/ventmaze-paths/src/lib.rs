//! Shortest paths through ventmaze grids.
//!
//! A maze ([`ventmaze_core::MapModel`]) is turned into an explicit
//! [`Graph`]: one node per cell, an edge for every crossable cell boundary
//! (weighted by its wall cost) and a teleport edge between every pair of
//! vents (weighted by the vent you leave from). [`dijkstra_path`] finds the
//! cheapest route through it.
//!
//! - [`find_shortest_path`]: one-off search, builds the graph each call
//! - [`Pathfinder`]: caches the graph for repeated searches on one map
//! - [`is_movement_blocked`] / [`step_cost`]: the same rules, one step at
//!   a time, read directly off the map
//! - [`PathWalker`]: replays a path move by move
//!
//! # Searching
//!
//! [`dijkstra_path`] is generic over [`Pather`], implemented by both
//! [`Graph`] and `MapModel`; both give the same costs.

mod dijkstra;
mod graph;
mod movement;
mod path;
mod pathfinder;
mod traits;
mod walker;

pub use dijkstra::dijkstra_path;
pub use graph::{Edge, EdgeId, EdgeKind, Graph, Node};
pub use movement::{StepKind, classify_step, is_movement_blocked, path_cost, step, step_cost};
pub use path::Path;
pub use pathfinder::{Pathfinder, Search, find_shortest_path};
pub use traits::{Pather, Step};
pub use walker::{Direction, PathWalker, WalkEvent};
