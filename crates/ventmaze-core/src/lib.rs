//! **ventmaze-core**: maze description types.
//!
//! This crate provides the data the pathfinding engine works on: geometry
//! primitives, edge and vent costs, the JSON maze format, and the immutable
//! [`MapModel`] built from it.

pub mod cost;
pub mod error;
pub mod format;
pub mod geom;
pub mod map;

pub use cost::{
    Cost, DEFAULT_STEP_COST, DEFAULT_VENT_COST, IMPASSABLE, LOW_WALL_COST, WallKind,
    is_impassable,
};
pub use error::{MazeError, MazeResult};
pub use format::{MazeFile, QuestSpec, VentSpec, WallSpec};
pub use geom::{Point, Range};
pub use map::{MAX_CELLS, MapModel, MapModelBuilder, Quest, Vent};
