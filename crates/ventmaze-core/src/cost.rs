//! Edge and vent costs.
//!
//! Costs are non-negative `f64` values. [`IMPASSABLE`] (positive infinity)
//! marks a wall that can never be crossed or a vent that cannot be used.

use serde::{Deserialize, Serialize};

/// Cost of crossing an edge or using a vent.
pub type Cost = f64;

/// Sentinel for a blocking wall or a disabled vent.
pub const IMPASSABLE: Cost = f64::INFINITY;

/// Cost of a step across an edge with no wall on it.
pub const DEFAULT_STEP_COST: Cost = 1.0;

/// Cost of climbing over a low wall.
pub const LOW_WALL_COST: Cost = 5.5;

/// Usage cost of a vent declared without one.
pub const DEFAULT_VENT_COST: Cost = 10.0;

/// Input costs at or above this value are read as [`IMPASSABLE`]. Maze files
/// written by single-precision tools serialize "blocking" as `f32::MAX`.
pub const IMPASSABLE_THRESHOLD: Cost = f32::MAX as f64;

const LOW_WALL_EPSILON: Cost = 1e-4;

/// Whether `cost` is the impassable sentinel.
#[inline]
pub fn is_impassable(cost: Cost) -> bool {
    cost == IMPASSABLE
}

/// Map a raw input cost to an engine cost.
///
/// Huge values become [`IMPASSABLE`]. Returns `None` for negative or NaN
/// input, which no search can handle.
pub fn normalize_cost(raw: f64) -> Option<Cost> {
    if raw.is_nan() || raw < 0.0 {
        return None;
    }
    if raw >= IMPASSABLE_THRESHOLD {
        Some(IMPASSABLE)
    } else {
        Some(raw)
    }
}

/// How a wall presents itself to a walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    /// No wall: a normal step.
    Open,
    /// A low wall that can be climbed at [`LOW_WALL_COST`].
    Low,
    /// A blocking wall.
    Solid,
    /// Any other crossing cost.
    Weighted,
}

impl WallKind {
    /// Classify an edge cost.
    pub fn from_cost(cost: Cost) -> Self {
        if is_impassable(cost) {
            Self::Solid
        } else if (cost - LOW_WALL_COST).abs() < LOW_WALL_EPSILON {
            Self::Low
        } else if cost == DEFAULT_STEP_COST {
            Self::Open
        } else {
            Self::Weighted
        }
    }
}
