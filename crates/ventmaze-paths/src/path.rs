use serde::Serialize;
use ventmaze_core::{Cost, Point};

use crate::traits::Pather;

/// A route from a start cell to a goal cell, both included, and what it
/// costs to walk it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    cells: Vec<Point>,
    pub cost: Cost,
}

impl Path {
    /// A path over `cells`, which must hold at least the start cell.
    pub(crate) fn new(cells: Vec<Point>, cost: Cost) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, cost }
    }

    /// The zero-cost path that stays on `p`.
    pub fn single(p: Point) -> Self {
        Self {
            cells: vec![p],
            cost: 0.0,
        }
    }

    pub fn start(&self) -> Point {
        self.cells[0]
    }

    pub fn goal(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    /// Every cell along the route, start first.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (cells minus one).
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.cells.windows(2).map(|w| (w[0], w[1]))
    }

    /// Recompute the cost by summing `pather`'s cheapest step costs in path
    /// order. `None` if some step is not a legal move.
    pub fn replay_cost<P: Pather + ?Sized>(&self, pather: &P) -> Option<Cost> {
        let mut total = 0.0;
        for (from, to) in self.steps() {
            total += pather.step_cost(from, to)?;
        }
        Some(total)
    }
}
