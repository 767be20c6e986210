//! Single-step movement rules, read straight off a [`MapModel`].
//!
//! These are the same rules [`Graph::build`](crate::Graph::build) encodes:
//! a step between 4-adjacent cells costs the wall cost on their shared edge
//! unless that wall is impassable, and any vent can jump to any other vent
//! for the cost of the vent it leaves from.

use serde::Serialize;
use ventmaze_core::{Cost, DEFAULT_STEP_COST, MapModel, Point, Range, is_impassable};

use crate::traits::{Pather, Step};

/// How a single step is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Ordinary step to a neighbour.
    Walk,
    /// Step to a neighbour over a wall that costs extra.
    Climb,
    /// Jump between two vents.
    Teleport,
}

fn adjacent_cost(map: &MapModel, from: Point, to: Point) -> Option<Cost> {
    map.edge_cost(from, to).filter(|&c| !is_impassable(c))
}

fn teleport_cost(map: &MapModel, from: Point, to: Point) -> Option<Cost> {
    if from == to || !map.has_vent(from) || !map.has_vent(to) {
        return None;
    }
    let c = map.vent_cost(from);
    (!is_impassable(c)).then_some(c)
}

/// Cheapest legal way to step from `from` to `to`, and how it is made.
pub fn step(from: Point, to: Point, map: &MapModel) -> Option<(Cost, StepKind)> {
    if !map.contains(from) || !map.contains(to) {
        return None;
    }
    let walk = adjacent_cost(map, from, to).map(|c| {
        let kind = if c > DEFAULT_STEP_COST {
            StepKind::Climb
        } else {
            StepKind::Walk
        };
        (c, kind)
    });
    let jump = teleport_cost(map, from, to).map(|c| (c, StepKind::Teleport));
    match (walk, jump) {
        (Some(w), Some(j)) => Some(if j.0 < w.0 { j } else { w }),
        (w, j) => w.or(j),
    }
}

/// Whether moving from `from` to `to` right now is illegal.
///
/// A move is legal when both cells are on the grid and they are either
/// 4-adjacent across a crossable edge, or both vents with a usable origin
/// vent. Staying in place is not a move.
pub fn is_movement_blocked(from: Point, to: Point, map: &MapModel) -> bool {
    step(from, to, map).is_none()
}

/// Cost of the cheapest legal single step, `None` if blocked.
pub fn step_cost(from: Point, to: Point, map: &MapModel) -> Option<Cost> {
    step(from, to, map).map(|(c, _)| c)
}

/// How the step `from -> to` is made, `None` if blocked.
pub fn classify_step(from: Point, to: Point, map: &MapModel) -> Option<StepKind> {
    step(from, to, map).map(|(_, k)| k)
}

/// Total cost of walking `cells` in order; `None` if any step is blocked.
/// A path with fewer than two cells costs nothing.
pub fn path_cost(cells: &[Point], map: &MapModel) -> Option<Cost> {
    let mut total = 0.0;
    for w in cells.windows(2) {
        total += step_cost(w[0], w[1], map)?;
    }
    Some(total)
}

/// Search directly over the map, without building a [`crate::Graph`].
impl Pather for MapModel {
    fn range(&self) -> Range {
        MapModel::range(self)
    }

    fn successors(&self, p: Point, buf: &mut Vec<Step>) {
        if !self.contains(p) {
            return;
        }
        for n in p.neighbors_4() {
            if !self.contains(n) {
                continue;
            }
            if let Some(cost) = adjacent_cost(self, p, n) {
                buf.push(Step { to: n, cost });
            }
        }
        if self.has_vent(p) {
            let cost = self.vent_cost(p);
            if !is_impassable(cost) {
                buf.extend(self.other_vents(p).map(|to| Step { to, cost }));
            }
        }
    }

    fn step_cost(&self, from: Point, to: Point) -> Option<Cost> {
        step_cost(from, to, self)
    }
}
