//! Step-by-step playback of a path, and free-form movement.
//!
//! A [`PathWalker`] owns a position. Following a path re-checks every step
//! against the map before taking it, so a path computed on a stale map stops
//! at the first blocked step instead of walking through a wall.

use log::{debug, warn};
use ventmaze_core::{Cost, MapModel, Point};

use crate::movement::{self, StepKind};
use crate::path::Path;

/// Cardinal direction for manual movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit offset. North is +y.
    pub const fn offset(self) -> Point {
        match self {
            Self::North => Point::new(0, 1),
            Self::East => Point::new(1, 0),
            Self::South => Point::new(0, -1),
            Self::West => Point::new(-1, 0),
        }
    }
}

/// What one [`PathWalker::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkEvent {
    /// Took move number `step` of `total`.
    Moved {
        from: Point,
        to: Point,
        kind: StepKind,
        cost: Cost,
        step: usize,
        total: usize,
    },
    /// The next cell could not be entered; following stopped.
    Blocked { at: Point },
    /// The last cell was reached. Reported once per path.
    Completed { moves: usize },
    /// Not following a path.
    Idle,
}

/// Walks a path one move at a time.
#[derive(Debug, Clone)]
pub struct PathWalker {
    pos: Point,
    path: Vec<Point>,
    index: usize,
    following: bool,
    completed: bool,
    spent: Cost,
}

impl PathWalker {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            path: Vec::new(),
            index: 0,
            following: false,
            completed: false,
            spent: 0.0,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Move count of the current path.
    pub fn total_steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of the next move (1-based); 0 when not following.
    pub fn current_step(&self) -> usize {
        if self.following { self.index } else { 0 }
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Cost of the moves taken so far.
    pub fn spent(&self) -> Cost {
        self.spent
    }

    /// Start following `path` from its first cell.
    pub fn set_path(&mut self, path: &Path) {
        self.path = path.cells().to_vec();
        self.pos = path.start();
        self.index = 1;
        self.following = true;
        self.completed = false;
        self.spent = 0.0;
        debug!(
            "walker: following {} cells, {} moves",
            self.path.len(),
            self.total_steps()
        );
    }

    /// Take the next move of the path.
    pub fn advance(&mut self, map: &MapModel) -> WalkEvent {
        if !self.following {
            return WalkEvent::Idle;
        }
        if self.index >= self.path.len() {
            self.following = false;
            self.completed = true;
            let moves = self.total_steps();
            debug!("walker: path completed in {moves} moves");
            return WalkEvent::Completed { moves };
        }

        let from = self.pos;
        let to = self.path[self.index];
        match movement::step(from, to, map) {
            Some((cost, kind)) => {
                let step = self.index;
                self.pos = to;
                self.spent += cost;
                self.index += 1;
                WalkEvent::Moved {
                    from,
                    to,
                    kind,
                    cost,
                    step,
                    total: self.total_steps(),
                }
            }
            None => {
                warn!("walker: path blocked at {to}");
                self.following = false;
                WalkEvent::Blocked { at: to }
            }
        }
    }

    /// Move to `to` if the map allows it. Stops any path being followed.
    pub fn try_move(&mut self, to: Point, map: &MapModel) -> bool {
        self.following = false;
        match movement::step_cost(self.pos, to, map) {
            Some(cost) => {
                self.pos = to;
                self.spent += cost;
                true
            }
            None => false,
        }
    }

    /// Move one cell in `dir` if the map allows it.
    pub fn try_step(&mut self, dir: Direction, map: &MapModel) -> bool {
        self.try_move(self.pos + dir.offset(), map)
    }
}
