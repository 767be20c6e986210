//! The maze map model: grid size, wall costs, vents and quests.
//!
//! A [`MapModel`] is immutable once built. All coordinates are normalized
//! grid coordinates in `[0, width) × [0, height)`; [`MapModel::origin`]
//! records where cell `(0, 0)` sits in the file that described it.
//!
//! Out-of-range lookups never fail: wall costs fall back to
//! [`DEFAULT_STEP_COST`] and vent lookups report "no vent". Use
//! [`MapModel::check`] where a strict bounds check is needed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use log::{debug, info, warn};

use crate::cost::{Cost, DEFAULT_STEP_COST, IMPASSABLE, WallKind, normalize_cost};
use crate::error::{MazeError, MazeResult};
use crate::format::MazeFile;
use crate::geom::{Point, Range};

/// A vent cell and what it costs to leave through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vent {
    pub pos: Point,
    pub cost: Cost,
}

/// A start/goal pair in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    pub start: Point,
    pub goal: Point,
}

/// Static description of a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MapModel {
    range: Range,
    origin: Point,
    hwalls: HashMap<Point, Cost>,
    vwalls: HashMap<Point, Cost>,
    vents: Vec<Vent>,
    vent_index: HashMap<Point, usize>,
    quests: Vec<Quest>,
}

impl MapModel {
    /// Start building a `width × height` map.
    pub fn builder(width: i32, height: i32) -> MapModelBuilder {
        MapModelBuilder::new(width, height)
    }

    /// An open `width × height` map with no walls, vents or quests.
    pub fn open(width: i32, height: i32) -> MazeResult<Self> {
        Self::builder(width, height).build()
    }

    /// Build a map from a parsed maze file.
    ///
    /// The grid is the bounding box of all walls, the way maze files are
    /// authored: a horizontal wall at `(x, y)` spans `x..=x+1` at row line
    /// `y`, a vertical wall spans `y..=y+1` at column line `x`. Files
    /// without walls use their declared `width`/`height` from `(0, 0)`.
    /// Vents and quests are shifted by the same origin.
    pub fn from_file(file: &MazeFile) -> MazeResult<Self> {
        let (origin, width, height) = match wall_bounds(file)? {
            Some((min, max)) => {
                let size = max.checked_sub(min).ok_or_else(|| {
                    MazeError::InvalidMap(format!("walls from {min} to {max} span too far"))
                })?;
                (min, size.x, size.y)
            }
            None => (Point::ZERO, file.width, file.height),
        };
        debug!("maze bounds: origin {origin}, {width}x{height}");

        let local = |p: Point| {
            p.checked_sub(origin).ok_or_else(|| {
                MazeError::InvalidMap(format!("{p} is too far from the maze origin {origin}"))
            })
        };
        let mut b = MapModelBuilder::new(width, height).origin(origin);
        for w in &file.hwalls {
            b = b.hwall(local(Point::new(w.x, w.y))?, w.cost);
        }
        for w in &file.vwalls {
            b = b.vwall(local(Point::new(w.x, w.y))?, w.cost);
        }
        for v in &file.vents {
            b = b.vent(local(Point::new(v.x, v.y))?, v.cost);
        }
        for q in &file.quests {
            b = b.quest(local(q.from)?, local(q.to)?);
        }
        b.build()
    }

    /// Parse a JSON maze document into a map.
    pub fn from_json(json: &str) -> MazeResult<Self> {
        Self::from_file(&MazeFile::from_json(json)?)
    }

    /// Load a JSON maze file into a map.
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let map = Self::from_file(&MazeFile::load(path)?)?;
        info!(
            "map loaded: {} ({}x{}, {} vents, {} quests)",
            path.display(),
            map.width(),
            map.height(),
            map.vents.len(),
            map.quests.len()
        );
        Ok(map)
    }

    // -----------------------------------------------------------------------
    // Dimensions
    // -----------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// The grid rectangle `[0, 0)-(width, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// File coordinates of grid cell `(0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Convert a grid cell back to file coordinates.
    #[inline]
    pub fn to_file_coords(&self, p: Point) -> Point {
        p + self.origin
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Return `p` if it is on the grid, [`MazeError::OutOfRange`] otherwise.
    pub fn check(&self, p: Point) -> MazeResult<Point> {
        if self.contains(p) {
            Ok(p)
        } else {
            Err(MazeError::OutOfRange {
                pos: p,
                range: self.range,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Cost of crossing the edge between `p` and `p + (0, -1)`.
    pub fn horizontal_edge_cost(&self, p: Point) -> Cost {
        self.hwalls.get(&p).copied().unwrap_or(DEFAULT_STEP_COST)
    }

    /// Cost of crossing the edge between `p` and `p + (-1, 0)`.
    pub fn vertical_edge_cost(&self, p: Point) -> Cost {
        self.vwalls.get(&p).copied().unwrap_or(DEFAULT_STEP_COST)
    }

    /// Whether a wall costing more than a normal step sits below `p`.
    pub fn has_horizontal_wall(&self, p: Point) -> bool {
        self.horizontal_edge_cost(p) > DEFAULT_STEP_COST
    }

    /// Whether a wall costing more than a normal step sits left of `p`.
    pub fn has_vertical_wall(&self, p: Point) -> bool {
        self.vertical_edge_cost(p) > DEFAULT_STEP_COST
    }

    pub fn horizontal_wall_kind(&self, p: Point) -> WallKind {
        WallKind::from_cost(self.horizontal_edge_cost(p))
    }

    pub fn vertical_wall_kind(&self, p: Point) -> WallKind {
        WallKind::from_cost(self.vertical_edge_cost(p))
    }

    /// Cost of the edge between two 4-adjacent cells, or `None` if they are
    /// not adjacent. Bounds are not checked.
    pub fn edge_cost(&self, a: Point, b: Point) -> Option<Cost> {
        match (b.x.checked_sub(a.x)?, b.y.checked_sub(a.y)?) {
            (0, -1) => Some(self.horizontal_edge_cost(a)),
            (0, 1) => Some(self.horizontal_edge_cost(b)),
            (-1, 0) => Some(self.vertical_edge_cost(a)),
            (1, 0) => Some(self.vertical_edge_cost(b)),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Vents
    // -----------------------------------------------------------------------

    pub fn has_vent(&self, p: Point) -> bool {
        self.vent_index.contains_key(&p)
    }

    /// Cost of teleporting out of `p`; [`IMPASSABLE`] if `p` has no vent.
    pub fn vent_cost(&self, p: Point) -> Cost {
        self.vent_index
            .get(&p)
            .map_or(IMPASSABLE, |&i| self.vents[i].cost)
    }

    /// All vents in declaration order.
    pub fn vents(&self) -> &[Vent] {
        &self.vents
    }

    /// Every vent position except `current`.
    pub fn other_vents(&self, current: Point) -> impl Iterator<Item = Point> + '_ {
        self.vents
            .iter()
            .map(|v| v.pos)
            .filter(move |&p| p != current)
    }

    // -----------------------------------------------------------------------
    // Quests
    // -----------------------------------------------------------------------

    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, index: usize) -> MazeResult<Quest> {
        self.quests
            .get(index)
            .copied()
            .ok_or(MazeError::InvalidQuestIndex {
                index,
                count: self.quests.len(),
            })
    }

    pub fn quest_start(&self, index: usize) -> MazeResult<Point> {
        Ok(self.quest(index)?.start)
    }

    pub fn quest_goal(&self, index: usize) -> MazeResult<Point> {
        Ok(self.quest(index)?.goal)
    }
}

/// Bounding box of all wall segments, as (min, max) corners. `None` when
/// the file has no walls.
fn wall_bounds(file: &MazeFile) -> MazeResult<Option<(Point, Point)>> {
    let h = file.hwalls.iter().map(|w| (Point::new(w.x, w.y), 1, 0));
    let v = file.vwalls.iter().map(|w| (Point::new(w.x, w.y), 0, 1));

    let mut bounds: Option<(Point, Point)> = None;
    for (lo, dx, dy) in h.chain(v) {
        let hi = match (lo.x.checked_add(dx), lo.y.checked_add(dy)) {
            (Some(x), Some(y)) => Point::new(x, y),
            _ => {
                return Err(MazeError::InvalidMap(format!(
                    "wall at {lo} ends past the coordinate limit"
                )));
            }
        };
        bounds = Some(match bounds {
            None => (lo, hi),
            Some((min, max)) => (
                Point::new(min.x.min(lo.x), min.y.min(lo.y)),
                Point::new(max.x.max(hi.x), max.y.max(hi.y)),
            ),
        });
    }
    Ok(bounds)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Largest number of cells a map may have.
pub const MAX_CELLS: usize = 1 << 24;

/// Incremental construction of a [`MapModel`].
///
/// Costs are normalized on [`build`](Self::build); the first declaration of
/// a wall or vent at a position wins.
#[derive(Debug, Clone)]
pub struct MapModelBuilder {
    width: i32,
    height: i32,
    origin: Point,
    hwalls: Vec<(Point, f64)>,
    vwalls: Vec<(Point, f64)>,
    vents: Vec<(Point, f64)>,
    quests: Vec<Quest>,
}

impl MapModelBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            origin: Point::ZERO,
            hwalls: Vec::new(),
            vwalls: Vec::new(),
            vents: Vec::new(),
            quests: Vec::new(),
        }
    }

    /// File coordinates of cell `(0, 0)`.
    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Wall on the edge between `p` and `p + (0, -1)`.
    pub fn hwall(mut self, p: Point, cost: f64) -> Self {
        self.hwalls.push((p, cost));
        self
    }

    /// Wall on the edge between `p` and `p + (-1, 0)`.
    pub fn vwall(mut self, p: Point, cost: f64) -> Self {
        self.vwalls.push((p, cost));
        self
    }

    pub fn vent(mut self, p: Point, cost: f64) -> Self {
        self.vents.push((p, cost));
        self
    }

    pub fn quest(mut self, start: Point, goal: Point) -> Self {
        self.quests.push(Quest { start, goal });
        self
    }

    /// Validate and freeze the map.
    pub fn build(self) -> MazeResult<MapModel> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MazeError::InvalidMap(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = (self.width as usize).checked_mul(self.height as usize);
        if cells.is_none_or(|n| n > MAX_CELLS) {
            return Err(MazeError::InvalidMap(format!(
                "{}x{} maze exceeds the limit of {MAX_CELLS} cells",
                self.width, self.height
            )));
        }
        let range = Range::new(0, 0, self.width, self.height);

        let hwalls = wall_table("horizontal", self.hwalls)?;
        let vwalls = wall_table("vertical", self.vwalls)?;

        let mut vents = Vec::with_capacity(self.vents.len());
        let mut vent_index = HashMap::with_capacity(self.vents.len());
        for (pos, raw) in self.vents {
            if !range.contains(pos) {
                return Err(MazeError::InvalidMap(format!(
                    "vent at {pos} is outside the maze {range}"
                )));
            }
            let cost = checked_cost("vent", pos, raw)?;
            match vent_index.entry(pos) {
                Entry::Occupied(_) => warn!("duplicate vent at {pos} ignored"),
                Entry::Vacant(e) => {
                    e.insert(vents.len());
                    vents.push(Vent { pos, cost });
                }
            }
        }

        for (i, q) in self.quests.iter().enumerate() {
            if !range.contains(q.start) || !range.contains(q.goal) {
                warn!(
                    "quest {i} ({} -> {}) leaves the maze {range}",
                    q.start, q.goal
                );
            }
        }

        Ok(MapModel {
            range,
            origin: self.origin,
            hwalls,
            vwalls,
            vents,
            vent_index,
            quests: self.quests,
        })
    }
}

fn checked_cost(what: &str, pos: Point, raw: f64) -> MazeResult<Cost> {
    normalize_cost(raw).ok_or_else(|| {
        MazeError::InvalidMap(format!("{what} at {pos} has invalid cost {raw}"))
    })
}

fn wall_table(what: &str, walls: Vec<(Point, f64)>) -> MazeResult<HashMap<Point, Cost>> {
    let mut table = HashMap::with_capacity(walls.len());
    for (pos, raw) in walls {
        let cost = checked_cost(what, pos, raw)?;
        match table.entry(pos) {
            Entry::Occupied(_) => warn!("duplicate {what} wall at {pos} ignored"),
            Entry::Vacant(e) => {
                e.insert(cost);
            }
        }
    }
    Ok(table)
}
