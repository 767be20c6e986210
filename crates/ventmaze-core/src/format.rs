//! JSON maze file format.
//!
//! ```json
//! {
//!   "width": 3, "height": 3,
//!   "hwalls": [{ "x": 1, "y": 1, "cost": 5.5 }],
//!   "vwalls": [{ "x": 1, "y": 0 }],
//!   "vents":  [{ "x": 0, "y": 0, "cost": 2.0 }, { "x": 2, "y": 2 }],
//!   "quests": [{ "from": { "x": 0, "y": 0 }, "to": { "x": 2, "y": 2 } }]
//! }
//! ```
//!
//! A horizontal wall at `(x, y)` lies on the edge between cells `(x, y - 1)`
//! and `(x, y)`; a vertical wall at `(x, y)` between `(x - 1, y)` and
//! `(x, y)`. A wall without a cost blocks; a vent without a cost costs
//! [`DEFAULT_VENT_COST`]. Coordinates are file coordinates and may be
//! offset from zero; see [`crate::MapModel::from_file`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::{Cost, DEFAULT_VENT_COST, IMPASSABLE};
use crate::error::MazeResult;
use crate::geom::Point;

/// A whole maze document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MazeFile {
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub hwalls: Vec<WallSpec>,
    #[serde(default)]
    pub vwalls: Vec<WallSpec>,
    #[serde(default)]
    pub vents: Vec<VentSpec>,
    #[serde(default)]
    pub quests: Vec<QuestSpec>,
}

/// One wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub x: i32,
    pub y: i32,
    #[serde(default = "blocking", with = "cost_repr")]
    pub cost: Cost,
}

/// One vent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VentSpec {
    pub x: i32,
    pub y: i32,
    #[serde(default = "vent_default", with = "cost_repr")]
    pub cost: Cost,
}

/// A start/goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSpec {
    pub from: Point,
    pub to: Point,
}

fn blocking() -> Cost {
    IMPASSABLE
}

fn vent_default() -> Cost {
    DEFAULT_VENT_COST
}

/// Costs on disk: a number, or `null` for impassable. Infinity is written
/// as `f32::MAX` so single-precision readers see their own sentinel.
mod cost_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::cost::{Cost, IMPASSABLE};

    pub fn serialize<S: Serializer>(cost: &Cost, s: S) -> Result<S::Ok, S::Error> {
        if cost.is_finite() {
            s.serialize_f64(*cost)
        } else {
            s.serialize_f32(f32::MAX)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Cost, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(IMPASSABLE))
    }
}

impl MazeFile {
    /// Parse a maze document.
    pub fn from_json(json: &str) -> MazeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a maze file.
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> MazeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::normalize_cost;

    #[test]
    fn defaults_for_missing_costs() {
        let f = MazeFile::from_json(
            r#"{
                "hwalls": [{ "x": 0, "y": 1 }],
                "vents": [{ "x": 2, "y": 2 }]
            }"#,
        )
        .unwrap();
        assert_eq!(f.hwalls[0].cost, IMPASSABLE);
        assert_eq!(f.vents[0].cost, DEFAULT_VENT_COST);
        assert!(f.vwalls.is_empty());
        assert!(f.quests.is_empty());
        assert_eq!(f.width, 0);
    }

    #[test]
    fn null_cost_blocks() {
        let f = MazeFile::from_json(r#"{ "vwalls": [{ "x": 1, "y": 0, "cost": null }] }"#).unwrap();
        assert_eq!(f.vwalls[0].cost, IMPASSABLE);
    }

    #[test]
    fn float_max_reads_as_impassable() {
        let f = MazeFile::from_json(r#"{ "vwalls": [{ "x": 1, "y": 0, "cost": 3.4028235E+38 }] }"#)
            .unwrap();
        assert_eq!(normalize_cost(f.vwalls[0].cost), Some(IMPASSABLE));
    }

    #[test]
    fn quests_parse_points() {
        let f = MazeFile::from_json(
            r#"{ "quests": [{ "from": { "x": 1, "y": 2 }, "to": { "x": 3, "y": 4 } }] }"#,
        )
        .unwrap();
        assert_eq!(f.quests[0].from, Point::new(1, 2));
        assert_eq!(f.quests[0].to, Point::new(3, 4));
    }

    #[test]
    fn blocking_walls_survive_writing() {
        let f = MazeFile {
            width: 2,
            height: 1,
            vwalls: vec![WallSpec {
                x: 1,
                y: 0,
                cost: IMPASSABLE,
            }],
            ..MazeFile::default()
        };
        let json = f.to_json_pretty().unwrap();
        let back = MazeFile::from_json(&json).unwrap();
        assert_eq!(normalize_cost(back.vwalls[0].cost), Some(IMPASSABLE));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(MazeFile::from_json("{ \"hwalls\": 3 }").is_err());
    }
}
