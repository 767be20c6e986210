//! Search results in file coordinates, ready to print.

use serde::Serialize;
use ventmaze_core::{Cost, MapModel, Point};
use ventmaze_paths::{Path, StepKind, classify_step, step_cost};

/// One move of a solved route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepReport {
    pub from: Point,
    pub to: Point,
    pub kind: StepKind,
    pub cost: Cost,
}

/// Outcome of one start/goal search.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quest: Option<usize>,
    pub start: Point,
    pub goal: Point,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    pub moves: usize,
    pub cells: Vec<Point>,
    pub steps: Vec<StepReport>,
}

impl RouteReport {
    /// Describe `path` (grid coordinates) in the file's coordinates.
    pub fn new(
        map: &MapModel,
        quest: Option<usize>,
        start: Point,
        goal: Point,
        path: Option<&Path>,
    ) -> Self {
        let to_file = |p: Point| map.to_file_coords(p);
        let Some(path) = path else {
            return Self {
                quest,
                start: to_file(start),
                goal: to_file(goal),
                found: false,
                cost: None,
                moves: 0,
                cells: Vec::new(),
                steps: Vec::new(),
            };
        };

        let steps = path
            .steps()
            .filter_map(|(a, b)| {
                Some(StepReport {
                    from: to_file(a),
                    to: to_file(b),
                    kind: classify_step(a, b, map)?,
                    cost: step_cost(a, b, map)?,
                })
            })
            .collect();

        Self {
            quest,
            start: to_file(start),
            goal: to_file(goal),
            found: true,
            cost: Some(path.cost),
            moves: path.moves(),
            cells: path.cells().iter().map(|&p| to_file(p)).collect(),
            steps,
        }
    }

    fn title(&self) -> String {
        match self.quest {
            Some(i) => format!("quest {i}: {} -> {}", self.start, self.goal),
            None => format!("route: {} -> {}", self.start, self.goal),
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = self.title();
        out.push('\n');
        let Some(cost) = self.cost else {
            out.push_str("  no path found\n");
            return out;
        };
        out.push_str(&format!(
            "  {} positions, {} moves, total cost {cost:.1}\n",
            self.cells.len(),
            self.moves
        ));
        for (i, s) in self.steps.iter().enumerate() {
            let kind = match s.kind {
                StepKind::Walk => "walk",
                StepKind::Climb => "climb",
                StepKind::Teleport => "teleport",
            };
            out.push_str(&format!(
                "  {:>3}. {} -> {} {kind} ({:.1})\n",
                i + 1,
                s.from,
                s.to,
                s.cost
            ));
        }
        out
    }
}
