use ventmaze_core::{Cost, Point, Range};

/// One outgoing move: where it lands and what it costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub to: Point,
    pub cost: Cost,
}

/// Anything the shortest-path engine can search over.
pub trait Pather {
    /// The grid rectangle nodes live in.
    fn range(&self) -> Range;

    /// Append the traversable moves out of `p` into `buf`. The caller clears
    /// `buf` before calling. Costs must be finite and non-negative.
    fn successors(&self, p: Point, buf: &mut Vec<Step>);

    /// Cheapest single move from `from` to `to`, or `None` if there is none.
    fn step_cost(&self, from: Point, to: Point) -> Option<Cost> {
        let mut buf = Vec::new();
        self.successors(from, &mut buf);
        buf.iter()
            .filter(|s| s.to == to)
            .map(|s| s.cost)
            .reduce(Cost::min)
    }
}
