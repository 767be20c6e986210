//! Explicit navigation graph built from a [`MapModel`].
//!
//! One node per cell, an adjacency edge for every crossable cell boundary,
//! and a teleport edge between every pair of vents. Teleporting is paid by
//! the vent you leave from: `a -> b` costs `vent_cost(a)`, `b -> a` costs
//! `vent_cost(b)`.

use log::debug;
use ventmaze_core::{Cost, MapModel, Point, Range, is_impassable};

use crate::traits::{Pather, Step};

/// Index of an edge in [`Graph::edges`].
pub type EdgeId = usize;

/// What kind of move an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Step between two 4-adjacent cells, possibly over a wall.
    Adjacency,
    /// Jump between two vents.
    Teleport,
}

/// An edge between cells `a` and `b`.
///
/// `forward` is the cost of `a -> b`, `backward` of `b -> a`; either may be
/// [`ventmaze_core::IMPASSABLE`] for a teleport whose origin vent is
/// disabled. Adjacency edges always have `forward == backward`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
    pub kind: EdgeKind,
    pub forward: Cost,
    pub backward: Cost,
}

impl Edge {
    /// The endpoint that is not `p`.
    pub fn other(&self, p: Point) -> Point {
        if p == self.a { self.b } else { self.a }
    }

    /// Cost of leaving through this edge from endpoint `from`, if that
    /// direction is traversable.
    pub fn cost_from(&self, from: Point) -> Option<Cost> {
        let c = if from == self.a {
            self.forward
        } else if from == self.b {
            self.backward
        } else {
            return None;
        };
        (!is_impassable(c)).then_some(c)
    }
}

/// A graph node: its cell and the edges touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Point,
    incident: Vec<EdgeId>,
}

impl Node {
    pub fn incident(&self) -> &[EdgeId] {
        &self.incident
    }
}

/// The navigation graph of one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    range: Range,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Build the graph for `map`. Deterministic: the same map always
    /// yields an equal graph.
    pub fn build(map: &MapModel) -> Self {
        let range = map.range();
        let mut g = Graph {
            range,
            nodes: range
                .iter()
                .map(|pos| Node {
                    pos,
                    incident: Vec::new(),
                })
                .collect(),
            edges: Vec::new(),
        };

        for p in range {
            let south = p.shift(0, -1);
            let cost = map.horizontal_edge_cost(p);
            if range.contains(south) && !is_impassable(cost) {
                g.add_edge(Edge {
                    a: p,
                    b: south,
                    kind: EdgeKind::Adjacency,
                    forward: cost,
                    backward: cost,
                });
            }

            let west = p.shift(-1, 0);
            let cost = map.vertical_edge_cost(p);
            if range.contains(west) && !is_impassable(cost) {
                g.add_edge(Edge {
                    a: p,
                    b: west,
                    kind: EdgeKind::Adjacency,
                    forward: cost,
                    backward: cost,
                });
            }
        }
        let adjacency = g.edges.len();

        let vents = map.vents();
        for (i, va) in vents.iter().enumerate() {
            for vb in &vents[i + 1..] {
                if is_impassable(va.cost) && is_impassable(vb.cost) {
                    continue;
                }
                g.add_edge(Edge {
                    a: va.pos,
                    b: vb.pos,
                    kind: EdgeKind::Teleport,
                    forward: va.cost,
                    backward: vb.cost,
                });
            }
        }

        debug!(
            "graph built: {} nodes, {} adjacency edges, {} teleport edges",
            g.nodes.len(),
            adjacency,
            g.edges.len() - adjacency
        );
        g
    }

    fn add_edge(&mut self, edge: Edge) {
        let id = self.edges.len();
        // Endpoints are always on the grid: adjacency neighbours are range
        // checked and vents are validated by the map builder.
        if let Some(ia) = self.range.index(edge.a) {
            self.nodes[ia].incident.push(id);
        }
        if let Some(ib) = self.range.index(edge.b) {
            self.nodes[ib].incident.push(id);
        }
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn node(&self, p: Point) -> Option<&Node> {
        self.range.index(p).map(|i| &self.nodes[i])
    }

    /// Edges touching `p`; empty if `p` is off the grid.
    pub fn incident(&self, p: Point) -> impl Iterator<Item = &Edge> + '_ {
        self.node(p)
            .map(|n| n.incident.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&id| &self.edges[id])
    }
}

impl Pather for Graph {
    fn range(&self) -> Range {
        self.range
    }

    fn successors(&self, p: Point, buf: &mut Vec<Step>) {
        for e in self.incident(p) {
            if let Some(cost) = e.cost_from(p) {
                buf.push(Step {
                    to: e.other(p),
                    cost,
                });
            }
        }
    }

    fn step_cost(&self, from: Point, to: Point) -> Option<Cost> {
        self.incident(from)
            .filter(|e| e.other(from) == to)
            .filter_map(|e| e.cost_from(from))
            .reduce(Cost::min)
    }
}
