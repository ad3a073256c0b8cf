//! Minimum spanning trees over the undirected view of the graph.
//!
//! Both algorithms treat every stored edge as undirected and deduplicate
//! the paired records an undirected graph stores, so they agree whether
//! the graph was built directed or not.  Blocked (infinite-weight) edges
//! are excluded.  On a disconnected graph Kruskal yields a minimum
//! spanning forest; Prim spans only the seed's component.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::{FxHashMap, FxHashSet};

use rn_core::NodeId;
use rn_graph::Graph;

use crate::error::{RoutingError, RoutingResult};

/// An undirected tree edge selected by an MST algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

/// Output of an MST run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Selected edges, in the order the algorithm accepted them.
    pub edges: Vec<TreeEdge>,
    pub total_weight: f64,
}

impl SpanningTree {
    /// Number of distinct nodes the selected edges touch.  Counts actual
    /// endpoints, so it stays correct for a forest (a k-component forest
    /// touches `edges + k` nodes, not `edges + 1`).
    pub fn node_count(&self) -> usize {
        let mut seen = FxHashSet::default();
        for e in &self.edges {
            seen.insert(e.from);
            seen.insert(e.to);
        }
        seen.len()
    }
}

/// Unique finite undirected edges, endpoints normalised so `from < to`.
fn undirected_edges(graph: &Graph) -> Vec<TreeEdge> {
    let mut out = Vec::new();
    for edge in graph.edges() {
        if !edge.weight.is_finite() {
            continue;
        }
        let (a, b) = (edge.from.min(edge.to), edge.from.max(edge.to));
        if a == b {
            continue; // self-loop contributes nothing to a tree
        }
        // In an undirected graph each edge is stored twice; keep one record.
        if graph.is_directed() || edge.from == a {
            out.push(TreeEdge {
                from: a,
                to: b,
                weight: edge.weight,
            });
        }
    }
    out
}

// ── union-find ──────────────────────────────────────────────────────────

struct DisjointSets {
    parent: FxHashMap<NodeId, NodeId>,
    rank: FxHashMap<NodeId, u32>,
}

impl DisjointSets {
    fn new(graph: &Graph) -> Self {
        let parent = graph.node_ids().map(|id| (id, id)).collect();
        DisjointSets {
            parent,
            rank: FxHashMap::default(),
        }
    }

    fn find(&mut self, mut x: NodeId) -> NodeId {
        // Path halving keeps the walk near-flat without recursion.
        while self.parent[&x] != x {
            let grandparent = self.parent[&self.parent[&x]];
            self.parent.insert(x, grandparent);
            x = grandparent;
        }
        x
    }

    /// Merge the sets holding `a` and `b`; `false` if already joined.
    fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (rank_a, rank_b) = (
            self.rank.get(&ra).copied().unwrap_or(0),
            self.rank.get(&rb).copied().unwrap_or(0),
        );
        if rank_a < rank_b {
            self.parent.insert(ra, rb);
        } else if rank_a > rank_b {
            self.parent.insert(rb, ra);
        } else {
            self.parent.insert(rb, ra);
            self.rank.insert(ra, rank_a + 1);
        }
        true
    }
}

/// Kruskal's algorithm.  On a disconnected graph the result is a minimum
/// spanning forest covering every component.
pub fn kruskal(graph: &Graph) -> SpanningTree {
    let mut candidates = undirected_edges(graph);
    // total_cmp: weights are finite here, but NaN must still not panic.
    candidates.sort_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then_with(|| (a.from, a.to).cmp(&(b.from, b.to)))
    });

    let mut sets = DisjointSets::new(graph);
    let mut edges = Vec::new();
    let mut total_weight = 0.0;
    for edge in candidates {
        if sets.union(edge.from, edge.to) {
            total_weight += edge.weight;
            edges.push(edge);
        }
    }
    SpanningTree {
        edges,
        total_weight,
    }
}

/// Prim's algorithm grown from `seed`.  Spans only the seed's component;
/// use [`kruskal`] when full-forest coverage is needed.
pub fn prim(graph: &Graph, seed: NodeId) -> RoutingResult<SpanningTree> {
    if graph.get_node(seed).is_none() {
        return Err(RoutingError::NodeNotFound(seed));
    }

    // Undirected adjacency view so directed graphs grow along both
    // orientations of each edge.
    let mut adjacency: FxHashMap<NodeId, Vec<(NodeId, f64)>> = FxHashMap::default();
    for edge in undirected_edges(graph) {
        adjacency
            .entry(edge.from)
            .or_default()
            .push((edge.to, edge.weight));
        adjacency
            .entry(edge.to)
            .or_default()
            .push((edge.from, edge.weight));
    }

    let mut in_tree: FxHashSet<NodeId> = FxHashSet::default();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId, NodeId)>> = BinaryHeap::new();
    let mut edges = Vec::new();
    let mut total_weight = 0.0;

    in_tree.insert(seed);
    if let Some(out) = adjacency.get(&seed) {
        for &(to, weight) in out {
            heap.push(Reverse((OrderedFloat(weight), seed, to)));
        }
    }

    while let Some(Reverse((OrderedFloat(weight), from, to))) = heap.pop() {
        if in_tree.contains(&to) {
            continue;
        }
        in_tree.insert(to);
        total_weight += weight;
        edges.push(TreeEdge { from, to, weight });
        if let Some(out) = adjacency.get(&to) {
            for &(next, w) in out {
                if !in_tree.contains(&next) {
                    heap.push(Reverse((OrderedFloat(w), to, next)));
                }
            }
        }
    }

    Ok(SpanningTree {
        edges,
        total_weight,
    })
}
