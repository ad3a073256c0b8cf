//! Single-source shortest paths over live edge weights.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use rn_core::NodeId;
use rn_graph::Graph;

use crate::error::{RoutingError, RoutingResult};

/// Result of a Dijkstra run: tentative-final distances and parent links
/// for every node reachable through finite-weight edges.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: NodeId,
    dist: FxHashMap<NodeId, f64>,
    parent: FxHashMap<NodeId, NodeId>,
}

impl ShortestPaths {
    /// Total weight from the source, `None` if unreachable.
    pub fn distance(&self, target: NodeId) -> Option<f64> {
        self.dist.get(&target).copied()
    }

    pub fn reached(&self, target: NodeId) -> bool {
        self.dist.contains_key(&target)
    }

    /// The source-to-`target` path, inclusive.  Empty when unreachable.
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        if !self.dist.contains_key(&target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut cur = target;
        while cur != self.start {
            match self.parent.get(&cur) {
                Some(&p) => {
                    path.push(p);
                    cur = p;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

/// Dijkstra's algorithm from `source` over the graph's **current** weights.
///
/// Re-reads live weights on every invocation — no caching across calls —
/// so results always reflect the latest traffic state.  An infinite weight
/// marks a blocked edge and is never relaxed: a node only reachable
/// through blocked edges is reported unreachable, exactly as if those
/// edges had been removed.
///
/// Ties between equal-distance nodes fall to heap order; callers must not
/// assume a stable ordering among them.
pub fn dijkstra(graph: &Graph, source: NodeId) -> RoutingResult<ShortestPaths> {
    if graph.get_node(source).is_none() {
        return Err(RoutingError::NodeNotFound(source));
    }

    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();

    dist.insert(source, 0.0);
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if dist.get(&node).is_some_and(|&d| cost > d) {
            continue;
        }
        for edge in graph.neighbors(node) {
            if !edge.weight.is_finite() {
                continue; // blocked edge: impassable
            }
            let new_cost = cost + edge.weight;
            let better = dist.get(&edge.to).is_none_or(|&d| new_cost < d);
            if better {
                dist.insert(edge.to, new_cost);
                parent.insert(edge.to, node);
                heap.push(Reverse((OrderedFloat(new_cost), edge.to)));
            }
        }
    }

    Ok(ShortestPaths {
        start: source,
        dist,
        parent,
    })
}
