//! Breadth-first traversal.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use rn_core::NodeId;
use rn_graph::Graph;

use crate::error::{RoutingError, RoutingResult};

/// Result of a breadth-first traversal: visitation order, parent links,
/// and hop-count distances from the start node.
#[derive(Debug, Clone)]
pub struct Traversal {
    start: NodeId,
    /// Nodes in the order they were dequeued.
    pub order: Vec<NodeId>,
    parent: FxHashMap<NodeId, NodeId>,
    dist: FxHashMap<NodeId, u32>,
}

impl Traversal {
    /// `true` if `target` was reached from the start node.
    pub fn reached(&self, target: NodeId) -> bool {
        self.dist.contains_key(&target)
    }

    /// Hop count from the start node, `None` if unreached.
    pub fn distance(&self, target: NodeId) -> Option<u32> {
        self.dist.get(&target).copied()
    }

    /// The tree parent of `target`, `None` for the start node or an
    /// unreached one.
    pub fn parent(&self, target: NodeId) -> Option<NodeId> {
        self.parent.get(&target).copied()
    }

    /// The start-to-`target` path, inclusive of both endpoints.  Empty when
    /// `target` was not reached — an unreached query is an ordinary
    /// outcome, not an error.
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        reconstruct_path(self.start, target, &self.parent, &self.dist)
    }
}

/// Breadth-first search from `start`, ignoring edge weights.
///
/// The FIFO frontier guarantees the parent links encode shortest
/// *hop-count* paths.  Neighbours are visited in adjacency (insertion)
/// order, so the traversal is deterministic.  Blocked edges still connect:
/// BFS models topology, not traversal cost.
pub fn bfs(graph: &Graph, start: NodeId) -> RoutingResult<Traversal> {
    if graph.get_node(start).is_none() {
        return Err(RoutingError::NodeNotFound(start));
    }

    let mut order = Vec::new();
    let mut parent = FxHashMap::default();
    let mut dist = FxHashMap::default();
    let mut frontier = VecDeque::new();

    dist.insert(start, 0);
    frontier.push_back(start);

    while let Some(node) = frontier.pop_front() {
        order.push(node);
        let d = dist[&node];
        for edge in graph.neighbors(node) {
            if !dist.contains_key(&edge.to) {
                dist.insert(edge.to, d + 1);
                parent.insert(edge.to, node);
                frontier.push_back(edge.to);
            }
        }
    }

    Ok(Traversal {
        start,
        order,
        parent,
        dist,
    })
}

/// Walk parent links from `target` back to `start`.  Shared by BFS and DFS.
pub(crate) fn reconstruct_path(
    start: NodeId,
    target: NodeId,
    parent: &FxHashMap<NodeId, NodeId>,
    reached: &FxHashMap<NodeId, u32>,
) -> Vec<NodeId> {
    if !reached.contains_key(&target) {
        return Vec::new();
    }
    let mut path = vec![target];
    let mut cur = target;
    while cur != start {
        // reached ⇒ a parent chain back to start exists
        match parent.get(&cur) {
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
