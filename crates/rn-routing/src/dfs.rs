//! Depth-first traversal, recursive and iterative forms.

use rustc_hash::{FxHashMap, FxHashSet};

use rn_core::NodeId;
use rn_graph::Graph;

use crate::bfs::reconstruct_path;
use crate::error::{RoutingError, RoutingResult};

/// Result of a depth-first traversal: visitation order, parent links, and
/// discovery/finish timestamps.
///
/// Discovery/finish times use one shared counter: a node's interval
/// `[discovery, finish]` nests inside its parent's, which is what makes
/// them usable for back-edge classification.
#[derive(Debug, Clone)]
pub struct DfsTraversal {
    start: NodeId,
    /// Nodes in discovery order.
    pub order: Vec<NodeId>,
    parent: FxHashMap<NodeId, NodeId>,
    discovery: FxHashMap<NodeId, u32>,
    finish: FxHashMap<NodeId, u32>,
}

impl DfsTraversal {
    pub fn reached(&self, target: NodeId) -> bool {
        self.discovery.contains_key(&target)
    }

    pub fn discovery_time(&self, target: NodeId) -> Option<u32> {
        self.discovery.get(&target).copied()
    }

    pub fn finish_time(&self, target: NodeId) -> Option<u32> {
        self.finish.get(&target).copied()
    }

    /// The tree parent of `target`, `None` for the start node or an
    /// unreached one.
    pub fn parent(&self, target: NodeId) -> Option<NodeId> {
        self.parent.get(&target).copied()
    }

    /// The start-to-`target` path along tree edges.  Empty when unreached.
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        reconstruct_path(self.start, target, &self.parent, &self.discovery)
    }
}

/// Recursive depth-first search from `start`.
///
/// Visits neighbours in adjacency order.  Recursion depth equals the
/// longest tree path; prefer [`dfs_iterative`] for graphs that may chain
/// thousands of nodes.
pub fn dfs(graph: &Graph, start: NodeId) -> RoutingResult<DfsTraversal> {
    if graph.get_node(start).is_none() {
        return Err(RoutingError::NodeNotFound(start));
    }
    let mut t = DfsTraversal {
        start,
        order: Vec::new(),
        parent: FxHashMap::default(),
        discovery: FxHashMap::default(),
        finish: FxHashMap::default(),
    };
    let mut clock = 0;
    visit(graph, start, &mut t, &mut clock);
    Ok(t)
}

fn visit(graph: &Graph, node: NodeId, t: &mut DfsTraversal, clock: &mut u32) {
    t.discovery.insert(node, *clock);
    *clock += 1;
    t.order.push(node);
    for edge in graph.neighbors(node) {
        if !t.discovery.contains_key(&edge.to) {
            t.parent.insert(edge.to, node);
            visit(graph, edge.to, t, clock);
        }
    }
    t.finish.insert(node, *clock);
    *clock += 1;
}

/// Explicit-stack depth-first search from `start`.
///
/// Produces the same discovery order, parents, and timestamps as the
/// recursive form, without consuming call stack.
pub fn dfs_iterative(graph: &Graph, start: NodeId) -> RoutingResult<DfsTraversal> {
    if graph.get_node(start).is_none() {
        return Err(RoutingError::NodeNotFound(start));
    }
    let mut t = DfsTraversal {
        start,
        order: Vec::new(),
        parent: FxHashMap::default(),
        discovery: FxHashMap::default(),
        finish: FxHashMap::default(),
    };
    let mut clock = 0u32;
    // Stack frames are (node, index of the next outgoing edge to examine),
    // mirroring the recursive call's progress through the adjacency list.
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    t.discovery.insert(start, clock);
    clock += 1;
    t.order.push(start);
    stack.push((start, 0));

    while let Some((node, next_edge)) = stack.last_mut() {
        let node = *node;
        let edges = graph.neighbors(node);
        if *next_edge < edges.len() {
            let to = edges[*next_edge].to;
            *next_edge += 1;
            if !t.discovery.contains_key(&to) {
                t.discovery.insert(to, clock);
                clock += 1;
                t.order.push(to);
                t.parent.insert(to, node);
                stack.push((to, 0));
            }
        } else {
            t.finish.insert(node, clock);
            clock += 1;
            stack.pop();
        }
    }
    Ok(t)
}

/// `true` if the directed graph contains a cycle reachable from any node.
///
/// Standard three-state marking: an edge into a node that has been
/// discovered but not finished is a back edge.
pub fn has_cycle(graph: &Graph) -> bool {
    let mut in_progress = FxHashSet::default();
    let mut finished = FxHashSet::default();

    for root in graph.node_ids() {
        if finished.contains(&root) {
            continue;
        }
        // Iterative grey/black walk from this root.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        in_progress.insert(root);
        while let Some((node, next_edge)) = stack.last_mut() {
            let node = *node;
            let edges = graph.neighbors(node);
            if *next_edge < edges.len() {
                let to = edges[*next_edge].to;
                *next_edge += 1;
                if in_progress.contains(&to) {
                    return true; // back edge
                }
                if !finished.contains(&to) {
                    in_progress.insert(to);
                    stack.push((to, 0));
                }
            } else {
                in_progress.remove(&node);
                finished.insert(node);
                stack.pop();
            }
        }
    }
    false
}
