//! Point-to-point search with an admissible geographic heuristic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use rn_core::NodeId;
use rn_graph::Graph;

use crate::error::{RoutingError, RoutingResult};

/// Heuristic used to steer the search toward the goal.
///
/// Must never overestimate the remaining cost, or the returned route can
/// be suboptimal.  With [`Heuristic::None`] the search degenerates to
/// Dijkstra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heuristic {
    /// No guidance; explores like Dijkstra.
    None,
    /// Great-circle distance to the goal, scaled into weight units.
    ///
    /// `weight_per_meter` converts metres to the graph's weight unit.  It
    /// must be a lower bound on the true cost per metre of any edge;
    /// [`Heuristic::for_speed_kmh`] derives it from a speed no edge can
    /// exceed.
    Haversine { weight_per_meter: f64 },
}

impl Heuristic {
    /// Haversine heuristic for weights measured in travel minutes,
    /// assuming nothing moves faster than `max_speed_kmh`.
    pub fn for_speed_kmh(max_speed_kmh: f64) -> Self {
        // minutes per metre at the ceiling speed
        let weight_per_meter = 60.0 / (max_speed_kmh * 1000.0);
        Heuristic::Haversine { weight_per_meter }
    }

    fn estimate(&self, graph: &Graph, from: NodeId, goal: NodeId) -> f64 {
        match *self {
            Heuristic::None => 0.0,
            Heuristic::Haversine { weight_per_meter } => {
                match (graph.get_node(from), graph.get_node(goal)) {
                    (Some(a), Some(b)) => a.pos.distance_m(b.pos) * weight_per_meter,
                    _ => 0.0,
                }
            }
        }
    }
}

impl Default for Heuristic {
    /// Travel-minute weights with a 120 km/h ceiling.
    fn default() -> Self {
        Heuristic::for_speed_kmh(120.0)
    }
}

/// A single source-to-goal route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    /// Nodes along the route, source and goal inclusive.
    pub nodes: Vec<NodeId>,
    /// Total weight of the route.
    pub cost: f64,
    /// Nodes settled during the search, a rough measure of effort.
    pub expanded: usize,
}

/// A* search from `source` to `goal`.
///
/// Returns `Ok(None)` when no finite-weight route exists.  Blocked edges
/// (infinite weight) are never relaxed.
pub fn astar(
    graph: &Graph,
    source: NodeId,
    goal: NodeId,
    heuristic: Heuristic,
) -> RoutingResult<Option<RoutePath>> {
    if graph.get_node(source).is_none() {
        return Err(RoutingError::NodeNotFound(source));
    }
    if graph.get_node(goal).is_none() {
        return Err(RoutingError::NodeNotFound(goal));
    }

    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    // Min-heap keyed on f = g + h; g rides along for the stale check.
    let mut open: BinaryHeap<Reverse<(OrderedFloat<f64>, OrderedFloat<f64>, NodeId)>> =
        BinaryHeap::new();
    let mut expanded = 0usize;

    dist.insert(source, 0.0);
    open.push(Reverse((
        OrderedFloat(heuristic.estimate(graph, source, goal)),
        OrderedFloat(0.0),
        source,
    )));

    while let Some(Reverse((_, OrderedFloat(g), node))) = open.pop() {
        // Skip stale heap entries.
        if dist.get(&node).is_some_and(|&d| g > d) {
            continue;
        }
        if node == goal {
            let mut nodes = vec![goal];
            let mut cur = goal;
            while cur != source {
                match parent.get(&cur) {
                    Some(&p) => {
                        nodes.push(p);
                        cur = p;
                    }
                    None => return Ok(None),
                }
            }
            nodes.reverse();
            return Ok(Some(RoutePath {
                nodes,
                cost: g,
                expanded,
            }));
        }
        expanded += 1;
        for edge in graph.neighbors(node) {
            if !edge.weight.is_finite() {
                continue;
            }
            let tentative = g + edge.weight;
            let better = dist.get(&edge.to).is_none_or(|&d| tentative < d);
            if better {
                dist.insert(edge.to, tentative);
                parent.insert(edge.to, node);
                let f = tentative + heuristic.estimate(graph, edge.to, goal);
                open.push(Reverse((OrderedFloat(f), OrderedFloat(tentative), edge.to)));
            }
        }
    }
    Ok(None)
}
