//! The mutable weighted graph store.
//!
//! # Data layout
//!
//! Nodes live in an **arena of generational slots**: `slots[i]` holds an
//! optional [`Node`] plus a generation counter, and `adjacency[i]` holds that
//! slot's outgoing edges in insertion order.  A `FxHashMap<NodeId, SlotRef>`
//! translates stable external ids into `(index, generation)` pairs; a slot
//! ref whose generation no longer matches the arena is stale and is treated
//! as "not found" rather than resolving to whatever node reused the slot.
//!
//! Removed slots go onto a free-list and are reused by later insertions.
//! When the free-list exceeds 25 % of the live node count the arena is
//! **compacted**: slots, adjacency lists, and the id map are rebuilt densely
//! and every internal index is invalidated.  External ids survive all of
//! this — they are the only handles this module ever hands out.
//!
//! # Undirected graphs
//!
//! An undirected store transparently maintains the reverse record of every
//! edge: `add_edge`, `remove_edge`, and `update_edge_weight` touch both
//! directions, so `has_edge(a, b) == has_edge(b, a)` holds at all times.
//! `num_edges()` counts stored directed records (an undirected edge counts
//! as two).

use rustc_hash::FxHashMap;

use rn_core::NodeId;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::node::Node;

// ── Internal slot bookkeeping ─────────────────────────────────────────────────

/// Internal handle into the arena.  Never exposed outside the store.
#[derive(Copy, Clone, Debug)]
struct SlotRef {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Adjacency-list weighted graph keyed by stable external [`NodeId`]s.
pub struct Graph {
    directed: bool,
    slots: Vec<Slot>,
    /// Outgoing edges per slot, parallel to `slots`.  Insertion-ordered.
    adjacency: Vec<Vec<Edge>>,
    /// External id → internal slot.
    index_of: FxHashMap<NodeId, SlotRef>,
    /// Reclaimed slot indices awaiting reuse.
    free: Vec<u32>,
    /// Count of stored directed edge records.
    edge_count: usize,
}

impl Graph {
    /// An empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// An empty undirected graph (reverse edges maintained transparently).
    pub fn undirected() -> Self {
        Self::new(false)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            slots: Vec::new(),
            adjacency: Vec::new(),
            index_of: FxHashMap::default(),
            free: Vec::new(),
            edge_count: 0,
        }
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of live nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.index_of.len()
    }

    /// Number of stored directed edge records.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_of.is_empty()
    }

    /// Reclaimed-but-unreused slots.  Diagnostic only; drops to zero after
    /// compaction.
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    // ── Slot resolution ───────────────────────────────────────────────────

    /// Resolve an external id to its arena index, rejecting stale refs.
    fn slot(&self, id: NodeId) -> Option<usize> {
        let r = self.index_of.get(&id)?;
        let idx = r.index as usize;
        if self.slots[idx].generation == r.generation {
            Some(idx)
        } else {
            None
        }
    }

    // ── Node operations ───────────────────────────────────────────────────

    /// Insert a node.  Returns `false` if a node with the same id exists.
    pub fn add_node(&mut self, mut node: Node) -> bool {
        if self.index_of.contains_key(&node.id) {
            return false;
        }
        node.degree = 0;
        let id = node.id;

        let slot_ref = match self.free.pop() {
            Some(index) => {
                let idx = index as usize;
                self.slots[idx].node = Some(node);
                debug_assert!(self.adjacency[idx].is_empty());
                SlotRef {
                    index,
                    generation: self.slots[idx].generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, node: Some(node) });
                self.adjacency.push(Vec::new());
                SlotRef { index, generation: 0 }
            }
        };
        self.index_of.insert(id, slot_ref);
        true
    }

    /// Remove a node, all its outgoing edges, and every edge pointing at it.
    /// Returns `false` if the id is unknown.
    ///
    /// The incoming-edge sweep scans every adjacency list, so removal is
    /// O(E); heavy deletion workloads amortise through slot reuse and the
    /// compaction pass below.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };

        // Outgoing edges disappear with the node.
        self.edge_count -= self.adjacency[idx].len();
        self.adjacency[idx].clear();

        // Strip incoming edges from all other live nodes; each stripped edge
        // was outgoing from its owner, so the owner's degree shrinks too.
        for i in 0..self.adjacency.len() {
            if i == idx || self.slots[i].node.is_none() {
                continue;
            }
            let before = self.adjacency[i].len();
            self.adjacency[i].retain(|e| e.to != id);
            let removed = before - self.adjacency[i].len();
            if removed > 0 {
                self.edge_count -= removed;
                if let Some(n) = self.slots[i].node.as_mut() {
                    n.degree -= removed as u32;
                }
            }
        }

        // Reclaim the slot: bump the generation so stale refs are detectable.
        self.slots[idx].node = None;
        self.slots[idx].generation = self.slots[idx].generation.wrapping_add(1);
        self.index_of.remove(&id);
        self.free.push(idx as u32);

        self.maybe_compact();
        true
    }

    /// Read-only node lookup.  `None` (not an error) for unknown ids.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.slot(id)
            .and_then(|idx| self.slots[idx].node.as_ref())
    }

    /// Outgoing-edge count of `id`, or `None` for unknown ids.
    pub fn degree(&self, id: NodeId) -> Option<u32> {
        self.get_node(id).map(|n| n.degree)
    }

    // ── Edge operations ───────────────────────────────────────────────────

    /// Insert an edge.  Returns `false` if either endpoint is missing or the
    /// directed edge already exists.  On an undirected store the reverse
    /// record is inserted as well.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (Some(from_idx), Some(to_idx)) = (self.slot(edge.from), self.slot(edge.to)) else {
            return false;
        };
        if self.adjacency[from_idx].iter().any(|e| e.to == edge.to) {
            return false;
        }

        let reverse = (!self.directed && edge.from != edge.to).then(|| edge.reversed());

        self.adjacency[from_idx].push(edge);
        self.bump_degree(from_idx, 1);
        self.edge_count += 1;

        if let Some(rev) = reverse {
            self.adjacency[to_idx].push(rev);
            self.bump_degree(to_idx, 1);
            self.edge_count += 1;
        }
        true
    }

    /// Remove the edge `from -> to` (both directions when undirected).
    /// Returns `false` if the edge is not present.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.remove_one_direction(from, to) {
            return false;
        }
        if !self.directed && from != to {
            // The reverse record is maintained in lockstep, so it must exist.
            let removed = self.remove_one_direction(to, from);
            debug_assert!(removed, "undirected edge missing its reverse record");
        }
        true
    }

    fn remove_one_direction(&mut self, from: NodeId, to: NodeId) -> bool {
        let Some(idx) = self.slot(from) else {
            return false;
        };
        let Some(pos) = self.adjacency[idx].iter().position(|e| e.to == to) else {
            return false;
        };
        self.adjacency[idx].remove(pos);
        if let Some(n) = self.slots[idx].node.as_mut() {
            n.degree -= 1;
        }
        self.edge_count -= 1;
        true
    }

    /// Read-only edge lookup.  `None` (not an error) when absent.
    pub fn get_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        let idx = self.slot(from)?;
        self.adjacency[idx].iter().find(|e| e.to == to)
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.get_edge(from, to).is_some()
    }

    /// Overwrite the traversal cost of `from -> to` (both directions when
    /// undirected).  Returns `false` if the edge is not present.
    ///
    /// This is the write path the traffic model uses; search algorithms
    /// observe the new weight on their next invocation.
    pub fn update_edge_weight(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        if !self.set_weight_one_direction(from, to, weight) {
            return false;
        }
        if !self.directed && from != to {
            let updated = self.set_weight_one_direction(to, from, weight);
            debug_assert!(updated, "undirected edge missing its reverse record");
        }
        true
    }

    fn set_weight_one_direction(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        let Some(idx) = self.slot(from) else {
            return false;
        };
        match self.adjacency[idx].iter_mut().find(|e| e.to == to) {
            Some(e) => {
                e.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Outgoing edges of `id` in insertion order.  Empty for unknown ids —
    /// lookup failures are silent here, matching `get_node`.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.slot(id)
            .map(|idx| self.adjacency[idx].as_slice())
            .unwrap_or(&[])
    }

    fn bump_degree(&mut self, idx: usize, by: u32) {
        if let Some(n) = self.slots[idx].node.as_mut() {
            n.degree += by;
        }
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Ids of all live nodes, in arena order (insertion order between
    /// compactions).
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.node.as_ref().map(|n| n.id))
    }

    /// All live nodes, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.slots.iter().filter_map(|s| s.node.as_ref())
    }

    /// All stored directed edge records, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.iter().flat_map(|adj| adj.iter())
    }

    // ── Compaction ────────────────────────────────────────────────────────

    /// Compact when reclaimed slots exceed 25 % of live nodes.
    fn maybe_compact(&mut self) {
        if self.free.len() * 4 > self.num_nodes() {
            self.compact();
        }
    }

    /// Rebuild the arena, adjacency lists, and id map densely.  All internal
    /// slot refs are reissued; external ids are untouched.
    fn compact(&mut self) {
        let live = self.index_of.len();
        let mut slots = Vec::with_capacity(live);
        let mut adjacency = Vec::with_capacity(live);
        let mut index_of =
            FxHashMap::with_capacity_and_hasher(live, Default::default());

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(node) = slot.node.take() {
                index_of.insert(
                    node.id,
                    SlotRef {
                        index: slots.len() as u32,
                        generation: 0,
                    },
                );
                slots.push(Slot { generation: 0, node: Some(node) });
                adjacency.push(std::mem::take(&mut self.adjacency[i]));
            }
        }

        self.slots = slots;
        self.adjacency = adjacency;
        self.index_of = index_of;
        self.free.clear();
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check structural invariants: degree bookkeeping, dangling edge
    /// targets, edge-count consistency, and (for undirected stores) reverse
    /// records.
    pub fn validate(&self) -> GraphResult<()> {
        let mut counted = 0usize;
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(node) = slot.node.as_ref() else {
                if !self.adjacency[i].is_empty() {
                    return Err(GraphError::Invalid(format!(
                        "dead slot {i} still has {} edges",
                        self.adjacency[i].len()
                    )));
                }
                continue;
            };
            if node.degree as usize != self.adjacency[i].len() {
                return Err(GraphError::Invalid(format!(
                    "node {} degree {} != stored edges {}",
                    node.id,
                    node.degree,
                    self.adjacency[i].len()
                )));
            }
            for e in &self.adjacency[i] {
                if e.from != node.id {
                    return Err(GraphError::Invalid(format!(
                        "edge in slot of {} claims source {}",
                        node.id, e.from
                    )));
                }
                if self.slot(e.to).is_none() {
                    return Err(GraphError::Invalid(format!(
                        "edge {} -> {} targets a removed node",
                        e.from, e.to
                    )));
                }
                if !self.directed && e.from != e.to && !self.has_edge(e.to, e.from) {
                    return Err(GraphError::Invalid(format!(
                        "undirected edge {} -> {} has no reverse record",
                        e.from, e.to
                    )));
                }
            }
            counted += self.adjacency[i].len();
        }
        if counted != self.edge_count {
            return Err(GraphError::Invalid(format!(
                "edge count {} != stored records {counted}",
                self.edge_count
            )));
        }
        Ok(())
    }
}
