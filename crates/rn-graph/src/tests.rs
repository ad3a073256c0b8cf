//! Unit tests for rn-graph.
//!
//! All tests use small hand-crafted graphs; node ids are arbitrary u64s to
//! exercise the external-id mapping (they are deliberately not 0..n).

#[cfg(test)]
mod helpers {
    use rn_core::{GeoPoint, NodeId};

    use crate::{Edge, Graph, Node};

    pub fn node(id: u64) -> Node {
        Node::new(NodeId(id), GeoPoint::new(0.0, id as f64 * 0.01))
    }

    /// Chain 1-2-3-4-5 with unit weights, undirected.
    pub fn chain() -> Graph {
        let mut g = Graph::undirected();
        for id in 1..=5 {
            assert!(g.add_node(node(id)));
        }
        for id in 1..=4 {
            assert!(g.add_edge(Edge::new(NodeId(id), NodeId(id + 1), 1.0)));
        }
        g
    }
}

#[cfg(test)]
mod nodes {
    use rn_core::NodeId;

    use super::helpers::node;
    use crate::{Graph, NodeFlags, NodeKind};

    #[test]
    fn add_and_lookup() {
        let mut g = Graph::directed();
        assert!(g.add_node(node(10)));
        assert_eq!(g.num_nodes(), 1);
        assert_eq!(g.get_node(NodeId(10)).unwrap().id, NodeId(10));
        assert!(g.get_node(NodeId(11)).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut g = Graph::directed();
        assert!(g.add_node(node(10)));
        assert!(!g.add_node(node(10)));
        assert_eq!(g.num_nodes(), 1);
    }

    #[test]
    fn kind_and_flags_survive_insertion() {
        let mut g = Graph::directed();
        let n = node(1)
            .with_kind(NodeKind::Station)
            .with_flags(NodeFlags::ACCESSIBLE | NodeFlags::TRANSFER);
        g.add_node(n);
        let stored = g.get_node(NodeId(1)).unwrap();
        assert_eq!(stored.kind, NodeKind::Station);
        assert!(stored.flags.contains(NodeFlags::ACCESSIBLE));
        assert!(stored.flags.contains(NodeFlags::TRANSFER));
        assert!(!stored.flags.contains(NodeFlags::TRAFFIC_LIGHT));
    }

    #[test]
    fn remove_unknown_is_false() {
        let mut g = Graph::directed();
        assert!(!g.remove_node(NodeId(99)));
    }

    #[test]
    fn removed_id_can_be_reinserted() {
        let mut g = Graph::directed();
        g.add_node(node(1));
        assert!(g.remove_node(NodeId(1)));
        assert!(g.get_node(NodeId(1)).is_none());
        assert!(g.add_node(node(1)));
        assert_eq!(g.num_nodes(), 1);
    }
}

#[cfg(test)]
mod edges {
    use rn_core::NodeId;

    use super::helpers::{chain, node};
    use crate::{Edge, Graph};

    #[test]
    fn directed_counts() {
        let mut g = Graph::directed();
        g.add_node(node(1));
        g.add_node(node(2));
        assert!(g.add_edge(Edge::new(NodeId(1), NodeId(2), 3.0)));
        assert_eq!(g.num_edges(), 1);
        assert!(g.has_edge(NodeId(1), NodeId(2)));
        assert!(!g.has_edge(NodeId(2), NodeId(1)));
    }

    #[test]
    fn undirected_maintains_reverse() {
        let g = chain();
        // 4 undirected edges = 8 directed records
        assert_eq!(g.num_edges(), 8);
        for id in 1..=4u64 {
            assert!(g.has_edge(NodeId(id), NodeId(id + 1)));
            assert!(g.has_edge(NodeId(id + 1), NodeId(id)));
        }
        g.validate().unwrap();
    }

    #[test]
    fn duplicate_edge_is_noop() {
        let mut g = chain();
        assert!(!g.add_edge(Edge::new(NodeId(1), NodeId(2), 9.0)));
        assert_eq!(g.num_edges(), 8);
        // Weight untouched by the rejected insert.
        assert_eq!(g.get_edge(NodeId(1), NodeId(2)).unwrap().weight, 1.0);
    }

    #[test]
    fn missing_endpoint_is_false() {
        let mut g = Graph::directed();
        g.add_node(node(1));
        assert!(!g.add_edge(Edge::new(NodeId(1), NodeId(2), 1.0)));
        assert!(!g.add_edge(Edge::new(NodeId(2), NodeId(1), 1.0)));
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn remove_edge_both_directions() {
        let mut g = chain();
        assert!(g.remove_edge(NodeId(2), NodeId(3)));
        assert!(!g.has_edge(NodeId(2), NodeId(3)));
        assert!(!g.has_edge(NodeId(3), NodeId(2)));
        assert_eq!(g.num_edges(), 6);
        assert!(!g.remove_edge(NodeId(2), NodeId(3)));
        g.validate().unwrap();
    }

    #[test]
    fn update_weight_live() {
        let mut g = chain();
        assert!(g.update_edge_weight(NodeId(1), NodeId(2), 7.5));
        assert_eq!(g.get_edge(NodeId(1), NodeId(2)).unwrap().weight, 7.5);
        // Undirected: reverse record sees the same weight.
        assert_eq!(g.get_edge(NodeId(2), NodeId(1)).unwrap().weight, 7.5);
        assert!(!g.update_edge_weight(NodeId(1), NodeId(5), 1.0));
    }

    #[test]
    fn blocked_edge_flag() {
        let mut g = chain();
        g.update_edge_weight(NodeId(1), NodeId(2), f64::INFINITY);
        assert!(g.get_edge(NodeId(1), NodeId(2)).unwrap().is_blocked());
    }

    #[test]
    fn neighbors_insertion_order() {
        let mut g = Graph::directed();
        for id in [1, 2, 3, 4] {
            g.add_node(node(id));
        }
        g.add_edge(Edge::new(NodeId(1), NodeId(3), 1.0));
        g.add_edge(Edge::new(NodeId(1), NodeId(2), 1.0));
        g.add_edge(Edge::new(NodeId(1), NodeId(4), 1.0));
        let order: Vec<_> = g.neighbors(NodeId(1)).iter().map(|e| e.to).collect();
        assert_eq!(order, vec![NodeId(3), NodeId(2), NodeId(4)]);
        assert!(g.neighbors(NodeId(99)).is_empty());
    }

    #[test]
    fn degree_tracks_mutations() {
        let mut g = chain();
        assert_eq!(g.degree(NodeId(2)), Some(2)); // edges to 1 and 3
        g.remove_edge(NodeId(2), NodeId(3));
        assert_eq!(g.degree(NodeId(2)), Some(1));
        assert_eq!(g.degree(NodeId(3)), Some(1));
        g.validate().unwrap();
    }
}

#[cfg(test)]
mod removal_and_compaction {
    use rn_core::NodeId;

    use super::helpers::{chain, node};
    use crate::{Edge, Graph};

    #[test]
    fn remove_node_strips_incoming() {
        let mut g = chain();
        assert!(g.remove_node(NodeId(3)));
        assert_eq!(g.num_nodes(), 4);
        // Edges 2-3 and 3-4 gone in both directions: 8 - 4 = 4 records.
        assert_eq!(g.num_edges(), 4);
        assert!(!g.has_edge(NodeId(2), NodeId(3)));
        assert!(!g.has_edge(NodeId(4), NodeId(3)));
        assert_eq!(g.degree(NodeId(2)), Some(1));
        assert_eq!(g.degree(NodeId(4)), Some(1));
        g.validate().unwrap();
    }

    #[test]
    fn directed_incoming_sweep() {
        let mut g = Graph::directed();
        for id in [1, 2, 3] {
            g.add_node(node(id));
        }
        g.add_edge(Edge::new(NodeId(1), NodeId(3), 1.0));
        g.add_edge(Edge::new(NodeId(2), NodeId(3), 1.0));
        g.add_edge(Edge::new(NodeId(3), NodeId(1), 1.0));
        g.remove_node(NodeId(3));
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.degree(NodeId(1)), Some(0));
        assert_eq!(g.degree(NodeId(2)), Some(0));
        g.validate().unwrap();
    }

    #[test]
    fn heavy_deletion_compacts() {
        let mut g = Graph::directed();
        for id in 0..100 {
            g.add_node(node(id));
        }
        for id in 0..99 {
            g.add_edge(Edge::new(NodeId(id), NodeId(id + 1), 1.0));
        }
        // Remove every other node; the free-list crosses the 25% threshold
        // long before we finish, so compaction must have run.
        for id in (0..100).step_by(2) {
            assert!(g.remove_node(NodeId(id)));
        }
        assert_eq!(g.num_nodes(), 50);
        assert!(g.free_slots() * 4 <= g.num_nodes());
        // Survivors are still addressable by external id after compaction.
        for id in (1..100).step_by(2) {
            assert!(g.get_node(NodeId(id)).is_some(), "lost node {id}");
        }
        g.validate().unwrap();
    }

    #[test]
    fn slot_reuse_does_not_leak_edges() {
        let mut g = Graph::directed();
        for id in [1, 2, 3] {
            g.add_node(node(id));
        }
        g.add_edge(Edge::new(NodeId(1), NodeId(2), 1.0));
        g.remove_node(NodeId(2));
        // New node may land in node 2's old slot; it must start clean.
        g.add_node(node(9));
        assert_eq!(g.degree(NodeId(9)), Some(0));
        assert!(g.neighbors(NodeId(9)).is_empty());
        assert!(!g.has_edge(NodeId(1), NodeId(2)));
        g.validate().unwrap();
    }

    #[test]
    fn counts_after_mixed_mutations() {
        let mut g = chain();
        g.remove_edge(NodeId(1), NodeId(2));
        g.add_edge(crate::Edge::new(NodeId(1), NodeId(3), 2.0));
        g.remove_node(NodeId(5));
        assert_eq!(g.num_nodes(), 4);
        // chain: 8 - 2 (1-2) + 2 (1-3) - 2 (4-5) = 6
        assert_eq!(g.num_edges(), 6);
        g.validate().unwrap();
    }
}
