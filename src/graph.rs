use std::collections::BTreeMap;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::elements::{Link, LinkId, Node, NodeId};

/// Stores the node set and the link set of the edited graph.
///
/// Nodes are kept in an id-keyed map and compared by id only; ids are assigned
/// monotonically and never reused. Links are identified by their canonical
/// [`LinkId`] and stored exactly once per unordered node pair, so a link can
/// never outlive its endpoints. The link set is a plain vector scanned by
/// identity; it stays at interactive-editing scale, not bulk-graph scale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    links: Vec<Link>,

    /// Highest id handed out so far. Incremented before each assignment.
    last_node_id: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id and inserts a non-reflexive node at `location`.
    pub fn add_node(&mut self, location: Pos2) -> NodeId {
        self.last_node_id += 1;
        let id = NodeId::new(self.last_node_id);
        self.nodes.insert(id, Node::new(id, location));
        id
    }

    /// Inserts a pre-built node, keeping the id counter ahead of every id seen
    /// so far. Used to seed an initial graph.
    pub fn insert_node(&mut self, node: Node) {
        self.last_node_id = self.last_node_id.max(node.id().index());
        self.nodes.insert(node.id(), node);
    }

    /// Removes a node together with every link attached to it. No-op when the
    /// node is already absent.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        self.links.retain(|l| !l.id().contains(id));
        Some(node)
    }

    /// Adds a direction from `a` towards `b`, inserting the link if the pair
    /// is not connected yet.
    ///
    /// Repeating the gesture in the opposite direction strengthens the
    /// existing link to bidirectional instead of creating a parallel one.
    /// Returns `None` when `a == b` or either node is absent.
    pub fn upsert_link(&mut self, a: NodeId, b: NodeId) -> Option<LinkId> {
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return None;
        }

        let id = LinkId::new(a, b)?;
        let towards_target = a < b;
        match self.links.iter_mut().find(|l| l.id() == id) {
            Some(link) => link.add_direction_into_target(towards_target),
            None => self
                .links
                .push(Link::new(id, !towards_target, towards_target)),
        }

        debug_assert!(id.source() < id.target());
        Some(id)
    }

    /// Removes a link. No-op when absent.
    pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
        let pos = self.links.iter().position(|l| l.id() == id)?;
        Some(self.links.remove(pos))
    }

    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        let id = LinkId::new(a, b)?;
        self.links.iter().any(|l| l.id() == id).then_some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id() == id)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id() == id)
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn links_iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Iterates over all links attached to `id`.
    pub fn links_of(&self, id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.id().contains(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn last_node_id(&self) -> usize {
        self.last_node_id
    }

    /// Finds the node under `pos`. The set stays at interactive-editing scale,
    /// so a linear scan is fine here.
    pub fn node_at(&self, pos: Pos2, radius: f32) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.location().distance(pos) <= radius)
            .map(Node::id)
    }

    /// Finds the link whose segment passes within `tolerance` of `pos`.
    pub fn link_at(&self, pos: Pos2, tolerance: f32) -> Option<LinkId> {
        self.links
            .iter()
            .find(|l| {
                let (Some(source), Some(target)) =
                    (self.node(l.id().source()), self.node(l.id().target()))
                else {
                    return false;
                };
                distance_to_segment(pos, source.location(), target.location()) <= tolerance
            })
            .map(Link::id)
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0. {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0., 1.);
    p.distance(a + ab * t)
}
