use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Identity of a node.
///
/// Ids are assigned monotonically by [`crate::Graph`] and never reused, so a
/// `NodeId` denotes the same node for the whole lifetime of the editor even
/// across removals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Stores properties of a node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,

    /// Reflexive nodes render a self-loop marker. A self-loop is a node flag,
    /// not a link; links always connect two distinct nodes.
    reflexive: bool,

    location: Pos2,

    /// While `Some`, the node is claimed by an interactive drag and the layout
    /// collaborator must not move it.
    pin: Option<Pos2>,
}

impl Node {
    pub fn new(id: NodeId, location: Pos2) -> Self {
        Self {
            id,
            reflexive: false,
            location,
            pin: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn reflexive(&self) -> bool {
        self.reflexive
    }

    pub fn set_reflexive(&mut self, reflexive: bool) {
        self.reflexive = reflexive;
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, location: Pos2) {
        self.location = location;
    }

    pub fn pin(&self) -> Option<Pos2> {
        self.pin
    }

    pub fn pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Pins the node at `location`, moving it there immediately.
    pub fn set_pin(&mut self, location: Pos2) {
        self.pin = Some(location);
        self.location = location;
    }

    pub fn clear_pin(&mut self) {
        self.pin = None;
    }
}
