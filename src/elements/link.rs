use serde::{Deserialize, Serialize};

use super::NodeId;

/// Identity of a link: the canonically ordered pair of its endpoints.
///
/// Links are stored exactly once per unordered node pair with
/// `source < target`; which end an arrow points at is carried by the
/// [`Link`] flags, never by the storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId {
    source: NodeId,
    target: NodeId,
}

impl LinkId {
    /// Canonicalizes the pair. Returns `None` for a self-pair, which is not
    /// representable as a link (use [`super::Node::set_reflexive`] instead).
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                source: a,
                target: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                source: b,
                target: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn source(self) -> NodeId {
        self.source
    }

    pub fn target(self) -> NodeId {
        self.target
    }

    pub fn contains(self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}

/// Stores properties of a link.
///
/// `left` means an arrow points into [`LinkId::source`], `right` into
/// [`LinkId::target`]. Both set is a bidirectional link, neither set an
/// undirected one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    id: LinkId,

    left: bool,
    right: bool,
}

impl Link {
    pub fn new(id: LinkId, left: bool, right: bool) -> Self {
        Self { id, left, right }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn left(&self) -> bool {
        self.left
    }

    pub fn right(&self) -> bool {
        self.right
    }

    pub fn set_direction(&mut self, left: bool, right: bool) {
        self.left = left;
        self.right = right;
    }

    pub(crate) fn add_direction_into_target(&mut self, towards_target: bool) {
        if towards_target {
            self.right = true;
        } else {
            self.left = true;
        }
    }
}
