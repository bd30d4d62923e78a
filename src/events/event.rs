use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeCreate {
    pub id: usize,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeRemove {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeSelect {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDeselect {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeReflexive {
    pub id: usize,
    pub reflexive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDragStart {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeMove {
    pub id: usize,
    pub new_pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDragEnd {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLinkCreate {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLinkUpdate {
    pub source: usize,
    pub target: usize,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLinkRemove {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLinkSelect {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLinkDeselect {
    pub source: usize,
    pub target: usize,
}

/// A change that occurred in the editor model.
///
/// Every mutation reports at least one event, so any event doubles as the
/// "redraw needed" signal for a renderer. `NodeCreate`, `NodeRemove`,
/// `LinkCreate` and `LinkRemove` change the size of the node or link set and
/// are the cue for a force-layout collaborator to re-seed its simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeCreate(PayloadNodeCreate),
    NodeRemove(PayloadNodeRemove),
    NodeSelect(PayloadNodeSelect),
    NodeDeselect(PayloadNodeDeselect),
    NodeReflexive(PayloadNodeReflexive),
    NodeDragStart(PayloadNodeDragStart),
    NodeMove(PayloadNodeMove),
    NodeDragEnd(PayloadNodeDragEnd),
    LinkCreate(PayloadLinkCreate),
    LinkUpdate(PayloadLinkUpdate),
    LinkRemove(PayloadLinkRemove),
    LinkSelect(PayloadLinkSelect),
    LinkDeselect(PayloadLinkDeselect),
}

impl Event {
    /// Whether the node or link set changed size, i.e. whether a layout
    /// collaborator should re-seed its forces.
    pub fn changes_topology(&self) -> bool {
        matches!(
            self,
            Event::NodeCreate(_)
                | Event::NodeRemove(_)
                | Event::LinkCreate(_)
                | Event::LinkRemove(_)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_node_create() {
        let event = Event::NodeCreate(PayloadNodeCreate {
            id: 3,
            pos: [300.0, 200.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"NodeCreate":{"id":3,"pos":[300.0,200.0]}}"#);

        let event: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(
            event,
            Event::NodeCreate(PayloadNodeCreate {
                id: 3,
                pos: [300.0, 200.0]
            })
        );
    }

    #[test]
    fn test_contract_link_update() {
        let event = Event::LinkUpdate(PayloadLinkUpdate {
            source: 0,
            target: 1,
            left: true,
            right: true,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"LinkUpdate":{"source":0,"target":1,"left":true,"right":true}}"#
        );

        let event: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(
            event,
            Event::LinkUpdate(PayloadLinkUpdate {
                source: 0,
                target: 1,
                left: true,
                right: true,
            })
        );
    }

    #[test]
    fn test_topology_changes() {
        assert!(Event::NodeRemove(PayloadNodeRemove { id: 1 }).changes_topology());
        assert!(!Event::NodeSelect(PayloadNodeSelect { id: 1 }).changes_topology());
        assert!(!Event::LinkUpdate(PayloadLinkUpdate {
            source: 0,
            target: 1,
            left: true,
            right: false,
        })
        .changes_topology());
    }
}
