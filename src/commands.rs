use crate::editor::{EditorKey, GraphEditor};
use crate::elements::Link;
use crate::events::{Event, PayloadLinkRemove, PayloadLinkUpdate, PayloadNodeReflexive, PayloadNodeRemove};

/// A keyboard command over the current selection.
///
/// `R` is overloaded: it toggles the reflexive marker of a selected node and
/// orients a selected link towards its target; which one applies is resolved
/// at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    DeleteSelection,
    OrientBoth,
    OrientLeft,
    OrientRightOrReflexive,
}

impl Command {
    pub fn from_key(key: EditorKey) -> Option<Self> {
        match key {
            EditorKey::Backspace | EditorKey::Delete => Some(Self::DeleteSelection),
            EditorKey::B => Some(Self::OrientBoth),
            EditorKey::L => Some(Self::OrientLeft),
            EditorKey::R => Some(Self::OrientRightOrReflexive),
            EditorKey::FreeDrag => None,
        }
    }

    /// Applies the command to the editor's selection. No selection, or a
    /// selection the command does not apply to, is a no-op.
    pub(crate) fn apply(self, ed: &mut GraphEditor) -> Vec<Event> {
        let mut effects = Vec::new();

        match self {
            Self::DeleteSelection => delete_selection(ed, &mut effects),
            Self::OrientBoth => orient_selected_link(ed, true, true, &mut effects),
            Self::OrientLeft => orient_selected_link(ed, true, false, &mut effects),
            Self::OrientRightOrReflexive => {
                if let Some(id) = ed.selected_node() {
                    if let Some(n) = ed.graph_mut().node_mut(id) {
                        let reflexive = !n.reflexive();
                        n.set_reflexive(reflexive);
                        effects.push(Event::NodeReflexive(PayloadNodeReflexive {
                            id: id.index(),
                            reflexive,
                        }));
                    }
                } else {
                    orient_selected_link(ed, false, true, &mut effects);
                }
            }
        }

        effects
    }
}

fn delete_selection(ed: &mut GraphEditor, effects: &mut Vec<Event>) {
    if let Some(id) = ed.selected_node() {
        let incident: Vec<_> = ed.graph().links_of(id).map(Link::id).collect();
        if ed.graph_mut().remove_node(id).is_some() {
            for link_id in incident {
                effects.push(Event::LinkRemove(PayloadLinkRemove {
                    source: link_id.source().index(),
                    target: link_id.target().index(),
                }));
            }
            effects.push(Event::NodeRemove(PayloadNodeRemove { id: id.index() }));
        }
        ed.clear_selection(effects);
    } else if let Some(id) = ed.selected_link() {
        if ed.graph_mut().remove_link(id).is_some() {
            effects.push(Event::LinkRemove(PayloadLinkRemove {
                source: id.source().index(),
                target: id.target().index(),
            }));
        }
        ed.clear_selection(effects);
    }
}

fn orient_selected_link(ed: &mut GraphEditor, left: bool, right: bool, effects: &mut Vec<Event>) {
    let Some(id) = ed.selected_link() else {
        return;
    };
    if let Some(link) = ed.graph_mut().link_mut(id) {
        link.set_direction(left, right);
        effects.push(Event::LinkUpdate(PayloadLinkUpdate {
            source: id.source().index(),
            target: id.target().index(),
            left,
            right,
        }));
    }
}
