use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::elements::{LinkId, Node, NodeId};
use crate::events::{
    Event, PayloadLinkCreate, PayloadLinkDeselect, PayloadLinkSelect, PayloadLinkUpdate,
    PayloadNodeCreate, PayloadNodeDeselect, PayloadNodeDragEnd, PayloadNodeDragStart,
    PayloadNodeMove, PayloadNodeSelect,
};
use crate::Graph;

/// Keys the editor reacts to. The free-drag modifier participates in the
/// same keydown/keyup latch as command keys but is exempt from the
/// "requires a selection" precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
    Backspace,
    Delete,
    B,
    L,
    R,
    FreeDrag,
}

/// What the pointer landed on, as resolved by the caller's hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Node(NodeId),
    Link(LinkId),
}

/// Rubber-band edge preview shown while dragging from a node. The renderer
/// reads this directive every frame; the editor owns it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragLine {
    pub visible: bool,
    pub from: Pos2,
    pub to: Pos2,
}

impl Default for DragLine {
    fn default() -> Self {
        Self {
            visible: false,
            from: Pos2::ZERO,
            to: Pos2::ZERO,
        }
    }
}

/// The interaction state machine of the editor.
///
/// Consumes pointer and key events through one entry point per event category
/// and turns them into [`Graph`] mutations. Every entry point is a total
/// function over the current model: input that matches no handled case is
/// ignored, partial gestures are discarded on gesture-ending events, and each
/// applied mutation is reported in the returned effect list.
#[derive(Debug, Default)]
pub struct GraphEditor {
    graph: Graph,

    // At most one of these two is set; the setters below keep it that way.
    selected_node: Option<NodeId>,
    selected_link: Option<LinkId>,

    // Transient anchors of the current pointer gesture.
    mousedown_node: Option<NodeId>,
    mouseup_node: Option<NodeId>,
    mousedown_link: Option<LinkId>,

    /// Node currently claimed by a modifier-held layout drag.
    dragged_node: Option<NodeId>,
    free_drag: bool,

    /// Only the first keydown of a held key takes effect; any keyup re-arms.
    last_key_down: Option<EditorKey>,

    drag_line: DragLine,
}

impl GraphEditor {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected_node
    }

    pub fn selected_link(&self) -> Option<LinkId> {
        self.selected_link
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        self.dragged_node
    }

    /// Node engaged by a pending link-drag gesture, if any.
    pub fn engaged_node(&self) -> Option<NodeId> {
        self.mousedown_node
    }

    pub fn free_drag_active(&self) -> bool {
        self.free_drag
    }

    pub fn drag_line(&self) -> DragLine {
        self.drag_line
    }

    pub fn pointer_down(
        &mut self,
        pos: Pos2,
        target: Option<PointerTarget>,
        modifier_held: bool,
    ) -> Vec<Event> {
        let mut effects = Vec::new();

        if modifier_held || self.free_drag {
            // Layout drag: claim the node with a pin and bypass the editor's
            // own engagement logic for the rest of the gesture.
            if let Some(PointerTarget::Node(id)) = target {
                if let Some(n) = self.graph.node_mut(id) {
                    n.set_pin(n.location());
                    self.dragged_node = Some(id);
                    effects.push(Event::NodeDragStart(PayloadNodeDragStart {
                        id: id.index(),
                    }));
                }
            }
            return effects;
        }

        match target {
            Some(PointerTarget::Node(id)) => {
                let Some(location) = self.graph.node(id).map(Node::location) else {
                    return effects;
                };

                self.mousedown_node = Some(id);
                self.toggle_node_selection(id, &mut effects);

                self.drag_line = DragLine {
                    visible: true,
                    from: location,
                    to: location,
                };
            }
            Some(PointerTarget::Link(id)) => {
                self.mousedown_link = Some(id);
                self.toggle_link_selection(id, &mut effects);
            }
            None => {
                if self.mousedown_node.is_none() && self.mousedown_link.is_none() {
                    let id = self.graph.add_node(pos);
                    effects.push(Event::NodeCreate(PayloadNodeCreate {
                        id: id.index(),
                        pos: [pos.x, pos.y],
                    }));
                }
            }
        }

        effects
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> Vec<Event> {
        let mut effects = Vec::new();

        if let Some(id) = self.dragged_node {
            if let Some(n) = self.graph.node_mut(id) {
                n.set_pin(pos);
                effects.push(Event::NodeMove(PayloadNodeMove {
                    id: id.index(),
                    new_pos: [pos.x, pos.y],
                }));
            }
            return effects;
        }

        if let Some(down) = self.mousedown_node {
            // Keep the rubber band attached: a layout may have moved the
            // engaged node since the last pointer event.
            if let Some(from) = self.graph.node(down).map(Node::location) {
                self.drag_line.from = from;
            }
            self.drag_line.to = pos;
        }

        effects
    }

    pub fn pointer_up(&mut self, _pos: Pos2, target: Option<PointerTarget>) -> Vec<Event> {
        let mut effects = Vec::new();

        if let Some(id) = self.dragged_node.take() {
            if let Some(n) = self.graph.node_mut(id) {
                n.clear_pin();
            }
            effects.push(Event::NodeDragEnd(PayloadNodeDragEnd { id: id.index() }));
            return effects;
        }

        let Some(down) = self.mousedown_node else {
            self.reset_mouse_vars();
            return effects;
        };

        self.drag_line.visible = false;

        if let Some(PointerTarget::Node(up)) = target {
            self.mouseup_node = Some(up);

            // Drag-to-self: abort without touching the selection.
            if up == down {
                self.reset_mouse_vars();
                return effects;
            }

            let existed = self.graph.link_between(down, up).is_some();
            if let Some(id) = self.graph.upsert_link(down, up) {
                if existed {
                    if let Some(link) = self.graph.link(id) {
                        effects.push(Event::LinkUpdate(PayloadLinkUpdate {
                            source: id.source().index(),
                            target: id.target().index(),
                            left: link.left(),
                            right: link.right(),
                        }));
                    }
                } else {
                    effects.push(Event::LinkCreate(PayloadLinkCreate {
                        source: id.source().index(),
                        target: id.target().index(),
                    }));
                }
                self.select_link(id, &mut effects);
            }
        }

        // Released over background or a link: the gesture is simply abandoned.
        self.reset_mouse_vars();
        effects
    }

    pub fn key_down(&mut self, key: EditorKey) -> Vec<Event> {
        if self.last_key_down.is_some() {
            return Vec::new();
        }
        self.last_key_down = Some(key);

        if key == EditorKey::FreeDrag {
            self.free_drag = true;
            return Vec::new();
        }

        match crate::commands::Command::from_key(key) {
            Some(cmd) => cmd.apply(self),
            None => Vec::new(),
        }
    }

    pub fn key_up(&mut self, key: EditorKey) -> Vec<Event> {
        self.last_key_down = None;

        let mut effects = Vec::new();
        if key == EditorKey::FreeDrag {
            self.free_drag = false;
            // Release an in-flight pin; nothing would ever clear it otherwise.
            if let Some(id) = self.dragged_node.take() {
                if let Some(n) = self.graph.node_mut(id) {
                    n.clear_pin();
                }
                effects.push(Event::NodeDragEnd(PayloadNodeDragEnd { id: id.index() }));
            }
        }
        effects
    }

    fn reset_mouse_vars(&mut self) {
        self.mousedown_node = None;
        self.mouseup_node = None;
        self.mousedown_link = None;
    }

    fn toggle_node_selection(&mut self, id: NodeId, effects: &mut Vec<Event>) {
        if self.selected_node == Some(id) {
            self.deselect_node(id, effects);
        } else {
            self.select_node(id, effects);
        }
    }

    fn toggle_link_selection(&mut self, id: LinkId, effects: &mut Vec<Event>) {
        if self.selected_link == Some(id) {
            self.deselect_link(id, effects);
        } else {
            self.select_link(id, effects);
        }
    }

    fn select_node(&mut self, id: NodeId, effects: &mut Vec<Event>) {
        self.clear_selection(effects);
        self.selected_node = Some(id);
        effects.push(Event::NodeSelect(PayloadNodeSelect { id: id.index() }));
    }

    fn select_link(&mut self, id: LinkId, effects: &mut Vec<Event>) {
        self.clear_selection(effects);
        self.selected_link = Some(id);
        effects.push(Event::LinkSelect(PayloadLinkSelect {
            source: id.source().index(),
            target: id.target().index(),
        }));
    }

    fn deselect_node(&mut self, id: NodeId, effects: &mut Vec<Event>) {
        if self.selected_node.take() == Some(id) {
            effects.push(Event::NodeDeselect(PayloadNodeDeselect { id: id.index() }));
        }
    }

    fn deselect_link(&mut self, id: LinkId, effects: &mut Vec<Event>) {
        if self.selected_link.take() == Some(id) {
            effects.push(Event::LinkDeselect(PayloadLinkDeselect {
                source: id.source().index(),
                target: id.target().index(),
            }));
        }
    }

    pub(crate) fn clear_selection(&mut self, effects: &mut Vec<Event>) {
        if let Some(id) = self.selected_node {
            self.deselect_node(id, effects);
        }
        if let Some(id) = self.selected_link {
            self.deselect_link(id, effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn seeded_editor() -> (GraphEditor, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let a = NodeId::new(0);
        let b = NodeId::new(1);
        let c = NodeId::new(2);
        g.insert_node(Node::new(a, Pos2::new(0., 0.)));
        g.insert_node(Node::new(b, Pos2::new(100., 0.)));
        g.insert_node(Node::new(c, Pos2::new(200., 0.)));
        g.upsert_link(a, b);
        g.upsert_link(b, c);
        (GraphEditor::new(g), a, b, c)
    }

    fn node_target(id: NodeId) -> Option<PointerTarget> {
        Some(PointerTarget::Node(id))
    }

    #[test]
    fn background_down_creates_node() {
        let (mut ed, _, _, _) = seeded_editor();
        let effects = ed.pointer_down(Pos2::new(300., 200.), None, false);

        assert_eq!(ed.graph().node_count(), 4);
        assert_eq!(ed.graph().last_node_id(), 3);
        let n = ed.graph().node(NodeId::new(3)).unwrap();
        assert_eq!(n.location(), Pos2::new(300., 200.));
        assert!(!n.reflexive());

        assert_eq!(
            effects,
            vec![Event::NodeCreate(PayloadNodeCreate {
                id: 3,
                pos: [300., 200.]
            })]
        );
        // Creation does not select the new node.
        assert_eq!(ed.selected_node(), None);
    }

    #[test]
    fn background_down_with_modifier_is_ignored() {
        let (mut ed, _, _, _) = seeded_editor();
        let effects = ed.pointer_down(Pos2::new(300., 200.), None, true);
        assert!(effects.is_empty());
        assert_eq!(ed.graph().node_count(), 3);
    }

    #[test]
    fn node_down_engages_and_shows_drag_line() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);

        assert_eq!(ed.selected_node(), Some(a));
        assert_eq!(ed.selected_link(), None);
        let dl = ed.drag_line();
        assert!(dl.visible);
        assert_eq!(dl.from, Pos2::new(0., 0.));

        ed.pointer_move(Pos2::new(40., 30.));
        assert_eq!(ed.drag_line().to, Pos2::new(40., 30.));
    }

    #[test]
    fn drag_line_follows_the_engaged_node() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        assert_eq!(ed.drag_line().from, Pos2::ZERO);

        // A layout moves the engaged node between pointer events.
        ed.graph_mut()
            .node_mut(a)
            .unwrap()
            .set_location(Pos2::new(10., 5.));
        ed.pointer_move(Pos2::new(40., 30.));

        let dl = ed.drag_line();
        assert_eq!(dl.from, Pos2::new(10., 5.));
        assert_eq!(dl.to, Pos2::new(40., 30.));
    }

    #[test]
    fn node_down_toggles_selection() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_up(Pos2::ZERO, node_target(a));
        assert_eq!(ed.selected_node(), Some(a));

        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_up(Pos2::ZERO, node_target(a));
        assert_eq!(ed.selected_node(), None);
    }

    #[test]
    fn selection_is_exclusive() {
        let (mut ed, a, b, _) = seeded_editor();
        let ab = ed.graph().link_between(a, b).unwrap();

        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_up(Pos2::ZERO, node_target(a));
        assert_eq!(ed.selected_node(), Some(a));

        ed.pointer_down(Pos2::new(50., 0.), Some(PointerTarget::Link(ab)), false);
        ed.pointer_up(Pos2::new(50., 0.), Some(PointerTarget::Link(ab)));
        assert_eq!(ed.selected_node(), None);
        assert_eq!(ed.selected_link(), Some(ab));
    }

    #[test]
    fn drag_between_nodes_creates_link() {
        let (mut ed, a, _, c) = seeded_editor();
        assert!(ed.graph().link_between(a, c).is_none());

        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_move(Pos2::new(150., 0.));
        let effects = ed.pointer_up(Pos2::new(200., 0.), node_target(c));

        let ac = ed.graph().link_between(a, c).unwrap();
        assert_eq!(ed.selected_link(), Some(ac));
        assert_eq!(ed.selected_node(), None);
        assert!(!ed.drag_line().visible);
        assert!(effects.contains(&Event::LinkCreate(PayloadLinkCreate {
            source: 0,
            target: 2
        })));

        let link = ed.graph().link(ac).unwrap();
        assert!(link.right() && !link.left());
    }

    #[test]
    fn redrag_existing_pair_strengthens_link() {
        let (mut ed, a, b, _) = seeded_editor();

        // b -> a over the existing a -> b link.
        ed.pointer_down(Pos2::new(100., 0.), node_target(b), false);
        let effects = ed.pointer_up(Pos2::ZERO, node_target(a));

        assert_eq!(ed.graph().link_count(), 2);
        let link = ed.graph().link(ed.graph().link_between(a, b).unwrap()).unwrap();
        assert!(link.left() && link.right());
        assert!(effects.contains(&Event::LinkUpdate(PayloadLinkUpdate {
            source: 0,
            target: 1,
            left: true,
            right: true,
        })));
    }

    #[test]
    fn drag_to_self_aborts_and_keeps_selection() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        assert_eq!(ed.selected_node(), Some(a));

        let effects = ed.pointer_up(Pos2::new(2., 2.), node_target(a));

        assert!(effects.is_empty());
        assert!(!ed.drag_line().visible);
        assert_eq!(ed.graph().link_count(), 2);
        // The engaged node stays selected after an aborted self-drag.
        assert_eq!(ed.selected_node(), Some(a));
        assert_eq!(ed.mousedown_node, None);
        assert_eq!(ed.mouseup_node, None);
    }

    #[test]
    fn release_over_background_abandons_gesture() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_move(Pos2::new(400., 400.));
        let effects = ed.pointer_up(Pos2::new(400., 400.), None);

        assert!(effects.is_empty());
        assert!(!ed.drag_line().visible);
        assert_eq!(ed.graph().link_count(), 2);
        assert_eq!(ed.mousedown_node, None);
    }

    #[test]
    fn engaged_gesture_suppresses_node_creation() {
        let (mut ed, a, b, _) = seeded_editor();
        let ab = ed.graph().link_between(a, b).unwrap();

        // A link mousedown leaves `mousedown_link` set; a (synthetic)
        // background mousedown before any mouseup must not create a node.
        ed.pointer_down(Pos2::new(50., 0.), Some(PointerTarget::Link(ab)), false);
        ed.pointer_down(Pos2::new(300., 300.), None, false);
        assert_eq!(ed.graph().node_count(), 3);
    }

    #[test]
    fn free_drag_pins_and_releases() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.key_down(EditorKey::FreeDrag);
        assert!(ed.free_drag_active());

        let effects = ed.pointer_down(Pos2::ZERO, node_target(a), false);
        assert_eq!(
            effects,
            vec![Event::NodeDragStart(PayloadNodeDragStart { id: 0 })]
        );
        assert!(ed.graph().node(a).unwrap().pinned());

        ed.pointer_move(Pos2::new(70., 80.));
        let n = ed.graph().node(a).unwrap();
        assert_eq!(n.pin(), Some(Pos2::new(70., 80.)));
        assert_eq!(n.location(), Pos2::new(70., 80.));

        let effects = ed.pointer_up(Pos2::new(70., 80.), node_target(a));
        assert_eq!(effects, vec![Event::NodeDragEnd(PayloadNodeDragEnd { id: 0 })]);
        assert!(!ed.graph().node(a).unwrap().pinned());
        assert_eq!(ed.graph().node(a).unwrap().location(), Pos2::new(70., 80.));

        // No edge was drawn and nothing got selected by the layout drag.
        assert_eq!(ed.graph().link_count(), 2);
        assert_eq!(ed.selected_node(), None);
    }

    #[test]
    fn free_drag_release_mid_gesture_unpins() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.key_down(EditorKey::FreeDrag);
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        assert!(ed.graph().node(a).unwrap().pinned());

        let effects = ed.key_up(EditorKey::FreeDrag);
        assert!(!ed.free_drag_active());
        assert!(!ed.graph().node(a).unwrap().pinned());
        assert_eq!(effects, vec![Event::NodeDragEnd(PayloadNodeDragEnd { id: 0 })]);
    }

    #[test]
    fn key_repeat_is_latched() {
        let (mut ed, a, _, _) = seeded_editor();
        ed.pointer_down(Pos2::ZERO, node_target(a), false);
        ed.pointer_up(Pos2::ZERO, node_target(a));
        assert_eq!(ed.selected_node(), Some(a));

        // Held "R" repeats: only the first keydown toggles.
        assert!(!ed.graph().node(a).unwrap().reflexive());
        ed.key_down(EditorKey::R);
        assert!(ed.graph().node(a).unwrap().reflexive());
        ed.key_down(EditorKey::R);
        ed.key_down(EditorKey::R);
        assert!(ed.graph().node(a).unwrap().reflexive());

        ed.key_up(EditorKey::R);
        ed.key_down(EditorKey::R);
        assert!(!ed.graph().node(a).unwrap().reflexive());
    }

    #[test]
    fn selection_invariant_holds_through_arbitrary_protocol() {
        let (mut ed, a, b, c) = seeded_editor();
        let ab = ed.graph().link_between(a, b).unwrap();

        let steps: Vec<Box<dyn Fn(&mut GraphEditor) -> Vec<Event>>> = vec![
            Box::new(move |e| e.pointer_down(Pos2::ZERO, Some(PointerTarget::Node(a)), false)),
            Box::new(move |e| e.pointer_up(Pos2::ZERO, Some(PointerTarget::Node(c)))),
            Box::new(move |e| {
                e.pointer_down(Pos2::new(50., 0.), Some(PointerTarget::Link(ab)), false)
            }),
            Box::new(move |e| e.pointer_up(Pos2::new(50., 0.), None)),
            Box::new(|e| e.key_down(EditorKey::B)),
            Box::new(|e| e.key_up(EditorKey::B)),
            Box::new(|e| e.pointer_down(Pos2::new(400., 10.), None, false)),
            Box::new(|e| e.key_down(EditorKey::Delete)),
            Box::new(|e| e.key_up(EditorKey::Delete)),
        ];

        for step in steps {
            step(&mut ed);
            assert!(
                ed.selected_node().is_none() || ed.selected_link().is_none(),
                "node and link selected at the same time"
            );
            for l in ed.graph().links_iter() {
                assert!(l.id().source() < l.id().target());
            }
        }
    }
}
