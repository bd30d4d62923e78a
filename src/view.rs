use egui::{Key, Pos2, Response, Sense, Ui, Widget};

use crate::draw::Drawer;
use crate::editor::{EditorKey, GraphEditor, PointerTarget};
use crate::elements::NodeId;
use crate::events::{Event, EventSink};
use crate::layout::Layout;
use crate::settings::SettingsStyle;

/// Widget wiring a [`GraphEditor`] to egui.
///
/// Translates raw pointer and keyboard input into the editor's entry points,
/// steps an optional [`Layout`] collaborator once per frame, publishes the
/// resulting [`Event`]s to an optional [`EventSink`] and draws the snapshot.
///
/// Create it fresh every frame:
/// ```no_run
/// # use egui_graph_editor::{GraphEditor, GraphEditorView};
/// # fn show(ui: &mut egui::Ui, editor: &mut GraphEditor) {
/// ui.add(GraphEditorView::new(editor));
/// # }
/// ```
pub struct GraphEditorView<'a> {
    editor: &'a mut GraphEditor,

    style: SettingsStyle,
    layout: Option<&'a mut dyn Layout>,
    event_sink: Option<&'a dyn EventSink>,
}

impl<'a> GraphEditorView<'a> {
    pub fn new(editor: &'a mut GraphEditor) -> Self {
        Self {
            editor,
            style: SettingsStyle::default(),
            layout: None,
            event_sink: None,
        }
    }

    /// Modifies default style settings.
    pub fn with_styles(mut self, style: SettingsStyle) -> Self {
        self.style = style;
        self
    }

    /// Supplies the layout collaborator stepped before input handling.
    pub fn with_layout(mut self, layout: &'a mut dyn Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Supplies a sink that will receive editor events. Works with closures
    /// `Fn(Event)` and, with the `events` feature, with
    /// `crossbeam::channel::Sender<Event>`.
    pub fn with_event_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    fn handle_input(&mut self, ui: &Ui, resp: &Response) -> Vec<Event> {
        let mut effects = Vec::new();

        ui.input(|i| {
            // The free-drag modifier arrives as modifier state, not as a key
            // event; feed edges of it into the editor's key latch.
            if i.modifiers.ctrl && !self.editor.free_drag_active() {
                effects.extend(self.editor.key_down(EditorKey::FreeDrag));
            } else if !i.modifiers.ctrl && self.editor.free_drag_active() {
                effects.extend(self.editor.key_up(EditorKey::FreeDrag));
            }

            for ev in &i.events {
                match ev {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        modifiers,
                    } => {
                        // Gestures start inside the canvas only. Releases are
                        // handled window-wide so an in-flight gesture still
                        // ends when the pointer leaves the widget.
                        if *pressed && !resp.rect.contains(*pos) {
                            continue;
                        }

                        let local = local_pos(resp, *pos);
                        let target = self.target_at(local);
                        if *pressed {
                            effects.extend(self.editor.pointer_down(
                                local,
                                target,
                                modifiers.ctrl,
                            ));
                        } else {
                            effects.extend(self.editor.pointer_up(local, target));
                        }
                    }
                    egui::Event::PointerMoved(pos) => {
                        effects.extend(self.editor.pointer_move(local_pos(resp, *pos)));
                    }
                    egui::Event::Key { key, pressed, .. } => {
                        if let Some(key) = decode_key(*key) {
                            if *pressed {
                                effects.extend(self.editor.key_down(key));
                            } else {
                                effects.extend(self.editor.key_up(key));
                            }
                        }
                    }
                    _ => {}
                }
            }
        });

        effects
    }

    /// Prospective link target under the pointer while a drag gesture is
    /// engaged. The drawer enlarges it as a cue that releasing here connects
    /// the two nodes.
    fn hover_target(&self, ui: &Ui, resp: &Response) -> Option<NodeId> {
        if !self.editor.drag_line().visible {
            return None;
        }
        let pos = ui.input(|i| i.pointer.hover_pos())?;
        self.editor
            .graph()
            .node_at(local_pos(resp, pos), self.style.node_radius)
            .filter(|id| Some(*id) != self.editor.engaged_node())
    }

    /// Nodes are drawn on top of links, so they win the hit test too.
    fn target_at(&self, pos: Pos2) -> Option<PointerTarget> {
        let g = self.editor.graph();
        if let Some(id) = g.node_at(pos, self.style.node_radius) {
            return Some(PointerTarget::Node(id));
        }
        g.link_at(pos, self.style.link_hit_tolerance)
            .map(PointerTarget::Link)
    }
}

impl Widget for GraphEditorView<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        if let Some(layout) = self.layout.as_deref_mut() {
            layout.next(self.editor.graph_mut());
        }

        let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

        let effects = self.handle_input(ui, &resp);
        if let Some(sink) = self.event_sink {
            for e in effects {
                sink.send(e);
            }
        }

        let hovered = self.hover_target(ui, &resp);
        Drawer::new(self.editor, &self.style, &painter)
            .with_hovered(hovered)
            .draw();

        // A running layout needs frames even without input.
        if self.layout.is_some() {
            ui.ctx().request_repaint();
        }

        resp
    }
}

fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
    (p - resp.rect.left_top()).to_pos2()
}

fn decode_key(key: Key) -> Option<EditorKey> {
    match key {
        Key::Backspace => Some(EditorKey::Backspace),
        Key::Delete => Some(EditorKey::Delete),
        Key::B => Some(EditorKey::B),
        Key::L => Some(EditorKey::L),
        Key::R => Some(EditorKey::R),
        _ => None,
    }
}
