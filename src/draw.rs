use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};

use crate::editor::GraphEditor;
use crate::elements::{Link, Node, NodeId};
use crate::settings::SettingsStyle;

/// Paints the current editor snapshot: links first, then the drag line, then
/// nodes on top. Selected elements are postponed so they end up above their
/// unselected siblings.
pub struct Drawer<'a> {
    editor: &'a GraphEditor,
    style: &'a SettingsStyle,
    painter: &'a Painter,
    hovered: Option<NodeId>,
    delayed: Vec<Shape>,
}

impl<'a> Drawer<'a> {
    pub fn new(editor: &'a GraphEditor, style: &'a SettingsStyle, painter: &'a Painter) -> Self {
        Self {
            editor,
            style,
            painter,
            hovered: None,
            delayed: Vec::new(),
        }
    }

    /// Marks the prospective target of an engaged drag gesture. It is drawn
    /// enlarged as a cue that releasing here connects the nodes.
    pub fn with_hovered(mut self, hovered: Option<NodeId>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn draw(mut self) {
        self.draw_links();
        self.draw_drag_line();
        self.draw_nodes();
        self.draw_postponed();
    }

    fn draw_postponed(&mut self) {
        for s in self.delayed.drain(..) {
            self.painter.add(s);
        }
    }

    fn draw_links(&mut self) {
        let g = self.editor.graph();
        for link in g.links_iter() {
            let (Some(source), Some(target)) =
                (g.node(link.id().source()), g.node(link.id().target()))
            else {
                continue;
            };

            let selected = self.editor.selected_link() == Some(link.id());
            let color = if selected {
                Color32::from_rgb(0x30, 0x30, 0x30)
            } else {
                Color32::from_rgb(0x88, 0x88, 0x88)
            };

            let shapes = self.link_shapes(link, source.location(), target.location(), color);
            if selected {
                self.delayed.extend(shapes);
            } else {
                for s in shapes {
                    self.painter.add(s);
                }
            }
        }
    }

    /// Builds the padded segment plus the arrowheads dictated by the link's
    /// direction flags.
    fn link_shapes(&self, link: &Link, from: Pos2, to: Pos2, color: Color32) -> Vec<Shape> {
        let vec = to - from;
        let len = vec.length();
        if len == 0. {
            return Vec::new();
        }
        let dir = vec / len;

        let source_padding = if link.left() {
            self.style.link_padding_arrow
        } else {
            self.style.link_padding_plain
        };
        let target_padding = if link.right() {
            self.style.link_padding_arrow
        } else {
            self.style.link_padding_plain
        };

        let start = from + dir * source_padding;
        let end = to - dir * target_padding;
        let stroke = Stroke::new(self.style.link_width, color);

        let mut shapes = vec![Shape::line_segment([start, end], stroke)];
        if link.right() {
            shapes.extend(self.arrowhead(end, dir, stroke));
        }
        if link.left() {
            shapes.extend(self.arrowhead(start, -dir, stroke));
        }
        shapes
    }

    fn arrowhead(&self, tip: Pos2, dir: Vec2, stroke: Stroke) -> Vec<Shape> {
        let angle = std::f32::consts::TAU / 12.;
        let size = self.style.arrow_size;
        vec![
            Shape::line_segment([tip, tip - rotate_vector(dir, angle) * size], stroke),
            Shape::line_segment([tip, tip - rotate_vector(dir, -angle) * size], stroke),
        ]
    }

    fn draw_drag_line(&mut self) {
        let dl = self.editor.drag_line();
        if !dl.visible {
            return;
        }

        let stroke = Stroke::new(self.style.link_width, Color32::from_rgb(0x50, 0x50, 0x50));
        self.painter.add(Shape::line_segment([dl.from, dl.to], stroke));

        let vec = dl.to - dl.from;
        let len = vec.length();
        if len > 0. {
            for s in self.arrowhead(dl.to, vec / len, stroke) {
                self.painter.add(s);
            }
        }
    }

    fn draw_nodes(&mut self) {
        for node in self.editor.graph().nodes_iter() {
            let selected = self.editor.selected_node() == Some(node.id());
            let shapes = self.node_shapes(node, selected);
            if selected {
                self.delayed.extend(shapes);
            } else {
                for s in shapes {
                    self.painter.add(s);
                }
            }
        }
    }

    fn node_shapes(&self, node: &Node, selected: bool) -> Vec<Shape> {
        let base = self.style.node_color(node.id());
        let fill = if selected { brighten(base) } else { base };
        let pos = node.location();
        let mut radius = self.style.node_radius;
        if self.hovered == Some(node.id()) {
            radius *= 1.1;
        }

        let mut shapes = vec![Shape::circle_filled(pos, radius, fill)];
        shapes.push(Shape::circle_stroke(
            pos,
            radius,
            Stroke::new(self.style.node_stroke_width, darken(base)),
        ));

        if node.reflexive() {
            shapes.push(Shape::circle_stroke(
                pos,
                radius + 3.,
                Stroke::new(self.style.reflexive_ring_width, Color32::BLACK),
            ));
        }

        shapes.push(self.painter.fonts(|f| {
            Shape::text(
                f,
                pos,
                Align2::CENTER_CENTER,
                node.id(),
                FontId::proportional(radius * 0.9),
                Color32::WHITE,
            )
        }));

        shapes
    }
}

fn rotate_vector(vec: Vec2, angle: f32) -> Vec2 {
    let cos = angle.cos();
    let sin = angle.sin();
    Vec2::new(cos * vec.x - sin * vec.y, sin * vec.x + cos * vec.y)
}

fn brighten(c: Color32) -> Color32 {
    Color32::from_rgb(
        c.r().saturating_add(60),
        c.g().saturating_add(60),
        c.b().saturating_add(60),
    )
}

fn darken(c: Color32) -> Color32 {
    Color32::from_rgb(
        (f32::from(c.r()) * 0.7) as u8,
        (f32::from(c.g()) * 0.7) as u8,
        (f32::from(c.b()) * 0.7) as u8,
    )
}
