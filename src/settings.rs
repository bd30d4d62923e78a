use egui::Color32;

use crate::elements::NodeId;

/// Visual parameters of the editor.
#[derive(Debug, Clone)]
pub struct SettingsStyle {
    /// Radius of node circles
    pub node_radius: f32,

    /// Stroke width of the node outline
    pub node_stroke_width: f32,

    /// Stroke width of the self-loop ring on reflexive nodes
    pub reflexive_ring_width: f32,

    pub link_width: f32,

    /// Distance a link end keeps from the node center when it carries an
    /// arrowhead
    pub link_padding_arrow: f32,

    /// Distance a link end keeps from the node center without an arrowhead
    pub link_padding_plain: f32,

    /// Length of arrowhead wings
    pub arrow_size: f32,

    /// Hit-test distance for clicking links
    pub link_hit_tolerance: f32,

    /// Node fill colors, cycled by node id
    pub palette: Vec<Color32>,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            node_radius: 12.,
            node_stroke_width: 1.5,
            reflexive_ring_width: 2.5,
            link_width: 4.,
            link_padding_arrow: 17.,
            link_padding_plain: 12.,
            arrow_size: 8.,
            link_hit_tolerance: 6.,
            palette: category10(),
        }
    }
}

impl SettingsStyle {
    pub fn node_color(&self, id: NodeId) -> Color32 {
        self.palette
            .get(id.index() % self.palette.len().max(1))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

// d3.schemeCategory10
fn category10() -> Vec<Color32> {
    vec![
        Color32::from_rgb(0x1f, 0x77, 0xb4),
        Color32::from_rgb(0xff, 0x7f, 0x0e),
        Color32::from_rgb(0x2c, 0xa0, 0x2c),
        Color32::from_rgb(0xd6, 0x27, 0x28),
        Color32::from_rgb(0x94, 0x67, 0xbd),
        Color32::from_rgb(0x8c, 0x56, 0x4b),
        Color32::from_rgb(0xe3, 0x77, 0xc2),
        Color32::from_rgb(0x7f, 0x7f, 0x7f),
        Color32::from_rgb(0xbc, 0xbd, 0x22),
        Color32::from_rgb(0x17, 0xbe, 0xcf),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_id() {
        let style = SettingsStyle::default();
        assert_eq!(
            style.node_color(NodeId::new(0)),
            style.node_color(NodeId::new(10))
        );
        assert_ne!(
            style.node_color(NodeId::new(0)),
            style.node_color(NodeId::new(1))
        );
    }
}
