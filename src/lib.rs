mod commands;
mod draw;
mod editor;
mod elements;
mod events;
mod graph;
mod layout;
mod settings;
mod view;

pub use self::commands::Command;
pub use self::draw::Drawer;
pub use self::editor::{DragLine, EditorKey, GraphEditor, PointerTarget};
pub use self::elements::{Link, LinkId, Node, NodeId};
pub use self::events::{
    Event, EventSink, PayloadLinkCreate, PayloadLinkDeselect, PayloadLinkRemove,
    PayloadLinkSelect, PayloadLinkUpdate, PayloadNodeCreate, PayloadNodeDeselect,
    PayloadNodeDragEnd, PayloadNodeDragStart, PayloadNodeMove, PayloadNodeReflexive,
    PayloadNodeRemove, PayloadNodeSelect,
};
pub use self::graph::Graph;
pub use self::layout::Layout;
pub use self::settings::SettingsStyle;
pub use self::view::GraphEditorView;
