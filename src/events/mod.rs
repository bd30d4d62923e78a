mod event;
mod sink;

pub use event::{
    Event, PayloadLinkCreate, PayloadLinkDeselect, PayloadLinkRemove, PayloadLinkSelect,
    PayloadLinkUpdate, PayloadNodeCreate, PayloadNodeDeselect, PayloadNodeDragEnd,
    PayloadNodeDragStart, PayloadNodeMove, PayloadNodeReflexive, PayloadNodeRemove,
    PayloadNodeSelect,
};

pub use sink::EventSink;
