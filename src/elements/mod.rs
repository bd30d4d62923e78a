mod link;
mod node;

pub use link::{Link, LinkId};
pub use node::{Node, NodeId};
