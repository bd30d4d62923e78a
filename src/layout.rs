use crate::Graph;

/// Position-assigning collaborator stepped once per frame by
/// [`crate::GraphEditorView`].
///
/// The editor never computes node positions itself; it only creates nodes at
/// the pointer and claims nodes during free-drag gestures. Implementations
/// own everything else, under one rule: a node with
/// [`crate::Node::pin`]`.is_some()` is claimed by an interactive drag and
/// must be left exactly at its pin. The editor sets the pin on drag start,
/// moves it on drag, and clears it on drag end.
///
/// Without a layout, nodes simply stay where gestures put them.
pub trait Layout {
    /// Advances the layout by one step, updating node locations in place.
    fn next(&mut self, g: &mut Graph);
}
