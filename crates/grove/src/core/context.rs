use crate::{
    canvas::Render,
    core::{id::NodeId, tree::Tree},
    geom::{Expanse, Point},
    screen::Screen,
};

/// A change a widget asked for from inside a callback. Requests are applied
/// once the current callback chain has returned, so a widget is never called
/// back while one of its own callbacks is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
    /// Make the node its parent's local focus.
    Focus(NodeId),
    /// Clear the parent's local focus if it is the node.
    Release(NodeId),
    /// Traverse focus forward within a container, optionally wrapping.
    FocusNext {
        /// The container to traverse.
        container: NodeId,
        /// Retry from the first child when traversal runs off the end.
        wrap: bool,
    },
}

/// What a widget can see and ask for while one of its callbacks runs.
pub trait Context {
    /// The node being called.
    fn node(&self) -> NodeId;

    /// The node's owning container.
    fn parent(&self) -> Option<NodeId>;

    /// Is this node the one leaf that receives key input?
    fn is_focused(&self) -> bool;

    /// Is this node its parent's local focus?
    fn has_local_focus(&self) -> bool;

    /// The node's own size, if it has one.
    fn size(&self) -> Option<Expanse>;

    /// The node's position within its parent.
    fn position(&self) -> Point;

    /// A drawing handle for the node's canvas. `None` before the first
    /// canvas pass.
    fn render(&mut self) -> Option<Render<'_>>;

    /// Ask the parent to make this node its local focus.
    fn request_focus(&mut self);

    /// Give up the parent's local focus, if this node holds it.
    fn release_focus(&mut self);

    /// Move focus forward within this node, or within its parent if this
    /// node is a leaf.
    fn focus_next(&mut self, wrap: bool);

    /// Ask for a full relayout after the current event.
    fn mark_dirty(&mut self);

    /// Send a line to the window's logger.
    fn log(&mut self, msg: &str);
}

/// The context handed to widget callbacks by the tree.
pub(crate) struct NodeContext<'a> {
    /// The tree, minus the widget being called.
    pub(crate) tree: &'a mut Tree,
    /// The shared screen.
    pub(crate) screen: &'a mut Screen,
    /// The node being called.
    pub(crate) node: NodeId,
}

impl Context for NodeContext<'_> {
    fn node(&self) -> NodeId {
        self.node
    }

    fn parent(&self) -> Option<NodeId> {
        self.tree.get(self.node).and_then(|n| n.parent)
    }

    fn is_focused(&self) -> bool {
        self.tree.is_focused(self.node)
    }

    fn has_local_focus(&self) -> bool {
        self.tree.has_local_focus(self.node)
    }

    fn size(&self) -> Option<Expanse> {
        self.tree.get(self.node).and_then(|n| n.size)
    }

    fn position(&self) -> Point {
        self.tree.get(self.node).map(|n| n.pos).unwrap_or_default()
    }

    fn render(&mut self) -> Option<Render<'_>> {
        let canvas = self.tree.get(self.node)?.canvas?;
        Some(Render::new(canvas, self.screen))
    }

    fn request_focus(&mut self) {
        self.tree.requests.push(Request::Focus(self.node));
    }

    fn release_focus(&mut self) {
        self.tree.requests.push(Request::Release(self.node));
    }

    fn focus_next(&mut self, wrap: bool) {
        self.tree.requests.push(Request::FocusNext {
            container: self.node,
            wrap,
        });
    }

    fn mark_dirty(&mut self) {
        self.tree.dirty = true;
    }

    fn log(&mut self, msg: &str) {
        self.tree.logs.push(msg.to_string());
    }
}
