use crate::{
    canvas::Canvas,
    core::{id::NodeId, layout::Layout, name::NodeName},
    geom::{Expanse, Insets, Point},
    widget::Widget,
};

/// The structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Has no children. Only leaves can hold global focus.
    Leaf,
    /// Owns an ordered list of children and arbitrates focus among them.
    Container,
    /// A container with a single child slot, usually inset by a border.
    Wrapper,
}

impl NodeKind {
    /// Can this node have children?
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Leaf)
    }
}

/// Node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while one of its callbacks runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Structural role, fixed at creation.
    pub(crate) kind: NodeKind,
    /// Name for dumps and logs.
    pub(crate) name: NodeName,

    /// Owning container. Informational: ownership runs downward only.
    pub(crate) parent: Option<NodeId>,
    /// Children in z-order, which is also focus-traversal order.
    pub(crate) children: Vec<NodeId>,
    /// Local focus. Always one of `children` when set.
    pub(crate) focus: Option<NodeId>,

    /// Position and size rules.
    pub(crate) layout: Layout,
    /// Position within the parent, from the last layout pass.
    pub(crate) pos: Point,
    /// Own size, for nodes that have one.
    pub(crate) size: Option<Expanse>,
    /// Space handed to children in the last layout pass.
    pub(crate) inner: Expanse,
    /// Canvas bound in the last canvas pass.
    pub(crate) canvas: Option<Canvas>,
}

impl Node {
    /// Construct a detached node.
    pub(crate) fn new(widget: Box<dyn Widget>, layout: Layout) -> Self {
        let layout = if layout.insets() == Insets::default() {
            layout.border(widget.insets())
        } else {
            layout
        };
        Self {
            kind: widget.kind(),
            name: widget.name(),
            widget: Some(widget),
            parent: None,
            children: vec![],
            focus: None,
            layout,
            pos: Point::zero(),
            size: None,
            inner: Expanse::default(),
            canvas: None,
        }
    }

    /// The node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// The node's structural role.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The owning container, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The locally focused child.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Position within the parent.
    pub fn position(&self) -> Point {
        self.pos
    }

    /// Own size, if the node has one.
    pub fn size(&self) -> Option<Expanse> {
        self.size
    }

    /// The bound canvas, valid after a canvas pass.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Border reserved around the children.
    pub fn insets(&self) -> Insets {
        self.layout.insets()
    }
}
