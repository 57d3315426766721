//! The widget capability set.

use std::any::{Any, type_name};

use crate::{
    core::{Context, NodeId, NodeKind, NodeName},
    event::{key::Key, mouse::MouseEvent},
    geom::{Expanse, Insets, Point},
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was processed without a state change and propagation stops.
    Consume,
    /// The event was not handled and continues to the next candidate.
    Ignore,
}

impl EventOutcome {
    /// Did the handler take the event?
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

impl From<bool> for EventOutcome {
    fn from(b: bool) -> Self {
        if b { Self::Handle } else { Self::Ignore }
    }
}

/// A widget's answer to a focus change. `Refuse` is a veto: the caller
/// leaves focus where it was.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FocusResponse {
    /// Go ahead.
    Accept,
    /// Veto the change.
    Refuse,
}

impl FocusResponse {
    /// Was the change accepted?
    pub fn accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl From<bool> for FocusResponse {
    fn from(b: bool) -> Self {
        if b { Self::Accept } else { Self::Refuse }
    }
}

/// Widgets are the behavior attached to nodes in the tree.
///
/// The tree drives every callback and hands each one a [`Context`] for the
/// node being called. Containers route events to their children before
/// offering them to their own widget.
pub trait Widget: Any {
    /// Structural role of nodes created for this widget.
    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }

    /// Size wanted given the parent's space, for nodes whose layout has no
    /// sizer. `None` means the widget has no bounds of its own.
    fn measure(&self, _avail: Expanse) -> Option<Expanse> {
        None
    }

    /// Border reserved around the children of a container, used when the
    /// node's layout does not set one.
    fn insets(&self) -> Insets {
        Insets::default()
    }

    /// Called after the node's position and size are computed.
    fn on_layout(&mut self, _ctx: &mut dyn Context) {}

    /// Called after the node's canvas is bound.
    fn on_canvas(&mut self, _ctx: &mut dyn Context) {}

    /// Draw the widget's own content. Children are drawn afterwards.
    fn on_draw(&mut self, _ctx: &mut dyn Context) {}

    /// Handle a key.
    fn on_key(&mut self, _ctx: &mut dyn Context, _key: Key) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Handle a mouse event. `at` is in the node's local coordinates.
    fn on_mouse(&mut self, _ctx: &mut dyn Context, _at: Point, _event: MouseEvent) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Periodic tick.
    fn on_refresh(&mut self, _ctx: &mut dyn Context) {}

    /// This node is about to become its parent's local focus. Containers
    /// must accept for anything inside them to be focused.
    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Refuse
    }

    /// This node is about to lose its parent's local focus to `next`.
    fn on_unfocused(&mut self, _ctx: &mut dyn Context, _next: Option<NodeId>) -> FocusResponse {
        FocusResponse::Accept
    }

    /// Advance focus within the widget itself. Return `true` if the widget
    /// moved focus internally and traversal should stop here.
    fn focus_next(&mut self, _ctx: &mut dyn Context) -> bool {
        false
    }

    /// Name used in dumps and logs.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
