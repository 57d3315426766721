use std::{
    any::{Any, type_name},
    mem,
};

use slotmap::SlotMap;

use crate::{
    canvas::Canvas,
    core::{
        context::{Context, NodeContext, Request},
        dump::dump,
        focus::FocusManager,
        id::NodeId,
        layout::Layout,
        node::{Node, NodeKind},
    },
    error::{Error, Result},
    event::{
        key::Key,
        mouse::{Action, MouseEvent},
    },
    geom::{Expanse, Point},
    screen::Screen,
    widget::{EventOutcome, Widget},
};

/// Upper bound on request-settling rounds after a single event. Widgets that
/// keep bouncing focus between each other are cut off here.
const MAX_SETTLE_ROUNDS: usize = 64;

/// The arena holding every node, plus the bookkeeping widgets reach through
/// their [`Context`].
///
/// A tree may hold several roots; the window marks one of them active, and
/// global focus is resolved from there.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root from which global focus is resolved.
    pub(crate) active: Option<NodeId>,
    /// Requests waiting to be settled.
    pub(crate) requests: Vec<Request>,
    /// A relayout is needed.
    pub(crate) dirty: bool,
    /// Focus changed, so the tree should be redrawn.
    pub(crate) redraw: bool,
    /// Log lines waiting to be collected.
    pub(crate) logs: Vec<String>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            active: None,
            requests: vec![],
            dirty: false,
            redraw: false,
            logs: vec![],
        }
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node, failing if it is not in the tree.
    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::Invalid(format!("no such node {id:?}")))
    }

    /// Mutable variant of [`Tree::node`].
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::Invalid(format!("no such node {id:?}")))
    }

    /// Create a parentless node.
    pub fn create_root(&mut self, widget: impl Into<Box<dyn Widget>>, layout: Layout) -> NodeId {
        self.dirty = true;
        self.nodes.insert(Node::new(widget.into(), layout))
    }

    /// Append a child to a container.
    pub fn add(
        &mut self,
        parent: NodeId,
        widget: impl Into<Box<dyn Widget>>,
        layout: Layout,
    ) -> Result<NodeId> {
        let index = self.node(parent)?.children.len();
        self.insert(parent, index, widget, layout)
    }

    /// Insert a child into a container at `index`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        widget: impl Into<Box<dyn Widget>>,
        layout: Layout,
    ) -> Result<NodeId> {
        let p = self.node(parent)?;
        match p.kind {
            NodeKind::Leaf => {
                return Err(Error::Invalid(format!("{} cannot hold children", p.name)));
            }
            NodeKind::Wrapper if !p.children.is_empty() => {
                return Err(Error::Invalid(format!("{} already wraps a child", p.name)));
            }
            _ => {}
        }
        if index > p.children.len() {
            return Err(Error::Invalid(format!(
                "insert at {index} past {} children",
                p.children.len()
            )));
        }
        let mut node = Node::new(widget.into(), layout);
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.node_mut(parent)?.children.insert(index, id);
        self.dirty = true;
        Ok(id)
    }

    /// Detach a node and drop its subtree.
    ///
    /// If the node holds its parent's local focus it must give it up first.
    /// A refusal leaves the tree untouched and is reported as
    /// [`Error::FocusProtocol`].
    pub fn remove(&mut self, screen: &mut Screen, id: NodeId) -> Result<()> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| Error::Invalid("cannot remove a root".into()))?;
        if self.node(parent)?.focus == Some(id) && !self.set_focus(screen, parent, None)? {
            let name = self.node(id)?.name.clone();
            let dumped = dump(self, self.root_of(id))
                .unwrap_or_else(|e| format!("tree dump failed: {e}"));
            tracing::error!("{name} refused to release focus during removal\n{dumped}");
            return Err(Error::FocusProtocol(format!(
                "{name} refused to release focus during removal"
            )));
        }
        self.node_mut(parent)?.children.retain(|c| *c != id);
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes.remove(n) {
                stack.extend(node.children);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// The topmost ancestor of a node.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(p) = self.nodes.get(cur).and_then(|n| n.parent) {
            cur = p;
        }
        cur
    }

    /// The active root.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Choose the root from which global focus is resolved.
    pub fn set_active(&mut self, root: Option<NodeId>) {
        self.active = root;
        self.redraw = true;
    }

    /// Is every container from the active root down to this node pointing
    /// its local focus along the path?
    pub fn is_active(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            match node.parent {
                None => return self.active == Some(cur),
                Some(p) => {
                    if self.nodes.get(p).and_then(|n| n.focus) != Some(cur) {
                        return false;
                    }
                    cur = p;
                }
            }
        }
    }

    /// Is this node the single leaf that receives keys?
    pub fn is_focused(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.kind == NodeKind::Leaf) && self.is_active(id)
    }

    /// Is this node its parent's local focus?
    pub fn has_local_focus(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.parent)
            .and_then(|p| self.nodes.get(p))
            .is_some_and(|p| p.focus == Some(id))
    }

    /// Follow local focus from `root` down to a leaf.
    pub fn focused_leaf(&self, root: NodeId) -> Option<NodeId> {
        let mut cur = root;
        loop {
            let node = self.nodes.get(cur)?;
            if node.kind == NodeKind::Leaf {
                return Some(cur);
            }
            cur = node.focus?;
        }
    }

    /// Borrow a node's widget as a concrete type.
    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        let w: &dyn Any = self.nodes.get(id)?.widget.as_deref()?;
        w.downcast_ref::<W>()
    }

    /// Mutably borrow a node's widget as a concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        let w: &mut dyn Any = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        w.downcast_mut::<W>()
    }

    /// Run `f` against a node's widget with a context for that node. The
    /// widget is taken out of the arena for the duration, so re-entrant
    /// calls into the same node fail with [`Error::Internal`].
    pub(crate) fn with_widget<R>(
        &mut self,
        screen: &mut Screen,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut dyn Context) -> R,
    ) -> Result<R> {
        let mut widget = self
            .node_mut(id)?
            .widget
            .take()
            .ok_or_else(|| Error::Internal(format!("widget {id:?} is already in a callback")))?;
        let out = {
            let mut ctx = NodeContext {
                tree: self,
                screen,
                node: id,
            };
            f(widget.as_mut(), &mut ctx)
        };
        if let Some(n) = self.nodes.get_mut(id) {
            n.widget = Some(widget);
        }
        Ok(out)
    }

    /// Like [`Tree::with_widget`], for a widget of a known concrete type.
    pub fn with_typed<W: Widget, R>(
        &mut self,
        screen: &mut Screen,
        id: NodeId,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R> {
        self.with_widget(screen, id, |w, ctx| {
            let any: &mut dyn Any = w;
            any.downcast_mut::<W>()
                .map(|w| f(w, ctx))
                .ok_or_else(|| Error::Invalid(format!("expected widget type {}", type_name::<W>())))
        })?
    }

    /// Compute positions and sizes for a subtree, given the space its
    /// parent offers.
    pub fn layout(&mut self, screen: &mut Screen, id: NodeId, avail: Expanse) -> Result<()> {
        let node = self.node(id)?;
        let pos = node.layout.position_in(avail);
        let size = node
            .layout
            .size_in(avail)
            .or_else(|| node.widget.as_ref().and_then(|w| w.measure(avail)));
        let node = self.node_mut(id)?;
        node.pos = pos;
        node.size = size;
        node.inner = node.insets().shrink(size.unwrap_or(avail));
        let inner = node.inner;
        let children = node.children.clone();

        self.with_widget(screen, id, |w, ctx| w.on_layout(ctx))?;
        for c in children {
            self.layout(screen, c, inner)?;
        }
        Ok(())
    }

    /// Bind canvases for a subtree. `given` is the canvas the parent hands
    /// down, with the node's position as its offset. Nodes with a size carve
    /// their own canvas out of it; others draw on it directly.
    pub fn place(&mut self, screen: &mut Screen, id: NodeId, given: Canvas) -> Result<()> {
        let node = self.node(id)?;
        let canvas = match node.size {
            Some(size) => given
                .sub_canvas(Point::zero(), size, Point::zero())
                .map_err(|e| Error::Construction(format!("canvas for {}: {e}", node.name)))?,
            None => given,
        };
        let insets = node.insets();
        let inner = if node.size.is_some() {
            insets.shrink(canvas.size())
        } else {
            Expanse::default()
        };
        let children = node.children.clone();
        self.node_mut(id)?.canvas = Some(canvas);

        self.with_widget(screen, id, |w, ctx| w.on_canvas(ctx))?;
        for c in children {
            let pos = self.node(c)?.pos;
            let sub = canvas.sub_canvas(insets.origin(), inner, pos)?;
            self.place(screen, c, sub)?;
        }
        Ok(())
    }

    /// Draw a subtree, parents before children.
    pub fn draw(&mut self, screen: &mut Screen, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        if node.canvas.is_none() {
            return Ok(());
        }
        let children = node.children.clone();
        self.with_widget(screen, id, |w, ctx| w.on_draw(ctx))?;
        for c in children {
            self.draw(screen, c)?;
        }
        Ok(())
    }

    /// Deliver the periodic tick to a subtree.
    pub fn refresh(&mut self, screen: &mut Screen, id: NodeId) -> Result<()> {
        let children = self.node(id)?.children.clone();
        self.with_widget(screen, id, |w, ctx| w.on_refresh(ctx))?;
        for c in children {
            self.refresh(screen, c)?;
        }
        Ok(())
    }

    /// Route a key down the local focus chain from `id`. The deepest node
    /// gets the first chance; each container on the way back up may handle
    /// keys its focused child ignored.
    pub fn key(&mut self, screen: &mut Screen, id: NodeId, key: Key) -> Result<EventOutcome> {
        let node = self.node(id)?;
        if node.kind.is_container()
            && let Some(f) = node.focus
        {
            let outcome = self.key(screen, f, key)?;
            if outcome.is_consumed() {
                return Ok(outcome);
            }
        }
        self.with_widget(screen, id, |w, ctx| w.on_key(ctx, key))
    }

    /// Route a mouse event. `at` is in `id`'s local coordinates.
    ///
    /// Children are tried in order with the point translated into their
    /// space; the first that consumes wins. Sized nodes only see points
    /// inside their bounds. A button press that nothing in a container
    /// consumes clears the container's local focus.
    pub fn mouse(
        &mut self,
        screen: &mut Screen,
        id: NodeId,
        at: Point,
        event: MouseEvent,
    ) -> Result<EventOutcome> {
        let node = self.node(id)?;
        if let Some(size) = node.size
            && !size.rect().contains_point(at)
        {
            return Ok(EventOutcome::Ignore);
        }
        let container = node.kind.is_container();
        if container {
            let origin = node.insets().origin();
            for c in node.children.clone() {
                let local = at - origin - self.node(c)?.pos;
                if self.mouse(screen, c, local, event)?.is_consumed() {
                    return Ok(EventOutcome::Handle);
                }
            }
        }
        let outcome = self.with_widget(screen, id, |w, ctx| w.on_mouse(ctx, at, event.at(at)))?;
        if container && !outcome.is_consumed() && event.action == Action::Down {
            self.set_focus(screen, id, None)?;
        }
        Ok(outcome)
    }

    /// Apply the requests widgets queued during the last callbacks, and any
    /// that applying them queues in turn.
    pub fn settle(&mut self, screen: &mut Screen) -> Result<()> {
        for _ in 0..MAX_SETTLE_ROUNDS {
            if self.requests.is_empty() {
                return Ok(());
            }
            for r in mem::take(&mut self.requests) {
                self.apply(screen, r)?;
            }
        }
        tracing::warn!(
            "dropping {} focus requests that did not settle",
            self.requests.len()
        );
        self.requests.clear();
        Ok(())
    }

    /// Apply one request. Requests naming nodes that have since been
    /// removed are dropped.
    fn apply(&mut self, screen: &mut Screen, r: Request) -> Result<()> {
        match r {
            Request::Focus(n) => {
                if let Some(p) = self.nodes.get(n).and_then(|x| x.parent) {
                    self.set_focus(screen, p, Some(n))?;
                }
            }
            Request::Release(n) => {
                if let Some(p) = self.nodes.get(n).and_then(|x| x.parent)
                    && self.node(p)?.focus == Some(n)
                {
                    self.set_focus(screen, p, None)?;
                }
            }
            Request::FocusNext { container, wrap } => {
                let Some(node) = self.nodes.get(container) else {
                    return Ok(());
                };
                let target = if node.kind.is_container() {
                    container
                } else {
                    match node.parent {
                        Some(p) => p,
                        None => return Ok(()),
                    }
                };
                if !self.focus_next(screen, target)? && wrap {
                    self.focus_first(screen, target)?;
                }
            }
        }
        Ok(())
    }

    /// Take the relayout flag.
    pub fn take_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    /// Take the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        mem::take(&mut self.redraw)
    }

    /// Collect queued log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        mem::take(&mut self.logs)
    }

    /// Mark the tree for relayout.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
