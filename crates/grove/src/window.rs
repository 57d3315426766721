//! The window: owns the screen and the tree, and runs the event loop.

use std::{
    fmt,
    time::{Duration, Instant},
};

use crate::{
    backend::Terminal,
    canvas::Canvas,
    core::{Context, FocusManager, Layout, NodeId, Tree, dump},
    error::{Error, Result},
    event::{Input, key::Key, mouse::MouseEvent},
    geom::Point,
    screen::Screen,
    style::Style,
    timer::Timer,
    widget::Widget,
};

/// Rounds of relayout and redraw allowed after a single event before the
/// window gives up on the tree settling.
const MAX_PASSES: usize = 8;

/// Handler for keys no widget consumed. Returns `true` to stop further
/// listeners from seeing the key.
type KeyListener = Box<dyn FnMut(&Key) -> bool>;

/// Handler for mouse events, called after the interface has seen them.
/// Returns `true` to stop further listeners from seeing the event.
type MouseListener = Box<dyn FnMut(&MouseEvent) -> bool>;

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    /// Interval between refresh ticks.
    pub refresh_period: Duration,
    /// Install a panic hook that restores the terminal, in
    /// [`runloop`](crate::backend::crossterm::runloop).
    pub install_panic_hook: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            refresh_period: Duration::from_millis(20),
            install_panic_hook: true,
        }
    }
}

/// Where the window is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, not yet serving.
    Init,
    /// Laying out the first frame.
    Layout,
    /// In the event loop.
    Serve,
}

/// Numbers log lines, emits them through `tracing` and forwards them to an
/// optional sink.
pub struct Logger {
    /// Lines logged so far.
    counter: usize,
    /// Prefix lines with their number.
    numbered: bool,
    /// Receives every formatted line.
    sink: Option<Box<dyn FnMut(&str)>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("counter", &self.counter)
            .field("numbered", &self.numbered)
            .finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            counter: 0,
            numbered: true,
            sink: None,
        }
    }
}

impl Logger {
    /// Log a line.
    pub fn log(&mut self, msg: &str) {
        let line = if self.numbered {
            format!("[{}]: {msg}", self.counter)
        } else {
            msg.to_string()
        };
        self.counter += 1;
        tracing::info!(target: "grove::log", "{line}");
        if let Some(sink) = self.sink.as_mut() {
            sink(&line);
        }
    }

    /// Lines logged so far.
    pub fn count(&self) -> usize {
        self.counter
    }
}

/// Owns the terminal and a tree of widgets, and feeds one to the other.
///
/// The window keeps a stack of interface roots. The top of the stack is the
/// active interface: it receives every event, and global focus is resolved
/// from it.
pub struct Window {
    /// The shared screen.
    screen: Screen,
    /// Every node of every interface.
    tree: Tree,
    /// Interface roots, active last.
    stack: Vec<NodeId>,
    /// Lifecycle state.
    state: LoopState,
    /// Settings.
    options: WindowOptions,
    /// Log sink.
    logger: Logger,
    /// Refresh schedule.
    refresh: Timer,
    /// Raw key listeners.
    key_listeners: Vec<KeyListener>,
    /// Raw mouse listeners.
    mouse_listeners: Vec<MouseListener>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("state", &self.state)
            .field("stack", &self.stack)
            .field("options", &self.options)
            .finish()
    }
}

impl Window {
    /// A window over a terminal, with default options.
    pub fn new(term: impl Terminal + 'static) -> Result<Self> {
        Self::with_options(term, WindowOptions::default())
    }

    /// A window over a terminal.
    pub fn with_options(term: impl Terminal + 'static, options: WindowOptions) -> Result<Self> {
        Ok(Self {
            screen: Screen::new(Box::new(term))?,
            tree: Tree::new(),
            stack: vec![],
            state: LoopState::Init,
            refresh: Timer::new(options.refresh_period),
            options,
            logger: Logger::default(),
            key_listeners: vec![],
            mouse_listeners: vec![],
        })
    }

    /// Build with a sink for log lines.
    pub fn with_logger(mut self, sink: impl FnMut(&str) + 'static) -> Self {
        self.logger.sink = Some(Box::new(sink));
        self
    }

    /// Build with or without line numbers in the log.
    pub fn with_numbered_log(mut self, numbered: bool) -> Self {
        self.logger.numbered = numbered;
        self
    }

    /// The window settings.
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// The lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The node tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Send a line to the log.
    pub fn log(&mut self, msg: &str) {
        self.logger.log(msg);
    }

    /// Listen for keys that no widget consumed.
    pub fn on_key(&mut self, f: impl FnMut(&Key) -> bool + 'static) {
        self.key_listeners.push(Box::new(f));
    }

    /// Listen for mouse events. Listeners see every event, after the
    /// interface.
    pub fn on_mouse(&mut self, f: impl FnMut(&MouseEvent) -> bool + 'static) {
        self.mouse_listeners.push(Box::new(f));
    }

    /// Create a detached interface root that fills the screen.
    pub fn create_interface(&mut self, widget: impl Into<Box<dyn Widget>>) -> NodeId {
        self.tree.create_root(widget, Layout::fill())
    }

    /// The active interface.
    pub fn interface(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Replace the active interface.
    pub fn set_interface(&mut self, root: NodeId) -> Result<()> {
        self.check_root(root)?;
        self.stack.pop();
        self.stack.push(root);
        self.activate()
    }

    /// Make `root` the active interface, keeping the current one beneath it.
    pub fn push_interface(&mut self, root: NodeId) -> Result<()> {
        self.check_root(root)?;
        self.stack.push(root);
        self.activate()
    }

    /// Drop the active interface, returning to the one beneath it.
    pub fn pop_interface(&mut self) -> Result<Option<NodeId>> {
        let popped = self.stack.pop();
        self.activate()?;
        Ok(popped)
    }

    /// Fail unless `root` is a parentless node.
    fn check_root(&self, root: NodeId) -> Result<()> {
        match self.tree.get(root) {
            Some(n) if n.parent().is_none() => Ok(()),
            Some(n) => Err(Error::Invalid(format!("{} is not an interface root", n.name()))),
            None => Err(Error::Invalid(format!("no such node {root:?}"))),
        }
    }

    /// Point global focus at the top of the stack, and show it right away
    /// if the loop is running.
    fn activate(&mut self) -> Result<()> {
        self.tree.set_active(self.interface());
        if self.state == LoopState::Serve {
            self.tree.mark_dirty();
            self.settle()?;
        }
        Ok(())
    }

    /// Append a child to a container.
    pub fn add(
        &mut self,
        parent: NodeId,
        widget: impl Into<Box<dyn Widget>>,
        layout: Layout,
    ) -> Result<NodeId> {
        self.tree.add(parent, widget, layout)
    }

    /// Insert a child into a container at `index`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        widget: impl Into<Box<dyn Widget>>,
        layout: Layout,
    ) -> Result<NodeId> {
        self.tree.insert(parent, index, widget, layout)
    }

    /// Detach and drop a subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.tree.remove(&mut self.screen, id)?;
        self.stack.retain(|r| *r != id);
        self.settle()
    }

    /// Set a container's local focus.
    pub fn set_focus(&mut self, container: NodeId, target: Option<NodeId>) -> Result<bool> {
        let r = self.tree.set_focus(&mut self.screen, container, target)?;
        self.settle()?;
        Ok(r)
    }

    /// Focus a node through its parent.
    pub fn focus(&mut self, id: NodeId) -> Result<bool> {
        let parent = self
            .tree
            .get(id)
            .and_then(|n| n.parent())
            .ok_or_else(|| Error::Invalid(format!("{id:?} has no parent to focus it")))?;
        self.set_focus(parent, Some(id))
    }

    /// Move focus forward inside a container.
    pub fn focus_next(&mut self, container: NodeId) -> Result<bool> {
        let r = self.tree.focus_next(&mut self.screen, container)?;
        self.settle()?;
        Ok(r)
    }

    /// Focus the first focusable node inside a container.
    pub fn focus_first(&mut self, container: NodeId) -> Result<bool> {
        let r = self.tree.focus_first(&mut self.screen, container)?;
        self.settle()?;
        Ok(r)
    }

    /// The leaf that receives keys.
    pub fn focused(&self) -> Option<NodeId> {
        self.tree.focused_leaf(self.interface()?)
    }

    /// Borrow a widget as a concrete type.
    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        self.tree.widget(id)
    }

    /// Run `f` against a widget of a concrete type with a context for its
    /// node, then apply whatever it asked for.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R> {
        let r = self.tree.with_typed(&mut self.screen, id, f)?;
        self.settle()?;
        Ok(r)
    }

    /// Render the active interface's tree for debugging.
    pub fn dump(&self) -> Result<String> {
        match self.interface() {
            Some(root) => dump(&self.tree, root),
            None => Ok(String::new()),
        }
    }

    /// Take over the terminal.
    pub fn start(&mut self) -> Result<()> {
        self.screen.start()
    }

    /// Release the terminal.
    pub fn stop(&mut self) -> Result<()> {
        self.screen.stop()
    }

    /// Lay out, place and draw the active interface from scratch.
    pub fn layout(&mut self) -> Result<()> {
        self.relayout()?;
        self.settle()
    }

    /// The full pass, without settling.
    fn relayout(&mut self) -> Result<()> {
        let Some(root) = self.interface() else {
            return Ok(());
        };
        let size = self.screen.refresh_size()?;
        tracing::debug!("layout at {size:?}");
        self.screen.clear(size.rect(), Style::default());
        self.screen.clear_cursor();
        self.tree.layout(&mut self.screen, root, size)?;
        let pos = self.tree.node(root)?.position();
        self.tree
            .place(&mut self.screen, root, Canvas::new(Point::zero(), size, pos))?;
        self.tree.draw(&mut self.screen, root)?;
        self.tree.take_redraw();
        Ok(())
    }

    /// Apply queued requests, forward logs, and relayout or redraw until the
    /// tree is quiet.
    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_PASSES {
            self.tree.settle(&mut self.screen)?;
            for line in self.tree.take_logs() {
                self.logger.log(&line);
            }
            if self.tree.take_dirty() {
                self.relayout()?;
            } else if self.tree.take_redraw() {
                if let Some(root) = self.interface() {
                    self.screen.clear_cursor();
                    self.tree.draw(&mut self.screen, root)?;
                }
            } else {
                return Ok(());
            }
        }
        tracing::warn!("tree did not settle after {MAX_PASSES} passes");
        Ok(())
    }

    /// Deliver one input to the active interface and the raw listeners.
    pub fn dispatch(&mut self, input: Input) -> Result<()> {
        match input.normalize() {
            Input::None => return Ok(()),
            Input::Resize => self.tree.mark_dirty(),
            Input::Key(k) => {
                tracing::debug!("key {k:?}");
                let consumed = match self.interface() {
                    Some(root) => self.tree.key(&mut self.screen, root, k)?.is_consumed(),
                    None => false,
                };
                if !consumed {
                    for l in &mut self.key_listeners {
                        if l(&k) {
                            break;
                        }
                    }
                }
            }
            Input::Mouse(m) => {
                tracing::debug!("mouse {m:?}");
                if let Some(root) = self.interface() {
                    let at = m.location - self.tree.node(root)?.position();
                    self.tree.mouse(&mut self.screen, root, at, m)?;
                }
                for l in &mut self.mouse_listeners {
                    if l(&m) {
                        break;
                    }
                }
            }
        }
        self.settle()
    }

    /// Deliver the refresh tick if it is due at `now`.
    pub fn refresh_at(&mut self, now: Instant) -> Result<()> {
        let Some(skipped) = self.refresh.poll_at(now) else {
            return Ok(());
        };
        if let Some(root) = self.interface() {
            self.tree.refresh(&mut self.screen, root)?;
        }
        if skipped > 0 {
            tracing::warn!("{skipped} frames dropped");
        }
        for _ in 0..skipped {
            self.logger.log("Frame dropped!");
        }
        self.settle()
    }

    /// Run the event loop until `cond` returns `false` or no interface is
    /// left.
    pub fn serve<F>(&mut self, mut cond: F) -> Result<()>
    where
        F: FnMut(&Self) -> bool,
    {
        self.state = LoopState::Layout;
        self.tree.set_active(self.interface());
        self.refresh = Timer::new(self.options.refresh_period);
        let mut input = Input::Resize;
        loop {
            self.dispatch(input)?;
            self.state = LoopState::Serve;
            if !cond(self) || self.interface().is_none() {
                return Ok(());
            }
            self.refresh_at(Instant::now())?;
            self.screen.apply_cursor();
            self.screen.flush()?;
            let timeout = ceil_millis(self.refresh.remaining_at(Instant::now()));
            input = self.screen.poll(timeout)?;
        }
    }
}

/// Round a duration up to whole milliseconds.
fn ceil_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_nanos().div_ceil(1_000_000) as u64)
}
