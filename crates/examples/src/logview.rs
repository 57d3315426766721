use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use grove::{
    Context, Widget,
    geom::{Expanse, Point},
    style::Style,
};

/// Lines kept before the oldest are dropped.
const CAPACITY: usize = 500;

/// Shows the tail of the window log, newest line at the bottom.
///
/// The view shares its line buffer with the sink returned by
/// [`LogView::sink`]. New lines are picked up on the next refresh tick.
#[derive(Debug, Default)]
pub struct LogView {
    /// Shared line buffer.
    lines: Rc<RefCell<Vec<String>>>,
    /// Number of lines appended when the view last drew.
    seen: usize,
    /// Total lines ever appended.
    total: Rc<Cell<usize>>,
    /// Text style.
    style: Style,
}

impl LogView {
    /// An empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// A log sink feeding this view, for [`grove::Window::with_logger`].
    pub fn sink(&self) -> impl FnMut(&str) + 'static {
        let lines = self.lines.clone();
        let total = self.total.clone();
        move |line| {
            let mut l = lines.borrow_mut();
            l.push(line.to_string());
            if l.len() > CAPACITY {
                let excess = l.len() - CAPACITY;
                l.drain(..excess);
            }
            total.set(total.get() + 1);
        }
    }

    /// Lines currently held.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Paint the newest lines that fit.
    fn draw(&mut self, ctx: &mut dyn Context) {
        self.seen = self.total.get();
        let Some(mut r) = ctx.render() else {
            return;
        };
        r.clear(self.style);
        let rows = r.size().h as usize;
        let lines = self.lines.borrow();
        let skip = lines.len().saturating_sub(rows);
        for (y, line) in lines.iter().skip(skip).enumerate() {
            r.text(Point::new(0, y as i32), line, self.style);
        }
    }
}

impl Widget for LogView {
    fn measure(&self, avail: Expanse) -> Option<Expanse> {
        Some(avail)
    }

    fn on_draw(&mut self, ctx: &mut dyn Context) {
        self.draw(ctx);
    }

    fn on_refresh(&mut self, ctx: &mut dyn Context) {
        if self.total.get() != self.seen {
            self.draw(ctx);
        }
    }
}
