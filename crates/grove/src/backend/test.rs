use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{
    backend::Terminal,
    error::Result,
    event::Input,
    geom::{Expanse, Point, Rect},
    style::{AttrSet, Color, PairId},
    width::char_width,
};

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character drawn here.
    pub ch: char,
    /// Set on the second column of a double-width character.
    pub tail: bool,
    /// Attributes in effect when the cell was written.
    pub attrs: AttrSet,
    /// Color pair in effect when the cell was written.
    pub pair: PairId,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            tail: false,
            attrs: AttrSet::default(),
            pair: PairId::default(),
        }
    }
}

/// The shared state behind a [`TestTerminal`]: a cell grid, the cursor, and a
/// queue of scripted input.
#[derive(Debug, Default)]
pub struct TestBuf {
    /// Screen size.
    pub size: Expanse,
    /// Rows of cells.
    pub cells: Vec<Vec<Cell>>,
    /// Where the hardware cursor is shown, if it is.
    pub cursor: Option<Point>,
    /// Input returned by subsequent polls, front first.
    pub events: VecDeque<Input>,
    /// Timeouts passed to each poll that found the queue empty.
    pub timeouts: Vec<Duration>,
    /// Number of registered color pairs.
    pub pairs: usize,
    /// Number of flushes.
    pub flushes: usize,
    /// Is the terminal between `start` and `stop`?
    pub started: bool,
}

impl TestBuf {
    /// Construct a blank grid.
    fn new(size: Expanse) -> Self {
        let mut b = Self {
            size,
            ..Default::default()
        };
        b.blank();
        b
    }

    /// Reset every cell.
    fn blank(&mut self) {
        self.cells = vec![vec![Cell::default(); self.size.w as usize]; self.size.h as usize];
    }

    /// Queue input for the next poll.
    pub fn push(&mut self, input: impl Into<Input>) {
        self.events.push_back(input.into());
    }

    /// Change the screen size, blanking the grid, and queue a resize.
    pub fn resize(&mut self, size: Expanse) {
        self.size = size;
        self.blank();
        self.events.push_back(Input::Resize);
    }

    /// The cell at a position, if it is on screen.
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cells.get(y as usize)?.get(x as usize)
    }

    /// The text of a row, with wide characters appearing once.
    pub fn row(&self, y: u32) -> String {
        self.cells
            .get(y as usize)
            .map(|r| r.iter().filter(|c| !c.tail).map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// All rows, with trailing blanks trimmed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h)
            .map(|y| self.row(y).trim_end().to_string())
            .collect()
    }

    /// Does any row contain `s`?
    pub fn contains(&self, s: &str) -> bool {
        (0..self.size.h).any(|y| self.row(y).contains(s))
    }

    /// Write one character, splitting wide characters over two cells.
    fn put(&mut self, x: i32, y: i32, ch: char, attrs: AttrSet, pair: PairId) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        let wide = char_width(ch) == 2;
        let Some(row) = self.cells.get_mut(y) else {
            return;
        };
        if x >= row.len() {
            return;
        }
        row[x] = Cell {
            ch,
            tail: false,
            attrs,
            pair,
        };
        if wide && let Some(c) = row.get_mut(x + 1) {
            *c = Cell {
                ch: ' ',
                tail: true,
                attrs,
                pair,
            };
        }
    }
}

/// An in-memory terminal for tests. Cloning the handle returned by
/// [`TestTerminal::create`] lets a test script input and inspect the screen
/// while a window owns the terminal.
#[derive(Debug)]
pub struct TestTerminal {
    /// Shared screen state.
    buf: Arc<Mutex<TestBuf>>,
}

impl TestTerminal {
    /// Create a terminal of the given size, returning a handle to its state.
    pub fn create(size: Expanse) -> (Arc<Mutex<TestBuf>>, Self) {
        let buf = Arc::new(Mutex::new(TestBuf::new(size)));
        (buf.clone(), Self { buf })
    }

    /// Lock the shared state. A test that panicked while holding the lock has
    /// already failed, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, TestBuf> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Terminal for TestTerminal {
    fn start(&mut self) -> Result<()> {
        self.lock().started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lock().started = false;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Input> {
        let mut b = self.lock();
        match b.events.pop_front() {
            Some(i) => Ok(i),
            None => {
                b.timeouts.push(timeout);
                Ok(Input::None)
            }
        }
    }

    fn size(&self) -> Result<Expanse> {
        Ok(self.lock().size)
    }

    fn write_run(&mut self, at: Point, text: &str, attrs: AttrSet, pair: PairId) -> Result<()> {
        let mut b = self.lock();
        let mut x = at.x;
        for ch in text.chars() {
            b.put(x, at.y, ch, attrs, pair);
            x += char_width(ch) as i32;
        }
        Ok(())
    }

    fn draw_border(&mut self, rect: Rect, pair: PairId) -> Result<()> {
        if rect.w < 2 || rect.h < 2 {
            return Ok(());
        }
        let mut b = self.lock();
        let (l, t) = (rect.tl.x, rect.tl.y);
        let (r, bt) = (l + rect.w as i32 - 1, t + rect.h as i32 - 1);
        let a = AttrSet::default();
        for x in l + 1..r {
            b.put(x, t, '─', a, pair);
            b.put(x, bt, '─', a, pair);
        }
        for y in t + 1..bt {
            b.put(l, y, '│', a, pair);
            b.put(r, y, '│', a, pair);
        }
        b.put(l, t, '┌', a, pair);
        b.put(r, t, '┐', a, pair);
        b.put(l, bt, '└', a, pair);
        b.put(r, bt, '┘', a, pair);
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect, pair: PairId) -> Result<()> {
        let mut b = self.lock();
        for y in rect.tl.y..rect.bottom() as i32 {
            for x in rect.tl.x..rect.right() as i32 {
                b.put(x, y, ' ', AttrSet::default(), pair);
            }
        }
        Ok(())
    }

    fn register_color_pair(&mut self, fg: Color, bg: Color) -> Result<PairId> {
        self.lock().pairs += 1;
        Ok(PairId::of(fg, bg))
    }

    fn set_cursor(&mut self, at: Point) -> Result<()> {
        self.lock().cursor = Some(at);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.lock().cursor = None;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.lock().flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Attr;

    #[test]
    fn writes_and_clips() -> Result<()> {
        let (buf, mut t) = TestTerminal::create(Expanse::new(6, 3));
        let pair = PairId::of(Color::Red, Color::Default);
        t.write_run(Point::new(1, 0), "a界b", AttrSet::new(Attr::Bold), pair)?;
        t.write_run(Point::new(4, 1), "xyz", AttrSet::default(), pair)?;
        t.write_run(Point::new(0, 5), "gone", AttrSet::default(), pair)?;
        let b = buf.lock().unwrap();
        assert_eq!(b.lines(), vec![" a界b", "    xy", ""]);
        assert!(b.cell(2, 0).unwrap().attrs.bold);
        assert!(b.cell(3, 0).unwrap().tail);
        assert_eq!(b.cell(1, 0).unwrap().pair, pair);
        Ok(())
    }

    #[test]
    fn border_and_events() -> Result<()> {
        let (buf, mut t) = TestTerminal::create(Expanse::new(4, 3));
        t.draw_border(Rect::new(0, 0, 4, 3), PairId(0))?;
        buf.lock().unwrap().push(Input::Resize);
        assert_eq!(t.poll_event(Duration::from_millis(5))?, Input::Resize);
        assert_eq!(t.poll_event(Duration::from_millis(7))?, Input::None);
        let b = buf.lock().unwrap();
        assert_eq!(b.lines(), vec!["┌──┐", "│  │", "└──┘"]);
        assert_eq!(b.timeouts, vec![Duration::from_millis(7)]);
        Ok(())
    }
}
