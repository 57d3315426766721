//! A multi-line text editor with a blinking caret.

use std::time::Duration;

use crate::{
    core::{Context, NodeId},
    event::{
        key::{Key, KeyCode},
        mouse::{Action, MouseEvent},
    },
    geom::{Expanse, Point},
    style::{Attr, Style},
    timer::Timer,
    widget::{EventOutcome, FocusResponse, Widget},
    width,
};

/// Caret blink interval.
const BLINK: Duration = Duration::from_millis(500);

/// An editable block of text.
///
/// The cursor and the viewport origin are kept in display columns, so a
/// double-width character occupies two columns and the cursor only ever rests
/// on a character boundary. After every edit the viewport is compacted so it
/// does not hang past the content, then shifted just enough to show the
/// cursor.
#[derive(Debug)]
pub struct TextWidget {
    /// Content, never empty.
    lines: Vec<String>,
    /// Cursor as `(column, line)`.
    cursor: (usize, usize),
    /// Top-left of the visible region as `(column, line)`.
    viewport: (usize, usize),
    /// Caret phase.
    caret_visible: bool,
    /// Blink schedule.
    blink: Timer,
    /// Style when unfocused.
    normal: Style,
    /// Style when focused.
    focused: Style,
    /// Visible size from the last layout.
    view: Expanse,
}

impl Default for TextWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWidget {
    /// An empty editor.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: (0, 0),
            viewport: (0, 0),
            caret_visible: true,
            blink: Timer::new(BLINK),
            normal: Style::default(),
            focused: Style::default(),
            view: Expanse::default(),
        }
    }

    /// Build with initial content. The cursor starts at the top left.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Build with the styles used when unfocused and focused.
    pub fn with_styles(mut self, normal: Style, focused: Style) -> Self {
        self.normal = normal;
        self.focused = focused;
        self
    }

    /// Build with a fixed view size, for use outside a laid-out tree.
    pub fn with_view(mut self, view: Expanse) -> Self {
        self.view = view;
        self
    }

    /// Replace the content and move the cursor to the top left.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = (0, 0);
        self.viewport = (0, 0);
        self.touch();
    }

    /// The content, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The content lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(column, line)`.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Viewport origin as `(column, line)`.
    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    /// Is the caret in its visible phase?
    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    /// The line under the cursor.
    fn line(&self) -> &str {
        &self.lines[self.cursor.1]
    }

    /// Insert a character at the cursor and step over it.
    pub fn insert_char(&mut self, c: char) {
        let (col, row) = self.cursor;
        let line = &mut self.lines[row];
        let at = width::byte_offset(line, width::char_index_at(line, col));
        line.insert(at, c);
        self.cursor.0 = col + width::char_width(c);
        self.touch();
    }

    /// Delete the character before the cursor, joining with the previous
    /// line at the start of a line. Returns `false` at the very start of the
    /// text.
    ///
    /// "Before" is by character, not column: zero-width characters sitting
    /// at the cursor column are deleted one at a time.
    pub fn backspace(&mut self) -> bool {
        let (col, row) = self.cursor;
        let index = width::char_index_at(self.line(), col);
        if index > 0 {
            let line = &mut self.lines[row];
            let c = line.remove(width::byte_offset(line, index - 1));
            self.cursor.0 = col.saturating_sub(width::char_width(c));
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            self.cursor = (width::width(prev), row - 1);
            prev.push_str(&tail);
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Split the line at the cursor, moving to the start of the new line.
    pub fn enter(&mut self) {
        let (col, row) = self.cursor;
        let line = &mut self.lines[row];
        let at = width::byte_offset(line, width::char_index_at(line, col));
        let tail = line.split_off(at);
        self.lines.insert(row + 1, tail);
        self.cursor = (0, row + 1);
        self.touch();
    }

    /// Move up a line, keeping the column where possible. On the first line
    /// the cursor goes to the start of the text.
    pub fn cursor_up(&mut self) {
        let (col, row) = self.cursor;
        self.cursor = if row > 0 {
            (width::snap_left(&self.lines[row - 1], col), row - 1)
        } else {
            (0, 0)
        };
        self.touch();
    }

    /// Move down a line, keeping the column where possible. On the last line
    /// the cursor goes to the end of the text.
    pub fn cursor_down(&mut self) {
        let (col, row) = self.cursor;
        self.cursor = if row + 1 < self.lines.len() {
            (width::snap_left(&self.lines[row + 1], col), row + 1)
        } else {
            (width::width(self.line()), row)
        };
        self.touch();
    }

    /// Move one character left, wrapping to the end of the previous line.
    /// Returns `false` at the very start of the text.
    pub fn cursor_left(&mut self) -> bool {
        let (col, row) = self.cursor;
        if col > 0 {
            self.cursor.0 = width::prev_boundary(self.line(), col).unwrap_or(0);
        } else if row > 0 {
            self.cursor = (width::width(&self.lines[row - 1]), row - 1);
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Move one character right, wrapping to the start of the next line.
    /// Returns `false` at the very end of the text.
    pub fn cursor_right(&mut self) -> bool {
        let (col, row) = self.cursor;
        let end = width::width(self.line());
        if col < end {
            self.cursor.0 = width::next_boundary(self.line(), col).unwrap_or(end);
        } else if row + 1 < self.lines.len() {
            self.cursor = (0, row + 1);
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Bookkeeping after any edit or cursor movement.
    fn touch(&mut self) {
        self.compact();
        self.reveal();
        self.blink.reset();
        self.caret_visible = true;
    }

    /// Pull the viewport back so it does not extend past the content.
    fn compact(&mut self) {
        let (w, h) = (self.view.w as usize, self.view.h as usize);
        let widest = self.lines.iter().map(|l| width::width(l)).max().unwrap_or(0);
        let (mut left, mut top) = self.viewport;
        if top + h > self.lines.len() {
            top = self.lines.len().saturating_sub(h);
        }
        if left + w > widest {
            left = widest.saturating_sub(w);
        }
        self.viewport = (left, top);
    }

    /// Shift the viewport minimally on each axis to show the caret cell.
    fn reveal(&mut self) {
        let (w, h) = (self.view.w as usize, self.view.h as usize);
        if w == 0 || h == 0 {
            return;
        }
        let (col, row) = self.cursor;
        let right = col + self.caret_char().map_or(1, width::char_width).max(1);
        let (left, top) = &mut self.viewport;
        if col < *left {
            *left = col;
        } else if right > *left + w {
            // A caret wider than the view keeps its first column visible.
            *left = (right - w).min(col);
        }
        if row < *top {
            *top = row;
        } else if row >= *top + h {
            *top = row + 1 - h;
        }
    }

    /// The character under the cursor, if it is not at the end of the line.
    fn caret_char(&self) -> Option<char> {
        let line = self.line();
        line.chars().nth(width::char_index_at(line, self.cursor.0))
    }

    /// Dispatch an editing key.
    fn edit(&mut self, key: Key) -> bool {
        if let Some(c) = key.printable() {
            self.insert_char(c);
            return true;
        }
        if key == KeyCode::Backspace || key == '\u{7f}' {
            return self.backspace();
        }
        if key == KeyCode::Enter {
            self.enter();
            return true;
        }
        if key == KeyCode::Up {
            self.cursor_up();
        } else if key == KeyCode::Down {
            self.cursor_down();
        } else if key == KeyCode::Left {
            return self.cursor_left();
        } else if key == KeyCode::Right {
            return self.cursor_right();
        } else {
            return false;
        }
        true
    }

    /// Paint the visible lines.
    fn draw(&self, ctx: &mut dyn Context) {
        let focused = ctx.is_focused();
        let style = if focused { self.focused } else { self.normal };
        let Some(mut r) = ctx.render() else {
            return;
        };
        r.clear(style);
        let (left, top) = self.viewport;
        let x = -(left as i32);
        let rows = r.size().h as usize;
        for (y, line) in self.lines.iter().enumerate().skip(top).take(rows) {
            let at = Point::new(x, (y - top) as i32);
            if y != self.cursor.1 {
                r.text(at, line, style);
                continue;
            }
            // Pre-caret, caret cell, post-caret.
            let index = width::char_index_at(line, self.cursor.0);
            let split = width::byte_offset(line, index);
            let (pre, rest) = line.split_at(split);
            let pen = r.text(at, pre, style);
            let mut chars = rest.chars();
            let caret = chars.next().map_or_else(|| " ".to_string(), String::from);
            let caret_style = if focused && self.caret_visible {
                style.with(Attr::Reverse)
            } else {
                style
            };
            let pen = r.text(pen, &caret, caret_style);
            r.text(pen, chars.as_str(), style);
        }
    }
}

impl Widget for TextWidget {
    fn measure(&self, avail: Expanse) -> Option<Expanse> {
        Some(avail)
    }

    fn on_layout(&mut self, ctx: &mut dyn Context) {
        if let Some(size) = ctx.size() {
            self.view = size;
            self.compact();
            self.reveal();
        }
    }

    fn on_draw(&mut self, ctx: &mut dyn Context) {
        self.draw(ctx);
    }

    fn on_key(&mut self, ctx: &mut dyn Context, key: Key) -> EventOutcome {
        if !ctx.is_focused() || !self.edit(key) {
            return EventOutcome::Ignore;
        }
        self.draw(ctx);
        EventOutcome::Handle
    }

    fn on_mouse(&mut self, ctx: &mut dyn Context, _at: Point, event: MouseEvent) -> EventOutcome {
        if event.action == Action::Down {
            ctx.request_focus();
            return EventOutcome::Handle;
        }
        EventOutcome::Ignore
    }

    fn on_refresh(&mut self, ctx: &mut dyn Context) {
        if self.blink.poll().is_some() && ctx.is_focused() {
            self.caret_visible = !self.caret_visible;
            self.draw(ctx);
        }
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        self.blink.reset();
        self.caret_visible = true;
        FocusResponse::Accept
    }

    fn on_unfocused(&mut self, _ctx: &mut dyn Context, _next: Option<NodeId>) -> FocusResponse {
        FocusResponse::Accept
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn editor(text: &str, cursor: (usize, usize)) -> TextWidget {
        let mut t = TextWidget::new()
            .with_view(Expanse::new(10, 3))
            .with_text(text);
        t.cursor = cursor;
        t
    }

    #[test]
    fn enter_splits_line() {
        let mut t = editor("ab\nc", (2, 0));
        t.enter();
        assert_eq!(t.lines(), ["ab", "", "c"]);
        assert_eq!(t.cursor(), (0, 1));

        let mut t = editor("abc", (1, 0));
        t.enter();
        assert_eq!(t.lines(), ["a", "bc"]);
    }

    #[test]
    fn wide_insert_and_delete() {
        let mut t = editor("ab", (1, 0));
        t.insert_char('界');
        assert_eq!(t.lines(), ["a界b"]);
        assert_eq!(t.cursor(), (3, 0));
        assert!(t.cursor_left());
        assert_eq!(t.cursor(), (1, 0));
        assert!(t.cursor_right());
        assert_eq!(t.cursor(), (3, 0));
        assert!(t.backspace());
        assert_eq!(t.lines(), ["ab"]);
        assert_eq!(t.cursor(), (1, 0));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut t = editor("ab\ncd", (0, 1));
        assert!(t.backspace());
        assert_eq!(t.lines(), ["abcd"]);
        assert_eq!(t.cursor(), (2, 0));
        let mut t = editor("ab", (0, 0));
        assert!(!t.backspace());
        assert_eq!(t.lines(), ["ab"]);
    }

    #[test]
    fn backspace_takes_zero_width_chars() {
        let mut t = editor("x\nab", (0, 1));
        t.insert_char('\u{301}');
        assert_eq!(t.lines(), ["x", "\u{301}ab"]);
        assert_eq!(t.cursor(), (0, 1));
        assert!(t.backspace());
        assert_eq!(t.lines(), ["x", "ab"]);
        assert_eq!(t.cursor(), (0, 1));

        let mut t = editor("ab", (1, 0));
        t.insert_char('\u{200b}');
        assert!(t.backspace());
        assert_eq!(t.lines(), ["ab"]);
        assert_eq!(t.cursor(), (1, 0));
    }

    #[test]
    fn caret_wider_than_view_stays_put() {
        let mut t = TextWidget::new()
            .with_view(Expanse::new(1, 1))
            .with_text("a界");
        t.cursor = (1, 0);
        t.touch();
        assert_eq!(t.viewport(), (1, 0));
        t.touch();
        assert_eq!(t.viewport(), (1, 0));
    }

    #[test]
    fn vertical_movement_clamps() {
        let mut t = editor("abcd\n界\nxy", (3, 0));
        t.cursor_down();
        // Column 3 is past "界", which ends at 2.
        assert_eq!(t.cursor(), (2, 1));
        t.cursor_up();
        assert_eq!(t.cursor(), (2, 0));
        t.cursor_up();
        assert_eq!(t.cursor(), (0, 0));

        let mut t = editor("abcd\n界x", (1, 0));
        t.cursor_down();
        // Inside the wide char snaps to its start.
        assert_eq!(t.cursor(), (0, 1));
        t.cursor_down();
        assert_eq!(t.cursor(), (3, 1));
    }

    #[test]
    fn horizontal_movement_crosses_lines() {
        let mut t = editor("ab\ncd", (2, 0));
        assert!(t.cursor_right());
        assert_eq!(t.cursor(), (0, 1));
        assert!(t.cursor_left());
        assert_eq!(t.cursor(), (2, 0));
        let mut t = editor("ab\ncd", (2, 1));
        assert!(!t.cursor_right());
        let mut t = editor("ab", (0, 0));
        assert!(!t.cursor_left());
    }

    #[test]
    fn viewport_follows_cursor() {
        let mut t = TextWidget::new().with_view(Expanse::new(4, 2));
        for c in "abcdefgh".chars() {
            t.insert_char(c);
        }
        // The caret cell at column 8 must be visible.
        assert_eq!(t.viewport(), (5, 0));
        t.enter();
        t.enter();
        assert_eq!(t.cursor(), (0, 2));
        assert_eq!(t.viewport(), (0, 1));
        t.cursor_up();
        t.cursor_up();
        assert_eq!(t.viewport(), (0, 0));
    }

    #[test]
    fn viewport_does_not_hang_past_content() {
        let mut t = TextWidget::new()
            .with_view(Expanse::new(4, 2))
            .with_text("a\nb\nc\nd");
        t.viewport = (3, 3);
        t.cursor = (0, 1);
        t.touch();
        assert_eq!(t.viewport(), (0, 1));
    }

    #[test]
    fn edits_force_caret_visible() {
        let mut t = editor("ab", (0, 0));
        t.caret_visible = false;
        t.insert_char('x');
        assert!(t.caret_visible());
    }

    #[test]
    fn key_dispatch() {
        let mut t = editor("ab", (2, 0));
        assert!(t.edit(Key::from('c')));
        assert!(t.edit(Key::from('\u{7f}')));
        assert!(t.edit(Key::from(KeyCode::Backspace)));
        assert_eq!(t.text(), "a");
        assert!(t.edit(Key::from(KeyCode::Enter)));
        assert_eq!(t.text(), "a\n");
        assert!(!t.edit(Key::from(KeyCode::F(1))));
    }

    fn chars() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['a', 'z', ' ', '界', '漢', 'é', '\u{301}', '\u{200b}'])
    }

    fn content() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop::collection::vec(chars(), 0..8).prop_map(|v| v.into_iter().collect()),
            1..4,
        )
    }

    /// An editor positioned on a valid cursor boundary chosen by `pick`.
    fn positioned(lines: &[String], row: usize, pick: usize) -> TextWidget {
        let mut t = TextWidget::new()
            .with_view(Expanse::new(5, 2))
            .with_text(&lines.join("\n"));
        let row = row % lines.len();
        let line = &lines[row];
        let stops: Vec<usize> = (0..=line.chars().count())
            .map(|i| width::width(&line.chars().take(i).collect::<String>()))
            .collect();
        t.cursor = (stops[pick % stops.len()], row);
        t.touch();
        t
    }

    proptest! {
        #[test]
        fn insert_then_backspace_restores(
            lines in content(), row in 0usize..4, pick in 0usize..9, c in chars()
        ) {
            let mut t = positioned(&lines, row, pick);
            let before = (t.lines.clone(), t.cursor);
            t.insert_char(c);
            prop_assert!(t.backspace());
            prop_assert_eq!((t.lines.clone(), t.cursor), before);
        }

        #[test]
        fn enter_then_backspace_restores(
            lines in content(), row in 0usize..4, pick in 0usize..9
        ) {
            let mut t = positioned(&lines, row, pick);
            let before = (t.lines.clone(), t.cursor);
            t.enter();
            prop_assert_eq!(t.cursor.0, 0);
            prop_assert!(t.backspace());
            prop_assert_eq!((t.lines.clone(), t.cursor), before);
        }
    }
}
