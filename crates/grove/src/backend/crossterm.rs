use std::{
    collections::HashMap,
    io::{self, Stderr, Write},
    panic,
    time::Duration,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::guard;

use crate::{
    backend::Terminal,
    error::Result,
    event::{Input, key, mouse},
    geom::{Expanse, Point, Rect},
    style::{AttrSet, Color, PairId},
    window::Window,
};

/// Translate a grove color into a crossterm color.
fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::DarkRed => style::Color::DarkRed,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::Grey => style::Color::Grey,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::White => style::Color::White,
    }
}

/// Crossterm-backed terminal writing to stderr.
#[derive(Debug)]
pub struct CrosstermTerminal {
    /// Output handle.
    fp: Stderr,
    /// Registered color pairs.
    pairs: HashMap<PairId, (style::Color, style::Color)>,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self {
            fp: io::stderr(),
            pairs: HashMap::new(),
        }
    }
}

impl CrosstermTerminal {
    /// Construct a terminal handle. Nothing is written until `start`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter alternate screen and raw mode.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(cevent::EnableMouseCapture)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Leave alternate screen and restore terminal state.
    fn exit(&mut self) -> io::Result<()> {
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(cevent::DisableMouseCapture)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Queue colors and attributes for subsequent output.
    fn apply_style(&mut self, attrs: AttrSet, pair: PairId) -> io::Result<()> {
        let (fg, bg) = self
            .pairs
            .get(&pair)
            .copied()
            .unwrap_or((style::Color::Reset, style::Color::Reset));
        // Reset clears colors too, so it has to come first.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.fp.queue(style::SetForegroundColor(fg))?;
        self.fp.queue(style::SetBackgroundColor(bg))?;
        let flags = [
            (attrs.bold, style::Attribute::Bold),
            (attrs.crossedout, style::Attribute::CrossedOut),
            (attrs.dim, style::Attribute::Dim),
            (attrs.italic, style::Attribute::Italic),
            (attrs.overline, style::Attribute::OverLined),
            (attrs.underline, style::Attribute::Underlined),
            (attrs.reverse, style::Attribute::Reverse),
        ];
        for (on, attr) in flags {
            if on {
                self.fp.queue(style::SetAttribute(attr))?;
            }
        }
        Ok(())
    }

    /// Queue `txt` at a position. Positions off the top or left of the screen
    /// are dropped.
    fn print(&mut self, loc: Point, txt: &str) -> io::Result<()> {
        let (Ok(x), Ok(y)) = (u16::try_from(loc.x), u16::try_from(loc.y)) else {
            return Ok(());
        };
        self.fp.queue(ccursor::MoveTo(x, y))?;
        self.fp.queue(style::Print(txt))?;
        Ok(())
    }

    /// Queue a box outline.
    fn border(&mut self, r: Rect) -> io::Result<()> {
        if r.w < 2 || r.h < 2 {
            return Ok(());
        }
        let inner = (r.w - 2) as usize;
        self.print(r.tl, &format!("┌{}┐", "─".repeat(inner)))?;
        for y in 1..r.h as i32 - 1 {
            self.print(r.tl.shift(0, y), "│")?;
            self.print(r.tl.shift(r.w as i32 - 1, y), "│")?;
        }
        self.print(
            r.tl.shift(0, r.h as i32 - 1),
            &format!("└{}┘", "─".repeat(inner)),
        )
    }
}

impl Terminal for CrosstermTerminal {
    fn start(&mut self) -> Result<()> {
        Ok(self.enter()?)
    }

    fn stop(&mut self) -> Result<()> {
        Ok(self.exit()?)
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Input> {
        if !cevent::poll(timeout)? {
            return Ok(Input::None);
        }
        Ok(translate_event(cevent::read()?))
    }

    fn size(&self) -> Result<Expanse> {
        let (w, h) = terminal::size()?;
        Ok(Expanse::new(w.into(), h.into()))
    }

    fn write_run(&mut self, at: Point, text: &str, attrs: AttrSet, pair: PairId) -> Result<()> {
        self.apply_style(attrs, pair)?;
        Ok(self.print(at, text)?)
    }

    fn draw_border(&mut self, rect: Rect, pair: PairId) -> Result<()> {
        self.apply_style(AttrSet::default(), pair)?;
        Ok(self.border(rect)?)
    }

    fn clear_rect(&mut self, rect: Rect, pair: PairId) -> Result<()> {
        self.apply_style(AttrSet::default(), pair)?;
        let blank = " ".repeat(rect.w as usize);
        for y in 0..rect.h as i32 {
            self.print(rect.tl.shift(0, y), &blank)?;
        }
        Ok(())
    }

    fn register_color_pair(&mut self, fg: Color, bg: Color) -> Result<PairId> {
        let id = PairId::of(fg, bg);
        self.pairs
            .insert(id, (translate_color(fg), translate_color(bg)));
        Ok(id)
    }

    fn set_cursor(&mut self, at: Point) -> Result<()> {
        if let (Ok(x), Ok(y)) = (u16::try_from(at.x), u16::try_from(at.y)) {
            self.fp.queue(ccursor::MoveTo(x, y))?;
            self.fp.queue(ccursor::Show)?;
        }
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.fp.queue(ccursor::Hide)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.fp.flush()?)
    }
}

/// Translate crossterm key modifiers into grove modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm mouse button into a grove button.
fn translate_button(b: cevent::MouseButton) -> mouse::Button {
    match b {
        cevent::MouseButton::Left => mouse::Button::Left,
        cevent::MouseButton::Right => mouse::Button::Right,
        cevent::MouseButton::Middle => mouse::Button::Middle,
    }
}

/// Translate a crossterm key code.
fn translate_keycode(code: cevent::KeyCode) -> key::KeyCode {
    match code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        _ => key::KeyCode::Null,
    }
}

/// Translate a crossterm event. Events grove has no use for become
/// `Input::None`, which the window treats as a timeout.
fn translate_event(e: cevent::Event) -> Input {
    match e {
        cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
            Input::Key(key::Key {
                mods: translate_key_modifiers(k.modifiers),
                key: translate_keycode(k.code),
            })
        }
        cevent::Event::Mouse(m) => {
            let (action, button) = match m.kind {
                cevent::MouseEventKind::Down(b) => (mouse::Action::Down, translate_button(b)),
                cevent::MouseEventKind::Up(b) => (mouse::Action::Up, translate_button(b)),
                cevent::MouseEventKind::Drag(b) => (mouse::Action::Drag, translate_button(b)),
                cevent::MouseEventKind::Moved => (mouse::Action::Moved, mouse::Button::None),
                cevent::MouseEventKind::ScrollDown => {
                    (mouse::Action::ScrollDown, mouse::Button::None)
                }
                cevent::MouseEventKind::ScrollUp => (mouse::Action::ScrollUp, mouse::Button::None),
                cevent::MouseEventKind::ScrollLeft | cevent::MouseEventKind::ScrollRight => {
                    return Input::None;
                }
            };
            Input::Mouse(mouse::MouseEvent {
                action,
                button,
                modifiers: translate_key_modifiers(m.modifiers),
                location: Point::new(m.column.into(), m.row.into()),
            })
        }
        cevent::Event::Resize(..) => Input::Resize,
        _ => Input::None,
    }
}

/// Best-effort terminal restore used from the panic hook, where the window
/// and its terminal are out of reach.
fn restore_terminal() {
    let mut stderr = io::stderr();
    #[allow(unused_must_use)]
    {
        crossterm::execute!(
            stderr,
            terminal::LeaveAlternateScreen,
            cevent::DisableMouseCapture,
            ccursor::Show
        );
        terminal::disable_raw_mode();
    }
}

/// Serve `window` on the real terminal until `cond` returns false.
///
/// The terminal is taken over for the duration of the call and restored on
/// every exit path, including errors. When the window's options ask for it, a
/// panic hook restores the terminal before printing a backtrace.
pub fn runloop<F>(window: Window, cond: F) -> Result<()>
where
    F: FnMut(&Window) -> bool,
{
    let _panic_hook = if window.options().install_panic_hook {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|pi| {
            restore_terminal();
            drop(BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream()));
        }));
        Some(guard(previous, |hook| {
            panic::set_hook(hook);
        }))
    } else {
        None
    };

    let mut window = window;
    window.start()?;
    let mut window = guard(window, |mut w| {
        if let Err(e) = w.stop() {
            tracing::error!("failed to restore terminal: {e}");
        }
    });
    window.serve(cond)
}
