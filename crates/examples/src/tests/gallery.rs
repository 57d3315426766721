use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use grove::{
    Window, WindowOptions,
    backend::test::{TestBuf, TestTerminal},
    error::Result,
    event::{
        Input,
        key::KeyCode,
        mouse::{Action, MouseEvent},
    },
    geom::Expanse,
    widgets::TextWidget,
};

use crate::gallery::Gallery;

const HOUR: Duration = Duration::from_secs(3600);

fn setup(wrap: bool) -> Result<(Arc<Mutex<TestBuf>>, Window, Gallery)> {
    let (buf, term) = TestTerminal::create(Expanse::new(40, 10));
    let options = WindowOptions {
        refresh_period: HOUR,
        ..Default::default()
    };
    let (w, g) = Gallery::install(Window::with_options(term, options)?, wrap)?;
    Ok((buf, w, g))
}

fn right_half(buf: &Arc<Mutex<TestBuf>>, y: u32) -> String {
    let b = buf.lock().unwrap();
    (21..40)
        .filter_map(|x| b.cell(x, y))
        .filter(|c| !c.tail)
        .map(|c| c.ch)
        .collect()
}

#[test]
fn lays_out_editor_log_and_status() -> Result<()> {
    let (buf, w, g) = setup(true)?;
    assert_eq!(w.focused(), Some(g.editor));
    let b = buf.lock().unwrap();
    assert_eq!(b.cell(0, 0).map(|c| c.ch), Some('┌'));
    assert_eq!(b.cell(19, 8).map(|c| c.ch), Some('┘'));
    assert!(b.row(1).starts_with("│Type here."));
    assert!(b.cell(1, 1).is_some_and(|c| c.ch == 'T' && c.attrs.reverse));
    assert!(b.row(8).contains(" quit "));
    assert!(b.row(9).contains("grove gallery"));
    Ok(())
}

#[test]
fn log_view_picks_up_lines_on_refresh() -> Result<()> {
    let (buf, mut w, g) = setup(true)?;
    let t0 = Instant::now();
    assert!(!right_half(&buf, 0).contains("gallery ready"));
    w.refresh_at(t0 + HOUR)?;
    assert!(right_half(&buf, 0).starts_with("[0]: gallery ready"));

    w.dispatch(MouseEvent::left(Action::Down, (22, 8)).into())?;
    assert_eq!(w.focused(), Some(g.quit_button));
    assert!(g.running());
    w.dispatch(MouseEvent::left(Action::Up, (22, 8)).into())?;
    assert!(!g.running());

    w.refresh_at(t0 + HOUR * 2)?;
    assert!(right_half(&buf, 1).starts_with("[1]: quit pressed"));
    Ok(())
}

#[test]
fn typing_edits_and_escape_quits() -> Result<()> {
    let (_buf, mut w, g) = setup(true)?;
    w.dispatch(Input::Key('x'.into()))?;
    let text = w.widget::<TextWidget>(g.editor).map(TextWidget::text);
    assert!(text.is_some_and(|t| t.starts_with("xType here.")));
    assert!(g.running());
    w.dispatch(Input::Key(KeyCode::Esc.into()))?;
    assert!(!g.running());
    Ok(())
}

#[test]
fn tab_skips_the_log_view() -> Result<()> {
    for wrap in [true, false] {
        let (_buf, mut w, g) = setup(wrap)?;
        w.dispatch(Input::Key(KeyCode::Tab.into()))?;
        assert_eq!(w.focused(), Some(g.quit_button));
        w.dispatch(Input::Key(KeyCode::Tab.into()))?;
        let expected = if wrap { g.editor } else { g.quit_button };
        assert_eq!(w.focused(), Some(expected));
    }
    Ok(())
}
