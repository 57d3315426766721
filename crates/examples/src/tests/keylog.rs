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
};

use crate::keylog::KeyLogger;

const HOUR: Duration = Duration::from_secs(3600);

fn setup() -> Result<(Arc<Mutex<TestBuf>>, Window, KeyLogger)> {
    let (buf, term) = TestTerminal::create(Expanse::new(60, 4));
    let options = WindowOptions {
        refresh_period: HOUR,
        ..Default::default()
    };
    let (w, k) = KeyLogger::install(Window::with_options(term, options)?)?;
    Ok((buf, w, k))
}

#[test]
fn logs_keys_and_quits_on_q() -> Result<()> {
    let (buf, mut w, k) = setup()?;
    assert_eq!(w.focused(), Some(k.keylog));
    w.dispatch(Input::Key('a'.into()))?;
    w.refresh_at(Instant::now() + HOUR)?;
    {
        let b = buf.lock().unwrap();
        assert!(b.row(0).starts_with("[0]: press q to quit"));
        assert!(b.row(1).starts_with("[1]: Key pressed:"));
    }
    assert!(k.running());
    w.dispatch(Input::Key('q'.into()))?;
    assert!(!k.running());
    Ok(())
}

#[test]
fn click_logs_and_tab_resumes() -> Result<()> {
    let (buf, mut w, k) = setup()?;
    w.dispatch(MouseEvent::left(Action::Down, (5, 2)).into())?;
    assert_eq!(w.focused(), None);
    w.dispatch(Input::Key(KeyCode::Tab.into()))?;
    assert_eq!(w.focused(), Some(k.keylog));
    w.refresh_at(Instant::now() + HOUR)?;
    let b = buf.lock().unwrap();
    assert!(b.row(1).starts_with("[1]: Mouse: (5, 2), Down"));
    Ok(())
}
