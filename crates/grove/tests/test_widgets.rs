//! Stock widgets driven through a window over the in-memory terminal.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use grove::{
        Layout, NodeId, Window,
        backend::test::{TestBuf, TestTerminal},
        error::{Error, Result},
        event::{
            Input,
            key::{Key, KeyCode},
            mouse::{Action, MouseEvent},
        },
        geom::Expanse,
        widgets::{Button, Frame, Interface, Label, Panel, TextWidget},
    };

    fn window(w: u32, h: u32) -> Result<(Arc<Mutex<TestBuf>>, Window)> {
        let (buf, term) = TestTerminal::create(Expanse::new(w, h));
        Ok((buf, Window::new(term)?))
    }

    fn key(w: &mut Window, k: impl Into<Key>) -> Result<()> {
        w.dispatch(Input::Key(k.into()))
    }

    fn typed(w: &mut Window, s: &str) -> Result<()> {
        for c in s.chars() {
            key(w, c)?;
        }
        Ok(())
    }

    /// A window with a single full-screen editor, focused.
    fn editor(w: u32, h: u32, text: &str) -> Result<(Arc<Mutex<TestBuf>>, Window, NodeId)> {
        let (buf, mut win) = window(w, h)?;
        let root = win.create_interface(Interface::new());
        let t = win.add(root, TextWidget::new().with_text(text), Layout::fill())?;
        win.set_interface(root)?;
        win.layout()?;
        assert!(win.focus(t)?);
        Ok((buf, win, t))
    }

    #[test]
    fn caret_is_drawn_reversed_when_focused() -> Result<()> {
        let (buf, mut w, t) = editor(10, 3, "a界b")?;
        {
            let b = buf.lock().unwrap();
            assert_eq!(b.lines()[0], "a界b");
            assert!(b.cell(0, 0).is_some_and(|c| c.attrs.reverse));
            assert!(!b.cell(1, 0).is_some_and(|c| c.attrs.reverse));
        }

        key(&mut w, KeyCode::Right)?;
        {
            let b = buf.lock().unwrap();
            // The whole wide character is the caret.
            assert!(b.cell(1, 0).is_some_and(|c| c.attrs.reverse && c.ch == '界'));
            assert!(!b.cell(0, 0).is_some_and(|c| c.attrs.reverse));
        }

        key(&mut w, KeyCode::Right)?;
        key(&mut w, KeyCode::Right)?;
        assert_eq!(w.widget::<TextWidget>(t).map(TextWidget::cursor), Some((4, 0)));
        assert!(buf.lock().unwrap().cell(4, 0).is_some_and(|c| c.attrs.reverse));
        Ok(())
    }

    #[test]
    fn unfocused_editor_hides_caret() -> Result<()> {
        let (buf, mut w, _t) = editor(10, 3, "ab")?;
        let root = w.interface().ok_or_else(|| Error::Invalid("no interface".into()))?;
        w.set_focus(root, None)?;
        let b = buf.lock().unwrap();
        assert_eq!(b.lines()[0], "ab");
        assert!((0..10).all(|x| !b.cell(x, 0).is_some_and(|c| c.attrs.reverse)));
        Ok(())
    }

    #[test]
    fn typing_scrolls_horizontally() -> Result<()> {
        let (buf, mut w, t) = editor(5, 2, "")?;
        typed(&mut w, "abcdefg")?;
        assert_eq!(w.widget::<TextWidget>(t).map(TextWidget::viewport), Some((3, 0)));
        assert_eq!(buf.lock().unwrap().row(0), "defg ");
        assert!(buf.lock().unwrap().cell(4, 0).is_some_and(|c| c.attrs.reverse));

        key(&mut w, KeyCode::Backspace)?;
        assert_eq!(w.widget::<TextWidget>(t).map(TextWidget::viewport), Some((2, 0)));
        assert_eq!(buf.lock().unwrap().row(0), "cdef ");
        Ok(())
    }

    #[test]
    fn enter_and_vertical_scroll() -> Result<()> {
        let (buf, mut w, t) = editor(6, 2, "ab\nc")?;
        key(&mut w, KeyCode::Right)?;
        key(&mut w, KeyCode::Right)?;
        key(&mut w, '\r')?;
        let lines = w.widget::<TextWidget>(t).map(|t| t.lines().to_vec());
        assert_eq!(lines, Some(vec!["ab".to_string(), String::new(), "c".into()]));
        assert_eq!(w.widget::<TextWidget>(t).map(TextWidget::cursor), Some((0, 1)));
        assert_eq!(buf.lock().unwrap().lines(), vec!["ab", ""]);

        key(&mut w, KeyCode::Down)?;
        // Down keeps the column and scrolls the caret into view.
        assert_eq!(w.widget::<TextWidget>(t).map(TextWidget::cursor), Some((0, 2)));
        assert_eq!(buf.lock().unwrap().lines(), vec!["", "c"]);
        Ok(())
    }

    #[test]
    fn click_focuses_editor() -> Result<()> {
        let (_buf, mut w) = window(20, 4)?;
        let root = w.create_interface(Interface::new());
        let a = w.add(root, TextWidget::new(), Layout::at(0, 0).size(10, 2))?;
        let b = w.add(root, TextWidget::new(), Layout::at(10, 0).size(10, 2))?;
        w.set_interface(root)?;
        w.layout()?;
        w.dispatch(MouseEvent::left(Action::Down, (12, 1)).into())?;
        assert_eq!(w.focused(), Some(b));
        w.dispatch(MouseEvent::left(Action::Down, (1, 1)).into())?;
        assert_eq!(w.focused(), Some(a));
        typed(&mut w, "hi")?;
        assert_eq!(w.widget::<TextWidget>(a).map(TextWidget::text), Some("hi".to_string()));
        assert_eq!(w.widget::<TextWidget>(b).map(TextWidget::text), Some(String::new()));
        Ok(())
    }

    #[test]
    fn tab_traversal() -> Result<()> {
        for wrap in [true, false] {
            let (_buf, mut w) = window(20, 4)?;
            let root = w.create_interface(Interface::new().with_wrap(wrap));
            let a = w.add(root, TextWidget::new(), Layout::at(0, 0).size(5, 1))?;
            w.add(root, Label::new("skip"), Layout::at(0, 1))?;
            let group = w.add(root, Panel::new(), Layout::at(0, 2).size(20, 2))?;
            let b = w.add(group, Button::new("go"), Layout::at(0, 0))?;
            w.set_interface(root)?;
            w.layout()?;

            key(&mut w, KeyCode::Tab)?;
            assert_eq!(w.focused(), Some(a));
            key(&mut w, KeyCode::Tab)?;
            assert_eq!(w.focused(), Some(b));
            key(&mut w, KeyCode::Tab)?;
            assert_eq!(w.focused(), if wrap { Some(a) } else { Some(b) });
        }
        Ok(())
    }

    #[test]
    fn button_keys_activate_when_focused() -> Result<()> {
        let (_buf, mut w) = window(20, 4)?;
        let root = w.create_interface(Interface::new());
        let b = w.add(
            root,
            Button::new("go").with_keys([Key::from('g')]),
            Layout::at(0, 0),
        )?;
        w.set_interface(root)?;
        w.layout()?;
        key(&mut w, 'g')?;
        assert_eq!(w.widget::<Button>(b).map(Button::presses), Some(0));
        assert!(w.focus(b)?);
        key(&mut w, 'g')?;
        key(&mut w, 'x')?;
        assert_eq!(w.widget::<Button>(b).map(Button::presses), Some(1));
        Ok(())
    }

    #[test]
    fn frame_borders_its_child() -> Result<()> {
        let (buf, mut w) = window(8, 4)?;
        let root = w.create_interface(Interface::new());
        let f = w.add(root, Frame::new(), Layout::at(1, 0).size(6, 3))?;
        w.add(f, Label::new("abcdefgh"), Layout::new())?;
        w.set_interface(root)?;
        w.layout()?;
        let b = buf.lock().unwrap();
        assert_eq!(b.lines(), vec![" ┌────┐", " │abcd│", " └────┘", ""]);
        Ok(())
    }

    #[test]
    fn label_set_text_blanks_old_run() -> Result<()> {
        let (buf, mut w) = window(10, 2)?;
        let root = w.create_interface(Interface::new());
        let l = w.add(root, Label::new("longer"), Layout::at(1, 0))?;
        w.set_interface(root)?;
        w.layout()?;
        assert_eq!(buf.lock().unwrap().lines()[0], " longer");
        w.with_widget::<Label, _>(l, |l, ctx| l.set_text(ctx, "ab"))?;
        assert_eq!(buf.lock().unwrap().lines()[0], " ab");
        Ok(())
    }

    #[test]
    fn removing_a_focused_node() -> Result<()> {
        let (buf, mut w, t) = editor(10, 2, "gone")?;
        w.remove(t)?;
        assert_eq!(w.focused(), None);
        assert!(w.tree().get(t).is_none());
        assert_eq!(buf.lock().unwrap().lines(), vec!["", ""]);
        Ok(())
    }

    #[test]
    fn logs_reach_the_sink() -> Result<()> {
        let lines = Arc::new(Mutex::new(vec![]));
        let sink = lines.clone();
        let (_buf, term) = TestTerminal::create(Expanse::new(10, 2));
        let mut w = Window::new(term)?.with_logger(move |l| sink.lock().unwrap().push(l.to_string()));
        let root = w.create_interface(Interface::new());
        let k = w.add(root, grove::widgets::KeyLog::new(), Layout::new())?;
        w.set_interface(root)?;
        w.layout()?;
        w.focus(k)?;
        key(&mut w, 'a')?;
        w.dispatch(MouseEvent::left(Action::Down, (3, 1)).into())?;
        let got = lines.lock().unwrap().clone();
        assert_eq!(got.len(), 2);
        assert!(got[0].starts_with("[0]: Key pressed:"));
        assert_eq!(got[1], "[1]: Mouse: (3, 1), Down");
        Ok(())
    }
}
