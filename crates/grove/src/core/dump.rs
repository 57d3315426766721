use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    core::{id::NodeId, node::NodeKind, tree::Tree},
    error::{Error, Result},
};

/// Render a subtree as indented text showing each node's name, kind, focus
/// state and geometry. This is a debug function.
pub fn dump(tree: &Tree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> io::Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")
}

/// Walk a subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &Tree, id: NodeId, level: usize) -> Result<()> {
    let node = tree
        .get(id)
        .ok_or_else(|| Error::Internal(format!("missing node {id:?}")))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    let kind = match node.kind() {
        NodeKind::Leaf => "leaf",
        NodeKind::Container => "container",
        NodeKind::Wrapper => "wrapper",
    };
    write!(buffer, " [{kind}]")?;

    let mut indicators = vec![];
    if tree.is_focused(id) {
        indicators.push(("FOCUSED", Color::Magenta));
    } else if tree.has_local_focus(id) {
        indicators.push(("local focus", Color::Yellow));
    }
    if tree.active() == Some(id) {
        indicators.push(("active", Color::Blue));
    }
    for (text, color) in indicators {
        write!(buffer, " ")?;
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(buffer, "{text}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let pos = node.position();
    write_field(buffer, &indent, "pos:", &format!("({}, {})", pos.x, pos.y))?;
    let size = node
        .size()
        .map_or_else(|| "unbounded".to_string(), |s| format!("{} × {}", s.w, s.h));
    write_field(buffer, &indent, "size:", &size)?;
    if let Some(c) = node.canvas() {
        let r = c.rect();
        write_field(
            buffer,
            &indent,
            "canvas:",
            &format!("x: {}, y: {}, w: {}, h: {}", r.tl.x, r.tl.y, r.w, r.h),
        )?;
    }

    for child in node.children() {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}
