//! Display-column arithmetic for strings that mix single- and double-width
//! characters.
//!
//! All indexes returned here are *character* indexes, not byte offsets. Use
//! [`byte_offset`] to convert before slicing a `str`.

use std::{iter, str};

use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};

/// The result of mapping a display column onto a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    /// The column maps onto the character at `index`. `rem` is the number of
    /// columns between the character boundary and the requested column: the
    /// columns consumed before the target when the left character was chosen,
    /// or the overshoot when the following character was chosen.
    At {
        /// Character index.
        index: usize,
        /// Column remainder.
        rem: usize,
    },
    /// The column is at or past the end of the string, with the given number of columns
    /// remaining after the last character.
    Past(usize),
}

/// Display width of a single character. Control characters occupy no cells.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string.
pub fn width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Display width of raw bytes, which must be UTF-8 text.
pub fn width_of_bytes(bytes: &[u8]) -> Result<usize> {
    let s = str::from_utf8(bytes).map_err(|e| Error::InvalidInput(e.to_string()))?;
    Ok(width(s))
}

/// Byte offset of the character at `index`, or the string length if `index`
/// is past the end.
pub fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(b, _)| b)
}

/// Find the character whose cumulative width crosses `column`.
///
/// A column on a character boundary resolves to the character starting there.
/// A column inside a double-width character resolves to that character when
/// `prefer_left` is set, and to the following character otherwise.
pub fn column_to_index(s: &str, column: usize, prefer_left: bool) -> Located {
    let mut end = 0;
    for (i, c) in s.chars().enumerate() {
        let w = char_width(c);
        end += w;
        if end > column {
            let start = end - w;
            if prefer_left || start == column {
                return Located::At {
                    index: i,
                    rem: column - start,
                };
            }
            return Located::At {
                index: i + 1,
                rem: end - column,
            };
        }
    }
    Located::Past(column - end)
}

/// Character index for an insertion at `column`: the character at or after the
/// column, or the character count when the column is at the end of the line.
pub fn char_index_at(s: &str, column: usize) -> usize {
    match column_to_index(s, column, false) {
        Located::At { index, .. } => index,
        Located::Past(_) => s.chars().count(),
    }
}

/// Snap a column to the start of the character it falls in, clamping to the
/// end of the string.
pub fn snap_left(s: &str, column: usize) -> usize {
    match column_to_index(s, column, true) {
        Located::At { rem, .. } => column - rem,
        Located::Past(_) => width(s),
    }
}

/// Columns a cursor may rest on: the start of every visible character plus the
/// end of the string.
fn boundaries(s: &str) -> impl Iterator<Item = usize> + '_ {
    let mut col = 0;
    s.chars()
        .filter_map(move |c| {
            let w = char_width(c);
            let start = col;
            col += w;
            (w > 0).then_some(start)
        })
        .chain(iter::once(width(s)))
}

/// The closest cursor boundary strictly left of `column`.
pub fn prev_boundary(s: &str, column: usize) -> Option<usize> {
    boundaries(s).filter(|b| *b < column).max()
}

/// The closest cursor boundary strictly right of `column`.
pub fn next_boundary(s: &str, column: usize) -> Option<usize> {
    boundaries(s).filter(|b| *b > column).min()
}

/// The substring visible in the column window `[start, start + len)`.
///
/// If the window starts inside a double-width character, the visible remainder
/// is left-padded with one blank per clipped column so that everything after
/// it stays column-aligned. A double-width character straddling the right edge
/// is dropped. `None` leaves the window unbounded on the right.
pub fn slice(s: &str, start: usize, len: Option<usize>) -> String {
    let (index, pad) = match column_to_index(s, start, false) {
        Located::At { index, rem } => (index, rem),
        Located::Past(_) => return String::new(),
    };
    let mut out = " ".repeat(pad);
    out.extend(s.chars().skip(index));
    match len {
        None => out,
        Some(len) => match column_to_index(&out, len, true) {
            Located::At { index, .. } => out.chars().take(index).collect(),
            Located::Past(_) => out,
        },
    }
}

/// Split on line breaks, then break each line into maximal chunks no wider
/// than `width`. `None` disables wrapping.
///
/// Every chunk holds at least one character, so a character wider than
/// `width` is emitted on its own.
pub fn wrap(s: &str, width: Option<usize>) -> Vec<String> {
    let mut out = vec![];
    for line in s.split('\n') {
        wrap_line(line, width, &mut out);
    }
    out
}

/// Wrap several strings, concatenating the results.
pub fn wrap_lines<I, S>(lines: I, width: Option<usize>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .flat_map(|l| wrap(l.as_ref(), width))
        .collect()
}

/// Greedily split a single line.
fn wrap_line(line: &str, width: Option<usize>, out: &mut Vec<String>) {
    let Some(width) = width else {
        out.push(line.to_string());
        return;
    };
    let mut rest = line;
    loop {
        match column_to_index(rest, width, true) {
            Located::Past(_) => {
                out.push(rest.to_string());
                return;
            }
            Located::At { index, .. } => {
                let split = byte_offset(rest, index.max(1));
                out.push(rest[..split].to_string());
                rest = &rest[split..];
                if rest.is_empty() {
                    return;
                }
            }
        }
    }
}
