//! Colors, text attributes and the color-pair numbering shared with the
//! backend.

/// Color palette.
mod color;

pub use color::{Color, PALETTE_SIZE};

/// A text attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attr {
    /// Bold text.
    Bold,
    /// Crossed out text.
    CrossedOut,
    /// Dim text.
    Dim,
    /// Italic text.
    Italic,
    /// Overlined text.
    Overline,
    /// Underlined text.
    Underline,
    /// Foreground and background swapped.
    Reverse,
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct AttrSet {
    /// Bold flag.
    pub bold: bool,
    /// Crossed out flag.
    pub crossedout: bool,
    /// Dim flag.
    pub dim: bool,
    /// Italic flag.
    pub italic: bool,
    /// Overline flag.
    pub overline: bool,
    /// Underline flag.
    pub underline: bool,
    /// Reverse video flag.
    pub reverse: bool,
}

impl AttrSet {
    /// Construct a set of text attributes with a single attribute turned on.
    pub fn new(attr: Attr) -> Self {
        Self::default().with(attr)
    }

    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A helper for progressive construction of attribute sets.
    pub fn with(mut self, attr: Attr) -> Self {
        match attr {
            Attr::Bold => self.bold = true,
            Attr::Dim => self.dim = true,
            Attr::Italic => self.italic = true,
            Attr::CrossedOut => self.crossedout = true,
            Attr::Underline => self.underline = true,
            Attr::Overline => self.overline = true,
            Attr::Reverse => self.reverse = true,
        };
        self
    }
}

/// Identifier of a registered (foreground, background) combination. Pair 0
/// is the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PairId(pub u16);

impl PairId {
    /// The pair id for a foreground/background combination. Ids are dense over
    /// the palette, so every combination has a fixed number known up front.
    pub fn of(fg: Color, bg: Color) -> Self {
        Self(fg.slot() * PALETTE_SIZE + bg.slot())
    }

    /// Recover the colors from a pair id.
    pub fn colors(self) -> (Color, Color) {
        let fg = Color::ALL
            .get((self.0 / PALETTE_SIZE) as usize)
            .copied()
            .unwrap_or_default();
        let bg = Color::ALL[(self.0 % PALETTE_SIZE) as usize];
        (fg, bg)
    }

    /// Every pair except the default, in id order.
    pub fn all() -> impl Iterator<Item = (Self, Color, Color)> {
        Color::ALL
            .into_iter()
            .flat_map(|fg| Color::ALL.into_iter().map(move |bg| (fg, bg)))
            .map(|(fg, bg)| (Self::of(fg, bg), fg, bg))
            .filter(|(p, _, _)| p.0 != 0)
    }
}

/// A fully specified text style: a color pair plus attributes. Styles are
/// plain values handed to drawing calls; there is no theme lookup.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text attributes.
    pub attrs: AttrSet,
}

impl Style {
    /// A style with the given colors and no attributes.
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrSet::default(),
        }
    }

    /// Add an attribute.
    pub fn with(mut self, attr: Attr) -> Self {
        self.attrs = self.attrs.with(attr);
        self
    }

    /// The same style in reverse video.
    pub fn reversed(self) -> Self {
        self.with(Attr::Reverse)
    }

    /// The registered pair for this style's colors.
    pub fn pair(&self) -> PairId {
        PairId::of(self.fg, self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn pair_numbering() -> Result<()> {
        assert_eq!(PairId::of(Color::Default, Color::Default), PairId(0));
        // (fg + 1) * 17 + bg + 1 over terminal indexes.
        assert_eq!(PairId::of(Color::Black, Color::Default), PairId(17));
        assert_eq!(PairId::of(Color::DarkRed, Color::Black), PairId(2 * 17 + 1));
        assert_eq!(PairId::of(Color::White, Color::White), PairId(17 * 17 - 1));
        assert_eq!(PairId(35).colors(), (Color::DarkRed, Color::Black));
        assert_eq!(PairId::all().count(), 17 * 17 - 1);
        Ok(())
    }

    #[test]
    fn attrs() -> Result<()> {
        assert!(AttrSet::default().is_empty());
        let s = Style::new(Color::Blue, Color::Default).reversed();
        assert!(s.attrs.reverse);
        assert!(!s.attrs.bold);
        assert_eq!(s.pair(), PairId::of(Color::Blue, Color::Default));
        assert!(!AttrSet::new(Attr::Underline).is_empty());
        Ok(())
    }
}
