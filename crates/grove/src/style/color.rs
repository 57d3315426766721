/// A terminal color from the classic 16-color palette, plus the terminal's
/// own default.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
pub enum Color {
    /// Whatever the terminal draws by default.
    #[default]
    Default,
    /// Black.
    Black,
    /// Dark red.
    DarkRed,
    /// Dark green.
    DarkGreen,
    /// Dark yellow.
    DarkYellow,
    /// Dark blue.
    DarkBlue,
    /// Dark magenta.
    DarkMagenta,
    /// Dark cyan.
    DarkCyan,
    /// Grey.
    Grey,
    /// Dark grey.
    DarkGrey,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

/// Number of distinct palette entries, including `Default`.
pub const PALETTE_SIZE: u16 = 17;

impl Color {
    /// Every palette entry, `Default` first, then in terminal index order.
    pub const ALL: [Self; PALETTE_SIZE as usize] = [
        Self::Default,
        Self::Black,
        Self::DarkRed,
        Self::DarkGreen,
        Self::DarkYellow,
        Self::DarkBlue,
        Self::DarkMagenta,
        Self::DarkCyan,
        Self::Grey,
        Self::DarkGrey,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// The terminal's color index, 0 to 15. `Default` has none.
    pub fn index(self) -> Option<u8> {
        match self.slot() {
            0 => None,
            n => Some((n - 1) as u8),
        }
    }

    /// Position in [`Color::ALL`].
    pub(crate) fn slot(self) -> u16 {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as u16
    }

    /// Inverse of [`Color::index`].
    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(i as usize + 1).copied()
    }
}
