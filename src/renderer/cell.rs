use crate::color::{Palette16, Palette256, Rgb, TerminalColor};

/// The blank glyph. It renders as a space, but its background still paints.
pub const NULL_GLYPH: char = '\0';

/// Represents a single character cell on the terminal
///
/// Generic over the color tier; see [`ConsoleCell`], [`ExtendedCell`] and
/// [`TrueColorCell`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell<C> {
    pub ch: char,
    pub fg: C,
    pub bg: C,
}

pub type ConsoleCell = Cell<Palette16>;
pub type ExtendedCell = Cell<Palette256>;
pub type TrueColorCell = Cell<Rgb>;

impl<C: TerminalColor> Default for Cell<C> {
    fn default() -> Self {
        Self {
            ch: NULL_GLYPH,
            fg: C::default(),
            bg: C::default(),
        }
    }
}

impl<C: TerminalColor> Cell<C> {
    pub fn new(ch: char, fg: C, bg: C) -> Self {
        Self { ch, fg, bg }
    }

    /// A cell with the default background.
    pub fn with_fg(ch: char, fg: C) -> Self {
        Self {
            ch,
            fg,
            bg: C::default(),
        }
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.ch == NULL_GLYPH
    }

    /// The character actually written to the display.
    #[inline]
    pub fn glyph(&self) -> char {
        if self.is_blank() {
            ' '
        } else {
            self.ch
        }
    }

    pub fn convert<T: TerminalColor>(self) -> Cell<T> {
        Cell {
            ch: self.ch,
            fg: self.fg.convert(),
            bg: self.bg.convert(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_blank() {
        let cell = ExtendedCell::default();
        assert!(cell.is_blank());
        assert_eq!(cell.glyph(), ' ');
        assert_eq!(Cell::with_fg('x', Palette256::RED).glyph(), 'x');
    }

    #[test]
    fn test_convert_keeps_glyph() {
        let cell = ConsoleCell::new('#', Palette16::RED, Palette16::DARK_BLUE);
        let wide: TrueColorCell = cell.convert();
        assert_eq!(wide.ch, '#');
        assert_eq!(wide.fg, Rgb::new(255, 85, 85));
        assert_eq!(wide.bg, Rgb::new(0, 0, 170));
    }
}
