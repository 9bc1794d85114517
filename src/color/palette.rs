use thiserror::Error;

/// An index into the 256-entry terminal palette.
///
/// - `0..=15`: the 16 standard colors, in ANSI order
/// - `16..=231`: a 6×6×6 color cube
/// - `232..=255`: a 24-step grayscale ramp
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, PartialOrd, Ord)]
pub struct Palette256(pub u8);

/// Which region of the 256-entry palette an index falls in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaletteRange {
    Standard(u8),
    /// Cube coordinates, each in `0..6`.
    Cube { r: u8, g: u8, b: u8 },
    /// Ramp step in `0..24`.
    Gray(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette index {0} is outside 0..=255")]
    OutOfRange(i64),
}

impl Palette256 {
    pub const BLACK: Palette256 = Palette256(0);
    pub const RED: Palette256 = Palette256(1);
    pub const GREEN: Palette256 = Palette256(2);
    pub const YELLOW: Palette256 = Palette256(3);
    pub const BLUE: Palette256 = Palette256(4);
    pub const MAGENTA: Palette256 = Palette256(5);
    pub const CYAN: Palette256 = Palette256(6);
    pub const WHITE: Palette256 = Palette256(7);
    pub const BRIGHT_BLACK: Palette256 = Palette256(8);
    pub const BRIGHT_RED: Palette256 = Palette256(9);
    pub const BRIGHT_GREEN: Palette256 = Palette256(10);
    pub const BRIGHT_YELLOW: Palette256 = Palette256(11);
    pub const BRIGHT_BLUE: Palette256 = Palette256(12);
    pub const BRIGHT_MAGENTA: Palette256 = Palette256(13);
    pub const BRIGHT_CYAN: Palette256 = Palette256(14);
    pub const BRIGHT_WHITE: Palette256 = Palette256(15);

    pub const CUBE_START: u8 = 16;
    pub const GRAY_START: u8 = 232;

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn range(self) -> PaletteRange {
        match self.0 {
            0..=15 => PaletteRange::Standard(self.0),
            16..=231 => {
                let i = self.0 - Self::CUBE_START;
                PaletteRange::Cube {
                    r: i / 36,
                    g: i % 36 / 6,
                    b: i % 6,
                }
            }
            _ => PaletteRange::Gray(self.0 - Self::GRAY_START),
        }
    }
}

impl From<u8> for Palette256 {
    fn from(v: u8) -> Self {
        Palette256(v)
    }
}

impl TryFrom<i32> for Palette256 {
    type Error = PaletteError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        u8::try_from(v)
            .map(Palette256)
            .map_err(|_| PaletteError::OutOfRange(v as i64))
    }
}

impl TryFrom<u16> for Palette256 {
    type Error = PaletteError;

    fn try_from(v: u16) -> Result<Self, Self::Error> {
        u8::try_from(v)
            .map(Palette256)
            .map_err(|_| PaletteError::OutOfRange(v as i64))
    }
}

/// A 16-color legacy palette entry: a 4-bit `IRGB` mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, PartialOrd, Ord)]
pub struct Palette16(u8);

impl Palette16 {
    pub const BLUE_BIT: u8 = 0b0001;
    pub const GREEN_BIT: u8 = 0b0010;
    pub const RED_BIT: u8 = 0b0100;
    pub const INTENSITY_BIT: u8 = 0b1000;

    pub const BLACK: Palette16 = Palette16(0);
    pub const DARK_BLUE: Palette16 = Palette16(1);
    pub const DARK_GREEN: Palette16 = Palette16(2);
    pub const DARK_CYAN: Palette16 = Palette16(3);
    pub const DARK_RED: Palette16 = Palette16(4);
    pub const DARK_MAGENTA: Palette16 = Palette16(5);
    pub const DARK_YELLOW: Palette16 = Palette16(6);
    pub const GRAY: Palette16 = Palette16(7);
    pub const DARK_GRAY: Palette16 = Palette16(8);
    pub const BLUE: Palette16 = Palette16(9);
    pub const GREEN: Palette16 = Palette16(10);
    pub const CYAN: Palette16 = Palette16(11);
    pub const RED: Palette16 = Palette16(12);
    pub const MAGENTA: Palette16 = Palette16(13);
    pub const YELLOW: Palette16 = Palette16(14);
    pub const WHITE: Palette16 = Palette16(15);

    /// Bits above the low nibble are dropped.
    #[inline]
    pub const fn new(bits: u8) -> Self {
        Palette16(bits & 0x0F)
    }

    pub const fn from_channels(intense: bool, r: bool, g: bool, b: bool) -> Self {
        let mut bits = 0;
        if intense {
            bits |= Self::INTENSITY_BIT;
        }
        if r {
            bits |= Self::RED_BIT;
        }
        if g {
            bits |= Self::GREEN_BIT;
        }
        if b {
            bits |= Self::BLUE_BIT;
        }
        Palette16(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_intense(self) -> bool {
        self.0 & Self::INTENSITY_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_classification() {
        assert_eq!(Palette256(9).range(), PaletteRange::Standard(9));
        assert_eq!(Palette256(16).range(), PaletteRange::Cube { r: 0, g: 0, b: 0 });
        assert_eq!(Palette256(231).range(), PaletteRange::Cube { r: 5, g: 5, b: 5 });
        assert_eq!(Palette256(16 + 36 + 12 + 3).range(), PaletteRange::Cube { r: 1, g: 2, b: 3 });
        assert_eq!(Palette256(232).range(), PaletteRange::Gray(0));
        assert_eq!(Palette256(255).range(), PaletteRange::Gray(23));
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert_eq!(Palette256::try_from(255i32), Ok(Palette256(255)));
        assert_eq!(Palette256::try_from(256i32), Err(PaletteError::OutOfRange(256)));
        assert_eq!(Palette256::try_from(-1i32), Err(PaletteError::OutOfRange(-1)));
        assert_eq!(Palette256::try_from(300u16), Err(PaletteError::OutOfRange(300)));
    }

    #[test]
    fn test_palette16_bits() {
        assert_eq!(Palette16::from_channels(false, true, false, false), Palette16::DARK_RED);
        assert_eq!(Palette16::from_channels(true, true, true, false), Palette16::YELLOW);
        assert_eq!(Palette16::new(0xFF), Palette16::WHITE);
        assert!(Palette16::DARK_GRAY.is_intense());
        assert!(!Palette16::GRAY.is_intense());
    }
}
