pub mod convert;
pub mod palette;
pub mod rgb;

use serde::{Deserialize, Serialize};

pub use convert::{
    gray_to_palette256, palette16_candidates, palette16_to_palette256, palette16_to_rgb,
    palette256_to_palette16, palette256_to_rgb, rgb_to_palette16, rgb_to_palette256,
};
pub use palette::{Palette16, Palette256, PaletteError, PaletteRange};
pub use rgb::{ParseColorError, Rgb};

/// Color fidelity of a cell grid or of a display.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTier {
    /// 24-bit direct color
    TrueColor,
    /// 256-entry indexed palette
    Extended,
    /// 16-color legacy palette
    Console,
}

/// A color representation usable in a cell.
///
/// Conversions are explicit and never fail; `convert` picks the most direct
/// route between two tiers instead of always passing through 24-bit.
pub trait TerminalColor: Copy + PartialEq + Default + std::fmt::Debug + Send + Sync + 'static {
    const TIER: ColorTier;

    fn to_rgb(self) -> Rgb;
    fn to_palette256(self) -> Palette256;
    fn to_palette16(self) -> Palette16;

    fn from_rgb(color: Rgb) -> Self;
    fn from_palette256(color: Palette256) -> Self;
    fn from_palette16(color: Palette16) -> Self;

    fn convert<T: TerminalColor>(self) -> T {
        match Self::TIER {
            ColorTier::TrueColor => T::from_rgb(self.to_rgb()),
            ColorTier::Extended => T::from_palette256(self.to_palette256()),
            ColorTier::Console => T::from_palette16(self.to_palette16()),
        }
    }
}

impl TerminalColor for Rgb {
    const TIER: ColorTier = ColorTier::TrueColor;

    fn to_rgb(self) -> Rgb {
        self
    }

    fn to_palette256(self) -> Palette256 {
        rgb_to_palette256(self.r(), self.g(), self.b())
    }

    fn to_palette16(self) -> Palette16 {
        rgb_to_palette16(self)
    }

    fn from_rgb(color: Rgb) -> Self {
        color
    }

    fn from_palette256(color: Palette256) -> Self {
        palette256_to_rgb(color)
    }

    fn from_palette16(color: Palette16) -> Self {
        palette16_to_rgb(color)
    }
}

impl TerminalColor for Palette256 {
    const TIER: ColorTier = ColorTier::Extended;

    fn to_rgb(self) -> Rgb {
        palette256_to_rgb(self)
    }

    fn to_palette256(self) -> Palette256 {
        self
    }

    fn to_palette16(self) -> Palette16 {
        palette256_to_palette16(self)
    }

    fn from_rgb(color: Rgb) -> Self {
        color.to_palette256()
    }

    fn from_palette256(color: Palette256) -> Self {
        color
    }

    fn from_palette16(color: Palette16) -> Self {
        palette16_to_palette256(color)
    }
}

impl TerminalColor for Palette16 {
    const TIER: ColorTier = ColorTier::Console;

    fn to_rgb(self) -> Rgb {
        palette16_to_rgb(self)
    }

    fn to_palette256(self) -> Palette256 {
        palette16_to_palette256(self)
    }

    fn to_palette16(self) -> Palette16 {
        self
    }

    fn from_rgb(color: Rgb) -> Self {
        rgb_to_palette16(color)
    }

    fn from_palette256(color: Palette256) -> Self {
        palette256_to_palette16(color)
    }

    fn from_palette16(color: Palette16) -> Self {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_identity() {
        let c = Rgb::new(12, 34, 56);
        assert_eq!(c.convert::<Rgb>(), c);
        assert_eq!(Palette256(77).convert::<Palette256>(), Palette256(77));
        assert_eq!(Palette16::CYAN.convert::<Palette16>(), Palette16::CYAN);
    }

    #[test]
    fn test_convert_across_tiers() {
        assert_eq!(Palette16::DARK_RED.convert::<Palette256>(), Palette256::RED);
        assert_eq!(Palette256::BRIGHT_BLUE.convert::<Palette16>(), Palette16::BLUE);
        assert_eq!(Rgb::WHITE.convert::<Palette256>(), Palette256(231));
        assert_eq!(Palette256(231).convert::<Rgb>(), Rgb::WHITE);
    }
}
