//! Conversions between the three color tiers.
//!
//! The two lossy directions (24-bit to 256, 24-bit to 16) are cheap
//! approximations rather than palette-wide nearest-neighbor searches. Their
//! exact choices are kept stable because rendered output depends on them.

use super::palette::{Palette16, Palette256, PaletteRange};
use super::rgb::Rgb;

/// RGB values of the 16 standard entries, in ANSI index order.
pub const STANDARD_RGB: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(170, 0, 0),
    Rgb::new(0, 170, 0),
    Rgb::new(170, 85, 0),
    Rgb::new(0, 0, 170),
    Rgb::new(170, 0, 170),
    Rgb::new(0, 170, 170),
    Rgb::new(170, 170, 170),
    Rgb::new(85, 85, 85),
    Rgb::new(255, 85, 85),
    Rgb::new(85, 255, 85),
    Rgb::new(255, 255, 85),
    Rgb::new(85, 85, 255),
    Rgb::new(255, 85, 255),
    Rgb::new(85, 255, 255),
    Rgb::new(255, 255, 255),
];

/// RGB values of the 16 legacy colors, indexed by `IRGB` bits.
pub const PALETTE16_RGB: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 170),
    Rgb::new(0, 170, 0),
    Rgb::new(0, 170, 170),
    Rgb::new(170, 0, 0),
    Rgb::new(170, 0, 170),
    Rgb::new(170, 85, 0),
    Rgb::new(170, 170, 170),
    Rgb::new(85, 85, 85),
    Rgb::new(85, 85, 255),
    Rgb::new(85, 255, 85),
    Rgb::new(85, 255, 255),
    Rgb::new(255, 85, 85),
    Rgb::new(255, 85, 255),
    Rgb::new(255, 255, 85),
    Rgb::new(255, 255, 255),
];

// IRGB -> ANSI index (red and blue bits swap places)
const PALETTE16_TO_256: [u8; 16] = [0, 4, 2, 6, 1, 5, 3, 7, 8, 12, 10, 14, 9, 13, 11, 15];

// ANSI index -> IRGB
const STANDARD_TO_PALETTE16: [u8; 16] = [0, 4, 2, 6, 1, 5, 3, 7, 8, 12, 10, 14, 9, 13, 11, 15];

/// Maps a gray level onto the 256 palette.
///
/// Near-black and near-white land on the cube corners, everything else on
/// the 24-step ramp.
pub fn gray_to_palette256(value: u8) -> Palette256 {
    if value < 8 {
        return Palette256(16);
    }
    if value > 248 {
        return Palette256(231);
    }
    Palette256(232 + ((value as u32 - 8) * 24 / 247) as u8)
}

pub fn rgb_to_palette256(r: u8, g: u8, b: u8) -> Palette256 {
    if r == g && g == b {
        return gray_to_palette256(r);
    }

    let level = |c: u8| c as u32 * 5 / 255;
    Palette256((16 + 36 * level(r) + 6 * level(g) + level(b)) as u8)
}

pub fn palette256_to_rgb(color: Palette256) -> Rgb {
    match color.range() {
        PaletteRange::Standard(i) => STANDARD_RGB[i as usize],
        PaletteRange::Cube { r, g, b } => {
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            Rgb::new(level(r), level(g), level(b))
        }
        PaletteRange::Gray(step) => {
            let v = step * 10 + 8;
            Rgb::new(v, v, v)
        }
    }
}

/// Threshold split of each channel against `(x + 1) * 85`.
fn threshold_bits(color: Rgb, x: u8) -> (bool, bool, bool) {
    let threshold = (x + 1) * 85;
    (color.r() > threshold, color.g() > threshold, color.b() > threshold)
}

/// The two candidates examined by [`rgb_to_palette16`]: a low-intensity
/// candidate split at 1/3 of the range and a high-intensity candidate split
/// at 2/3.
pub fn palette16_candidates(color: Rgb) -> (Palette16, Palette16) {
    let (r0, g0, b0) = threshold_bits(color, 0);
    let (r1, g1, b1) = threshold_bits(color, 1);
    (
        Palette16::from_channels(false, r0, g0, b0),
        Palette16::from_channels(true, r1, g1, b1),
    )
}

/// Approximates a 24-bit color with one of the 16 legacy colors.
///
/// Only two candidates are compared (see [`palette16_candidates`]); the
/// result is the closer of the two by squared channel distance, ties going to
/// the low-intensity one. This is not the nearest of all 16 colors.
pub fn rgb_to_palette16(color: Rgb) -> Palette16 {
    let (low, high) = palette16_candidates(color);

    let d0 = Rgb::distance(color, palette16_to_rgb(low));
    let d1 = Rgb::distance(color, palette16_to_rgb(high));

    if d0 <= d1 {
        low
    } else {
        high
    }
}

#[inline]
pub fn palette16_to_rgb(color: Palette16) -> Rgb {
    PALETTE16_RGB[color.bits() as usize]
}

#[inline]
pub fn palette16_to_palette256(color: Palette16) -> Palette256 {
    Palette256(PALETTE16_TO_256[color.bits() as usize])
}

pub fn palette256_to_palette16(color: Palette256) -> Palette16 {
    match color.range() {
        PaletteRange::Standard(i) => Palette16::new(STANDARD_TO_PALETTE16[i as usize]),
        _ => rgb_to_palette16(palette256_to_rgb(color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_corners() {
        assert_eq!(rgb_to_palette256(0, 0, 0), Palette256(16));
        assert_eq!(rgb_to_palette256(255, 255, 255), Palette256(231));
        assert_eq!(rgb_to_palette256(255, 0, 0), Palette256(196));
        assert_eq!(rgb_to_palette256(0, 0, 255), Palette256(21));
    }

    #[test]
    fn test_palette256_to_rgb_fixed_points() {
        assert_eq!(palette256_to_rgb(Palette256(1)), Rgb::new(170, 0, 0));
        assert_eq!(palette256_to_rgb(Palette256(9)), Rgb::new(255, 85, 85));
        assert_eq!(palette256_to_rgb(Palette256(16)), Rgb::new(0, 0, 0));
        assert_eq!(palette256_to_rgb(Palette256(17)), Rgb::new(0, 0, 95));
        assert_eq!(palette256_to_rgb(Palette256(231)), Rgb::new(255, 255, 255));
        assert_eq!(palette256_to_rgb(Palette256(232)), Rgb::new(8, 8, 8));
        // top of the ramp is (23 * 10 + 8)
        assert_eq!(palette256_to_rgb(Palette256(255)), Rgb::new(238, 238, 238));
    }

    #[test]
    fn test_gray_round_trip_is_monotonic() {
        let mut previous = 0u8;
        for v in 0..=255u8 {
            let gray = palette256_to_rgb(rgb_to_palette256(v, v, v));
            assert!(gray.is_gray());
            assert!(gray.r() >= previous, "gray {} went backwards", v);
            previous = gray.r();
        }
    }

    #[test]
    fn test_gray_ramp_boundaries() {
        assert_eq!(gray_to_palette256(7), Palette256(16));
        assert_eq!(gray_to_palette256(8), Palette256(232));
        assert_eq!(gray_to_palette256(248), Palette256(255));
        assert_eq!(gray_to_palette256(249), Palette256(231));
    }

    #[test]
    fn test_palette16_result_is_a_candidate() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let color = Rgb::new(r as u8, g as u8, b as u8);
                    let (low, high) = palette16_candidates(color);
                    let result = rgb_to_palette16(color);
                    assert!(result == low || result == high, "{} -> {:?}", color, result);
                }
            }
        }
    }

    #[test]
    fn test_palette16_known_values() {
        assert_eq!(rgb_to_palette16(Rgb::BLACK), Palette16::BLACK);
        assert_eq!(rgb_to_palette16(Rgb::WHITE), Palette16::WHITE);
        // both candidates are red-only; the dark one is closer
        assert_eq!(rgb_to_palette16(Rgb::new(255, 0, 0)), Palette16::DARK_RED);
        assert_eq!(rgb_to_palette16(Rgb::new(255, 85, 85)), Palette16::RED);
        assert_eq!(rgb_to_palette16(Rgb::new(170, 170, 170)), Palette16::GRAY);
    }

    #[test]
    fn test_palette16_tables_agree() {
        for bits in 0..16u8 {
            let c = Palette16::new(bits);
            let via_256 = palette256_to_rgb(palette16_to_palette256(c));
            assert_eq!(via_256, palette16_to_rgb(c));
            assert_eq!(palette256_to_palette16(palette16_to_palette256(c)), c);
        }
    }
}
