//! Sub-cell glyph encodings.
//!
//! Braille patterns (U+2800..=U+28FF) give a 2×4 dot matrix per cell; the
//! code point offset from U+2800 is exactly the 8-bit dot mask. Half blocks
//! give a 1×2 matrix.

use lazy_static::lazy_static;

pub const BRAILLE_BASE: u32 = 0x2800;

pub const UPPER_HALF: char = '▀';
pub const LOWER_HALF: char = '▄';
pub const FULL_BLOCK: char = '█';

pub const UPPER_BIT: u8 = 0b01;
pub const LOWER_BIT: u8 = 0b10;

/// Dot mask for sub-position `[x % 2][y % 4]`.
pub const DOT_MASKS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

lazy_static! {
    /// All 256 braille patterns, indexed by dot mask.
    pub static ref BRAILLE: [char; 256] = {
        let mut table = [' '; 256];
        for (mask, slot) in table.iter_mut().enumerate() {
            if let Some(ch) = char::from_u32(BRAILLE_BASE + mask as u32) {
                *slot = ch;
            }
        }
        table
    };
}

#[inline]
pub fn braille_glyph(mask: u8) -> char {
    BRAILLE[mask as usize]
}

/// Recovers the dot mask of a braille glyph; `None` for any other char.
#[inline]
pub fn braille_mask(ch: char) -> Option<u8> {
    let code = ch as u32;
    if (BRAILLE_BASE..=BRAILLE_BASE + 0xFF).contains(&code) {
        Some((code - BRAILLE_BASE) as u8)
    } else {
        None
    }
}

/// Sub-dot coordinates must be non-negative.
#[inline]
pub fn dot_mask(sub_x: i32, sub_y: i32) -> u8 {
    DOT_MASKS[(sub_x % 2) as usize][(sub_y % 4) as usize]
}

pub fn half_block_glyph(mask: u8) -> char {
    match mask & (UPPER_BIT | LOWER_BIT) {
        UPPER_BIT => UPPER_HALF,
        LOWER_BIT => LOWER_HALF,
        0 => ' ',
        _ => FULL_BLOCK,
    }
}

pub fn half_block_mask(ch: char) -> Option<u8> {
    match ch {
        UPPER_HALF => Some(UPPER_BIT),
        LOWER_HALF => Some(LOWER_BIT),
        FULL_BLOCK => Some(UPPER_BIT | LOWER_BIT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_table_is_a_bijection() {
        for mask in 0..=255u8 {
            let ch = braille_glyph(mask);
            assert_eq!(braille_mask(ch), Some(mask));
        }
        assert_eq!(braille_glyph(0), '⠀');
        assert_eq!(braille_glyph(0xFF), '⣿');
        assert_eq!(braille_mask('a'), None);
        assert_eq!(braille_mask('\u{2900}'), None);
    }

    #[test]
    fn test_dot_positions() {
        assert_eq!(braille_glyph(dot_mask(0, 0)), '⠁');
        assert_eq!(braille_glyph(dot_mask(0, 3)), '⡀');
        assert_eq!(braille_glyph(dot_mask(1, 0)), '⠈');
        assert_eq!(braille_glyph(dot_mask(3, 7)), '⢀');

        let all = DOT_MASKS.iter().flatten().fold(0u8, |acc, m| {
            assert_eq!(acc & m, 0);
            acc | m
        });
        assert_eq!(all, 0xFF);
    }

    #[test]
    fn test_half_block_union() {
        let both = half_block_mask(UPPER_HALF).unwrap() | half_block_mask(LOWER_HALF).unwrap();
        assert_eq!(half_block_glyph(both), FULL_BLOCK);
        assert_eq!(half_block_mask(' '), None);
    }
}
