use serde::{Deserialize, Serialize};

use super::glyphs::{braille_glyph, braille_mask, dot_mask, half_block_glyph, LOWER_BIT, UPPER_BIT};
use crate::color::TerminalColor;
use crate::core::frame_buffer::FrameBuffer;
use crate::renderer::cell::Cell;

/// Sub-cell encoding used for strokes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LineEncoding {
    /// 1×2 sub-cells per character
    HalfBlock,
    /// 2×4 sub-cells per character
    #[default]
    Braille,
}

/// Draws a line between two points given in cell coordinates.
pub fn draw_line<C: TerminalColor>(
    frame: &mut FrameBuffer<C>,
    from: (f32, f32),
    to: (f32, f32),
    color: C,
    encoding: LineEncoding,
) {
    match encoding {
        LineEncoding::HalfBlock => line_half_block(frame, from, to, color),
        LineEncoding::Braille => line_braille(frame, from, to, color),
    }
}

/// Half-block line: vertical resolution doubled.
///
/// Each sub-point overwrites its cell with a fresh half block. Only when the
/// previous sub-point of the same line landed in the same cell are the two
/// halves joined into a full block.
pub fn line_half_block<C: TerminalColor>(
    frame: &mut FrameBuffer<C>,
    from: (f32, f32),
    to: (f32, f32),
    color: C,
) {
    let start = scale(from, 1.0, 2.0);
    let end = scale(to, 1.0, 2.0);
    // (column, row, mask) of the last cell this line wrote
    let mut last: Option<(i32, i32, u8)> = None;

    walk(start, end, |x, y| {
        if y < 0 {
            last = None;
            return;
        }
        let row = y / 2;
        let Some(cell) = frame.get_mut(x, row) else {
            last = None;
            return;
        };

        let bit = if y % 2 == 0 { UPPER_BIT } else { LOWER_BIT };
        let mask = match last {
            Some((lx, ly, prev)) if lx == x && ly == row => prev | bit,
            _ => bit,
        };
        *cell = Cell::with_fg(half_block_glyph(mask), color);
        last = Some((x, row, mask));
    });
}

/// Braille line: resolution doubled horizontally, quadrupled vertically.
pub fn line_braille<C: TerminalColor>(
    frame: &mut FrameBuffer<C>,
    from: (f32, f32),
    to: (f32, f32),
    color: C,
) {
    let start = scale(from, 2.0, 4.0);
    let end = scale(to, 2.0, 4.0);

    walk(start, end, |x, y| plot_dot(frame, x, y, color));
}

/// Sets one braille dot, given in dot coordinates.
///
/// Dots accumulate into an existing braille glyph; any other glyph is
/// replaced. The cell is rewritten in the stroke color on the default
/// background either way.
pub(crate) fn plot_dot<C: TerminalColor>(frame: &mut FrameBuffer<C>, x: i32, y: i32, color: C) {
    if x < 0 || y < 0 {
        return;
    }
    let Some(cell) = frame.get_mut(x / 2, y / 4) else {
        return;
    };

    let bit = dot_mask(x, y);
    let mask = match braille_mask(cell.ch) {
        Some(existing) => existing | bit,
        None => bit,
    };
    *cell = Cell::with_fg(braille_glyph(mask), color);
}

#[inline]
fn scale((x, y): (f32, f32), sx: f32, sy: f32) -> (i32, i32) {
    ((x * sx).floor() as i32, (y * sy).floor() as i32)
}

/// Integer Bresenham walk over both endpoints inclusive.
///
/// The axis with the larger delta steps every iteration; the other axis
/// accumulates the smaller delta and steps when it reaches the larger one.
pub(crate) fn walk(from: (i32, i32), to: (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let (dx, dy) = ((to.0 - from.0).abs(), (to.1 - from.1).abs());
    let (sx, sy) = ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    let (mut x, mut y) = from;

    if dx >= dy {
        let mut rem = dx / 2;
        for _ in 0..=dx {
            plot(x, y);
            x += sx;
            rem += dy;
            if rem >= dx {
                y += sy;
                rem -= dx;
            }
        }
    } else {
        let mut rem = dy / 2;
        for _ in 0..=dy {
            plot(x, y);
            y += sy;
            rem += dx;
            if rem >= dy {
                x += sx;
                rem -= dy;
            }
        }
    }
}
