//! Differential style emission.
//!
//! A [`StyleEmitter`] remembers the last foreground/background it wrote and
//! only emits a color directive when a cell's color differs. Worst case is two
//! directives per cell; a row of one color costs two directives in total.

use crate::color::{ColorTier, Palette16, Palette256, Rgb, TerminalColor};
use crate::core::frame_buffer::FrameBuffer;

use super::cell::Cell;

pub const RESET: &[u8] = b"\x1b[0m";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Plane {
    Foreground,
    Background,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EmitterState {
    /// Nothing emitted since the last reset; the next cell must be forced.
    Fresh,
    MidFrame,
}

/// How rows are laid out in the output stream.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FrameLayout {
    /// Cells back to back; the surface wraps at its own width.
    Wrapped,
    /// Reset and newline after every row, for printing into a normal stream.
    Lines,
}

// Helper for zero-allocation integer writing
#[inline(always)]
fn write_u8_fast(buffer: &mut Vec<u8>, mut n: u8) {
    if n >= 100 {
        buffer.push(b'0' + n / 100);
        n %= 100;
        buffer.push(b'0' + n / 10);
        buffer.push(b'0' + n % 10);
    } else if n >= 10 {
        buffer.push(b'0' + n / 10);
        buffer.push(b'0' + n % 10);
    } else {
        buffer.push(b'0' + n);
    }
}

/// `ESC[38;5;Nm` / `ESC[48;5;Nm`
pub fn push_indexed(buffer: &mut Vec<u8>, plane: Plane, index: u8) {
    buffer.extend_from_slice(match plane {
        Plane::Foreground => b"\x1b[38;5;",
        Plane::Background => b"\x1b[48;5;",
    });
    write_u8_fast(buffer, index);
    buffer.push(b'm');
}

/// `ESC[38;2;R;G;Bm` / `ESC[48;2;R;G;Bm`
pub fn push_direct(buffer: &mut Vec<u8>, plane: Plane, color: Rgb) {
    buffer.extend_from_slice(match plane {
        Plane::Foreground => b"\x1b[38;2;",
        Plane::Background => b"\x1b[48;2;",
    });
    write_u8_fast(buffer, color.r());
    buffer.push(b';');
    write_u8_fast(buffer, color.g());
    buffer.push(b';');
    write_u8_fast(buffer, color.b());
    buffer.push(b'm');
}

/// Writes the directive for `color` in its own tier.
pub fn push_color<C: TerminalColor>(buffer: &mut Vec<u8>, plane: Plane, color: C) {
    match C::TIER {
        ColorTier::TrueColor => push_direct(buffer, plane, color.to_rgb()),
        ColorTier::Extended | ColorTier::Console => {
            push_indexed(buffer, plane, color.to_palette256().index())
        }
    }
}

pub struct StyleEmitter<C> {
    last_fg: Option<C>,
    last_bg: Option<C>,
    directives: usize,
}

impl<C: TerminalColor> Default for StyleEmitter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TerminalColor> StyleEmitter<C> {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
            directives: 0,
        }
    }

    pub fn state(&self) -> EmitterState {
        if self.last_fg.is_none() && self.last_bg.is_none() {
            EmitterState::Fresh
        } else {
            EmitterState::MidFrame
        }
    }

    /// Forgets the emitted style and the directive count.
    pub fn begin_frame(&mut self) {
        self.last_fg = None;
        self.last_bg = None;
        self.directives = 0;
    }

    /// Color directives emitted since [`StyleEmitter::begin_frame`].
    pub fn directive_count(&self) -> usize {
        self.directives
    }

    pub fn emit(&mut self, cell: &Cell<C>, force: bool, buffer: &mut Vec<u8>) {
        if force || self.last_fg != Some(cell.fg) {
            push_color(buffer, Plane::Foreground, cell.fg);
            self.last_fg = Some(cell.fg);
            self.directives += 1;
        }

        if force || self.last_bg != Some(cell.bg) {
            push_color(buffer, Plane::Background, cell.bg);
            self.last_bg = Some(cell.bg);
            self.directives += 1;
        }

        let mut b_dst = [0u8; 4];
        buffer.extend_from_slice(cell.glyph().encode_utf8(&mut b_dst).as_bytes());
    }

    /// Appends the reset directive; the surface is back at its default style.
    pub fn reset_style(&mut self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(RESET);
        self.last_fg = None;
        self.last_bg = None;
    }
}

/// Emits a whole buffer, converting each cell into `tier` first.
///
/// Returns the number of color directives written.
pub fn compose<C: TerminalColor>(
    frame: &FrameBuffer<C>,
    tier: ColorTier,
    layout: FrameLayout,
    buffer: &mut Vec<u8>,
) -> usize {
    match tier {
        ColorTier::TrueColor => compose_as::<C, Rgb>(frame, layout, buffer),
        ColorTier::Extended => compose_as::<C, Palette256>(frame, layout, buffer),
        ColorTier::Console => compose_as::<C, Palette16>(frame, layout, buffer),
    }
}

fn compose_as<C: TerminalColor, T: TerminalColor>(
    frame: &FrameBuffer<C>,
    layout: FrameLayout,
    buffer: &mut Vec<u8>,
) -> usize {
    let mut emitter = StyleEmitter::<T>::new();

    for row in frame.rows() {
        for cell in row {
            let force = emitter.state() == EmitterState::Fresh;
            emitter.emit(&cell.convert::<T>(), force, buffer);
        }
        if layout == FrameLayout::Lines {
            emitter.reset_style(buffer);
            buffer.push(b'\n');
        }
    }

    if layout == FrameLayout::Wrapped {
        emitter.reset_style(buffer);
    }

    emitter.directive_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_uniform_row_emits_two_directives() {
        let mut frame = FrameBuffer::<Palette256>::new(40, 1);
        frame.fill(Cell::new('x', Palette256::RED, Palette256::BLUE));

        let mut out = Vec::new();
        let n = compose(&frame, ColorTier::Extended, FrameLayout::Wrapped, &mut out);
        assert_eq!(n, 2);
        assert_eq!(count(&out, b"\x1b[38;5;1m"), 1);
        assert_eq!(count(&out, b"\x1b[48;5;4m"), 1);
        assert_eq!(count(&out, b"x"), 40);
        assert!(out.ends_with(RESET));
    }

    #[test]
    fn test_alternating_row_emits_two_per_cell() {
        let mut frame = FrameBuffer::<Rgb>::new(9, 1);
        for i in 0..frame.len() {
            let cell = if i % 2 == 0 {
                Cell::new('a', Rgb::RED, Rgb::BLACK)
            } else {
                Cell::new('b', Rgb::GREEN, Rgb::WHITE)
            };
            frame.set(i, cell);
        }

        let mut out = Vec::new();
        let n = compose(&frame, ColorTier::TrueColor, FrameLayout::Wrapped, &mut out);
        assert_eq!(n, 2 * 9);
        assert_eq!(count(&out, b"\x1b[38;2;255;0;0m"), 5);
        assert_eq!(count(&out, b"\x1b[48;2;255;255;255m"), 4);
    }

    #[test]
    fn test_first_cell_is_forced() {
        let mut emitter = StyleEmitter::<Palette16>::new();
        let cell = Cell::new('z', Palette16::RED, Palette16::BLACK);
        let mut out = Vec::new();

        emitter.emit(&cell, true, &mut out);
        emitter.emit(&cell, false, &mut out);
        assert_eq!(emitter.state(), EmitterState::MidFrame);
        // 16-color red is index 9 in the 256 palette
        assert_eq!(out, b"\x1b[38;5;9m\x1b[48;5;0mzz".to_vec());

        emitter.emit(&cell, true, &mut out);
        assert_eq!(emitter.directive_count(), 4);

        emitter.reset_style(&mut out);
        assert_eq!(emitter.state(), EmitterState::Fresh);
    }

    #[test]
    fn test_null_glyph_renders_as_space() {
        let frame = FrameBuffer::<Palette256>::new(3, 1);
        let mut out = Vec::new();
        compose(&frame, ColorTier::Extended, FrameLayout::Wrapped, &mut out);
        assert_eq!(out, b"\x1b[38;5;0m\x1b[48;5;0m   \x1b[0m".to_vec());
    }

    #[test]
    fn test_lines_layout_restarts_each_row() {
        let mut frame = FrameBuffer::<Palette256>::new(2, 3);
        frame.fill(Cell::new('o', Palette256::WHITE, Palette256::BLACK));

        let mut out = Vec::new();
        let n = compose(&frame, ColorTier::Extended, FrameLayout::Lines, &mut out);
        assert_eq!(n, 6);
        assert_eq!(count(&out, b"\n"), 3);
        assert_eq!(count(&out, RESET), 3);
    }

    #[test]
    fn test_compose_converts_down_to_console_tier() {
        let mut frame = FrameBuffer::<Rgb>::new(1, 1);
        frame[0] = Cell::new('#', Rgb::new(255, 85, 85), Rgb::BLACK);
        let mut out = Vec::new();
        compose(&frame, ColorTier::Console, FrameLayout::Wrapped, &mut out);
        assert_eq!(out, b"\x1b[38;5;9m\x1b[48;5;0m#\x1b[0m".to_vec());
    }
}
