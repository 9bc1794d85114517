//! Drawing primitives over a [`FrameBuffer`](crate::core::frame_buffer::FrameBuffer).
//!
//! All routines bounds-check every sub-cell point before writing and merge
//! into existing glyphs by operating on the character only, so they work the
//! same for every color tier.

pub mod circle;
pub mod glyphs;
pub mod line;
pub mod text;

pub use circle::fill_circle;
pub use line::{draw_line, line_braille, line_half_block, LineEncoding};
pub use text::draw_text;
