//! Terminal cell rendering: color tiers, a differential style emitter,
//! braille and half-block rasterization, and generic cell grids.

pub mod color;
pub mod core;
pub mod image;
pub mod raster;
pub mod renderer;
pub mod shared;
pub mod sync;
pub mod ui;
pub mod utils;

pub use crate::color::{ColorTier, Palette16, Palette256, Rgb, TerminalColor};
pub use crate::core::frame_buffer::FrameBuffer;
pub use crate::renderer::{Cell, DisplayManager, FrameLayout, StreamSink};
