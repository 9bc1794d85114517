pub mod cell;
pub mod display;
pub mod processor;
pub mod style;

pub use cell::{Cell, ConsoleCell, ExtendedCell, TrueColorCell, NULL_GLYPH};
pub use display::{present_frame, DisplayManager, DisplaySink, StreamSink};
pub use processor::HalfBlockProcessor;
pub use style::{compose, EmitterState, FrameLayout, Plane, StyleEmitter};
