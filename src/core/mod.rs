pub mod config;
pub mod frame_buffer;
