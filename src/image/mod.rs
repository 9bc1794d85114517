//! Saved cell images.
//!
//! Layout, little-endian, no padding:
//!
//! ```text
//! width:  u16
//! height: u16
//! width * height times:
//!     char: u16 (one UTF-16 code unit)
//!     fg:   u8  (256-palette index)
//!     bg:   u8  (256-palette index)
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::color::{Palette256, TerminalColor};
use crate::core::frame_buffer::FrameBuffer;
use crate::renderer::cell::{Cell, ExtendedCell};

const HEADER_LEN: usize = 4;
const RECORD_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("image data has {0} trailing bytes")]
    TrailingBytes(usize),
    #[error("cell {index} holds an unpaired surrogate 0x{unit:04x}")]
    InvalidChar { index: usize, unit: u16 },
    #[error("image dimensions {width}x{height} do not fit in 16 bits")]
    TooLarge { width: usize, height: usize },
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleImage {
    width: u16,
    height: u16,
    cells: Vec<ExtendedCell>,
}

impl ConsoleImage {
    pub fn new(width: u16, height: u16, cells: Vec<ExtendedCell>) -> Option<Self> {
        (cells.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            cells,
        })
    }

    /// Captures a frame, converting its colors to the 256 palette.
    pub fn from_buffer<C: TerminalColor>(frame: &FrameBuffer<C>) -> Result<Self, ImageError> {
        let too_large = || ImageError::TooLarge {
            width: frame.width(),
            height: frame.height(),
        };
        let width = u16::try_from(frame.width()).map_err(|_| too_large())?;
        let height = u16::try_from(frame.height()).map_err(|_| too_large())?;

        Ok(Self {
            width,
            height,
            cells: frame.cells().iter().map(|c| c.convert()).collect(),
        })
    }

    pub fn to_buffer(&self) -> FrameBuffer<Palette256> {
        let mut frame = FrameBuffer::new(self.width as usize, self.height as usize);
        frame.cells_mut().copy_from_slice(&self.cells);
        frame
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[ExtendedCell] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&ExtendedCell> {
        if x < self.width as usize && y < self.height as usize {
            self.cells.get(y * self.width as usize + x)
        } else {
            None
        }
    }

    /// Characters outside the Basic Multilingual Plane are stored as U+FFFD.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.cells.len() * RECORD_LEN);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());

        for cell in &self.cells {
            let unit = u16::try_from(cell.ch as u32).unwrap_or(0xFFFD);
            out.extend_from_slice(&unit.to_le_bytes());
            out.push(cell.fg.index());
            out.push(cell.bg.index());
        }

        out
    }

    /// Validates the whole record before building any cell.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() < HEADER_LEN {
            return Err(ImageError::Truncated {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }

        let width = u16::from_le_bytes([data[0], data[1]]);
        let height = u16::from_le_bytes([data[2], data[3]]);
        let count = width as usize * height as usize;
        let expected = HEADER_LEN + count * RECORD_LEN;

        if data.len() < expected {
            return Err(ImageError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            return Err(ImageError::TrailingBytes(data.len() - expected));
        }

        let cells = data[HEADER_LEN..]
            .chunks_exact(RECORD_LEN)
            .enumerate()
            .map(|(index, record)| {
                let unit = u16::from_le_bytes([record[0], record[1]]);
                let ch = char::from_u32(unit as u32).ok_or(ImageError::InvalidChar { index, unit })?;
                Ok(Cell::new(ch, Palette256(record[2]), Palette256(record[3])))
            })
            .collect::<Result<Vec<_>, ImageError>>()?;

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(text: &str) -> Result<Self, ImageError> {
        let data = STANDARD.decode(text.trim())?;
        Self::from_bytes(&data)
    }

    /// Nearest-neighbour scale. Each factor must be positive.
    pub fn scale(&self, width_multiplier: f32, height_multiplier: f32) -> Self {
        let new_width = (self.width as f32 * width_multiplier) as u16;
        let new_height = (self.height as f32 * height_multiplier) as u16;

        let mut cells = Vec::with_capacity(new_width as usize * new_height as usize);
        for y in 0..new_height {
            let src_y = ((y as f32 / height_multiplier) as usize).min(self.height as usize - 1);
            for x in 0..new_width {
                let src_x = ((x as f32 / width_multiplier) as usize).min(self.width as usize - 1);
                cells.push(self.cells[src_y * self.width as usize + src_x]);
            }
        }

        Self {
            width: new_width,
            height: new_height,
            cells,
        }
    }

    /// Copies the image into `frame` with its top-left corner at `(x, y)`,
    /// clipping whatever falls outside.
    pub fn draw_into<C: TerminalColor>(&self, frame: &mut FrameBuffer<C>, (x, y): (i32, i32)) {
        for (i, cell) in self.cells.iter().enumerate() {
            let cx = x + (i % self.width as usize) as i32;
            let cy = y + (i / self.width as usize) as i32;
            if let Some(target) = frame.get_mut(cx, cy) {
                *target = cell.convert();
            }
        }
    }
}
