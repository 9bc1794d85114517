use rayon::prelude::*;

use super::cell::Cell;
use crate::color::{Rgb, TerminalColor};
use crate::core::frame_buffer::FrameBuffer;
use crate::raster::glyphs::UPPER_HALF;

/// Turns an RGB pixel field into half-block cells.
///
/// Each cell covers two vertically stacked pixels: the upper half-block glyph
/// is drawn in the top pixel's color over the bottom pixel's color.
pub struct HalfBlockProcessor {
    pub width: usize,
    pub height: usize,
}

impl HalfBlockProcessor {
    /// `width` × `height` are pixel dimensions; the cell grid is
    /// `width` × `height / 2`.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn rows(&self) -> usize {
        self.height / 2
    }

    pub fn process<C: TerminalColor>(&self, pixel_data: &[u8]) -> FrameBuffer<C> {
        let mut frame = FrameBuffer::new(self.width, self.rows());
        self.process_into(pixel_data, &mut frame);
        frame
    }

    /// Does nothing when `frame` does not match the processor's cell grid.
    pub fn process_into<C: TerminalColor>(&self, pixel_data: &[u8], frame: &mut FrameBuffer<C>) {
        let w = self.width;
        let term_height = self.rows();

        if frame.width() != w || frame.height() != term_height || frame.is_empty() {
            return;
        }

        let total = w * term_height;
        let chunk_size = if total > 10000 {
            2000
        } else {
            (total / rayon::current_num_threads().max(1)).max(1)
        };

        let get_pixel = |x: usize, y: usize| -> Rgb {
            let offset = (y * w + x) * 3;
            match pixel_data.get(offset..offset + 3) {
                Some(p) => Rgb::new(p[0], p[1], p[2]),
                None => Rgb::BLACK,
            }
        };

        frame
            .cells_mut()
            .par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                let start_idx = chunk_idx * chunk_size;

                for (i, cell) in chunk.iter_mut().enumerate() {
                    let idx = start_idx + i;
                    let cx = idx % w;
                    let cy = idx / w;

                    let top = get_pixel(cx, cy * 2);
                    let bottom = get_pixel(cx, cy * 2 + 1);

                    *cell = Cell {
                        ch: UPPER_HALF,
                        fg: C::from_rgb(top),
                        bg: C::from_rgb(bottom),
                    };
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette256;

    #[test]
    fn test_process_frame_half_block() {
        let proc = HalfBlockProcessor::new(2, 4);
        let mut frame = vec![0u8; 2 * 4 * 3];
        // row 0 red
        frame[0] = 255;
        frame[3] = 255;
        // row 1 green
        frame[7] = 255;
        frame[10] = 255;
        // row 2 blue
        frame[14] = 255;
        frame[17] = 255;
        // row 3 yellow
        frame[18] = 255;
        frame[19] = 255;
        frame[21] = 255;
        frame[22] = 255;

        let cells = proc.process::<Rgb>(&frame);
        assert_eq!(cells.len(), 2 * 2);

        assert_eq!(cells[0].ch, UPPER_HALF);
        assert_eq!(cells[0].fg, Rgb::RED);
        assert_eq!(cells[0].bg, Rgb::GREEN);
        assert_eq!(cells[3].fg, Rgb::BLUE);
        assert_eq!(cells[3].bg, Rgb::YELLOW);
    }

    #[test]
    fn test_short_pixel_data_reads_black() {
        let proc = HalfBlockProcessor::new(1, 2);
        let cells = proc.process::<Palette256>(&[255, 255, 255]);
        assert_eq!(cells[0].fg, Palette256(231));
        assert_eq!(cells[0].bg, Palette256(16));
    }

    #[test]
    fn test_mismatched_frame_is_untouched() {
        let proc = HalfBlockProcessor::new(4, 4);
        let mut frame = FrameBuffer::<Rgb>::new(3, 2);
        proc.process_into(&[255; 48], &mut frame);
        assert!(frame.cells().iter().all(|c| c.is_blank()));
    }
}
