use super::line::plot_dot;
use crate::color::TerminalColor;
use crate::core::frame_buffer::FrameBuffer;

/// Fills a circle with braille dots.
///
/// `center` is in cell coordinates. The circle's reach is `radius / 2 + 1`,
/// used both as the half-extent of the cell bounding box and as the
/// acceptance radius in dot space; a zero radius therefore sets only the
/// center dot. Every dot in the clamped box is tested, which is fine for the
/// small areas a terminal offers.
pub fn fill_circle<C: TerminalColor>(
    frame: &mut FrameBuffer<C>,
    center: (f32, f32),
    radius: f32,
    color: C,
) {
    if frame.is_empty() {
        return;
    }

    let reach = radius.max(0.0) / 2.0 + 1.0;
    let max_x = frame.width() as i32 - 1;
    let max_y = frame.height() as i32 - 1;

    let min_cx = ((center.0 - reach).floor() as i32).max(0);
    let min_cy = ((center.1 - reach).floor() as i32).max(0);
    let max_cx = ((center.0 + reach).ceil() as i32).min(max_x);
    let max_cy = ((center.1 + reach).ceil() as i32).min(max_y);

    if min_cx > max_cx || min_cy > max_cy {
        return;
    }

    let dot_cx = center.0 * 2.0;
    let dot_cy = center.1 * 4.0;
    let reach_sq = reach * reach;

    for y in min_cy * 4..=max_cy * 4 + 3 {
        for x in min_cx * 2..=max_cx * 2 + 1 {
            let dx = x as f32 - dot_cx;
            let dy = y as f32 - dot_cy;
            if dx * dx + dy * dy < reach_sq {
                plot_dot(frame, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette256;
    use crate::raster::glyphs::braille_mask;
    use crate::raster::line::line_braille;

    fn touched_cells(frame: &FrameBuffer<Palette256>) -> usize {
        frame.cells().iter().filter(|c| !c.is_blank()).count()
    }

    #[test]
    fn test_zero_radius_sets_center_dot_only() {
        let mut frame = FrameBuffer::<Palette256>::new(5, 5);
        fill_circle(&mut frame, (2.0, 2.0), 0.0, Palette256::RED);
        assert_eq!(touched_cells(&frame), 1);
        assert_eq!(braille_mask(frame[(2, 2)].ch), Some(0x01));
    }

    #[test]
    fn test_touched_cells_grow_with_radius() {
        let mut previous = 0;
        for step in 0..40 {
            let mut frame = FrameBuffer::<Palette256>::new(12, 8);
            fill_circle(&mut frame, (6.0, 4.0), step as f32, Palette256::GREEN);
            let n = touched_cells(&frame);
            assert!(n >= previous, "radius {} touched {} < {}", step, n, previous);
            previous = n;
        }
        assert_eq!(previous, 12 * 8);
    }

    #[test]
    fn test_circle_clamped_at_edges() {
        let mut frame = FrameBuffer::<Palette256>::new(3, 2);
        fill_circle(&mut frame, (0.0, 0.0), 6.0, Palette256::BLUE);
        fill_circle(&mut frame, (-10.0, -10.0), 2.0, Palette256::BLUE);
        fill_circle(&mut frame, (40.0, 1.0), 2.0, Palette256::BLUE);
        assert!(touched_cells(&frame) > 0);
        assert_eq!(frame.len(), 6);
    }

    #[test]
    fn test_circle_merges_with_lines() {
        let mut frame = FrameBuffer::<Palette256>::new(4, 4);
        line_braille(&mut frame, (0.0, 1.0), (3.0, 1.0), Palette256::RED);
        let before = braille_mask(frame[(1, 1)].ch).unwrap();
        fill_circle(&mut frame, (1.25, 1.25), 0.0, Palette256::WHITE);
        let after = braille_mask(frame[(1, 1)].ch).unwrap();
        assert_eq!(after & before, before);
        assert_ne!(after, before);
        assert_eq!(frame[(1, 1)].fg, Palette256::WHITE);
    }
}
