use crate::color::TerminalColor;
use crate::core::frame_buffer::FrameBuffer;
use crate::renderer::cell::Cell;

/// Writes `text` into row `y` starting at column `x`, one char per cell.
///
/// Characters whose column falls outside the buffer are skipped; there is no
/// wrapping. A row outside the buffer writes nothing. Written cells take the
/// default background.
pub fn draw_text<C: TerminalColor>(
    frame: &mut FrameBuffer<C>,
    (x, y): (i32, i32),
    text: &str,
    color: C,
) {
    if y < 0 || y as usize >= frame.height() {
        return;
    }

    for (i, ch) in text.chars().enumerate() {
        let Some(cell) = frame.get_mut(x.saturating_add(i as i32), y) else {
            continue;
        };
        *cell = Cell::with_fg(ch, color);
    }
}
