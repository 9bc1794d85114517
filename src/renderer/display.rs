use anyhow::Result;
use crossterm::{
    cursor,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use std::io::{BufWriter, Stdout, Write};
use std::time::Instant;

use super::style::{self, FrameLayout, CURSOR_HOME, SYNC_BEGIN, SYNC_END};
use crate::color::{ColorTier, TerminalColor};
use crate::core::frame_buffer::FrameBuffer;
use crate::utils::logger;

/// Where finished frames go.
///
/// Size queries are not part of this interface; the buffer dimensions are
/// decided by whoever owns the sink.
pub trait DisplaySink {
    fn present(&mut self, frame: &[u8]) -> Result<()>;
    fn home(&mut self) -> Result<()>;
}

/// Composes `frame` into `scratch` and hands it to the sink, after homing the
/// cursor. Returns the number of color directives in the frame.
pub fn present_frame<S, C>(
    sink: &mut S,
    frame: &FrameBuffer<C>,
    tier: ColorTier,
    layout: FrameLayout,
    scratch: &mut Vec<u8>,
) -> Result<usize>
where
    S: DisplaySink + ?Sized,
    C: TerminalColor,
{
    scratch.clear();
    let directives = style::compose(frame, tier, layout, scratch);
    sink.home()?;
    sink.present(scratch)?;
    Ok(directives)
}

/// Full-screen terminal sink.
///
/// Owns raw mode and the alternate screen for its lifetime.
pub struct DisplayManager {
    stdout: BufWriter<Stdout>,
    tier: ColorTier,
    render_buffer: Vec<u8>,
    frames: u64,
    pending_home: bool,
}

impl DisplayManager {
    pub fn new(tier: ColorTier) -> Result<Self> {
        let stdout = BufWriter::with_capacity(1024 * 1024, std::io::stdout());
        let mut dm = Self {
            stdout,
            tier,
            render_buffer: Vec::with_capacity(1024 * 1024),
            frames: 0,
            pending_home: false,
        };

        dm.initialize_terminal()?;
        logger::info(&format!("Display initialized ({:?})", tier));

        Ok(dm)
    }

    fn initialize_terminal(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.execute(EnterAlternateScreen)?;
        self.stdout.execute(cursor::Hide)?;

        // Disable line wrapping (DECRAWM) so a full last row does not scroll
        self.stdout.execute(Print("\x1b[?7l"))?;

        Ok(())
    }

    pub fn tier(&self) -> ColorTier {
        self.tier
    }

    /// Terminal size in character columns and rows.
    pub fn terminal_size_chars(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn render<C: TerminalColor>(&mut self, frame: &FrameBuffer<C>) -> Result<()> {
        let start_render = Instant::now();

        let tier = self.tier;
        let mut buffer = std::mem::take(&mut self.render_buffer);
        let result = present_frame(self, frame, tier, FrameLayout::Wrapped, &mut buffer);
        self.render_buffer = buffer;
        let directives = result?;
        self.frames += 1;

        let total_time = start_render.elapsed();
        if total_time.as_millis() > 10 {
            logger::debug(&format!(
                "SLOW FRAME #{}: Total={}us | Cells: {} | Directives: {} | Bytes: {}",
                self.frames,
                total_time.as_micros(),
                frame.len(),
                directives,
                self.render_buffer.len()
            ));
        }

        Ok(())
    }
}

impl DisplaySink for DisplayManager {
    fn present(&mut self, frame: &[u8]) -> Result<()> {
        let home = std::mem::take(&mut self.pending_home);
        write_synced(&mut self.stdout, home, frame)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Deferred to `present` so the home sequence lands inside the
    /// synchronized-update bracket.
    fn home(&mut self) -> Result<()> {
        self.pending_home = true;
        Ok(())
    }
}

/// Writes one frame wrapped in synchronized-update brackets so the terminal
/// paints it at once, homing the cursor first when asked.
fn write_synced<W: Write>(out: &mut W, home: bool, frame: &[u8]) -> std::io::Result<()> {
    out.write_all(SYNC_BEGIN)?;
    if home {
        out.write_all(CURSOR_HOME)?;
    }
    out.write_all(frame)?;
    out.write_all(SYNC_END)
}

impl Drop for DisplayManager {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Print("\x1b[?7h"));
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Sink over any writer: stdout, a file, or a `Vec<u8>` in tests.
pub struct StreamSink<W: Write> {
    inner: W,
    send_home: bool,
}

impl<W: Write> StreamSink<W> {
    /// Inline output: no cursor-home before each frame.
    pub fn inline(inner: W) -> Self {
        Self {
            inner,
            send_home: false,
        }
    }

    pub fn homing(inner: W) -> Self {
        Self {
            inner,
            send_home: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DisplaySink for StreamSink<W> {
    fn present(&mut self, frame: &[u8]) -> Result<()> {
        self.inner.write_all(frame)?;
        self.inner.flush()?;
        Ok(())
    }

    fn home(&mut self) -> Result<()> {
        if self.send_home {
            self.inner.write_all(CURSOR_HOME)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Palette256, Rgb};
    use crate::renderer::cell::Cell;

    #[test]
    fn test_present_frame_homes_then_writes() {
        let mut frame = FrameBuffer::<Rgb>::new(2, 1);
        frame.fill(Cell::new('.', Rgb::WHITE, Rgb::BLACK));

        let mut sink = StreamSink::homing(Vec::new());
        let mut scratch = Vec::new();
        let n = present_frame(&mut sink, &frame, ColorTier::TrueColor, FrameLayout::Wrapped, &mut scratch)
            .unwrap();
        assert_eq!(n, 2);

        let bytes = sink.into_inner();
        assert!(bytes.starts_with(CURSOR_HOME));
        assert!(bytes.ends_with(b"..\x1b[0m"));
    }

    #[test]
    fn test_synced_frame_homes_inside_bracket() {
        let mut out = Vec::new();
        write_synced(&mut out, true, b"ab").unwrap();
        let mut expected = SYNC_BEGIN.to_vec();
        expected.extend_from_slice(CURSOR_HOME);
        expected.extend_from_slice(b"ab");
        expected.extend_from_slice(SYNC_END);
        assert_eq!(out, expected);

        let mut out = Vec::new();
        write_synced(&mut out, false, b"ab").unwrap();
        assert_eq!(out, [SYNC_BEGIN, &b"ab"[..], SYNC_END].concat());
    }

    #[test]
    fn test_inline_sink_skips_home() {
        let frame = FrameBuffer::<Palette256>::new(1, 1);
        let mut sink = StreamSink::inline(Vec::new());
        let mut scratch = Vec::new();
        present_frame(&mut sink, &frame, ColorTier::Extended, FrameLayout::Lines, &mut scratch).unwrap();
        assert_eq!(sink.into_inner(), b"\x1b[38;5;0m\x1b[48;5;0m \x1b[0m\n".to_vec());
    }
}
