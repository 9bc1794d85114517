use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

use crate::color::{ColorTier, Palette16, Palette256, Rgb, TerminalColor};
use crate::core::frame_buffer::FrameBuffer;
use crate::raster::{draw_line, draw_text, fill_circle, LineEncoding};
use crate::renderer::{DisplayManager, HalfBlockProcessor};
use crate::shared::constants;
use crate::sync::{MasterClock, VSync};
use crate::utils::logger;

const SKY_TOP: Rgb = Rgb::new(12, 18, 58);
const SKY_BOTTOM: Rgb = Rgb::new(70, 16, 64);
const SKY_GLOW: Rgb = Rgb::new(30, 90, 120);
const SPOKES: usize = 4;

/// Animated test scene: a half-block gradient, rotating spokes, orbiting
/// filled circles and a title row.
pub struct Scene {
    pub encoding: LineEncoding,
    pub circle_count: usize,
    pixels: Vec<u8>,
}

impl Scene {
    pub fn new(encoding: LineEncoding, circle_count: usize) -> Self {
        Self {
            encoding,
            circle_count,
            pixels: Vec::new(),
        }
    }

    /// Redraws every cell of `frame` for time `t` in seconds.
    pub fn draw<C: TerminalColor>(&mut self, frame: &mut FrameBuffer<C>, t: f32) {
        if frame.is_empty() {
            return;
        }

        self.draw_background(frame, t);

        let w = frame.width() as f32;
        let h = frame.height() as f32;
        let center = (w / 2.0, h / 2.0);
        let reach = (w / 2.0 * 0.9, h / 2.0 * 0.9);

        for i in 0..SPOKES {
            let angle = t * 0.8 + i as f32 * PI / SPOKES as f32;
            let (dx, dy) = (angle.cos() * reach.0, angle.sin() * reach.1);
            let tint = Rgb::lerp(Rgb::CYAN, Rgb::MAGENTA, i as f32 / SPOKES as f32);
            draw_line(
                frame,
                (center.0 - dx, center.1 - dy),
                (center.0 + dx, center.1 + dy),
                C::from_rgb(tint),
                self.encoding,
            );
        }

        for i in 0..self.circle_count {
            let phase = i as f32 * TAU / self.circle_count as f32;
            let angle = t * 0.5 + phase;
            let orbit = (angle.cos() * reach.0 * 0.6, angle.sin() * reach.1 * 0.6);
            let radius = 3.0 + 2.0 * (t * 1.3 + phase).sin();
            let tint = Rgb::lerp(Rgb::YELLOW, Rgb::RED, i as f32 / self.circle_count as f32);
            fill_circle(
                frame,
                (center.0 + orbit.0, center.1 + orbit.1),
                radius,
                C::from_rgb(tint),
            );
        }

        draw_text(frame, (1, 0), constants::DEMO_TITLE, C::from_rgb(Rgb::WHITE));
    }

    fn draw_background<C: TerminalColor>(&mut self, frame: &mut FrameBuffer<C>, t: f32) {
        let processor = HalfBlockProcessor::new(frame.width(), frame.height() * 2);
        let (pw, ph) = (processor.width, processor.height);

        self.pixels.resize(pw * ph * 3, 0);
        for (i, px) in self.pixels.chunks_exact_mut(3).enumerate() {
            let fx = (i % pw) as f32 / pw as f32;
            let fy = (i / pw) as f32 / ph as f32;
            let wave = (fx * 6.0 + fy * 2.0 + t).sin() * 0.5 + 0.5;
            let color = Rgb::lerp(Rgb::lerp(SKY_TOP, SKY_BOTTOM, fy), SKY_GLOW, wave * 0.3);
            px.copy_from_slice(&[color.r(), color.g(), color.b()]);
        }

        processor.process_into(&self.pixels, frame);
    }
}

/// Runs the full-screen demo until `q` or Esc. Space pauses the animation.
pub fn run(tier: ColorTier, fps: u32, encoding: LineEncoding, circle_count: usize) -> Result<()> {
    match tier {
        ColorTier::TrueColor => run_as::<Rgb>(tier, fps, encoding, circle_count),
        ColorTier::Extended => run_as::<Palette256>(tier, fps, encoding, circle_count),
        ColorTier::Console => run_as::<Palette16>(tier, fps, encoding, circle_count),
    }
}

fn run_as<C: TerminalColor>(
    tier: ColorTier,
    fps: u32,
    encoding: LineEncoding,
    circle_count: usize,
) -> Result<()> {
    let mut display = DisplayManager::new(tier)?;
    let (cols, rows) = display.terminal_size_chars()?;
    let mut frame = FrameBuffer::<C>::new(cols as usize, rows as usize);
    let mut scene = Scene::new(encoding, circle_count);
    let mut clock = MasterClock::new();
    let mut vsync = VSync::new(fps);

    logger::info(&format!(
        "Demo started: {}x{} cells, tier {:?}, {} fps, {:?} lines",
        cols, rows, tier, fps, encoding
    ));

    'render: loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break 'render,
                    KeyCode::Char(' ') => clock.toggle(),
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    logger::debug(&format!("Resize to {}x{}", cols, rows));
                    frame.resize(cols as usize, rows as usize);
                }
                _ => {}
            }
        }

        scene.draw(&mut frame, clock.elapsed().as_secs_f32());
        if let Err(e) = display.render(&frame) {
            logger::error(&format!("Render error: {:#}", e));
            return Err(e);
        }

        vsync.wait_for_next_frame();
    }

    let stats = vsync.stats();
    logger::info(&format!(
        "Demo ended: {} frames ({} late), {:.1} fps effective",
        stats.frames_rendered,
        stats.frames_late,
        stats.effective_fps(clock.elapsed())
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::glyphs::{braille_mask, FULL_BLOCK, UPPER_HALF};

    #[test]
    fn test_scene_covers_every_cell() {
        let mut frame = FrameBuffer::<Rgb>::new(30, 8);
        let mut scene = Scene::new(LineEncoding::Braille, 3);
        scene.draw(&mut frame, 0.0);

        assert!(frame.cells().iter().all(|c| !c.is_blank()));
        assert!(frame.cells().iter().any(|c| braille_mask(c.ch).is_some()));
        assert!(frame.cells().iter().any(|c| c.ch == UPPER_HALF));
        assert_eq!(frame[(2, 0)].ch, 'c');
        assert_eq!(frame[(2, 0)].fg, Rgb::WHITE);
    }

    #[test]
    fn test_half_block_strokes() {
        let mut frame = FrameBuffer::<Palette256>::new(20, 6);
        let mut scene = Scene::new(LineEncoding::HalfBlock, 0);
        scene.draw(&mut frame, 0.0);

        assert!(frame.cells().iter().any(|c| c.ch == FULL_BLOCK));
        assert!(frame.cells().iter().all(|c| braille_mask(c.ch).is_none()));
    }

    #[test]
    fn test_redraw_after_resize() {
        let mut frame = FrameBuffer::<Palette16>::new(10, 4);
        let mut scene = Scene::new(LineEncoding::Braille, 2);
        scene.draw(&mut frame, 1.5);

        frame.resize(25, 9);
        scene.draw(&mut frame, 2.0);
        assert!(frame.cells().iter().all(|c| !c.is_blank()));

        frame.resize(0, 0);
        scene.draw(&mut frame, 2.5);
        assert!(frame.is_empty());
    }
}
