use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use cellpaint::color::{
    palette16_to_rgb, palette256_to_rgb, rgb_to_palette16, ColorTier, Palette256, Rgb,
    TerminalColor,
};
use cellpaint::core::config::Config;
use cellpaint::core::frame_buffer::FrameBuffer;
use cellpaint::image::ConsoleImage;
use cellpaint::raster::LineEncoding;
use cellpaint::renderer::{present_frame, Cell, FrameLayout, StreamSink};
use cellpaint::shared::constants;
use cellpaint::ui::demo::{self, Scene};
use cellpaint::utils::{file_utils, logger, platform};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./cellpaint.json, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the animated full-screen demo
    Demo {
        #[arg(short, long, value_enum)]
        tier: Option<ColorTier>,
        #[arg(short, long)]
        fps: Option<u32>,
        #[arg(short, long, value_enum)]
        encoding: Option<LineEncoding>,
        #[arg(long)]
        circles: Option<usize>,
    },
    /// Print the 256-color palette
    Palette {
        #[arg(short, long, value_enum)]
        tier: Option<ColorTier>,
    },
    /// Show how a color maps to every tier ("R G B" or #RRGGBB)
    Convert { color: String },
    /// Print a saved image
    Show {
        file: PathBuf,
        #[arg(short, long, value_enum)]
        tier: Option<ColorTier>,
        #[arg(short, long, default_value_t = false)]
        base64: bool,
    },
    /// Render one demo frame into an image file
    Snapshot {
        file: PathBuf,
        #[arg(long, default_value_t = constants::SNAPSHOT_WIDTH)]
        width: u16,
        #[arg(long, default_value_t = constants::SNAPSHOT_HEIGHT)]
        height: u16,
        /// Scene time in seconds
        #[arg(long, default_value_t = 0.0)]
        time: f32,
        #[arg(short, long, default_value_t = false)]
        base64: bool,
    },
    /// Detect platform info
    Detect,
    /// Query the terminal size as crossterm sees it
    TerminalSize,
}

fn main() -> Result<()> {
    logger::init();

    // A previous crash may have left the terminal in raw mode
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let resolve_tier = |flag: Option<ColorTier>| {
        flag.or(config.tier)
            .unwrap_or_else(platform::detect_color_tier)
    };

    match cli.command {
        Commands::Demo {
            tier,
            fps,
            encoding,
            circles,
        } => {
            demo::run(
                resolve_tier(tier),
                fps.unwrap_or(config.fps),
                encoding.unwrap_or(config.encoding),
                circles.unwrap_or(config.circle_count),
            )?;
        }
        Commands::Palette { tier } => {
            print_frame(&palette_frame(), resolve_tier(tier))?;
        }
        Commands::Convert { color } => {
            let rgb: Rgb = color
                .parse()
                .with_context(|| format!("Invalid color: {:?}", color))?;
            print_conversions(rgb);
        }
        Commands::Show { file, tier, base64 } => {
            let image = file_utils::load_image(&file, base64)?;
            logger::debug(&format!(
                "Showing {:?}: {}x{} cells",
                file,
                image.width(),
                image.height()
            ));
            print_frame(&image.to_buffer(), resolve_tier(tier))?;
        }
        Commands::Snapshot {
            file,
            width,
            height,
            time,
            base64,
        } => {
            snapshot(&file, &config, (width, height), time, base64)?;
        }
        Commands::Detect => {
            let info = platform::PlatformInfo::detect()?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::TerminalSize => {
            let (cols, rows) = crossterm::terminal::size()?;
            println!("{}x{}", cols, rows);
        }
    }

    Ok(())
}

fn print_frame<C: TerminalColor>(frame: &FrameBuffer<C>, tier: ColorTier) -> Result<()> {
    let stdout = std::io::stdout();
    let mut sink = StreamSink::inline(stdout.lock());
    let mut scratch = Vec::with_capacity(frame.len() * 16);
    present_frame(&mut sink, frame, tier, FrameLayout::Lines, &mut scratch)?;
    sink.into_inner().flush()?;
    Ok(())
}

/// Standard colors, the 6×6×6 cube (one row per red level) and the gray
/// ramp, each swatch two cells wide.
fn palette_frame() -> FrameBuffer<Palette256> {
    fn swatch(frame: &mut FrameBuffer<Palette256>, x: usize, y: usize, index: u8) {
        let cell = Cell::new(' ', Palette256::WHITE, Palette256(index));
        frame[(x * 2, y)] = cell;
        frame[(x * 2 + 1, y)] = cell;
    }

    let mut frame = FrameBuffer::new(72, 10);

    for i in 0..16u8 {
        swatch(&mut frame, i as usize, 0, i);
    }
    for i in 0..216u8 {
        let index = Palette256::CUBE_START + i;
        swatch(&mut frame, (i % 36) as usize, 2 + (i / 36) as usize, index);
    }
    for i in 0..24u8 {
        swatch(&mut frame, i as usize, 9, Palette256::GRAY_START + i);
    }

    frame
}

fn print_conversions(rgb: Rgb) {
    let extended = rgb.to_palette256();
    let console = rgb_to_palette16(rgb);

    println!("rgb      {} {:x}", rgb, rgb);
    println!(
        "256      {:>3} {:?} -> {} {:x}",
        extended.index(),
        extended.range(),
        palette256_to_rgb(extended),
        palette256_to_rgb(extended)
    );
    println!(
        "16       {:>3} -> {} {:x}",
        console.bits(),
        palette16_to_rgb(console),
        palette16_to_rgb(console)
    );
    println!(
        "hue {:.1}  saturation {:.3}  luminance {:.3}",
        rgb.hue(),
        rgb.saturation(),
        rgb.luminance()
    );
}

fn snapshot(path: &Path, config: &Config, (width, height): (u16, u16), time: f32, base64: bool) -> Result<()> {
    let mut frame = FrameBuffer::<Palette256>::new(width as usize, height as usize);
    let mut scene = Scene::new(config.encoding, config.circle_count);
    scene.draw(&mut frame, time);

    let image = ConsoleImage::from_buffer(&frame)?;
    file_utils::save_image(path, &image, base64)?;
    logger::info(&format!("Snapshot {}x{} written to {:?}", width, height, path));
    println!("Saved {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}
