use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use babagif::{
    BLOCK_SIZE, Clock, FRAME_COUNT, FrameRGBA, IconSession, Rasterizer, RasterizerOpts,
    RenderConfig, Rgb8, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "babagif", version)]
struct Cli {
    /// Log pipeline details (layout, palette and encode sizes).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animated icon as a looping GIF named after the text.
    Render(RenderArgs),
    /// Write the pixelated frames as individual PNGs.
    Frames(FramesArgs),
    /// Play the animation in the terminal.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Base config JSON; the flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text to render (one cell per character).
    #[arg(long)]
    text: Option<String>,

    /// Font family name; falls back to a system sans-serif when missing.
    #[arg(long)]
    font: Option<String>,

    /// Background color as #RRGGBB.
    #[arg(long)]
    bg: Option<Rgb8>,

    /// Foreground (glyph) color as #RRGGBB.
    #[arg(long)]
    fg: Option<Rgb8>,

    /// Drawing area side in pixels, padding excluded.
    #[arg(long, value_parser = clap::value_parser!(u32).range(24..=256))]
    canvas: Option<u32>,

    /// Glyph size in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(4..=100))]
    glyph: Option<u32>,

    /// Padding around the drawing area in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=30))]
    padding: Option<u32>,

    /// Extra directory to load fonts from (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Jitter seed. Reuse a seed to reproduce an animation; omit for fresh jitter.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Directory to write `<text>.gif` into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Explicit output path; overrides `--out-dir` and the derived file name.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Directory to write `<text>_<n>.png` into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Number of full animation loops to play.
    #[arg(long, default_value_t = 5)]
    loops: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(style: &StyleArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &style.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(text) = &style.text {
        cfg.text = text.clone();
    }
    if let Some(font) = &style.font {
        cfg.font_family = font.clone();
    }
    if let Some(bg) = style.bg {
        cfg.background = bg;
    }
    if let Some(fg) = style.fg {
        cfg.foreground = fg;
    }
    if let Some(canvas) = style.canvas {
        cfg.canvas_extent = canvas;
    }
    if let Some(glyph) = style.glyph {
        cfg.glyph_size = glyph;
    }
    if let Some(padding) = style.padding {
        cfg.padding = padding;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn open_session(style: &StyleArgs) -> anyhow::Result<IconSession> {
    let cfg = resolve_config(style)?;

    let rasterizer = Rasterizer::new(&RasterizerOpts {
        load_system_fonts: true,
        font_dirs: style.font_dirs.clone(),
    });
    if rasterizer.font_face_count() == 0 {
        tracing::warn!("no fonts found; glyphs will not be drawn");
    } else if !rasterizer.has_family(&cfg.font_family) {
        tracing::warn!(
            family = %cfg.font_family,
            "font family not installed; using a fallback face"
        );
    }

    let seed = style.seed.unwrap_or_else(fresh_seed);
    tracing::info!(seed, text = %cfg.text, "rendering icon");

    let session = IconSession::new(cfg, rasterizer, seed, Duration::ZERO)?;
    Ok(session)
}

fn fresh_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = open_session(&args.style)?;
    let artifact = session.artifact();

    let path = match &args.out {
        Some(out) => {
            artifact.write_to(out)?;
            out.clone()
        }
        None => artifact.save_to(&args.out_dir)?,
    };

    tracing::info!(bytes = artifact.len(), "wrote {}", path.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let session = open_session(&args.style)?;
    let name = session.artifact().file_name().to_owned();
    let stem = name.strip_suffix(".gif").unwrap_or(&name);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for (i, frame) in session.frames().iter().enumerate() {
        let path = args.out_dir.join(format!("{stem}_{i}.png"));
        write_png(&path, frame)?;
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.style)?;
    let fg = session.config().foreground;

    let clock = SystemClock::new();
    let ticks = args.loops.saturating_mul(FRAME_COUNT as u64);
    let mut stdout = std::io::stdout().lock();
    let mut drawn_rows = 0usize;
    let mut io_result = Ok(());

    let driver = session.driver_mut();
    driver.arm(clock.now());
    driver.play(&clock, ticks, |index, frame| {
        if io_result.is_err() {
            return;
        }
        io_result = draw_terminal_frame(&mut stdout, frame, fg, index, drawn_rows);
        drawn_rows = block_rows(frame) + 1;
    });
    io_result.context("write preview to terminal")?;
    Ok(())
}

fn block_rows(frame: &FrameRGBA) -> usize {
    frame.height.div_ceil(BLOCK_SIZE) as usize
}

/// Draw one frame as two-column block characters, overwriting the previously drawn frame.
fn draw_terminal_frame(
    out: &mut impl std::io::Write,
    frame: &FrameRGBA,
    fg: Rgb8,
    index: usize,
    previous_rows: usize,
) -> std::io::Result<()> {
    if previous_rows > 0 {
        write!(out, "\x1b[{previous_rows}A")?;
    }

    let fg_rgba = fg.to_rgba8();
    for by in (0..frame.height).step_by(BLOCK_SIZE as usize) {
        let mut line = String::new();
        for bx in (0..frame.width).step_by(BLOCK_SIZE as usize) {
            if frame.pixel(bx, by) == Some(fg_rgba) {
                line.push_str("██");
            } else {
                line.push_str("  ");
            }
        }
        writeln!(out, "\x1b[38;2;{};{};{}m{line}\x1b[0m", fg.r, fg.g, fg.b)?;
    }
    writeln!(out, "frame {}/{FRAME_COUNT}", index + 1)?;
    out.flush()
}
