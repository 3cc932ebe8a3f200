use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "karaoke", version)]
struct Cli {
    /// Log progress and fallbacks to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print grouped lines as JSON.
    Lines(LinesArgs),
    /// Write grouped lines as a line-level subtitle file.
    Srt(SrtArgs),
    /// Render the overlay at one timeline instant as a PNG.
    Frame(FrameArgs),
    /// Render the overlay for a time range as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Word-level transcript (`index`, `start --> end`, text blocks).
    #[arg(long)]
    transcript: PathBuf,

    /// Manual lyrics; lines are reconciled against the transcript.
    #[arg(long)]
    lyrics: Option<PathBuf>,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LinesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SrtArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output subtitle path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Timeline time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Start time in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// End time in seconds (exclusive).
    #[arg(long)]
    to: f64,

    /// Output directory for `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Frames rendered per parallel batch (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Lines(args) => cmd_lines(args),
        Command::Srt(args) => cmd_srt(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn load(input: &InputArgs) -> anyhow::Result<(karaoke::KaraokeConfig, Vec<karaoke::LyricLine>)> {
    let cfg = match &input.config {
        Some(path) => karaoke::KaraokeConfig::from_path(path)?,
        None => karaoke::KaraokeConfig::default(),
    };
    let lines =
        karaoke::build_lines_from_files(&input.transcript, input.lyrics.as_deref(), &cfg)?;
    Ok((cfg, lines))
}

fn cmd_lines(args: LinesArgs) -> anyhow::Result<()> {
    let (_, lines) = load(&args.input)?;
    let json = serde_json::to_string_pretty(&lines).context("serialize lines")?;
    match args.out {
        Some(out) => {
            create_parent_dir(&out)?;
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_srt(args: SrtArgs) -> anyhow::Result<()> {
    let (_, lines) = load(&args.input)?;
    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, karaoke::lines_to_srt(&lines))
        .with_context(|| format!("write '{}'", args.out.display()))?;
    eprintln!("wrote {} ({} lines)", args.out.display(), lines.len());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, lines) = load(&args.input)?;
    let clips = karaoke::build_clips(&lines, &cfg);
    let font = resolve_font(&cfg);
    let mut renderer = karaoke::LineRenderer::new(&cfg, &font);

    let frame = karaoke::compose_overlay(&clips, args.time, &cfg, &mut renderer)?;
    create_parent_dir(&args.out)?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (cfg, lines) = load(&args.input)?;
    let clips = karaoke::build_clips(&lines, &cfg);
    let font = resolve_font(&cfg);

    let fps = cfg.video.fps;
    let range = karaoke::FrameRange::new(
        fps.secs_to_frame_ceil(args.from),
        fps.secs_to_frame_ceil(args.to),
    )?;
    let threading = karaoke::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let write_frame = |f: karaoke::FrameIndex, frame: karaoke::FrameRgb| {
        let path = args.out_dir.join(format!("frame_{:06}.png", f.0));
        write_png(&path, &frame).map_err(karaoke::KaraokeError::from)
    };
    let written =
        karaoke::render_frame_sequence(&clips, range, &cfg, &font, &threading, write_frame)?;
    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn resolve_font(cfg: &karaoke::KaraokeConfig) -> karaoke::FontSource {
    let font = karaoke::FontSource::resolve(cfg.layout.font_path.as_deref());
    tracing::info!(
        origin = font.origin(),
        outlines = font.has_outlines(),
        "resolved caption font"
    );
    font
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &karaoke::FrameRgb) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
