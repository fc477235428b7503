use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use wavscope::{
    CodecKind, FrameDir, VideoSettings,
    encode::ffmpeg::{MuxConfig, mux},
    visualize_file,
};

#[derive(Parser, Debug)]
#[command(name = "wavscope", version, about = "Render WAV audio as oscilloscope frames")]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render numbered frames into a directory that is kept.
    Frames(FramesArgs),
    /// Render frames into a temporary directory and mux them with the audio (requires `ffmpeg`).
    Render(RenderArgs),
    /// Print the decoded header as JSON.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct VideoArgs {
    /// Settings JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Frame image format: bmp or pgm.
    #[arg(long)]
    codec: Option<CodecKind>,

    /// Worker threads.
    #[arg(long)]
    workers: Option<usize>,
}

impl VideoArgs {
    fn resolve(&self) -> anyhow::Result<VideoSettings> {
        let mut settings = match &self.config {
            Some(path) => VideoSettings::from_json_path(path)?,
            None => VideoSettings::default(),
        };
        if let Some(v) = self.fps {
            settings.frame_rate = v;
        }
        if let Some(v) = self.width {
            settings.screen_width = v;
        }
        if let Some(v) = self.height {
            settings.screen_height = v;
        }
        if let Some(v) = self.codec {
            settings.codec = v;
        }
        if let Some(v) = self.workers {
            settings.workers = v;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Input WAV file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory to write frame files into.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    video: VideoArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input WAV file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output video path.
    #[arg(long)]
    out: PathBuf,

    /// Replace `--out` if it exists.
    #[arg(long)]
    overwrite: bool,

    #[command(flatten)]
    video: VideoArgs,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Input WAV file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let settings = args.video.resolve()?;
    let frames = FrameDir::existing(&args.out_dir)?;
    let (prepared, stats) = visualize_file(&args.in_path, &settings, &frames)?;
    tracing::info!(
        frames = stats.frames_rendered,
        total = prepared.geometry.total_frames,
        dir = %frames.path().display(),
        "done"
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let settings = args.video.resolve()?;
    let parent = args
        .out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let frames = FrameDir::scoped(parent)?;

    let (prepared, _stats) = visualize_file(&args.in_path, &settings, &frames)?;
    let cfg = MuxConfig::for_render(
        &prepared.header,
        &prepared.geometry,
        frames.path(),
        &args.in_path,
        &args.out,
    )
    .with_overwrite(args.overwrite);
    mux(&cfg)?;
    frames.close()?;

    tracing::info!(out = %args.out.display(), "done");
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input file '{}'", args.in_path.display()))?;
    let (header, _) = wavscope::decode_header(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&header)?);
    Ok(())
}
