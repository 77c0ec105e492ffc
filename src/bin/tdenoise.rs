use std::fs::File;
use std::io::{BufWriter, IsTerminal as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tdenoise::{
    ArgMap, ArgValue, Core, FILTER_NAME, FilterConfig, FingerprintSink, FrameIndex, FrameRange,
    Node, RenderThreading, SampleType, ScalarTemporalKernel, Y4mSink,
};

#[derive(Parser, Debug)]
#[command(name = "tdenoise", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Denoise a Y4M file into another Y4M file.
    Denoise(DenoiseArgs),
    /// Denoise one frame and write its first plane as a grayscale PNG.
    Frame(FrameArgs),
    /// Print a fingerprint for every denoised frame.
    Hash(HashArgs),
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Input YUV4MPEG2 file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON file with filter parameters; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Temporal radius.
    #[arg(long)]
    radius: Option<u32>,

    /// Low-band blend coefficient.
    #[arg(long)]
    alpha_low: Option<f32>,

    /// Mid-band blend coefficient.
    #[arg(long)]
    alpha_mid: Option<f32>,

    /// High-band blend coefficient.
    #[arg(long)]
    alpha_high: Option<f32>,

    /// Overall strength.
    #[arg(long)]
    strength: Option<f32>,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size in frames.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl ThreadingArgs {
    fn to_threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
        }
    }
}

#[derive(Parser, Debug)]
struct DenoiseArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output YUV4MPEG2 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct HashArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Denoise(args) => cmd_denoise(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn init_tracing() {
    let ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
}

fn resolve_config(args: &FilterArgs) -> anyhow::Result<FilterConfig> {
    let mut cfg = match &args.config {
        Some(path) => FilterConfig::from_json_path(path)?,
        None => FilterConfig::default(),
    };
    if let Some(v) = args.radius {
        cfg.radius = v;
    }
    if let Some(v) = args.alpha_low {
        cfg.alpha_low = v;
    }
    if let Some(v) = args.alpha_mid {
        cfg.alpha_mid = v;
    }
    if let Some(v) = args.alpha_high {
        cfg.alpha_high = v;
    }
    if let Some(v) = args.strength {
        cfg.strength = v;
    }
    Ok(cfg)
}

/// Load the input and build the denoise node through the registered plugin function.
fn build_node(args: &FilterArgs) -> anyhow::Result<Node> {
    let cfg = resolve_config(args)?;
    let source = tdenoise::open_y4m(&args.in_path)
        .with_context(|| format!("read y4m '{}'", args.in_path.display()))?;
    let clip = Node::new(source)?;

    let plugin = tdenoise::plugin(Arc::new(ScalarTemporalKernel::new()))?;
    let call = ArgMap::new()
        .with("clip", ArgValue::Node(clip))
        .with("radius", ArgValue::Int(i64::from(cfg.radius)))
        .with("alphaLow", ArgValue::Float(f64::from(cfg.alpha_low)))
        .with("alphaMid", ArgValue::Float(f64::from(cfg.alpha_mid)))
        .with("alphaHigh", ArgValue::Float(f64::from(cfg.alpha_high)))
        .with("strength", ArgValue::Float(f64::from(cfg.strength)));
    Ok(plugin.invoke(FILTER_NAME, &call)?)
}

fn full_range(node: &Node) -> anyhow::Result<FrameRange> {
    Ok(FrameRange::new(
        FrameIndex(0),
        FrameIndex(node.video_info().num_frames),
    )?)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_denoise(args: DenoiseArgs) -> anyhow::Result<()> {
    let node = build_node(&args.filter)?;
    let core = Core::default();
    ensure_parent(&args.out)?;
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut sink = Y4mSink::new(BufWriter::new(file));

    let stats = tdenoise::render_to_sink(
        &core,
        &node,
        full_range(&node)?,
        &args.threading.to_threading(),
        &mut sink,
    )?;

    let ledger = core.ledger_stats();
    tracing::info!(
        frames = stats.frames_total,
        chunks = stats.chunks,
        acquired = ledger.acquired,
        released = ledger.released,
        "denoise finished"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let node = build_node(&args.filter)?;
    let frame = Core::default().get_frame(&node, FrameIndex(args.frame))?;

    let format = frame.format();
    if format.sample_type != SampleType::Integer {
        anyhow::bail!("png export supports integer samples only");
    }
    let color = match format.bytes_per_sample {
        1 => image::ColorType::L8,
        2 => image::ColorType::L16,
        n => anyhow::bail!("png export does not support {n}-byte samples"),
    };

    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.packed_plane(0),
        frame.width(0),
        frame.height(0),
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    let node = build_node(&args.filter)?;
    let core = Core::default();
    let mut sink = FingerprintSink::new(BufWriter::new(std::io::stdout()));
    tdenoise::render_to_sink(
        &core,
        &node,
        full_range(&node)?,
        &args.threading.to_threading(),
        &mut sink,
    )?;
    tracing::debug!(frames = sink.written(), "fingerprints written");
    Ok(())
}
