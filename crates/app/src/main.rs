mod canvas;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand, ValueEnum};
use sorting_sticks_core::{
    AppConfig, FrameLoop, SilentSound, SortAlgorithm, SoundService, StickCollection,
    TracingSound, Vec2,
};
use tracing_subscriber::EnvFilter;

use crate::canvas::AsciiCanvas;

fn main() -> sorting_sticks_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Config { output } => write_default_config(&output),
    }
}

fn run(args: RunArgs) -> sorting_sticks_core::Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    if let Some(elements) = args.elements {
        config.collection.number_of_elements = elements;
    }
    if let Some(delay) = args.delay_ms {
        let delays = &mut config.collection.delays;
        delays.bubble_ms = delay;
        delays.insertion_ms = delay;
        delays.selection_ms = delay;
        delays.merge_ms = delay;
    }
    config.validate()?;

    let algorithm = SortAlgorithm::from(args.algorithm);
    tracing::info!(%algorithm, elements = config.collection.number_of_elements, "starting run");

    let audio: Arc<dyn SoundService> = match args.sound {
        SoundArg::Silent => Arc::new(SilentSound),
        SoundArg::Trace => Arc::new(TracingSound),
    };
    let mut collection = match args.seed {
        Some(seed) => StickCollection::with_seed(config.collection.clone(), audio, seed),
        None => StickCollection::new(config.collection.clone(), audio),
    };

    let window = Vec2::new(config.window.width as f32, config.window.height as f32);
    let mut canvas = AsciiCanvas::new(window, args.columns, args.rows);
    collection.initialize(&canvas)?;
    collection.sort_elements(algorithm)?;

    let mut frame_loop = FrameLoop::with_fps(args.fps);
    if let Some(max_frames) = args.max_frames {
        frame_loop = frame_loop.max_frames(max_frames);
    }
    let frames = frame_loop.run_until_idle(&mut collection, &mut canvas)?;
    if collection.is_sorting() {
        collection.reset()?;
    }
    tracing::info!(frames, complexity = collection.time_complexity(), "run finished");

    if args.json {
        if let Some(report) = collection.last_report() {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    } else {
        println!("{}", canvas.to_text());
        if let Some(report) = collection.last_report() {
            println!(
                "{} {} | {:?} | comparisons: {} | array accesses: {} | {} ms",
                report.algorithm,
                algorithm.time_complexity(),
                report.outcome,
                report.comparisons,
                report.array_accesses,
                report.elapsed_ms
            );
        }
    }

    collection.destroy()
}

fn write_default_config(output: &PathBuf) -> sorting_sticks_core::Result<()> {
    tracing::info!(?output, "writing default configuration");
    std::fs::write(output, AppConfig::default().to_json()?)?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated sorting algorithm visualiser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shuffle a row of sticks and animate a sort over it.
    Run(RunArgs),
    /// Write the default configuration as JSON.
    Config {
        /// Destination of the generated configuration file.
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Algorithm to animate.
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Bubble)]
    algorithm: AlgorithmArg,
    /// Optional configuration file produced by the `config` command.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the number of sticks.
    #[arg(short, long)]
    elements: Option<usize>,
    /// Override the step delay of every algorithm, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Stop rendering (and cancel the sort) after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
    /// Seed for reproducible shuffles.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = SoundArg::Silent)]
    sound: SoundArg,
    #[arg(long, default_value_t = 100)]
    columns: usize,
    #[arg(long, default_value_t = 30)]
    rows: usize,
    /// Print the run report as JSON instead of the final frame.
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    Bubble,
    Insertion,
    Selection,
    InPlaceMerge,
    Merge,
}

impl From<AlgorithmArg> for SortAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bubble => SortAlgorithm::Bubble,
            AlgorithmArg::Insertion => SortAlgorithm::Insertion,
            AlgorithmArg::Selection => SortAlgorithm::Selection,
            AlgorithmArg::InPlaceMerge => SortAlgorithm::InPlaceMerge,
            AlgorithmArg::Merge => SortAlgorithm::Merge,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SoundArg {
    Silent,
    Trace,
}
