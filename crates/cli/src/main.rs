mod sequence_io;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use ndarray::ArrayD;

use frameprep_core::intensity::normalizer::normalize_pixel_intensities;
use frameprep_core::pipeline::crop_use_case::CropUseCase;
use frameprep_core::pipeline::mask_and_crop_use_case::MaskAndCropUseCase;
use frameprep_core::pipeline::pipeline_logger::LogPipelineLogger;
use frameprep_core::shared::config::{FrameBoundary, PreprocessConfig};

use sequence_io::{collect_inputs, load_sequence, write_sequence};

/// Frames between progress lines in the log; stderr sees every frame.
const PROGRESS_LOG_EVERY: usize = 100;

/// Image sequence preprocessing: cosine-window masking and central square cropping.
#[derive(Parser)]
#[command(name = "frameprep")]
struct Cli {
    /// What to do with the sequence.
    #[arg(value_enum)]
    mode: Mode,

    /// Input image files, or directories of images (sorted by name).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the processed frames.
    #[arg(long, short)]
    output: PathBuf,

    /// JSON file with pipeline settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Radius where the cosine taper begins.
    #[arg(long)]
    inner_radius: Option<f64>,

    /// Radius beyond which the window is zero.
    #[arg(long)]
    outer_radius: Option<f64>,

    /// Value masked-out pixels are pulled toward (default 127.5).
    #[arg(long)]
    background: Option<f64>,

    /// Also process the final frame of the sequence.
    #[arg(long)]
    keep_last: bool,

    /// Normalize intensities across the whole sequence first.
    #[arg(long)]
    normalize: bool,

    /// Load frames as RGB instead of grayscale.
    #[arg(long)]
    color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Cosine-window mask then crop; writes 16-bit PNGs.
    Mask,
    /// Crop only; writes 8-bit PNGs.
    Crop,
    /// Normalize intensities only; writes 8-bit PNGs.
    Normalize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let paths = collect_inputs(&cli.inputs)?;
    let frames = load_sequence(&paths, cli.color)?;
    log::info!("Loaded {} frames with shape {:?}", paths.len(), frames.shape());

    let frames = if cli.normalize || cli.mode == Mode::Normalize {
        normalize_pixel_intensities(&frames)?
    } else {
        frames
    };

    let written = match cli.mode {
        Mode::Mask => {
            let mut use_case = MaskAndCropUseCase::new(&config, Box::new(progress_logger("Masking")))?;
            let processed = use_case.execute(&frames)?;
            eprintln!();
            write_sequence(&processed, &cli.output)?
        }
        Mode::Crop => {
            let mut use_case = CropUseCase::new(config.boundary, Box::new(progress_logger("Cropping")));
            let processed: ArrayD<u8> = use_case.execute(&frames)?;
            eprintln!();
            write_sequence(&processed, &cli.output)?
        }
        Mode::Normalize => write_sequence(&frames, &cli.output)?,
    };

    log::info!(
        "Wrote {} frames to {}",
        written.len(),
        cli.output.display()
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<PreprocessConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PreprocessConfig::default(),
    };
    if let Some(inner) = cli.inner_radius {
        config.window.inner_radius = inner;
    }
    if let Some(outer) = cli.outer_radius {
        config.window.outer_radius = outer;
    }
    if let Some(background) = cli.background {
        config.background_level = background;
    }
    if cli.keep_last {
        config.boundary = FrameBoundary::All;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<PreprocessConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    let config = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    Ok(config)
}

/// Prints a progress line to stderr and logs a per-stage timing summary.
fn progress_logger(verb: &'static str) -> LogPipelineLogger {
    LogPipelineLogger::new(PROGRESS_LOG_EVERY).with_progress(Box::new(move |current, total| {
        eprint!("\r{verb} frame {current}/{total}");
    }))
}
