//! Raster colorizer command-line tool.
//!
//! Reads a JSON sample grid and a 257-entry JSON palette table, maps the
//! samples to colors and writes the result as a PNG for web map clients.

mod config;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{ColorizeJob, JobFile};
use raster_colorizer::{colorize, ColorizeError, ColorizeOptions, PaletteTable};

#[derive(Parser, Debug)]
#[command(name = "colorize")]
#[command(about = "Render a numeric grid as a colored PNG")]
struct Args {
    /// YAML job file; command-line values override its entries
    #[arg(short, long, env = "COLORIZE_CONFIG")]
    config: Option<PathBuf>,

    /// Sample grid (JSON array of rows)
    #[arg(short, long, env = "COLORIZE_INPUT")]
    input: Option<PathBuf>,

    /// Palette table (JSON array of 257 [r, g, b, a] entries)
    #[arg(short, long, env = "COLORIZE_PALETTE")]
    palette: Option<PathBuf>,

    /// Output PNG path; parent directories are created
    #[arg(short, long, env = "COLORIZE_OUTPUT")]
    output: Option<PathBuf>,

    /// Value mapped to the first palette color (default: data minimum)
    #[arg(long, env = "COLORIZE_MIN", allow_negative_numbers = true)]
    min: Option<f64>,

    /// Value mapped to the last palette color (default: data maximum)
    #[arg(long, env = "COLORIZE_MAX", allow_negative_numbers = true)]
    max: Option<f64>,

    /// Sample value rendered with the nodata color (default: 0)
    #[arg(long, env = "COLORIZE_NODATA", allow_negative_numbers = true)]
    nodata: Option<f64>,

    /// Log level
    #[arg(long, env = "COLORIZE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> JobFile {
        JobFile {
            input: self.input.clone(),
            palette: self.palette.clone(),
            output: self.output.clone(),
            min_val: self.min,
            max_val: self.max,
            nodata_val: self.nodata,
        }
    }
}

/// Exit status for a job that failed because of its input files or values.
const EXIT_INPUT_ERROR: u8 = 2;

/// Exit status for any other failure.
const EXIT_FAILURE: u8 = 1;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let file = match &args.config {
        Some(path) => JobFile::from_file(path)?,
        None => JobFile::default(),
    };
    let job = ColorizeJob::try_from(file.merge(args.overrides()))?;

    match run(&job) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            let code = exit_code(&err);
            error!(error = %format!("{err:#}"), exit_code = code, "Colorize job failed");
            Ok(ExitCode::from(code))
        }
    }
}

/// Distinguish bad input (grid, palette, range) from I/O or encoding failures.
fn exit_code(err: &anyhow::Error) -> u8 {
    let input_error = err
        .chain()
        .any(|cause| match cause.downcast_ref::<ColorizeError>() {
            Some(err) => err.is_input_error(),
            None => cause.is::<serde_json::Error>(),
        });

    if input_error {
        EXIT_INPUT_ERROR
    } else {
        EXIT_FAILURE
    }
}

fn run(job: &ColorizeJob) -> Result<()> {
    info!(
        input = %job.input.display(),
        palette = %job.palette.display(),
        output = %job.output.display(),
        "Starting colorize job"
    );

    let samples = input::load_grid(&job.input)?;
    let palette = PaletteTable::from_file(&job.palette)
        .with_context(|| format!("Failed to load palette {}", job.palette.display()))?;

    let options = ColorizeOptions {
        min_val: job.min_val,
        max_val: job.max_val,
        nodata_val: job.nodata_val,
    };
    let image = colorize(&samples, &palette, &options).context("Colorization failed")?;

    image
        .save(&job.output)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    info!(
        width = image.width(),
        height = image.height(),
        output = %job.output.display(),
        "Colorize job completed"
    );

    Ok(())
}
