use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgemap::error::{exit, AppError};
use edgemap::models::{AppConfig, EncodingName, FlatImageMode, ImageInfo, OverflowMode};
use edgemap::services::{EdgePipeline, PipelineSettings, RunReport};

#[derive(Parser)]
#[command(name = "edgemap")]
#[command(about = "Sobel edge maps for grayscale Netpbm (P2/P5) images")]
struct Cli {
    /// Log every stage (equivalent to RUST_LOG=edgemap=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file (falls back to $EDGEMAP_CONFIG)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the edge map of an image
    Detect {
        #[command(flatten)]
        io: FilterArgs,

        /// Stretch intensities to 0..255 before detecting edges
        #[arg(short, long)]
        scale: bool,

        /// What to do with gradient magnitudes above 255
        #[arg(long, value_enum)]
        overflow: Option<OverflowMode>,
    },
    /// Only stretch intensities to 0..255
    Scale {
        #[command(flatten)]
        io: FilterArgs,
    },
    /// Validate an image and print its header
    Info {
        /// Input image
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Reject data after the declared pixels
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Output encoding (defaults to the input's)
    #[arg(short, long, value_enum)]
    encoding: Option<EncodingName>,

    /// What to do when every pixel has the same value
    #[arg(long, value_enum)]
    flat_image: Option<FlatImageMode>,

    /// Reject data after the declared pixels
    #[arg(long)]
    strict: bool,

    /// Also write the result as a PNG
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,
}

impl FilterArgs {
    /// Layer command-line flags over the config file
    fn apply(&self, settings: &mut PipelineSettings) {
        if let Some(encoding) = self.encoding {
            settings.output_encoding = Some(encoding.into());
        }
        if let Some(mode) = self.flat_image {
            settings.flat_image = mode.into();
        }
        if self.strict {
            settings.strict_body = true;
        }
    }
}

fn main() -> ExitCode {
    // clap's own exit status (2) would collide with exit::FORMAT
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(exit::USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let code = e
                .downcast_ref::<AppError>()
                .map(AppError::exit_code)
                .unwrap_or(exit::USAGE);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "edgemap=debug"
    } else {
        "edgemap=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let mut settings = PipelineSettings::from(&config);

    match cli.command {
        Commands::Detect {
            io,
            scale,
            overflow,
        } => {
            io.apply(&mut settings);
            settings.scale |= scale;
            if let Some(mode) = overflow {
                settings.overflow = mode.into();
            }
            run_filter_command(settings, &io)
        }
        Commands::Scale { io } => {
            io.apply(&mut settings);
            settings.scale = true;
            settings.detect_edges = false;
            run_filter_command(settings, &io)
        }
        Commands::Info {
            input,
            json,
            strict,
        } => {
            settings.strict_body |= strict;
            run_info_command(settings, &input, json)
        }
    }
}

/// Read, filter and write one image
fn run_filter_command(settings: PipelineSettings, io: &FilterArgs) -> anyhow::Result<()> {
    let pipeline = EdgePipeline::new(settings);

    let report = pipeline.run_with_preview(&io.input, &io.output, io.preview.as_deref())?;
    print_report(&report, &io.output);
    Ok(())
}

fn print_report(report: &RunReport, output: &Path) {
    let header = &report.output;
    println!(
        "Wrote {} ({}, {}x{})",
        output.display(),
        header.encoding,
        header.width,
        header.height
    );
    if let Some(edges) = &report.edges {
        if edges.overflowed > 0 {
            println!(
                "  {} pixels exceeded 255 (peak {})",
                edges.overflowed, edges.peak
            );
        }
    }
}

fn run_info_command(settings: PipelineSettings, input: &Path, json: bool) -> anyhow::Result<()> {
    let image = EdgePipeline::new(settings).load(input)?;
    let info = ImageInfo::from_image(&image);

    if json {
        println!("{}", serde_json::to_string_pretty(&info).map_err(AppError::from)?);
    } else {
        println!("{}", info.to_text());
    }
    Ok(())
}
