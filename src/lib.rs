//! lanelet2xodr: convert Lanelet2 maps into OpenDRIVE road networks.
//!
//! A Lanelet2 `.osm` file is read into node, way, and lanelet tables; every
//! lanelet whose left and right boundaries resolve becomes one OpenDRIVE road
//! with straight-line geometry along the boundary centerline and a single
//! right driving lane.
//!
//! # Modules
//!
//! - [`lanelet`]: Lanelet2 map model and OSM XML reader
//! - [`geometry`]: Centerline, line-geometry, and lane-width derivation
//! - [`opendrive`]: OpenDRIVE model and `.xodr` writer
//! - [`conversion`]: Road building and conversion reporting
//! - [`inspect`]: Map summaries
//! - [`error`]: Error types for lanelet2xodr operations

pub mod conversion;
pub mod error;
pub mod geometry;
pub mod inspect;
pub mod lanelet;
pub mod opendrive;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use structured_logger::json::new_writer;
use structured_logger::Builder;

pub use error::ConvertError;

/// The lanelet2xodr CLI application.
#[derive(Parser)]
#[command(name = "lanelet2xodr")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level for diagnostics written to stderr.
    #[arg(
        long,
        global = true,
        env = "LANELET2XODR_LOG",
        value_enum,
        default_value = "warn"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a Lanelet2 OSM map to OpenDRIVE.
    Convert(ConvertArgs),
    /// Summarize a Lanelet2 OSM map.
    Inspect(InspectArgs),
}

/// Diagnostic verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Report rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input Lanelet2 .osm file.
    input: PathBuf,

    /// Output OpenDRIVE .xodr file.
    output: PathBuf,

    /// Report format printed after conversion.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Resample both boundaries by arc length before pairing points.
    #[arg(long)]
    resample: bool,

    /// Compute the header bounding box from road geometry.
    #[arg(long)]
    compute_bounds: bool,

    /// Exit non-zero if any lanelet was skipped (the output is still written).
    #[arg(long)]
    strict: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Input Lanelet2 .osm file.
    input: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    output: ReportFormat,

    /// Number of lanelet subtypes to list.
    #[arg(long, default_value_t = 10)]
    top: usize,
}

/// Run the lanelet2xodr CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("lanelet2xodr {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert Lanelet2 maps into OpenDRIVE road networks.");
            println!();
            println!("Run 'lanelet2xodr --help' for usage information.");
            Ok(())
        }
    }
}

fn setup_logging(level: LogLevel) {
    Builder::with_level(level.as_str())
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), ConvertError> {
    let opts = conversion::ConvertOptions {
        resample: args.resample,
        compute_bounds: args.compute_bounds,
    };
    let report = conversion::convert_file(&args.input, &args.output, &opts)?;

    match args.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    let skipped = report.skipped_count();
    if args.strict && skipped > 0 {
        return Err(ConvertError::StrictSkipped { skipped });
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), ConvertError> {
    let map = lanelet::io_osm_xml::read_lanelet_osm(&args.input)?;
    let opts = inspect::InspectOptions {
        top_subtypes: args.top,
    };
    let report = inspect::inspect_map(&map, &opts);

    match args.output {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }
    Ok(())
}
