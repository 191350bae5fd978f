//! chamber-packer: how many uniform parts fit into a machine chamber
//!
//! Command-line front end for the packing calculator. Computes part counts,
//! prints a summary, and optionally exports a JSON report and SVG views.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use chamber_packer::config::{self, Config};
use chamber_packer::error::{PackingError, ReportError};
use chamber_packer::packing::{
    MachineType, PackingCalculator, PackingRequest, PartSpec, RawPackingRequest,
};
use chamber_packer::report::{self, Report};

/// Chamber packing calculator.
///
/// Computes how many parts of one size fit into an SF50 or SF100 chamber,
/// and exports reports and layout drawings.
#[derive(Parser, Debug)]
#[command(name = "chamber-packer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute how many parts fit into a chamber
    Compute(ComputeArgs),

    /// List the known machine models and chamber sizes
    Machines,
}

#[derive(ClapArgs, Debug)]
struct ComputeArgs {
    /// Machine model (SF50 or SF100)
    #[arg(short, long, required_unless_present = "request")]
    machine: Option<String>,

    /// Solvent name (e.g. PURE); empty for none
    #[arg(short, long, default_value = "")]
    solvent: String,

    /// Part size in mm
    #[arg(long, num_args = 3, value_names = ["W", "D", "H"], required_unless_present = "request")]
    part: Option<Vec<f64>>,

    /// Spacing between parts in mm
    #[arg(long, num_args = 3, value_names = ["W", "D", "H"], default_values_t = [0.0, 0.0, 0.0])]
    spacing: Vec<f64>,

    /// Read the request from a JSON file instead of the flags above
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["machine", "solvent", "part", "spacing"]
    )]
    request: Option<PathBuf>,

    /// Also compute capacity with the extended chamber depth
    #[arg(long)]
    extended: bool,

    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Write the front view SVG to this file
    #[arg(long, value_name = "FILE")]
    front_svg: Option<PathBuf>,

    /// Write the top view SVG to this file
    #[arg(long, value_name = "FILE")]
    top_svg: Option<PathBuf>,
}

/// Failures of a CLI run.
#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read request file: {path}")]
    RequestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse request file: {path}")]
    RequestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Packing(#[from] PackingError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the packing request from either a request file or CLI flags.
fn build_request(args: &ComputeArgs) -> Result<PackingRequest, CliError> {
    if let Some(path) = &args.request {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::RequestRead {
            path: path.clone(),
            source: e,
        })?;
        let raw = RawPackingRequest::from_json(&contents).map_err(|e| CliError::RequestParse {
            path: path.clone(),
            source: e,
        })?;
        let request = raw.into_request()?;
        return Ok(if args.extended {
            request.with_extended(true)
        } else {
            request
        });
    }

    // clap guarantees both are present when no request file is given
    let machine = args.machine.clone().unwrap_or_default();
    let part = match (args.part.as_deref(), args.spacing.as_slice()) {
        (Some(&[w, d, h]), &[sw, sd, sh]) => PartSpec::new(w, d, h).with_spacing(sw, sd, sh),
        _ => {
            return Err(PackingError::InvalidDimension {
                field: "part".to_string(),
                message: "expected three values: width depth height".to_string(),
            }
            .into())
        }
    };

    Ok(PackingRequest::new(machine, part)
        .with_solvent(args.solvent.clone())
        .with_extended(args.extended))
}

fn run_compute(args: &ComputeArgs, cfg: &Config) -> Result<(), CliError> {
    let request = build_request(args)?;
    let calculator = PackingCalculator::with_policy(cfg.packing_policy());
    let result = calculator.compute(&request)?;

    info!(
        machine = %result.machine,
        total = result.counts.total,
        "Packing computed"
    );

    let report = Report::new(&result, &cfg.report);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.summary());
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
    }
    if let Some(path) = &args.front_svg {
        write_view(path, &report::render_front_view_svg(&result, &cfg.report))?;
    }
    if let Some(path) = &args.top_svg {
        write_view(path, &report::render_top_view_svg(&result, &cfg.report))?;
    }

    Ok(())
}

fn write_view(path: &Path, svg: &str) -> Result<(), ReportError> {
    report::write_svg(path, svg)?;
    info!(path = %path.display(), "Wrote SVG view");
    Ok(())
}

fn list_machines() {
    for machine in MachineType::ALL {
        let profile = machine.profile();
        println!(
            "{:<6} {} x {} x {} mm ({:.0} L)",
            machine.name(),
            profile.size.width,
            profile.size.depth,
            profile.size.height,
            profile.volume_litres()
        );
    }
}

/// Prints an error and its source chain to stderr.
fn report_error(e: &dyn std::error::Error) {
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

/// Entry point for chamber-packer.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            report_error(&e);
            if let Some(default_path) = config::default_config_path() {
                eprintln!("\nDefault config location: {}", default_path.display());
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // Display GPL license notice (required by GPLv3 Section 5d)
    eprintln!(
        "chamber-packer {}  Copyright (C) 2026  The Embedded Society",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("This program comes with ABSOLUTELY NO WARRANTY.");
    eprintln!("This is free software, licensed under GPL-3.0-or-later.");
    eprintln!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
    eprintln!();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting chamber-packer");

    match &args.command {
        Command::Machines => {
            list_machines();
            ExitCode::SUCCESS
        }
        Command::Compute(compute) => match run_compute(compute, &cfg) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Computation failed");
                report_error(&e);
                ExitCode::FAILURE
            }
        },
    }
}
