//! prettyplan CLI entrypoint.
//!
//! Reads a Terraform JSON plan from a file or standard input and prints the
//! rendered report to standard output.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::process::ExitCode;

use prettyplan::cli::{Cli, Commands, LogFormat, OutputFormatter};
use prettyplan::config::{ConfigParser, ConfigValidator, RenderConfig, find_config_file};
use prettyplan::error::{PrettyPlanError, Result};
use prettyplan::plan::{Plan, PlanDecoder};
use prettyplan::render::{ChangeReport, ColorMode};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system. Logs go to stderr; stdout carries the report.
fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Forces `colored` on for `--color always`, even under `NO_COLOR`.
fn init_color(mode: ColorMode) {
    if mode == ColorMode::Always {
        colored::control::set_override(true);
    }
}

/// Prints a fatal error the way each failure class expects.
fn report_error(error: &PrettyPlanError) {
    match error {
        PrettyPlanError::Decode(_) => {
            eprintln!("cannot parse input as Terraform plan JSON: {error}");
        }
        PrettyPlanError::Render(_) => eprintln!("cannot render: {error}"),
        _ => eprintln!("Error: {error}"),
    }
}

/// Runs the selected command.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    init_color(config.color);
    let plan = read_plan(cli.command.input())?;

    let renderer = config.renderer();
    let report = ChangeReport::build(&plan, &renderer)?;
    info!(
        "Rendered {} resource changes ({} warnings)",
        report.entries().len(),
        report.warnings().len()
    );

    let formatter = OutputFormatter::new(cli.output);
    let output = match &cli.command {
        Commands::Show { .. } => formatter.format_report(&report, &config.formatter())?,
        Commands::Summary { .. } => formatter.format_summary(&report)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Layers defaults, config file, environment and flags, then validates.
fn load_config(cli: &Cli) -> Result<RenderConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(std::env::current_dir()?),
    };

    let mut config = ConfigParser::new().load_with_env(path.as_deref())?;
    cli.apply_overrides(&mut config);
    ConfigValidator::new().validate(&config)?;

    debug!("Effective configuration: {config:?}");
    Ok(config)
}

/// Reads and decodes the plan from a file or standard input.
fn read_plan(input: Option<&Path>) -> Result<Plan> {
    let decoder = PlanDecoder::new();
    match input {
        Some(path) => {
            info!("Reading plan from: {}", path.display());
            let file = File::open(path)?;
            decoder.decode_reader(BufReader::new(file))
        }
        None => {
            debug!("Reading plan from standard input");
            decoder.decode_reader(std::io::stdin().lock())
        }
    }
}
