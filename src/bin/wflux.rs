//! Workout Flux CLI - Command-line interface for Workout Flux
//!
//! Commands:
//! - (none): Print reports for the built-in demo packages
//! - report: Process workout packages from a file or stdin
//! - codes: List supported activity codes

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use workout_flux::pipeline::{demo_packages, parse_array, parse_ndjson, process_packages};
use workout_flux::report::{format_outcome, ReportEncoder};
use workout_flux::types::{ActivityKind, PackageOutcome, WorkoutPackage};
use workout_flux::FLUX_VERSION;

/// Workout Flux - Summary metrics for running, walking and swimming workouts
#[derive(Parser)]
#[command(name = "wflux")]
#[command(author = "Synheart AI Inc")]
#[command(version = FLUX_VERSION)]
#[command(about = "Compute distance, speed and calories from workout readings", long_about = None)]
struct Cli {
    /// Emit diagnostic logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process workout packages and print one report per package
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// List supported activity codes
    Codes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of packages
    Json,
    /// Newline-delimited JSON (one package per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One report line per package
    Text,
    /// JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Commands>) -> Result<(), WfluxCliError> {
    match command {
        None => cmd_demo(),

        Some(Commands::Report {
            input,
            input_format,
            output_format,
        }) => cmd_report(&input, input_format, output_format),

        Some(Commands::Codes { json }) => cmd_codes(json),
    }
}

fn cmd_demo() -> Result<(), WfluxCliError> {
    let outcomes = process_packages(&demo_packages())?;
    print_text(&outcomes);
    Ok(())
}

fn cmd_report(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), WfluxCliError> {
    let input_data = read_input(input)?;

    let packages: Vec<WorkoutPackage> = match input_format {
        InputFormat::Json => parse_array(&input_data)?,
        InputFormat::Ndjson => parse_ndjson(&input_data)?,
    };

    if packages.is_empty() {
        return Err(WfluxCliError::NoPackages);
    }

    let outcomes = process_packages(&packages)?;

    match output_format {
        OutputFormat::Text => print_text(&outcomes),
        OutputFormat::Json => println!("{}", ReportEncoder::new().encode_to_json(outcomes)?),
        OutputFormat::JsonPretty => {
            println!("{}", ReportEncoder::new().encode_to_json_pretty(outcomes)?)
        }
    }

    Ok(())
}

fn cmd_codes(json: bool) -> Result<(), WfluxCliError> {
    let codes: Vec<CodeInfo> = ActivityKind::ALL
        .iter()
        .map(|kind| CodeInfo {
            code: kind.code(),
            label: kind.label(),
            parameters: kind.arity(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&codes)?);
    } else {
        println!("Supported Workout Codes");
        println!("=======================");
        for info in &codes {
            println!("  {}  {:<14} {} parameters", info.code, info.label, info.parameters);
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String, WfluxCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(WfluxCliError::InteractiveStdin);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_text(outcomes: &[PackageOutcome]) {
    for outcome in outcomes {
        println!("{}", format_outcome(outcome));
    }
}

#[derive(serde::Serialize)]
struct CodeInfo {
    code: &'static str,
    label: &'static str,
    parameters: usize,
}

// Error types

#[derive(Debug)]
enum WfluxCliError {
    Io(io::Error),
    Workout(workout_flux::WorkoutError),
    Json(serde_json::Error),
    NoPackages,
    InteractiveStdin,
}

impl From<io::Error> for WfluxCliError {
    fn from(e: io::Error) -> Self {
        WfluxCliError::Io(e)
    }
}

impl From<workout_flux::WorkoutError> for WfluxCliError {
    fn from(e: workout_flux::WorkoutError) -> Self {
        WfluxCliError::Workout(e)
    }
}

impl From<serde_json::Error> for WfluxCliError {
    fn from(e: serde_json::Error) -> Self {
        WfluxCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WfluxCliError> for CliError {
    fn from(e: WfluxCliError) -> Self {
        use workout_flux::WorkoutError;

        match e {
            WfluxCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WfluxCliError::Workout(e) => {
                let (code, hint) = match &e {
                    WorkoutError::ArityMismatch { .. } => (
                        "ARITY_MISMATCH",
                        "Run 'wflux codes' to see the parameters each code takes",
                    ),
                    WorkoutError::InvalidDuration(_)
                    | WorkoutError::InvalidParameter { .. }
                    | WorkoutError::NonFiniteResult { .. } => (
                        "INVALID_READING",
                        "Durations and body measurements must be positive; counts must be whole numbers",
                    ),
                    WorkoutError::JsonError(_) | WorkoutError::ParseError(_) => (
                        "PARSE_ERROR",
                        "Packages look like {\"workout_type\": \"RUN\", \"data\": [15000, 1, 75]}",
                    ),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            WfluxCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            WfluxCliError::NoPackages => CliError {
                code: "NO_PACKAGES".to_string(),
                message: "No workout packages found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            WfluxCliError::InteractiveStdin => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a TTY, nothing to read".to_string(),
                hint: Some("Pipe packages into 'wflux report -i -' or pass a file path".to_string()),
            },
        }
    }
}
