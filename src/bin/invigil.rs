//! invigil CLI - Command-line interface for the proctoring inference core
//!
//! Commands:
//! - analyze: Process NDJSON pose frames into frame reports and alerts
//! - validate: Parse-check an NDJSON pose frame input

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use invigil::report::alert_log_line;
use invigil::schema::parse_pose_frame;
use invigil::{InvigilError, ProctorProcessor, INVIGIL_VERSION};

/// invigil - Behavioral-inference core for camera-based exam proctoring
#[derive(Parser)]
#[command(name = "invigil")]
#[command(version = INVIGIL_VERSION)]
#[command(about = "Classify pose keypoint streams into suspicion signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process NDJSON pose frames into frame reports and alerts
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Append one human-readable line per alert to this file
        #[arg(long)]
        alert_log: Option<PathBuf>,

        /// Alert cooldown per identity, in seconds
        #[arg(long, default_value_t = invigil::ALERT_COOLDOWN_SECS)]
        cooldown_secs: i64,
    },

    /// Parse-check an NDJSON pose frame input and report per-line errors
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one frame report per line)
    Ndjson,
    /// Pretty-printed JSON
    JsonPretty,
    /// Pick based on whether stdout is a terminal
    Auto,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            output_format,
            alert_log,
            cooldown_secs,
        } => cmd_analyze(
            &input,
            &output,
            output_format,
            alert_log.as_deref(),
            cooldown_secs,
        ),
        Commands::Validate { input } => cmd_validate(&input),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    output_format: OutputFormat,
    alert_log: Option<&Path>,
    cooldown_secs: i64,
) -> Result<(), CliError> {
    let input_data = read_input(input)?;

    let pretty = match output_format {
        OutputFormat::Ndjson => false,
        OutputFormat::JsonPretty => true,
        OutputFormat::Auto => atty::is(atty::Stream::Stdout),
    };

    let mut processor =
        ProctorProcessor::with_cooldown(chrono::Duration::seconds(cooldown_secs));
    let mut out = open_output(output)?;
    let mut log = alert_log
        .map(|path| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        })
        .transpose()?;

    for line in input_data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (timestamp, frames) = parse_pose_frame(line)?;
        let report = processor.process_frame(&frames, timestamp);

        if let Some(log) = log.as_mut() {
            for alert in &report.alerts {
                writeln!(log, "{}", alert_log_line(alert))?;
            }
        }

        let json = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        writeln!(out, "{json}")?;
    }

    out.flush()?;
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), CliError> {
    let input_data = read_input(input)?;

    let mut frames = 0usize;
    let mut errors = 0usize;
    for (number, line) in input_data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_pose_frame(line) {
            Ok(_) => frames += 1,
            Err(e) => {
                errors += 1;
                eprintln!("line {}: {e}", number + 1);
            }
        }
    }

    println!("{frames} valid frame(s), {errors} error(s)");
    if errors > 0 {
        return Err(CliError::InvalidInput(errors));
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn open_output(output: &Path) -> Result<Box<dyn Write>, CliError> {
    if output.to_string_lossy() == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(fs::File::create(output)?))
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Invigil(#[from] InvigilError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} invalid input line(s)")]
    InvalidInput(usize),
}
