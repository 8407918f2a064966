//! `regform` -- registration form validator.
//!
//! Validates registration drafts against the form's rule table and replays
//! change-event scripts through the form controller.
//!
//! # Environment variables
//!
//! | Variable                  | Default       | Description                              |
//! |---------------------------|---------------|------------------------------------------|
//! | `REGFORM_VALIDATION_MODE` | `on_change`   | `on_change`, `on_blur`, `on_submit`, `all` |
//! | `REGFORM_AGE_POLICY`      | `anniversary` | `anniversary` or `calendar_year`         |
//! | `REGFORM_MIN_AGE`         | `18`          | Minimum age for the date-of-birth rule   |
//! | `RUST_LOG`                | --            | Overrides the `-v` log filter            |

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use regform_cli::events::{parse_events, replay};
use regform_cli::input::{parse_draft, read_input};
use regform_cli::render::{self, OutputFormat};
use regform_core::config::{FormConfig, ValidationMode};
use regform_core::form::{FormController, LogSubmission};
use regform_core::validation::resolver::{
    Clock, FixedClock, Resolution, Resolver, SchemaResolver, SystemClock,
};
use regform_core::validation::schema::Schema;

#[derive(Parser)]
#[command(
    name = "regform",
    about = "Validate registration form input against the form's rule table",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the form's fields, input kinds and options
    Fields,

    /// Validate a JSON registration draft (`-` reads stdin)
    Validate {
        input: String,

        /// Evaluation date for the age rule (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Replay a JSON-lines change-event script through the form controller
    Replay {
        input: String,

        /// Evaluation date for the age rule (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Validation mode (overrides REGFORM_VALIDATION_MODE)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ValidationMode>,
    },
}

fn parse_mode(s: &str) -> Result<ValidationMode, String> {
    ValidationMode::from_name(s).map_err(|e| e.to_string())
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FormConfig::from_env().context("Failed to load form configuration")?;
    tracing::debug!(
        mode = config.mode.as_str(),
        age_policy = config.age_policy.as_str(),
        min_age = config.min_age,
        "Loaded form configuration",
    );

    match cli.command {
        Commands::Fields => fields_command(cli.format),
        Commands::Validate { input, today } => validate_command(&config, &input, today, cli.format),
        Commands::Replay { input, today, mode } => {
            replay_command(&config, &input, today, mode, cli.format)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "regform=warn,regform_cli=warn,regform_core=warn",
        1 => "regform=info,regform_cli=info,regform_core=info",
        _ => "regform=debug,regform_cli=debug,regform_core=debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn evaluation_date(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| SystemClock.today())
}

fn fields_command(format: OutputFormat) -> Result<ExitCode> {
    match format {
        OutputFormat::Text => print!("{}", render::fields_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render::field_set())?),
    }
    Ok(ExitCode::SUCCESS)
}

fn validate_command(
    config: &FormConfig,
    input: &str,
    today: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let draft = parse_draft(&read_input(input)?)?;
    let today = evaluation_date(today);
    let resolver = SchemaResolver::with_clock(Schema::registration(config), FixedClock(today));

    let resolution = resolver.resolve(&draft);
    tracing::info!(%today, valid = resolution.is_valid(), "Validated draft");

    match (&resolution, format) {
        (Resolution::Valid(record), OutputFormat::Text) => {
            println!("valid");
            print!("{}", render::record_text(record));
        }
        (Resolution::Invalid(errors), OutputFormat::Text) => {
            println!("invalid");
            print!("{}", render::errors_text(errors));
        }
        (Resolution::Valid(record), OutputFormat::Json) => {
            let body = serde_json::json!({ "valid": true, "record": record });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        (Resolution::Invalid(errors), OutputFormat::Json) => {
            let body = serde_json::json!({ "valid": false, "errors": errors });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(if resolution.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn replay_command(
    config: &FormConfig,
    input: &str,
    today: Option<NaiveDate>,
    mode: Option<ValidationMode>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let events = parse_events(&read_input(input)?)?;
    let today = evaluation_date(today);
    let mode = mode.unwrap_or(config.mode);

    let resolver = SchemaResolver::with_clock(Schema::registration(config), FixedClock(today));
    let mut form = FormController::new(resolver, mode);
    tracing::info!(events = events.len(), mode = mode.as_str(), %today, "Replaying events");

    let snapshots = replay(&mut form, &events, &mut LogSubmission)?;

    match format {
        OutputFormat::Text => {
            for snapshot in &snapshots {
                print!("{}", render::snapshot_text(snapshot));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshots)?),
    }

    Ok(ExitCode::SUCCESS)
}
