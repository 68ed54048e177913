use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

use rowstrength::config::{AppConfig, OutputFormat};
use rowstrength::logging::{init_logging, LogFormat, LogLevel};
use rowstrength::{
    report, BarbellInput, Converter, ErgInput, ErgTime, Exercise, Gender, RowStrengthError, Split,
};

/// RowStrength - rowing erg and barbell strength converter
///
/// Places an erg result or a barbell set in a percentile bucket of static
/// reference tables and reads the equivalent performance in the other sport.
#[derive(Parser)]
#[command(name = "rowstrength")]
#[command(version)]
#[command(about = "Rowing erg ↔ barbell strength converter", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format (pretty, json, compact)
    #[arg(long, global = true, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an erg result into barbell equivalents
    Erg {
        /// Gender (male, female)
        #[arg(short, long)]
        gender: Option<Gender>,

        /// Body weight in kg
        #[arg(short = 'w', long)]
        body_weight: Option<Decimal>,

        /// Distance rowed in meters
        #[arg(short, long)]
        distance: Option<u32>,

        /// Finishing time (MM:SS or MM:SS.t)
        #[arg(short, long)]
        time: ErgTime,
    },

    /// Convert a barbell set into a 2000m erg equivalent
    Bar {
        /// Gender (male, female)
        #[arg(short, long)]
        gender: Option<Gender>,

        /// Body weight in kg
        #[arg(short = 'w', long)]
        body_weight: Option<Decimal>,

        /// Exercise (bench-press, squat, deadlift)
        #[arg(short, long)]
        exercise: Exercise,

        /// Weight on the bar in kg
        #[arg(short, long)]
        bar_weight: Decimal,

        /// Repetitions performed (1-30)
        #[arg(short, long, default_value = "1")]
        reps: u32,
    },

    /// Compute the 500m split of an erg result
    Split {
        /// Distance rowed in meters
        #[arg(short, long, default_value = "2000")]
        distance: u32,

        /// Finishing time (MM:SS or MM:SS.t)
        #[arg(short, long)]
        time: ErgTime,
    },

    /// Show distances, time ranges and body weights in the reference tables
    Tables {
        /// Only show one gender
        #[arg(short, long)]
        gender: Option<Gender>,
    },

    /// Show or create the configuration file
    Config {
        /// Write a default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = match err.downcast_ref::<RowStrengthError>() {
                Some(inner) => {
                    inner.log();
                    inner.user_message()
                }
                None => {
                    let message = format!("{:#}", err);
                    tracing::error!(error = %message, "Command failed");
                    message
                }
            };
            eprintln!("{} {}", "Error:".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let creating = matches!(cli.command, Commands::Config { init: true });
    let (config_path, config) = AppConfig::resolve(cli.config.as_deref(), creating)?;

    let log_config = config
        .logging
        .with_overrides(cli.log_level, cli.log_format, cli.verbose);
    init_logging(&log_config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let json = cli.json || config.output.format == OutputFormat::Json;

    match cli.command {
        Commands::Erg {
            gender,
            body_weight,
            distance,
            time,
        } => {
            let tables = config.load_tables()?;
            let input = ErgInput {
                gender: resolve_gender(gender, &config)?,
                body_weight: resolve_body_weight(body_weight, &config)?,
                distance: distance.unwrap_or(config.defaults.distance),
                time,
            };

            let result = Converter::new(&tables).erg_to_barbell(&input)?;
            if json {
                println!("{}", report::to_json(&result)?);
            } else {
                println!("{}", "Erg → barbell".green().bold());
                print!("{}", report::render_erg_to_barbell(&result));
            }
        }

        Commands::Bar {
            gender,
            body_weight,
            exercise,
            bar_weight,
            reps,
        } => {
            let tables = config.load_tables()?;
            let input = BarbellInput {
                gender: resolve_gender(gender, &config)?,
                body_weight: resolve_body_weight(body_weight, &config)?,
                exercise,
                bar_weight,
                reps,
            };

            let result = Converter::new(&tables).barbell_to_erg(&input)?;
            if json {
                println!("{}", report::to_json(&result)?);
            } else {
                println!("{}", "Barbell → erg".cyan().bold());
                print!("{}", report::render_barbell_to_erg(&result));
            }
        }

        Commands::Split { distance, time } => {
            let split = Split::calculate(distance, time)?;
            if json {
                println!("{}", report::to_json(&split)?);
            } else {
                println!("{}", report::render_split(distance, &split));
            }
        }

        Commands::Tables { gender } => {
            let tables = config.load_tables()?;
            print!("{}", report::render_table_summary(&tables, gender));
        }

        Commands::Config { init } => {
            if init {
                if AppConfig::init_file(&config_path)? {
                    println!(
                        "{} {}",
                        "✓ Configuration written to".green(),
                        config_path.display()
                    );
                } else {
                    println!("Configuration already exists: {}", config_path.display());
                }
            } else {
                println!("{}", format!("# {}", config_path.display()).dimmed());
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}

fn resolve_gender(gender: Option<Gender>, config: &AppConfig) -> Result<Gender> {
    gender
        .or(config.defaults.gender)
        .ok_or_else(|| anyhow!("Gender is required: pass --gender or set defaults.gender"))
}

fn resolve_body_weight(body_weight: Option<Decimal>, config: &AppConfig) -> Result<Decimal> {
    body_weight
        .or(config.defaults.body_weight)
        .context("Body weight is required: pass --body-weight or set defaults.body_weight")
}
