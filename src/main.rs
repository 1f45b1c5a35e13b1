//! raven-iq: IQ estimation for Raven-style matrices quizzes
//!
//! Scores raw quiz results, evaluates submitted tests and summarizes histories.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use raven_iq::{
    cli,
    config::{self, AppConfig, OutputConfig, Validatable},
    model::TestLevel,
    pipeline::exit_codes,
    reports::ReportFormat,
    scoring::IqEstimator,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nTest levels:",
        "\n  short (x0.95), standard (x1.0), full (x1.1)",
        "\n\nOutput Formats:",
        "\n  auto, summary, json"
    )
}

#[derive(Parser)]
#[command(name = "raven-iq")]
#[command(version, long_version = build_long_version())]
#[command(about = "IQ estimation for Raven-style matrices quizzes", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Estimated IQ below --min-iq
    3  Error occurred

EXAMPLES:
    # Score 9 correct answers out of 12 at average difficulty 5
    raven-iq score -c 9 -t 12 -d 5 --advice

    # Evaluate a submitted test and record it
    raven-iq submit answers.json --record history.json

    # Summarize a history as JSON
    raven-iq history history.json -o json

    # Print the lookup tables
    raven-iq classify")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output flags shared by report-producing commands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Number of correct answers
    #[arg(short, long)]
    correct: u32,

    /// Number of questions in the test
    #[arg(short, long)]
    total: u32,

    /// Average item difficulty (0-10)
    #[arg(short, long)]
    difficulty: f64,

    /// Test level (defaults to `scoring.default_test_level`)
    #[arg(short, long)]
    level: Option<TestLevel>,

    /// Include personalized advice and population comparison
    #[arg(short, long)]
    advice: bool,

    /// Exit with code 1 if the estimated IQ is below this value
    #[arg(long)]
    min_iq: Option<i32>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `submit` subcommand
#[derive(Parser)]
struct SubmitArgs {
    /// Test submission JSON file
    submission: PathBuf,

    /// Override the test level named in the submission
    #[arg(short, long)]
    level: Option<TestLevel>,

    /// Append the scored test to this history file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Exit with code 1 if the estimated IQ is below this value
    #[arg(long)]
    min_iq: Option<i32>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `history` subcommand
#[derive(Parser)]
struct HistoryArgs {
    /// History JSON file (array of recorded tests)
    history: PathBuf,

    /// Store backfilled IQ estimates in the history file
    #[arg(long)]
    update: bool,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `classify` subcommand
#[derive(Parser)]
struct ClassifyArgs {
    /// IQ values to look up (prints the tables when omitted)
    #[arg(allow_negative_numbers = true)]
    iqs: Vec<i32>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate an IQ from raw test results
    Score(ScoreArgs),

    /// Evaluate a completed test submission
    Submit(SubmitArgs),

    /// Summarize a test history, estimating IQs for old entries
    History(HistoryArgs),

    /// Look IQ values up in the classification and percentile tables
    Classify(ClassifyArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, initialize or validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .raven-iq.yaml in the current directory
    Init {
        /// Omit the commented table section
        #[arg(long)]
        minimal: bool,
    },
    /// Check the discovered config file for errors
    Validate,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let Cli {
        quiet,
        no_color,
        config: config_path,
        command,
        ..
    } = cli;
    let config_path = config_path.as_deref();

    match command {
        Commands::Score(args) => {
            let (config, estimator) = load_config(config_path, no_color, &args.output)?;
            cli::run_score(
                &estimator,
                cli::ScoreConfig {
                    correct_answers: args.correct,
                    total_questions: args.total,
                    avg_difficulty: args.difficulty,
                    test_level: args.level.unwrap_or(config.scoring.default_test_level),
                    advice: args.advice,
                    output: config.output,
                    min_iq: args.min_iq,
                    quiet,
                },
            )
        }

        Commands::Submit(args) => {
            let (config, estimator) = load_config(config_path, no_color, &args.output)?;
            cli::run_submit(
                &estimator,
                cli::SubmitConfig {
                    submission_path: args.submission,
                    test_level: args.level,
                    default_test_level: config.scoring.default_test_level,
                    history_path: args.record,
                    output: config.output,
                    min_iq: args.min_iq,
                    quiet,
                },
            )
        }

        Commands::History(args) => {
            let (config, estimator) = load_config(config_path, no_color, &args.output)?;
            cli::run_history(
                &estimator,
                cli::HistoryConfig {
                    history_path: args.history,
                    update: args.update,
                    output: config.output,
                    quiet,
                },
            )
        }

        Commands::Classify(args) => {
            let (config, estimator) = load_config(config_path, no_color, &args.output)?;
            cli::run_classify(
                &estimator,
                cli::ClassifyConfig {
                    iqs: args.iqs,
                    output: config.output,
                    quiet,
                },
            )
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "raven-iq", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config_action(action, config_path),
    }
}

/// Load the config file, layer the command's output flags over it, and build
/// the estimator it describes.
fn load_config(
    config_path: Option<&Path>,
    no_color: bool,
    output: &OutputArgs,
) -> Result<(AppConfig, IqEstimator)> {
    let overrides = AppConfig {
        output: OutputConfig {
            format: output.output,
            file: output.output_file.clone(),
            no_color,
        },
        ..AppConfig::default()
    };
    let (config, loaded_from) = AppConfig::from_file_with_overrides(config_path, &overrides)
        .context("Cannot load configuration")?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    let estimator = config.estimator().context("Invalid scoring tables")?;
    Ok((config, estimator))
}

fn run_config_action(action: ConfigAction, explicit: Option<&Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) =
                config::load_or_default(explicit).context("Cannot load configuration")?;
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(exit_codes::SUCCESS)
        }
        ConfigAction::Path => {
            let search_paths = [
                std::env::current_dir().ok(),
                config::user_config_dir(),
                dirs::home_dir(),
            ];
            eprintln!("Config file search paths (in order):");
            eprintln!("  (--config path)");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {}", path.display());
            }
            eprintln!("  (git repository root, after the current directory)");
            eprintln!();
            eprintln!("Recognized file names:");
            for name in [".raven-iq.yaml", ".raven-iq.yml", "raven-iq.yaml", "raven-iq.yml"] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(exit_codes::SUCCESS)
        }
        ConfigAction::Init { minimal } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".raven-iq.yaml");
            if target.exists() {
                bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = if minimal {
                config::generate_example_config()
            } else {
                config::generate_full_example_config()
            };
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(exit_codes::SUCCESS)
        }
        ConfigAction::Validate => {
            let Some(path) = config::discover_config_file(explicit) else {
                eprintln!("No config file found; defaults are valid.");
                return Ok(exit_codes::SUCCESS);
            };
            let loaded = config::load_config_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let errors = loaded.validate();
            if errors.is_empty() {
                eprintln!("{} is valid.", path.display());
                Ok(exit_codes::SUCCESS)
            } else {
                eprintln!("{} has {} error(s):", path.display(), errors.len());
                for error in &errors {
                    eprintln!("  {error}");
                }
                Ok(exit_codes::ERROR)
            }
        }
    }
}
