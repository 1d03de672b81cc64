use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use nightowl_core::models::language::Language;
use nightowl_instruments::catalog::OptionCatalog;
use uuid::Uuid;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(
    name = "nightowl",
    about = "Score and record the Morning Minds & Night Owls chronotype survey",
    version
)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Translations file to load option catalogs from (overrides the config
    /// and NIGHTOWL_TRANSLATIONS)
    #[arg(long, global = true)]
    translations: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every section, question and option in a language
    Questions(LangArgs),
    /// Score an answers file and print the result
    Score(ScoreArgs),
    /// Score an answers file and append it to the response sheet
    Submit(SubmitArgs),
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct LangArgs {
    /// Session language (en, hi, mr); defaults to the configured language
    #[arg(long)]
    lang: Option<Language>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    answers: PathBuf,
    #[command(flatten)]
    lang: LangArgs,
    /// Print scores as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    answers: PathBuf,
    #[command(flatten)]
    lang: LangArgs,
    /// Session id to record under; a new one is generated when omitted
    #[arg(long)]
    session_id: Option<Uuid>,
    /// Record even if required questions are unanswered
    #[arg(long)]
    allow_incomplete: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a fresh config file
    Init {
        /// Response sheet location
        #[arg(long)]
        store: Option<PathBuf>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let translations = cli.translations;

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                let config = config::load_config(&config_path)?.apply_env();
                commands::show_config(&config, &config_path)
            }
            ConfigCommand::Init { store, force } => {
                commands::init_config(&config_path, store, force)
            }
        },
        Command::Questions(args) => {
            let (config, catalog) = prepare(&config_path, translations)?;
            commands::questions(&catalog, args.lang.unwrap_or(config.default_language));
            Ok(())
        }
        Command::Score(args) => {
            let (config, catalog) = prepare(&config_path, translations)?;
            let language = args.lang.lang.unwrap_or(config.default_language);
            commands::score_file(&catalog, &args.answers, language, args.json)
        }
        Command::Submit(args) => {
            let (config, catalog) = prepare(&config_path, translations)?;
            let language = args.lang.lang.unwrap_or(config.default_language);
            commands::submit(
                &catalog,
                &config,
                commands::SubmitArgs {
                    answers_path: &args.answers,
                    language,
                    session_id: args.session_id,
                    allow_incomplete: args.allow_incomplete,
                },
            )?;
            Ok(())
        }
    }
}

/// Resolve the effective config and load the option catalog once.
fn prepare(
    config_path: &Path,
    translations: Option<PathBuf>,
) -> Result<(config::NightowlConfig, OptionCatalog)> {
    let mut config = config::load_config(config_path)?.apply_env();
    if let Some(translations) = translations {
        config.translations_path = Some(translations);
    }
    let catalog = commands::load_catalog(&config)?;
    Ok((config, catalog))
}
