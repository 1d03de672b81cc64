use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use nightowl_core::models::answer::AnswerSet;
use nightowl_core::models::language::Language;
use nightowl_core::models::submission::Submission;
use nightowl_instruments::catalog::OptionCatalog;
use nightowl_instruments::questionnaire::{self, ResponseKind};
use nightowl_instruments::scoring::{render_summary, validate_scores};
use nightowl_instruments::{aggregate_detailed, aggregate::Scoring};
use nightowl_storage::csv_store::CsvStore;
use nightowl_storage::layout::ColumnLayout;
use nightowl_storage::submit::{AppendOutcome, record_submission};
use uuid::Uuid;

use crate::config::{self, NightowlConfig};

/// Load the option catalog once for the whole process.
pub fn load_catalog(config: &NightowlConfig) -> Result<OptionCatalog> {
    let catalog = match &config.translations_path {
        Some(path) => OptionCatalog::from_path(path)
            .wrap_err_with(|| format!("cannot start without a valid catalog ({})", path.display()))?,
        None => OptionCatalog::embedded().wrap_err("embedded catalog is invalid")?,
    };

    let gaps = questionnaire::catalog_gaps(&catalog);
    if !gaps.is_empty() {
        tracing::warn!(?gaps, "choice questions without options in the default language");
    }
    Ok(catalog)
}

fn read_answers(path: &Path) -> Result<AnswerSet> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read answers from {}", path.display()))?;
    let answers: AnswerSet = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("{} is not a JSON object of answers", path.display()))?;
    Ok(answers)
}

fn score(catalog: &OptionCatalog, answers: &AnswerSet, language: Language) -> Scoring {
    let scoring = aggregate_detailed(catalog, answers, language);
    for substitution in &scoring.substitutions {
        tracing::info!(
            metric = %substitution.metric,
            question = substitution.question,
            fallback = substitution.fallback,
            "fallback code used"
        );
    }
    for error in validate_scores(&scoring.scores) {
        tracing::warn!(metric = %error.metric, value = error.value, "{error}");
    }
    scoring
}

pub fn questions(catalog: &OptionCatalog, language: Language) {
    if let Some(title) = catalog.title(language) {
        println!("# {title}\n");
    }
    for section in questionnaire::sections() {
        let heading = catalog
            .section_title(language, &section.id)
            .unwrap_or(&section.name);
        println!("## {heading}\n");
        for item in &section.items {
            let prompt = catalog
                .prompt(language, item.id.as_str())
                .unwrap_or("(no prompt)");
            println!("{}. {prompt}", item.id);
            let choices = item.choices(catalog, language);
            match item.kind {
                ResponseKind::Choice => {
                    for (i, choice) in choices.iter().enumerate() {
                        println!("   {}) {choice}", i + 1);
                    }
                }
                ResponseKind::Likert { .. } => println!("   [{}]", choices.join(" ")),
            }
        }
        println!();
    }
}

pub fn score_file(
    catalog: &OptionCatalog,
    answers_path: &Path,
    language: Language,
    json: bool,
) -> Result<()> {
    let answers = read_answers(answers_path)?;
    let missing = questionnaire::missing_required(&answers);
    if !missing.is_empty() {
        tracing::warn!(count = missing.len(), "answer set is incomplete, scores use fallbacks");
    }

    let scoring = score(catalog, &answers, language);
    if json {
        println!("{}", serde_json::to_string_pretty(&scoring.scores)?);
    } else {
        print!("{}", render_summary(&scoring.scores));
    }
    Ok(())
}

pub struct SubmitArgs<'a> {
    pub answers_path: &'a Path,
    pub language: Language,
    pub session_id: Option<Uuid>,
    pub allow_incomplete: bool,
}

pub fn submit(
    catalog: &OptionCatalog,
    config: &NightowlConfig,
    args: SubmitArgs<'_>,
) -> Result<AppendOutcome> {
    let answers = read_answers(args.answers_path)?;

    let missing = questionnaire::missing_required(&answers);
    if !missing.is_empty() && !args.allow_incomplete {
        let ids: Vec<String> = missing.iter().map(|q| q.to_string()).collect();
        return Err(eyre::eyre!(
            "{} required question(s) unanswered: {}",
            ids.len(),
            ids.join(", ")
        ));
    }

    let scoring = score(catalog, &answers, args.language);
    let mut submission = Submission::new(args.language, answers, scoring.scores);
    if let Some(session_id) = args.session_id {
        submission = submission.with_session_id(session_id);
    }

    let mut store = CsvStore::new(&config.store_path);
    let layout = ColumnLayout::new(questionnaire::all_question_ids());
    let outcome = record_submission(&mut store, &submission, &layout)
        .wrap_err_with(|| format!("failed to save to {}", config.store_path.display()))?;

    match outcome {
        AppendOutcome::Appended => println!(
            "saved session {} to {}",
            submission.session_id,
            config.store_path.display()
        ),
        AppendOutcome::AlreadyRecorded => {
            println!("session {} was already saved", submission.session_id)
        }
    }
    print!("{}", render_summary(&submission.scores));
    Ok(outcome)
}

pub fn show_config(config: &NightowlConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn init_config(path: &Path, store: Option<PathBuf>, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    let mut config = NightowlConfig::defaults()?;
    if let Some(store) = store {
        config.store_path = store;
    }
    config::save_config(&config, path)?;
    println!("wrote {}", path.display());
    Ok(())
}
