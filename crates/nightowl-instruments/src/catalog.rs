use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use nightowl_core::models::answer::QuestionId;
use nightowl_core::models::language::Language;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CatalogError, CatalogIssue};

const EMBEDDED: &str = include_str!("../data/translations.json");

/// Prompt and ordered option labels for one question in one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionEntry {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub opts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LanguageBlock {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sections: BTreeMap<String, String>,
    #[serde(rename = "Q", default)]
    questions: BTreeMap<QuestionId, QuestionEntry>,
}

/// Option lists resolved for a question, with the language they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub language: Language,
    pub labels: &'a [String],
}

impl Resolved<'_> {
    /// 1-indexed code of `label`, if it is one of the options.
    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| i64::try_from(i + 1).ok())
    }
}

/// Languages consulted, in order, when looking something up for `language`.
pub fn resolution_order(language: Language) -> impl Iterator<Item = Language> {
    std::iter::once(language)
        .chain((language != Language::DEFAULT).then_some(Language::DEFAULT))
}

/// Localized prompts and option labels for every question, per language.
///
/// Loaded and validated once at startup, then only read. The position of a
/// label in a question's option list (1-indexed) is its canonical code, so
/// every language must list the same number of options in the same order.
#[derive(Debug, Clone)]
pub struct OptionCatalog {
    languages: BTreeMap<Language, LanguageBlock>,
}

impl OptionCatalog {
    /// The catalog shipped with the instrument.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), "option catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build from an already-parsed translations document. Top-level keys
    /// that are not a supported language code are skipped.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_value(value)?;

        let mut languages = BTreeMap::new();
        for (code, block) in raw {
            let Ok(language) = code.parse::<Language>() else {
                tracing::warn!(code = %code, "skipping unsupported language in catalog");
                continue;
            };
            let block: LanguageBlock = serde_json::from_value(block)?;
            languages.insert(language, block);
        }

        let catalog = Self { languages };
        let issues = catalog.validate();
        if !issues.is_empty() {
            return Err(CatalogError::Invalid(issues));
        }
        Ok(catalog)
    }

    /// Check the invariants every lookup relies on. Returns every issue
    /// found rather than stopping at the first.
    fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let Some(default) = self.languages.get(&Language::DEFAULT) else {
            issues.push(CatalogIssue::MissingDefaultLanguage(Language::DEFAULT));
            return issues;
        };

        for (&language, block) in &self.languages {
            for (question, entry) in &block.questions {
                check_labels(language, question, &entry.opts, &mut issues);

                if language == Language::DEFAULT || entry.opts.is_empty() {
                    continue;
                }
                match default.questions.get(question).map(|e| e.opts.len()) {
                    None | Some(0) => issues.push(CatalogIssue::NotInDefault {
                        language,
                        question: question.clone(),
                    }),
                    Some(expected) if expected != entry.opts.len() => {
                        issues.push(CatalogIssue::LengthMismatch {
                            language,
                            question: question.clone(),
                            expected,
                            actual: entry.opts.len(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        issues
    }

    /// Options for exactly this language, without fallback. Empty lists are
    /// reported as missing.
    pub fn labels(&self, language: Language, question: &str) -> Option<&[String]> {
        self.entry(language, question)
            .map(|e| e.opts.as_slice())
            .filter(|opts| !opts.is_empty())
    }

    /// Options for `question`, falling back to the default language when the
    /// active language has none.
    pub fn resolve(&self, language: Language, question: &str) -> Option<Resolved<'_>> {
        resolution_order(language).find_map(|lang| {
            self.labels(lang, question).map(|labels| Resolved {
                language: lang,
                labels,
            })
        })
    }

    pub fn prompt(&self, language: Language, question: &str) -> Option<&str> {
        resolution_order(language).find_map(|lang| {
            self.entry(lang, question)
                .and_then(|e| e.q.as_deref())
        })
    }

    pub fn section_title(&self, language: Language, section: &str) -> Option<&str> {
        resolution_order(language).find_map(|lang| {
            self.languages
                .get(&lang)
                .and_then(|b| b.sections.get(section))
                .map(String::as_str)
        })
    }

    pub fn title(&self, language: Language) -> Option<&str> {
        resolution_order(language)
            .find_map(|lang| self.languages.get(&lang).and_then(|b| b.title.as_deref()))
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.keys().copied()
    }

    /// Question ids with an entry in `language`.
    pub fn questions(&self, language: Language) -> impl Iterator<Item = &QuestionId> + '_ {
        self.languages
            .get(&language)
            .into_iter()
            .flat_map(|b| b.questions.keys())
    }

    fn entry(&self, language: Language, question: &str) -> Option<&QuestionEntry> {
        self.languages.get(&language)?.questions.get(question)
    }
}

fn check_labels(
    language: Language,
    question: &QuestionId,
    labels: &[String],
    issues: &mut Vec<CatalogIssue>,
) {
    let mut seen = HashSet::new();
    for (i, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            issues.push(CatalogIssue::EmptyLabel {
                language,
                question: question.clone(),
                position: i + 1,
            });
            continue;
        }
        if label.trim() != label {
            issues.push(CatalogIssue::UntrimmedLabel {
                language,
                question: question.clone(),
                label: label.clone(),
            });
        }
        if !seen.insert(label.as_str()) {
            issues.push(CatalogIssue::DuplicateLabel {
                language,
                question: question.clone(),
                label: label.clone(),
            });
        }
    }
}
