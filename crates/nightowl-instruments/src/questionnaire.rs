//! Questionnaire layout: sections, their items in display order, and the
//! completeness gate that must pass before scoring.

use std::sync::LazyLock;

use nightowl_core::models::answer::{AnswerSet, QuestionId};
use nightowl_core::models::language::Language;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::OptionCatalog;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseKind {
    /// Pick one of the localized option labels.
    Choice,
    /// Pick a number on a scale; stored as a digit string.
    Likert { min: i64, max: i64 },
}

const LIKERT_5: ResponseKind = ResponseKind::Likert { min: 1, max: 5 };

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: QuestionId,
    pub kind: ResponseKind,
}

impl Item {
    /// The choices a respondent sees for this item in `language`.
    pub fn choices(&self, catalog: &OptionCatalog, language: Language) -> Vec<String> {
        match self.kind {
            ResponseKind::Choice => catalog
                .resolve(language, self.id.as_str())
                .map(|r| r.labels.to_vec())
                .unwrap_or_default(),
            ResponseKind::Likert { min, max } => (min..=max).map(|n| n.to_string()).collect(),
        }
    }
}

/// One page of the questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    /// Section letter, also the key of its title in the catalog.
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

impl Section {
    /// Items on this page without a usable answer, in display order.
    pub fn missing(&self, answers: &AnswerSet) -> Vec<QuestionId> {
        self.items
            .iter()
            .filter(|item| !answers.is_answered(item.id.as_str()))
            .map(|item| item.id.clone())
            .collect()
    }

    pub fn is_complete(&self, answers: &AnswerSet) -> bool {
        self.items
            .iter()
            .all(|item| answers.is_answered(item.id.as_str()))
    }
}

pub fn sections() -> &'static [Section] {
    static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
        vec![
            section("A", "Demographics", 7, ResponseKind::Choice),
            section("B", "Sleep Behaviour", 11, ResponseKind::Choice),
            section("C", "Mental Health", 12, LIKERT_5),
            section("D", "Cognitive Performance", 9, LIKERT_5),
            section("E", "Productivity Pattern", 4, ResponseKind::Choice),
            section("F", "Lifestyle & Sleep Hygiene", 6, ResponseKind::Choice),
        ]
    });
    &SECTIONS
}

fn section(letter: &str, name: &str, count: usize, kind: ResponseKind) -> Section {
    Section {
        id: letter.to_string(),
        name: name.to_string(),
        items: (1..=count)
            .map(|n| Item {
                id: QuestionId::new(format!("{letter}{n}")),
                kind,
            })
            .collect(),
    }
}

/// Every question id, section by section, in display order.
pub fn all_question_ids() -> impl Iterator<Item = &'static QuestionId> {
    sections()
        .iter()
        .flat_map(|s| s.items.iter().map(|item| &item.id))
}

pub fn item(id: &str) -> Option<&'static Item> {
    sections()
        .iter()
        .flat_map(|s| &s.items)
        .find(|item| item.id.as_str() == id)
}

/// Required questions without a usable answer. Empty means the answer set
/// may be scored.
pub fn missing_required(answers: &AnswerSet) -> Vec<QuestionId> {
    sections().iter().flat_map(|s| s.missing(answers)).collect()
}

pub fn is_complete(answers: &AnswerSet) -> bool {
    sections().iter().all(|s| s.is_complete(answers))
}

/// Choice questions the catalog has no options for, even in the default
/// language. Such questions can never be answered.
pub fn catalog_gaps(catalog: &OptionCatalog) -> Vec<QuestionId> {
    sections()
        .iter()
        .flat_map(|s| &s.items)
        .filter(|item| item.kind == ResponseKind::Choice)
        .filter(|item| catalog.labels(Language::DEFAULT, item.id.as_str()).is_none())
        .map(|item| item.id.clone())
        .collect()
}
