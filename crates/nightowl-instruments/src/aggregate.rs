use nightowl_core::models::answer::AnswerSet;
use nightowl_core::models::language::Language;
use nightowl_core::models::score::{Metric, ScoreResult};

use crate::catalog::OptionCatalog;
use crate::normalize::{NormalizedAnswers, normalize_all};

/// Neutral code assumed for an unresolved sleep, well-being or distress item.
pub const NEUTRAL_FALLBACK: i64 = 3;

/// Code assumed for an unresolved cognitive or lifestyle item. F4 keeps the
/// neutral code in lifestyle risk too, as it does in sleep quality.
pub const ZERO_FALLBACK: i64 = 0;

/// How an item's code becomes its contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Direct,
    /// Reverse a `points`-point scale: `points + 1 - code`. Not clamped to
    /// the scale, so out-of-range codes give out-of-range contributions.
    Reverse { points: i64 },
}

impl Transform {
    pub fn apply(self, code: i64) -> i64 {
        match self {
            Transform::Direct => code,
            Transform::Reverse { points } => (points + 1).saturating_sub(code),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ItemKey {
    pub question: &'static str,
    pub transform: Transform,
    /// Code substituted when the answer is missing or unresolvable.
    pub fallback: i64,
}

/// Items and arithmetic behind one metric.
#[derive(Debug, Clone, Copy)]
pub struct ScoringKey {
    pub metric: Metric,
    pub items: &'static [ItemKey],
    pub multiplier: i64,
}

const fn item(question: &'static str, transform: Transform, fallback: i64) -> ItemKey {
    ItemKey {
        question,
        transform,
        fallback,
    }
}

const DIRECT: Transform = Transform::Direct;
const REV4: Transform = Transform::Reverse { points: 4 };
const REV5: Transform = Transform::Reverse { points: 5 };
const N: i64 = NEUTRAL_FALLBACK;
const Z: i64 = ZERO_FALLBACK;

pub const SCORING_KEY: [ScoringKey; 5] = [
    ScoringKey {
        metric: Metric::SleepQuality,
        items: &[item("B6", REV5, N), item("B7", REV5, N), item("F4", REV5, N)],
        multiplier: 1,
    },
    ScoringKey {
        metric: Metric::WellBeingTotal,
        items: &[
            item("C1", REV5, N),
            item("C2", REV5, N),
            item("C3", REV5, N),
            item("C4", REV5, N),
            item("C5", REV5, N),
        ],
        multiplier: 4,
    },
    ScoringKey {
        metric: Metric::DistressTotal,
        items: &[
            item("C6", DIRECT, N),
            item("C7", DIRECT, N),
            item("C8", DIRECT, N),
            item("C9", DIRECT, N),
            item("C10", DIRECT, N),
            item("C12", DIRECT, N),
        ],
        multiplier: 1,
    },
    ScoringKey {
        metric: Metric::CognitiveEfficiency,
        items: &[
            item("D1", DIRECT, Z),
            item("D2", DIRECT, Z),
            item("D3", DIRECT, Z),
            item("D4", DIRECT, Z),
            item("D5", DIRECT, Z),
            item("D6", DIRECT, Z),
            item("D7", DIRECT, Z),
            item("D8", DIRECT, Z),
        ],
        multiplier: 1,
    },
    ScoringKey {
        metric: Metric::LifestyleRisk,
        items: &[
            item("F1", DIRECT, Z),
            item("F2", DIRECT, Z),
            item("F3", REV4, Z),
            item("F4", REV5, N),
            item("F5", DIRECT, Z),
            item("F6", DIRECT, Z),
        ],
        multiplier: 1,
    },
];

pub fn scoring_key(metric: Metric) -> Option<&'static ScoringKey> {
    SCORING_KEY.iter().find(|k| k.metric == metric)
}

/// A fallback code that stood in for an unresolved answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub metric: Metric,
    pub question: &'static str,
    pub fallback: i64,
}

/// Scores plus everything that went into them.
#[derive(Debug, Clone)]
pub struct Scoring {
    pub scores: ScoreResult,
    pub normalized: NormalizedAnswers,
    pub substitutions: Vec<Substitution>,
}

/// Score a completed answer set.
///
/// Never fails: unresolved items take their key's fallback code, which is a
/// lossy default. Checking that every required question was answered is the
/// caller's job (see [`crate::questionnaire::missing_required`]).
pub fn aggregate(catalog: &OptionCatalog, answers: &AnswerSet, language: Language) -> ScoreResult {
    aggregate_detailed(catalog, answers, language).scores
}

/// Like [`aggregate`], also reporting the normalized codes and every
/// fallback substitution.
pub fn aggregate_detailed(
    catalog: &OptionCatalog,
    answers: &AnswerSet,
    language: Language,
) -> Scoring {
    let normalized = normalize_all(catalog, answers, language);
    let mut scores = ScoreResult::default();
    let mut substitutions = Vec::new();

    for key in &SCORING_KEY {
        let mut total: i64 = 0;
        for item in key.items {
            let code = match normalized.code(item.question) {
                Some(code) => code,
                None => {
                    tracing::debug!(
                        metric = %key.metric,
                        question = item.question,
                        fallback = item.fallback,
                        "unresolved answer, substituting fallback code"
                    );
                    substitutions.push(Substitution {
                        metric: key.metric,
                        question: item.question,
                        fallback: item.fallback,
                    });
                    item.fallback
                }
            };
            total = item.transform.apply(code).saturating_add(total);
        }
        scores.set(key.metric, total.saturating_mul(key.multiplier));
    }

    Scoring {
        scores,
        normalized,
        substitutions,
    }
}
