use std::sync::LazyLock;

use nightowl_core::models::score::{Metric, ScoreResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Inclusive documented range of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// One of the five composite metrics and what its values mean.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub metric: Metric,
    pub name: String,
    /// `None` for metrics with no upper bound.
    pub range: Option<ScoreRange>,
    pub description: Option<String>,
}

pub fn subscales() -> &'static [Subscale] {
    static SUBSCALES: LazyLock<Vec<Subscale>> = LazyLock::new(|| {
        vec![
            subscale(
                Metric::SleepQuality,
                Some(ScoreRange { min: 3, max: 15 }),
                "Refreshment, ease of falling asleep and sleep environment. Higher is better.",
            ),
            subscale(
                Metric::WellBeingTotal,
                Some(ScoreRange { min: 0, max: 100 }),
                "WHO-5 items rescaled to 0-100. Higher is better.",
            ),
            subscale(
                Metric::DistressTotal,
                Some(ScoreRange { min: 6, max: 30 }),
                "Short DASS-style distress items. Higher indicates more distress.",
            ),
            subscale(
                Metric::CognitiveEfficiency,
                Some(ScoreRange { min: 8, max: 40 }),
                "Self-rated concentration, memory and decision making.",
            ),
            subscale(
                Metric::LifestyleRisk,
                None,
                "Evening caffeine, substance use, inactivity, poor sleep environment, \
                 screen time and late dinners. Higher is worse.",
            ),
        ]
    });
    &SUBSCALES
}

fn subscale(metric: Metric, range: Option<ScoreRange>, description: &str) -> Subscale {
    Subscale {
        metric,
        name: metric.label().to_string(),
        range,
        description: Some(description.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub metric: Metric,
    pub value: i64,
    pub expected_range: ScoreRange,
    pub message: String,
}

/// Report metrics that fall outside their documented range.
///
/// Out-of-range values are never clamped by the scorer; they only happen
/// when the catalog disagrees with the scoring key, so this is a diagnostic.
pub fn validate_scores(scores: &ScoreResult) -> Vec<ValidationError> {
    subscales()
        .iter()
        .filter_map(|subscale| {
            let range = subscale.range?;
            let value = scores.get(subscale.metric);
            (!range.contains(value)).then(|| ValidationError {
                metric: subscale.metric,
                value,
                expected_range: range,
                message: format!(
                    "{} score {} is outside range [{}, {}]",
                    subscale.name, value, range.min, range.max,
                ),
            })
        })
        .collect()
}

/// Format scores as a short structured block for display.
pub fn render_summary(scores: &ScoreResult) -> String {
    let mut output = String::from("## Scores\n\n");
    for subscale in subscales() {
        let value = scores.get(subscale.metric);
        match subscale.range {
            Some(range) => output.push_str(&format!(
                "- {} ({}-{}): {}\n",
                subscale.name, range.min, range.max, value
            )),
            None => output.push_str(&format!("- {} (higher = worse): {}\n", subscale.name, value)),
        }
    }
    output
}
