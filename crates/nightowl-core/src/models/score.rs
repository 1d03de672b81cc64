use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The five composite metrics produced from one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Metric {
    SleepQuality,
    WellBeingTotal,
    DistressTotal,
    CognitiveEfficiency,
    LifestyleRisk,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::SleepQuality,
        Metric::WellBeingTotal,
        Metric::DistressTotal,
        Metric::CognitiveEfficiency,
        Metric::LifestyleRisk,
    ];

    /// Column name in the response sheet.
    pub fn column(self) -> &'static str {
        match self {
            Metric::SleepQuality => "sleep_quality",
            Metric::WellBeingTotal => "WHO_total",
            Metric::DistressTotal => "distress_total",
            Metric::CognitiveEfficiency => "cognitive_efficiency",
            Metric::LifestyleRisk => "lifestyle_risk",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::SleepQuality => "Sleep Quality",
            Metric::WellBeingTotal => "WHO-5 Well-being",
            Metric::DistressTotal => "Mental Distress",
            Metric::CognitiveEfficiency => "Cognitive Efficiency",
            Metric::LifestyleRisk => "Lifestyle Risk",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}

/// Composite scores for one completed questionnaire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    /// 3–15, higher is better.
    pub sleep_quality: i64,
    /// 0–100, higher is better.
    #[serde(rename = "WHO_total")]
    pub well_being_total: i64,
    /// 6–30, higher is worse.
    pub distress_total: i64,
    /// 8–40.
    pub cognitive_efficiency: i64,
    /// Unbounded, higher is worse.
    pub lifestyle_risk: i64,
}

impl ScoreResult {
    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::SleepQuality => self.sleep_quality,
            Metric::WellBeingTotal => self.well_being_total,
            Metric::DistressTotal => self.distress_total,
            Metric::CognitiveEfficiency => self.cognitive_efficiency,
            Metric::LifestyleRisk => self.lifestyle_risk,
        }
    }

    pub fn set(&mut self, metric: Metric, value: i64) {
        let slot = match metric {
            Metric::SleepQuality => &mut self.sleep_quality,
            Metric::WellBeingTotal => &mut self.well_being_total,
            Metric::DistressTotal => &mut self.distress_total,
            Metric::CognitiveEfficiency => &mut self.cognitive_efficiency,
            Metric::LifestyleRisk => &mut self.lifestyle_risk,
        };
        *slot = value;
    }

    /// `(metric, value)` pairs in canonical column order.
    pub fn entries(&self) -> impl Iterator<Item = (Metric, i64)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}
