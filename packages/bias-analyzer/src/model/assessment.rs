//! Coarse, human-readable reading of a validated result.

use serde::Serialize;

use super::analysis::AnalysisResult;

/// Upper bound (inclusive) of the Low band.
pub const LOW_THRESHOLD: f64 = 0.3;
/// Upper bound (inclusive) of the Medium band.
pub const MEDIUM_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }
}

/// `<= 0.3` is Low, `<= 0.6` is Medium, anything above is High.
pub fn interpret_score(score: f64) -> Level {
    if score <= LOW_THRESHOLD {
        Level::Low
    } else if score <= MEDIUM_THRESHOLD {
        Level::Medium
    } else {
        Level::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leaning {
    Left,
    Neutral,
    Right,
}

impl Leaning {
    pub fn from_bias(bias: f64) -> Self {
        if bias < 0.0 {
            Leaning::Left
        } else if bias > 0.0 {
            Leaning::Right
        } else {
            Leaning::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Leaning::Left => "Left",
            Leaning::Neutral => "Neutral",
            Leaning::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    pub credibility_level: Level,
    pub objectivity_level: Level,
    pub political_leaning: Leaning,
    pub bias_strength: Level,
}

impl OverallAssessment {
    pub fn of(result: &AnalysisResult) -> Self {
        Self {
            credibility_level: interpret_score(result.credibility.trustworthy),
            objectivity_level: interpret_score(result.credibility.objective),
            political_leaning: Leaning::from_bias(result.political_bias),
            bias_strength: interpret_score(result.political_bias.abs()),
        }
    }
}
