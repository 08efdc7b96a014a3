//! Analysis result types and the two ways of reading them from raw JSON.
//!
//! - [`AnalysisResult::validate`] is strict: any missing, non-numeric or
//!   out-of-range score, or an unknown enum literal, rejects the whole result.
//! - [`AnalysisResult::normalized`] is tolerant: scores are clamped, bad
//!   values fall back to defaults. Used for display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Version of the result contract. Version 2 replaced the two-score
/// `political` section with the signed `politicalBias` scalar.
pub const SCHEMA_VERSION: u32 = 2;

/// Placeholder for missing rationale strings.
pub const NO_EXPLANATION: &str = "No explanation provided";

pub const UNKNOWN_SENDER_NAME: &str = "Unknown Sender";
pub const UNKNOWN_SENDER_EMAIL: &str = "unknown@example.com";
pub const NO_SUBJECT: &str = "No Subject";

const SCORE_RANGE: (f64, f64) = (0.0, 1.0);
const BIAS_RANGE: (f64, f64) = (-1.0, 1.0);

// =============================================================================
// Enumerations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Simple,
    Standard,
    Complex,
}

impl Format {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Simple" => Some(Format::Simple),
            "Standard" => Some(Format::Standard),
            "Complex" => Some(Format::Complex),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Simple => "Simple",
            Format::Standard => "Standard",
            Format::Complex => "Complex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readability {
    Low,
    Medium,
    High,
}

impl Readability {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Readability::Low),
            "Medium" => Some(Readability::Medium),
            "High" => Some(Readability::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Readability::Low => "Low",
            Readability::Medium => "Medium",
            Readability::High => "High",
        }
    }
}

// =============================================================================
// Result sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credibility {
    pub deceptive: f64,
    pub fake_news: f64,
    pub trustworthy: f64,
    pub objective: f64,
    pub deceptive_reason: String,
    pub fake_news_reason: String,
    pub trustworthy_reason: String,
    pub objective_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub format: Format,
    pub paragraphs: u32,
    pub readability: Readability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderInfo {
    pub name: String,
    pub email: String,
}

impl SenderInfo {
    /// Empty fields get placeholders.
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: non_empty_or(name, UNKNOWN_SENDER_NAME),
            email: non_empty_or(email, UNKNOWN_SENDER_EMAIL),
        }
    }
}

impl Default for SenderInfo {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub analyzed_at: DateTime<Utc>,
    pub email_id: String,
    pub subject: String,
    pub content_length: usize,
    pub schema_version: u32,
}

impl AnalysisMetadata {
    pub fn new(email_id: impl Into<String>, subject: &str, content_length: usize) -> Self {
        Self {
            analyzed_at: Utc::now(),
            email_id: email_id.into(),
            subject: non_empty_or(subject, NO_SUBJECT),
            content_length,
            schema_version: SCHEMA_VERSION,
        }
    }
}

/// A validated bias/credibility assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub credibility: Credibility,

    /// -1 = left-leaning, 0 = neutral, 1 = right-leaning
    pub political_bias: f64,

    pub structure_analysis: StructureAnalysis,

    #[serde(default)]
    pub sender: SenderInfo,

    /// Attached by the analyzer host after the model call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnalysisMetadata>,
}

// =============================================================================
// Tolerant normalization
// =============================================================================

/// Clamp a score into [0, 1]; NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    clamp_into(score, SCORE_RANGE)
}

/// Clamp a bias into [-1, 1]; NaN becomes 0.
pub fn clamp_bias(bias: f64) -> f64 {
    clamp_into(bias, BIAS_RANGE)
}

/// Any JSON number is clamped into [0, 1]; anything else maps to 0.
pub fn normalize_score(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).map(clamp_score).unwrap_or(0.0)
}

/// Any JSON number is clamped into [-1, 1]; anything else maps to 0.
pub fn normalize_bias(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).map(clamp_bias).unwrap_or(0.0)
}

fn clamp_into(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(min, max)
}

impl AnalysisResult {
    /// Best-effort view of a raw result. Never fails.
    pub fn normalized(raw: &Value) -> Self {
        let credibility = raw.get("credibility");
        let structure = raw.get("structureAnalysis");
        let format = field(structure, "format")
            .and_then(Value::as_str)
            .and_then(Format::parse)
            .unwrap_or(Format::Standard);
        let readability = field(structure, "readability")
            .and_then(Value::as_str)
            .and_then(Readability::parse)
            .unwrap_or(Readability::Medium);
        let paragraphs = field(structure, "paragraphs")
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
            .map(|n| n.round().max(1.0).min(u32::MAX as f64) as u32)
            .unwrap_or(1);

        Self {
            credibility: Credibility {
                deceptive: normalize_score(field(credibility, "deceptive")),
                fake_news: normalize_score(field(credibility, "fakeNews")),
                trustworthy: normalize_score(field(credibility, "trustworthy")),
                objective: normalize_score(field(credibility, "objective")),
                deceptive_reason: reason(credibility, "deceptiveReason"),
                fake_news_reason: reason(credibility, "fakeNewsReason"),
                trustworthy_reason: reason(credibility, "trustworthyReason"),
                objective_reason: reason(credibility, "objectiveReason"),
            },
            political_bias: normalize_bias(raw.get("politicalBias")),
            structure_analysis: StructureAnalysis {
                format,
                paragraphs,
                readability,
            },
            sender: SenderInfo::default(),
            metadata: None,
        }
    }

    // =========================================================================
    // Strict validation
    // =========================================================================

    /// All-or-nothing acceptance of a raw result.
    pub fn validate(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::NotAnObject);
        }

        let credibility = section(raw, "credibility")?;
        let structure = section(raw, "structureAnalysis")?;

        let political_bias = match raw.get("politicalBias") {
            Some(value) => ranged(value, "politicalBias", BIAS_RANGE)?,
            None if raw.get("political").is_some() => {
                return Err(ValidationError::UnsupportedSchema(
                    "two-score political section (v1); expected signed politicalBias",
                ))
            }
            None => return Err(ValidationError::MissingSection("politicalBias")),
        };

        let score = |name: &str| -> Result<f64, ValidationError> {
            let path = format!("credibility.{}", name);
            let value = credibility
                .get(name)
                .ok_or_else(|| ValidationError::MissingField(path.clone()))?;
            ranged(value, &path, SCORE_RANGE)
        };

        let credibility = Credibility {
            deceptive: score("deceptive")?,
            fake_news: score("fakeNews")?,
            trustworthy: score("trustworthy")?,
            objective: score("objective")?,
            deceptive_reason: reason(Some(credibility), "deceptiveReason"),
            fake_news_reason: reason(Some(credibility), "fakeNewsReason"),
            trustworthy_reason: reason(Some(credibility), "trustworthyReason"),
            objective_reason: reason(Some(credibility), "objectiveReason"),
        };

        let format = enum_field(structure, "format", Format::parse)?;
        let readability = enum_field(structure, "readability", Readability::parse)?;
        let paragraphs = paragraphs(structure)?;

        Ok(Self {
            credibility,
            political_bias,
            structure_analysis: StructureAnalysis {
                format,
                paragraphs,
                readability,
            },
            sender: SenderInfo::default(),
            metadata: None,
        })
    }

    pub fn with_sender(mut self, sender: SenderInfo) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_metadata(mut self, metadata: AnalysisMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

fn field<'a>(section: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    section.and_then(|s| s.get(name))
}

fn section<'a>(raw: &'a Value, name: &'static str) -> Result<&'a Value, ValidationError> {
    raw.get(name)
        .filter(|v| v.is_object())
        .ok_or(ValidationError::MissingSection(name))
}

fn ranged(value: &Value, field: &str, (min, max): (f64, f64)) -> Result<f64, ValidationError> {
    let number = value
        .as_f64()
        .ok_or_else(|| ValidationError::NotNumeric(field.to_string()))?;
    if !(min..=max).contains(&number) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: number,
            min,
            max,
        });
    }
    Ok(number)
}

fn enum_field<T>(
    structure: &Value,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let path = format!("structureAnalysis.{}", name);
    let value = structure
        .get(name)
        .ok_or_else(|| ValidationError::MissingField(path.clone()))?;
    value
        .as_str()
        .and_then(parse)
        .ok_or_else(|| ValidationError::InvalidEnum {
            field: path,
            value: value.to_string(),
        })
}

fn paragraphs(structure: &Value) -> Result<u32, ValidationError> {
    let value = structure
        .get("paragraphs")
        .ok_or_else(|| ValidationError::MissingField("structureAnalysis.paragraphs".into()))?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(ValidationError::InvalidParagraphs);
    }
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n >= 1.0 && n <= u32::MAX as f64 => Ok(n as u32),
        Some(_) => Err(ValidationError::InvalidParagraphs),
        None => Err(ValidationError::NotNumeric(
            "structureAnalysis.paragraphs".into(),
        )),
    }
}

fn reason(section: Option<&Value>, name: &str) -> String {
    let text = section
        .and_then(|s| s.get(name))
        .and_then(Value::as_str)
        .unwrap_or_default();
    non_empty_or(text, NO_EXPLANATION)
}

/// `value` as given unless it is blank.
fn non_empty_or(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
