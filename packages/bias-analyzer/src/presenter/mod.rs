//! Text rendering of the panel: progress, result, or a single error.

pub mod debug_log;

pub use debug_log::{DebugLog, LogEntry, LogLevel, MAX_LOGS};

use tracing::warn;

use crate::model::{clamp_bias, clamp_score, AnalysisResult, OverallAssessment};

const BAR_WIDTH: usize = 20;
const GAUGE_WIDTH: usize = 21;

/// What the panel shows. Exactly one state at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    Complete(Box<AnalysisResult>),
    Failed(String),
}

impl PanelState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PanelState::Loading)
    }
}

/// Score as a whole percentage, clamped for display.
pub fn percent(score: f64) -> u32 {
    (clamp_score(score) * 100.0).round() as u32
}

/// Marker position across the Left/Center/Right gauge, 0..=100.
pub fn gauge_position(bias: f64) -> f64 {
    (clamp_bias(bias) + 1.0) * 50.0
}

pub fn render(state: &PanelState) -> String {
    match state {
        PanelState::Loading => render_loading(),
        PanelState::Failed(message) => format!("❌\n{}\n", message),
        PanelState::Complete(result) => render_result(result),
    }
}

fn render_loading() -> String {
    format!("Analyzing email...\n[{}]\n", ">".repeat(BAR_WIDTH / 2))
}

fn meter(score: f64) -> String {
    let pct = percent(score);
    let filled = (pct as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        pct
    )
}

fn gauge(bias: f64) -> String {
    let position = gauge_position(bias);
    let index = ((position / 100.0) * (GAUGE_WIDTH - 1) as f64).round() as usize;
    let mut line: Vec<char> = "-".repeat(GAUGE_WIDTH).chars().collect();
    line[GAUGE_WIDTH / 2] = '|';
    line[index.min(GAUGE_WIDTH - 1)] = '*';
    line.into_iter().collect()
}

/// The result as shown: scores clamped, blank rationales replaced, unknown
/// structure literals defaulted. Sender and metadata are carried over.
pub fn display_view(result: &AnalysisResult) -> AnalysisResult {
    let view = match serde_json::to_value(result) {
        Ok(raw) => AnalysisResult::normalized(&raw),
        Err(e) => {
            warn!(error = %e, "Could not re-read result for display");
            return result.clone();
        }
    };
    let view = view.with_sender(result.sender.clone());
    match &result.metadata {
        Some(meta) => view.with_metadata(meta.clone()),
        None => view,
    }
}

fn render_result(result: &AnalysisResult) -> String {
    let view = display_view(result);
    let credibility = &view.credibility;
    let structure = &view.structure_analysis;
    let overall = OverallAssessment::of(&view);

    let mut out = String::from("Credibility Scores\n");
    out.push_str(&format!(
        "  Trustworthy Source {}\n    {}\n",
        meter(credibility.trustworthy),
        credibility.trustworthy_reason
    ));
    out.push_str(&format!(
        "  Objectivity        {}\n    {}\n",
        meter(credibility.objective),
        credibility.objective_reason
    ));
    out.push_str(&format!("  Deceptive          {}\n", meter(credibility.deceptive)));
    out.push_str(&format!("  Fake News          {}\n", meter(credibility.fake_news)));
    out.push('\n');

    out.push_str("Political Leaning\n");
    out.push_str(&format!("  {}\n", gauge(view.political_bias)));
    out.push_str("  Left      Center      Right\n");
    out.push_str(&format!(
        "  {} ({:.0}%)\n",
        overall.political_leaning.as_str(),
        gauge_position(view.political_bias)
    ));
    out.push('\n');

    out.push_str("Structure Analysis\n");
    out.push_str(&format!("  Format: {}\n", structure.format.as_str()));
    out.push_str(&format!("  Paragraphs: {}\n", structure.paragraphs));
    out.push_str(&format!("  Readability: {}\n", structure.readability.as_str()));
    out.push('\n');

    out.push_str("Overall\n");
    out.push_str(&format!("  Credibility: {}\n", overall.credibility_level.as_str()));
    out.push_str(&format!("  Objectivity: {}\n", overall.objectivity_level.as_str()));
    out.push_str(&format!("  Bias strength: {}\n", overall.bias_strength.as_str()));

    if let Some(meta) = &view.metadata {
        out.push_str(&format!(
            "\nFrom {} <{}> · \"{}\" · {} chars\n",
            view.sender.name, view.sender.email, meta.subject, meta.content_length
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::prompts::EXAMPLE_RESPONSE;
    use crate::model::analysis::NO_EXPLANATION;
    use crate::model::AnalysisMetadata;

    fn example() -> AnalysisResult {
        let raw: serde_json::Value = serde_json::from_str(EXAMPLE_RESPONSE).unwrap();
        AnalysisResult::validate(&raw).unwrap()
    }

    #[test]
    fn percent_clamps_and_rounds() {
        assert_eq!(percent(0.854), 85);
        assert_eq!(percent(1.4), 100);
        assert_eq!(percent(-0.2), 0);
    }

    #[test]
    fn gauge_maps_bias_onto_zero_to_hundred() {
        assert_eq!(gauge_position(-1.0), 0.0);
        assert_eq!(gauge_position(0.0), 50.0);
        assert_eq!(gauge_position(1.0), 100.0);
        assert_eq!(gauge_position(3.0), 100.0);
    }

    #[test]
    fn renders_full_result() {
        let result =
            example().with_metadata(AnalysisMetadata::new("123", "Test", 11));
        let text = render(&PanelState::Complete(Box::new(result)));

        assert!(text.contains("Trustworthy Source"));
        assert!(text.contains(" 85%"));
        assert!(text.contains("Clear sender and consistent tone"));
        assert!(text.contains("Format: Standard"));
        assert!(text.contains("Paragraphs: 4"));
        assert!(text.contains("Neutral (50%)"));
        assert!(text.contains("\"Test\""));
    }

    #[test]
    fn display_view_cleans_unvalidated_values() {
        let mut result = example().with_metadata(AnalysisMetadata::new("9", "Hi", 2));
        result.credibility.trustworthy = 1.4;
        result.credibility.objective_reason = "  ".into();
        result.political_bias = -2.0;

        let view = display_view(&result);
        assert_eq!(view.credibility.trustworthy, 1.0);
        assert_eq!(view.credibility.objective_reason, NO_EXPLANATION);
        assert_eq!(view.political_bias, -1.0);
        assert_eq!(view.metadata, result.metadata);
        assert_eq!(view.sender, result.sender);

        let text = render(&PanelState::Complete(Box::new(result)));
        assert!(text.contains("100%"));
        assert!(text.contains(NO_EXPLANATION));
        assert!(text.contains("Left (0%)"));
    }

    #[test]
    fn failed_shows_only_the_message() {
        let text = render(&PanelState::Failed("No email found.".into()));
        assert!(text.contains("No email found."));
        assert!(!text.contains("Credibility"));
        assert!(!text.contains("Analyzing"));
    }

    #[test]
    fn loading_is_not_terminal() {
        assert!(!PanelState::Loading.is_terminal());
        assert!(render(&PanelState::Loading).contains("Analyzing email"));
        assert!(PanelState::Failed(String::new()).is_terminal());
    }

    #[test]
    fn gauge_marks_position() {
        assert!(gauge(-1.0).starts_with('*'));
        assert!(gauge(1.0).ends_with('*'));
        assert_eq!(gauge(0.0).chars().nth(GAUGE_WIDTH / 2), Some('*'));
    }
}
