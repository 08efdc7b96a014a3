pub mod analysis;
pub mod assessment;
pub mod email;

pub use analysis::{
    clamp_bias, clamp_score, normalize_bias, normalize_score, AnalysisMetadata, AnalysisResult,
    Credibility, Format, Readability, SenderInfo, StructureAnalysis, SCHEMA_VERSION,
};
pub use assessment::{interpret_score, Leaning, Level, OverallAssessment};
pub use email::EmailContent;
