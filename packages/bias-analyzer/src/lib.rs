//! Email bias analyzer.
//!
//! Pulls the open message out of a webmail page, sends it to an LLM for a
//! credibility, political-leaning and structure rating, and renders the
//! result. The page reader, the analyzer and the user-facing trigger run as
//! separate roles that only talk through JSON messages (see [`relay`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bias_analyzer::{analyzer::Analyzer, credentials::Credentials};
//!
//! let analyzer = Analyzer::from_credentials(&Credentials::new("sk-...", "gpt-4o"), None);
//! let result = analyzer.analyze_bias("Dear reader, ...").await?;
//! println!("{}", result.political_bias);
//! ```

pub mod analyzer;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod model;
pub mod presenter;
pub mod relay;
pub mod testing;

pub use analyzer::Analyzer;
pub use config::Config;
pub use error::{AnalysisError, RelayError, Result, ValidationError};
pub use extractor::Extractor;
pub use model::{AnalysisResult, EmailContent};
pub use presenter::PanelState;
