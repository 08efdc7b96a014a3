//! The user-facing role. One press of "analyze" fetches the open email from
//! the extractor host, forwards it to the analyzer host and settles into a
//! single panel state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use super::channel::Port;
use super::protocol::{BackgroundRequest, BackgroundResponse, ContentRequest, ContentResponse};
use crate::error::{RelayError, RelayResult};
use crate::model::AnalysisResult;
use crate::presenter::{DebugLog, PanelState};

pub const NO_ANALYSIS_RESPONSE: &str = "No analysis response received";

pub struct Trigger {
    content: Port,
    background: Port,
    in_flight: AtomicBool,
    log: Mutex<DebugLog>,
}

/// Holds the single-flight flag for the lifetime of one run.
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Trigger {
    pub fn new(content: Port, background: Port) -> Self {
        Self {
            content,
            background,
            in_flight: AtomicBool::new(false),
            log: Mutex::new(DebugLog::new()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one analysis. A second call while one is pending fails with
    /// [`RelayError::Busy`] and sends nothing.
    pub async fn run(&self) -> RelayResult<AnalysisResult> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            self.record_error(&RelayError::Busy);
            return Err(RelayError::Busy);
        };

        self.record_info("Analyze button clicked");
        let result = self.fetch_and_analyze().await;
        match &result {
            Ok(_) => self.record_info("Analysis displayed"),
            Err(e) => self.record_error(e),
        }
        result
    }

    /// [`Trigger::run`] folded into the terminal panel state.
    pub async fn run_to_panel(&self) -> PanelState {
        match self.run().await {
            Ok(result) => PanelState::Complete(Box::new(result)),
            Err(e) => PanelState::Failed(e.to_string()),
        }
    }

    async fn fetch_and_analyze(&self) -> RelayResult<AnalysisResult> {
        self.record_info("Getting email content");
        let content: ContentResponse = self.content.call(&ContentRequest::GetEmailContent).await?;
        let email = match content {
            ContentResponse::Email(Some(email)) => email,
            ContentResponse::Email(None) => return Err(RelayError::NotFound),
            ContentResponse::Error { error } => return Err(RelayError::Transport(error)),
        };
        self.record_info(format!(
            "Email content received: {} chars, subject \"{}\"",
            email.content_length(),
            email.subject
        ));

        self.record_info("Sending to background for analysis");
        let response: BackgroundResponse = self
            .background
            .call(&BackgroundRequest::AnalyzeEmail { data: Some(email) })
            .await?;

        if let Some(error) = response.error {
            return Err(RelayError::Analysis(error));
        }
        response
            .analysis
            .ok_or_else(|| RelayError::Transport(NO_ANALYSIS_RESPONSE.to_string()))
    }

    /// Liveness check against the analyzer host.
    pub async fn check_connection(&self) -> RelayResult<()> {
        let response: BackgroundResponse =
            self.background.call(&BackgroundRequest::CheckConnection).await?;
        match (response.status.as_deref(), response.error) {
            (Some("ok"), _) => {
                self.record_info("Background connection ok");
                Ok(())
            }
            (_, Some(error)) => Err(RelayError::Transport(error)),
            _ => Err(RelayError::Transport(format!(
                "Unexpected reply on {}",
                self.background.name()
            ))),
        }
    }

    /// Snapshot of the diagnostic log.
    pub fn debug_log(&self) -> DebugLog {
        match self.log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record_info(&self, message: impl Into<String>) {
        if let Ok(mut log) = self.log.lock() {
            log.info(message);
        }
    }

    fn record_error(&self, error: &RelayError) {
        warn!(error = %error, "Analysis failed");
        if let Ok(mut log) = self.log.lock() {
            log.error(format!("Error: {}", error));
        }
    }
}
