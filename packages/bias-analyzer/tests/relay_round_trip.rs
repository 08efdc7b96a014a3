//! Full trigger → extractor host → analyzer host flow over the relay.

use std::sync::Arc;

use bias_analyzer::analyzer::prompts::EXAMPLE_RESPONSE;
use bias_analyzer::analyzer::Analyzer;
use bias_analyzer::extractor::Extractor;
use bias_analyzer::model::{Format, Readability};
use bias_analyzer::presenter::{self, PanelState};
use bias_analyzer::relay::{self, AnalyzerHost, ExtractorHost, Trigger};
use bias_analyzer::testing::ScriptedBackend;
use bias_analyzer::RelayError;
use tokio::sync::Notify;

const PAGE: &str = r#"<html><head><title>Mail</title></head><body>
  <h2 data-thread-perm-id="t1">Test</h2>
  <div role="main">
    <div data-message-id="123">
      <span email="a@b.com">Ann Bee</span>
      <div dir="ltr">Hello world</div>
    </div>
  </div>
</body></html>"#;

struct Harness {
    trigger: Trigger,
    backend: Arc<ScriptedBackend>,
    extractor_task: tokio::task::JoinHandle<()>,
}

fn harness(page: &str, backend: ScriptedBackend) -> Harness {
    let backend = Arc::new(backend);
    let analyzer = Arc::new(Analyzer::new(backend.clone(), "gpt-test"));

    let (content, content_inbox) = relay::channel("content", relay::INBOX_CAPACITY);
    let (background, background_inbox) = relay::channel("background", relay::INBOX_CAPACITY);
    let extractor_task = ExtractorHost::new(Extractor::default(), page).spawn(content_inbox);
    AnalyzerHost::new(analyzer).spawn(background_inbox);

    Harness {
        trigger: Trigger::new(content, background),
        backend,
        extractor_task,
    }
}

#[tokio::test]
async fn analyzes_the_open_email() {
    let h = harness(PAGE, ScriptedBackend::new().with_reply(EXAMPLE_RESPONSE));

    let result = h.trigger.run().await.unwrap();

    assert_eq!(result.structure_analysis.format, Format::Standard);
    assert_eq!(result.structure_analysis.paragraphs, 4);
    assert_eq!(result.structure_analysis.readability, Readability::High);
    assert_eq!(result.sender.email, "a@b.com");
    assert_eq!(result.sender.name, "Ann Bee");

    let meta = result.metadata.as_ref().unwrap();
    assert_eq!(meta.email_id, "123");
    assert_eq!(meta.subject, "Test");
    assert_eq!(meta.content_length, 11);

    let requests = h.backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].messages[1].content.contains("Hello world"));
}

#[tokio::test]
async fn renders_one_terminal_state() {
    let h = harness(PAGE, ScriptedBackend::new().with_reply(EXAMPLE_RESPONSE));

    let state = h.trigger.run_to_panel().await;
    assert!(matches!(state, PanelState::Complete(_)));

    let text = presenter::render(&state);
    assert!(text.contains("Format: Standard"));
    assert!(!text.contains("Analyzing email"));
}

#[tokio::test]
async fn no_open_email_never_reaches_the_analyzer() {
    let h = harness("<html><body><p>Inbox</p></body></html>", ScriptedBackend::new());

    let err = tokio_test::assert_err!(h.trigger.run().await);

    assert_eq!(err, RelayError::NotFound);
    assert_eq!(err.to_string(), "No email found. Open an email to analyze.");
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn extractor_host_gone_is_transport_failure() {
    let h = harness(PAGE, ScriptedBackend::new());
    h.extractor_task.abort();
    let _ = h.extractor_task.await;

    let err = h.trigger.run().await.unwrap_err();

    assert!(matches!(err, RelayError::Transport(_)));
    assert!(err.to_string().ends_with("Please try again."));
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn invalid_model_output_is_reported_not_shown() {
    let h = harness(PAGE, ScriptedBackend::new().with_reply(r#"{"credibility": {}}"#));

    match h.trigger.run_to_panel().await {
        PanelState::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn network_failure_reaches_the_trigger() {
    let h = harness(PAGE, ScriptedBackend::new().with_network_error("connection refused"));

    let err = h.trigger.run().await.unwrap_err();
    match &err {
        RelayError::Analysis(message) => assert!(message.starts_with("Network error:")),
        other => panic!("expected analysis failure, got {:?}", other),
    }
    assert_eq!(h.backend.requests().len(), 1);
    assert!(!h.trigger.is_running());
}

#[tokio::test]
async fn overlapping_run_is_busy() {
    let gate = Arc::new(Notify::new());
    let backend = ScriptedBackend::new()
        .with_reply(EXAMPLE_RESPONSE)
        .with_gate(gate.clone());
    let h = Arc::new(harness(PAGE, backend));

    let first = {
        let h = h.clone();
        tokio::spawn(async move { h.trigger.run().await })
    };

    // Wait until the first run has reached the backend.
    while h.backend.requests().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(h.trigger.is_running());
    assert_eq!(h.trigger.run().await.unwrap_err(), RelayError::Busy);

    gate.notify_one();
    assert!(first.await.unwrap().is_ok());
    assert_eq!(h.backend.requests().len(), 1);
    assert!(!h.trigger.is_running());
}

#[tokio::test]
async fn check_connection_round_trips() {
    let h = harness(PAGE, ScriptedBackend::new());
    tokio_test::assert_ok!(h.trigger.check_connection().await);
    assert!(h.backend.requests().is_empty());
}
