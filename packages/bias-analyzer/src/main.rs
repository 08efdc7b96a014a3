//! Analyze the email open in a saved webmail page.
//!
//! Runs the whole flow once: the page is served by an extractor host, the
//! analysis by an analyzer host, and the trigger prints the final panel.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use bias_analyzer::analyzer::Analyzer;
use bias_analyzer::config::Config;
use bias_analyzer::credentials::{self, BundledConfig, MemoryCredentialStore};
use bias_analyzer::extractor::Extractor;
use bias_analyzer::presenter::{self, PanelState};
use bias_analyzer::relay::{self, AnalyzerHost, ExtractorHost, Trigger};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bias-analyzer")]
#[command(about = "Rate the open email for bias and credibility")]
struct Cli {
    /// Saved webmail page (HTML) with an email open
    page: PathBuf,

    /// Show the diagnostic log under the result
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,bias_analyzer=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let page_html = std::fs::read_to_string(&cli.page)
        .with_context(|| format!("Failed to read page {}", cli.page.display()))?;

    let store = MemoryCredentialStore::new();
    let bundled = BundledConfig::new(config.bundled_config_path.clone());
    let credentials = credentials::resolve(&store, &bundled)
        .await
        .context("Failed to load OpenAI credentials")?;

    let analyzer = Arc::new(Analyzer::from_credentials(
        &credentials,
        config.openai_base_url.as_deref(),
    ));

    let (content_port, content_inbox) = relay::channel("content", relay::INBOX_CAPACITY);
    let (background_port, background_inbox) = relay::channel("background", relay::INBOX_CAPACITY);
    let extractor_task = ExtractorHost::new(Extractor::default(), page_html).spawn(content_inbox);
    let analyzer_task = AnalyzerHost::new(analyzer).spawn(background_inbox);

    let trigger = Trigger::new(content_port, background_port);
    eprint!("{}", presenter::render(&PanelState::Loading));
    let state = trigger.run_to_panel().await;
    print!("{}", presenter::render(&state));

    if cli.debug {
        println!();
        println!("Debug log");
        println!("{}", trigger.debug_log().render());
    }

    drop(trigger);
    extractor_task.abort();
    analyzer_task.abort();

    Ok(match state {
        PanelState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
