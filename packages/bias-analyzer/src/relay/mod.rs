//! Message-passing between the three roles: the trigger, the extractor host
//! next to the page, and the analyzer host holding the credentials.

pub mod analyzer_host;
pub mod channel;
pub mod extractor_host;
pub mod protocol;
pub mod trigger;

pub use analyzer_host::AnalyzerHost;
pub use channel::{channel, Envelope, Inbox, Port};
pub use extractor_host::ExtractorHost;
pub use protocol::{BackgroundRequest, BackgroundResponse, ContentRequest, ContentResponse};
pub use trigger::Trigger;

/// Queue depth for each role's inbox.
pub const INBOX_CAPACITY: usize = 16;
