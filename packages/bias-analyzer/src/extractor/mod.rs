//! Reads the open email out of a rendered webmail page.
//!
//! Never fails: a page without a usable message yields `None`. Whether that
//! was a missing container or an empty body only shows in the logs.

pub mod page;
pub mod selectors;

pub use page::{Page, Scope, SubDocument};
pub use selectors::{SelectorChain, SelectorConfig};

use scraper::{ElementRef, Html};
use tracing::{debug, info};

use crate::model::email::{fallback_id, EmailContent};

/// Compiled selector chains for one webmail layout.
#[derive(Debug, Clone)]
pub struct Extractor {
    containers: SelectorChain,
    bodies: SelectorChain,
    subjects: SelectorChain,
    senders: SelectorChain,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&SelectorConfig::default())
    }
}

impl Extractor {
    pub fn new(config: &SelectorConfig) -> Self {
        Self {
            containers: SelectorChain::compile(&config.containers),
            bodies: SelectorChain::compile(&config.bodies),
            subjects: SelectorChain::compile(&config.subjects),
            senders: SelectorChain::compile(&config.senders),
        }
    }

    /// Parse `html` and extract the open email.
    pub fn extract(&self, html: &str) -> Option<EmailContent> {
        self.extract_page(&Page::parse(html))
    }

    pub fn extract_page(&self, page: &Page) -> Option<EmailContent> {
        let Some((document, container)) = self.find_container(page) else {
            debug!("No email container found");
            return None;
        };

        let Some(body) = self.longest_body(container) else {
            debug!("Email container found but no body text");
            return None;
        };

        // Subject comes from the top page, then from the frame holding the message.
        let subject = self
            .first_text(Scope::Document(&page.document), &self.subjects)
            .or_else(|| self.first_text(Scope::Document(document), &self.subjects))
            .unwrap_or_default();
        let (sender, sender_name) = self.sender(container);
        let id = message_id(container).unwrap_or_else(fallback_id);

        let email = EmailContent {
            body,
            subject,
            sender,
            sender_name,
            id,
        };

        info!(
            body_len = email.content_length(),
            subject = %email.subject,
            sender = %email.sender,
            id = %email.id,
            "Email data extracted"
        );

        Some(email)
    }

    /// First container match, trying the top document before each frame.
    fn find_container<'a>(&self, page: &'a Page) -> Option<(&'a Html, ElementRef<'a>)> {
        page.documents().find_map(|document| {
            self.containers.iter().find_map(|(source, selector)| {
                Scope::Document(document).first(selector).map(|container| {
                    debug!(selector = %source, "Found email container");
                    (document, container)
                })
            })
        })
    }

    /// Longest non-empty trimmed text over every match of every body
    /// selector. Ties keep the earlier candidate.
    fn longest_body(&self, container: ElementRef<'_>) -> Option<String> {
        let mut best: Option<(usize, String, &str)> = None;

        for (source, selector) in self.bodies.iter() {
            for candidate in Scope::Element(container).select_all(selector) {
                let text = element_text(candidate);
                if text.is_empty() {
                    continue;
                }
                let len = text.chars().count();
                if best.as_ref().map_or(true, |(best_len, _, _)| len > *best_len) {
                    best = Some((len, text, source));
                }
            }
        }

        best.map(|(len, text, source)| {
            debug!(selector = %source, body_len = len, "Selected email body");
            text
        })
    }

    fn first_text(&self, scope: Scope<'_>, chain: &SelectorChain) -> Option<String> {
        chain.iter().find_map(|(_, selector)| {
            scope
                .first(selector)
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
    }

    fn sender(&self, container: ElementRef<'_>) -> (String, String) {
        self.senders
            .iter()
            .find_map(|(_, selector)| Scope::Element(container).first(selector))
            .map(|el| {
                let address = el.value().attr("email").unwrap_or_default().to_string();
                (address, element_text(el))
            })
            .unwrap_or_default()
    }
}

/// Extract with the default Gmail selector lists.
pub fn extract_content(html: &str) -> Option<EmailContent> {
    Extractor::default().extract(html)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn message_id(container: ElementRef<'_>) -> Option<String> {
    let attrs = container.value();
    attrs
        .attr("data-message-id")
        .or_else(|| attrs.attr("data-legacy-message-id"))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
