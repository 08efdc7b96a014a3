//! Ordered selector lists.
//!
//! The lists are data: they track the webmail markup and change with it.
//! The extraction algorithm only ever walks them in order.

use scraper::Selector;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Selector lists for each field, most specific first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Message container; first match wins
    pub containers: Vec<String>,

    /// Body text inside the container; longest text across all matches wins
    pub bodies: Vec<String>,

    /// Subject, looked up on the document holding the container
    pub subjects: Vec<String>,

    /// Sender element inside the container; its `email` attribute is the address
    pub senders: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            containers: strings(&[
                r#"div[role="main"] div[data-message-id]"#,
                "div[data-message-id]",
                r#"div[role="listitem"] div[data-legacy-message-id]"#,
            ]),
            bodies: strings(&[
                r#"div[dir="ltr"]"#,
                r#"div[class*="message-content"]"#,
                r#"div[aria-label*="Message Body"]"#,
                r#"div[role="textbox"]"#,
                "div.a3s",
            ]),
            subjects: strings(&["h2[data-thread-perm-id]", "h2.hP", "title"]),
            senders: strings(&["span[email]", "span.gD"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A compiled, ordered selector list.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    entries: Vec<(String, Selector)>,
}

impl SelectorChain {
    /// Compile `sources` in order. Unparseable selectors are skipped.
    pub fn compile(sources: &[String]) -> Self {
        let entries = sources
            .iter()
            .filter_map(|source| match Selector::parse(source) {
                Ok(selector) => Some((source.clone(), selector)),
                Err(e) => {
                    warn!(selector = %source, error = %e, "Skipping invalid selector");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.entries.iter().map(|(s, sel)| (s.as_str(), sel))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_all_compile() {
        let config = SelectorConfig::default();
        assert_eq!(SelectorChain::compile(&config.containers).len(), 3);
        assert_eq!(SelectorChain::compile(&config.bodies).len(), 5);
        assert_eq!(SelectorChain::compile(&config.subjects).len(), 3);
        assert_eq!(SelectorChain::compile(&config.senders).len(), 2);
    }

    #[test]
    fn invalid_selectors_are_skipped_in_order() {
        let chain = SelectorChain::compile(&strings(&["div", "[[[", "span"]));
        let kept: Vec<&str> = chain.iter().map(|(s, _)| s).collect();
        assert_eq!(kept, vec!["div", "span"]);
    }
}
