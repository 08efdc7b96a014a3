//! A parsed page and the sub-documents it embeds.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Something selectors can be run against.
#[derive(Clone, Copy)]
pub enum Scope<'a> {
    Document(&'a Html),
    Element(ElementRef<'a>),
}

impl<'a> Scope<'a> {
    /// All matches of `selector`, in document order.
    pub fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        match self {
            Scope::Document(doc) => doc.select(selector).collect(),
            Scope::Element(el) => el.select(selector).collect(),
        }
    }

    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        match self {
            Scope::Document(doc) => doc.select(selector).next(),
            Scope::Element(el) => el.select(selector).next(),
        }
    }
}

/// An embedded frame as seen from the top document.
pub enum SubDocument {
    /// Inline (`srcdoc`) frame, same origin, readable
    Accessible(Html),

    /// Frame loaded from elsewhere; reading it is not permitted
    Denied { src: String },
}

/// Top document plus its frames.
pub struct Page {
    pub document: Html,
    pub frames: Vec<SubDocument>,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let frames = sub_documents(&document);
        Self { document, frames }
    }

    /// Readable documents in lookup order: the top document, then each
    /// accessible frame. Denied frames are skipped as "no match".
    pub fn documents(&self) -> impl Iterator<Item = &Html> {
        std::iter::once(&self.document).chain(self.frames.iter().filter_map(|frame| match frame {
            SubDocument::Accessible(doc) => Some(doc),
            SubDocument::Denied { src } => {
                debug!(src = %src, "Frame not accessible, skipping");
                None
            }
        }))
    }
}

fn sub_documents(document: &Html) -> Vec<SubDocument> {
    let Ok(iframes) = Selector::parse("iframe") else {
        return Vec::new();
    };

    document
        .select(&iframes)
        .map(|frame| {
            let attrs = frame.value();
            match attrs.attr("srcdoc") {
                Some(srcdoc) => SubDocument::Accessible(Html::parse_document(srcdoc)),
                None => SubDocument::Denied {
                    src: attrs.attr("src").unwrap_or_default().to_string(),
                },
            }
        })
        .collect()
}
