//! Event description and reference link resolution.
//!
//! The resolver derives a reference page URL from the event name, fetches
//! it, and pulls out the first substantial paragraph. Every failure path
//! degrades to a synthesized description so the mnemonic pipeline always
//! has something to ground the prompt on. Errors never leave [`resolve`].
//!
//! [`resolve`]: EventInfoResolver::resolve

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use yearmark_types::EventInfo;

use crate::fetch::DocumentFetcher;

/// Default reference page base URL.
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki";

/// A paragraph must be longer than this (in characters, after trimming) to
/// be used as a description. Shorter blocks are infobox or hatnote debris.
pub const MIN_PARAGRAPH_CHARS: usize = 100;

/// Descriptions longer than this are cut and get [`ELLIPSIS`] appended.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Marker appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

/// Citation markers such as `[12]`.
#[allow(clippy::expect_used)]
static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("citation pattern is valid"));

/// Resolves an event name into an [`EventInfo`].
#[derive(Debug, Clone)]
pub struct EventInfoResolver<F> {
    fetcher: F,
    base_url: String,
}

impl<F: DocumentFetcher> EventInfoResolver<F> {
    /// Create a resolver over `fetcher` using `base_url` for reference links.
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { fetcher, base_url }
    }

    /// The reference link for an event: spaces become underscores.
    pub fn reference_link(&self, event: &str) -> String {
        format!("{}/{}", self.base_url, event.trim().replace(' ', "_"))
    }

    /// Fetch a description for `event`, falling back to a synthesized one.
    ///
    /// The returned link is always the derived reference link, whether or
    /// not the page could be used.
    pub async fn resolve(&self, event: &str) -> EventInfo {
        let event = event.trim();
        let source_link = self.reference_link(event);

        let description = match self.fetcher.fetch(&source_link).await {
            Ok(html) => extract_summary(&html).unwrap_or_else(|| {
                debug!(
                    event = event,
                    url = source_link,
                    "no qualifying paragraph, using fallback description"
                );
                fallback_description(event)
            }),
            Err(e) => {
                warn!(
                    event = event,
                    url = source_link,
                    error = %e,
                    "reference lookup failed, using fallback description"
                );
                fallback_description(event)
            }
        };

        EventInfo {
            description,
            source_link,
        }
    }
}

/// The description used when no usable paragraph could be fetched.
pub fn fallback_description(event: &str) -> String {
    format!("The {event} was a significant historical event.")
}

/// Pull the first substantial paragraph out of an HTML document.
///
/// Selects the first `<p>` whose trimmed text exceeds
/// [`MIN_PARAGRAPH_CHARS`], strips citation markers, trims, and truncates
/// to [`MAX_DESCRIPTION_CHARS`] plus [`ELLIPSIS`].
pub fn extract_summary(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let paragraph = Selector::parse("p").ok()?;

    let text = document
        .select(&paragraph)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.trim().chars().count() > MIN_PARAGRAPH_CHARS)?;

    let cleaned = CITATION.replace_all(&text, "");
    Some(truncate(cleaned.trim()))
}

/// Cut `text` to [`MAX_DESCRIPTION_CHARS`] characters, marking the cut.
fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}
