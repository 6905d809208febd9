//! Reference information resolved for an event name.

use serde::{Deserialize, Serialize};

/// A short description of an event and the reference page it came from.
///
/// The link is always the derived reference URL, even when the description
/// had to be synthesized because the page could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventInfo {
    /// Plain-text description, at most 500 characters plus an ellipsis.
    pub description: String,
    /// Reference page URL for the event.
    pub source_link: String,
}
