//! The normalized outcome of a generation request.
//!
//! A [`MnemonicResult`] is always renderable: on failure the mnemonic text
//! carries a human-readable message and the description and link are empty.

use serde::{Deserialize, Serialize};

use crate::event::EventInfo;

/// How a [`MnemonicResult`] came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MnemonicStatus {
    /// The text-generation capability produced a phrase.
    Generated,
    /// No usable credential was configured; nothing was attempted.
    MissingCredential,
    /// The generation call failed; the text holds the error message.
    Failed,
}

/// Mnemonic text plus the event description and reference link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicResult {
    /// The generated phrase, or a status/error message.
    pub mnemonic_text: String,
    /// Event description used as grounding; empty on failure.
    pub description: String,
    /// Reference link for the event; empty on failure.
    pub source_link: String,
    /// Outcome classification.
    pub status: MnemonicStatus,
}

impl MnemonicResult {
    /// A successful result carrying the phrase and the event info it used.
    pub fn generated(mnemonic_text: impl Into<String>, info: EventInfo) -> Self {
        Self {
            mnemonic_text: mnemonic_text.into(),
            description: info.description,
            source_link: info.source_link,
            status: MnemonicStatus::Generated,
        }
    }

    /// A status-only result for a missing credential.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self {
            mnemonic_text: message.into(),
            description: String::new(),
            source_link: String::new(),
            status: MnemonicStatus::MissingCredential,
        }
    }

    /// A failure result; the message is prefixed with `Error: `.
    pub fn failed(cause: impl std::fmt::Display) -> Self {
        Self {
            mnemonic_text: format!("Error: {cause}"),
            description: String::new(),
            source_link: String::new(),
            status: MnemonicStatus::Failed,
        }
    }

    /// True when the text is a generated phrase rather than a message.
    pub fn is_generated(&self) -> bool {
        self.status == MnemonicStatus::Generated
    }
}
