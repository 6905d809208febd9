//! Shared value types for the yearmark mnemonic pipeline.
//!
//! Every type here is a plain value: built fresh per request, never cached,
//! never persisted. Callers own the results they receive and thread them
//! through their own presentation layer.
//!
//! # Modules
//!
//! - [`encoding`] -- Digit/letter pairs produced by encoding a year
//! - [`event`] -- Reference information resolved for an event name
//! - [`mnemonic`] -- The normalized outcome of a generation request

pub mod encoding;
pub mod event;
pub mod mnemonic;

// Re-export all public types at crate root for convenience.
pub use encoding::{DigitLetter, EncodedYear};
pub use event::EventInfo;
pub use mnemonic::{MnemonicResult, MnemonicStatus};
