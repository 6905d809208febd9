//! Year mnemonics for historical events.
//!
//! A year's trailing digits are mapped to letters, the event's description
//! is looked up on a reference site, and a language model is asked to weave
//! the letters into a phrase about the event.
//!
//! # Modules
//!
//! - [`digits`] -- Fixed digit-to-letter table and year encoding.
//! - [`catalog`] -- Curated year -> event names picklist.
//! - [`fetch`] -- [`DocumentFetcher`] seam and the HTTP implementation.
//! - [`resolver`] -- Description and reference link lookup with fallback.
//! - [`prompt`] -- `minijinja` prompt templates.
//! - [`llm`] -- [`TextGenerator`] seam and the HTTP LLM backends.
//! - [`generator`] -- The end-to-end pipeline producing [`MnemonicResult`].
//! - [`config`] -- YAML + environment configuration.
//! - [`error`] -- Error types for each external boundary.
//!
//! [`DocumentFetcher`]: fetch::DocumentFetcher
//! [`TextGenerator`]: llm::TextGenerator
//! [`MnemonicResult`]: yearmark_types::MnemonicResult

pub mod catalog;
pub mod config;
pub mod digits;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod llm;
pub mod prompt;
pub mod resolver;

// Re-export primary types at crate root.
pub use catalog::EventCatalog;
pub use config::{AppConfig, BackendType, ConfigError};
pub use digits::{encode, encode_str};
pub use error::{CatalogError, EncodeError, FetchError, GenerationError, PromptError, SetupError};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use generator::{MISSING_CREDENTIAL_MESSAGE, MnemonicGenerator};
pub use llm::{LlmBackend, TextGenerator, create_backend};
pub use prompt::{PromptBuilder, RenderedPrompt};
pub use resolver::EventInfoResolver;
pub use yearmark_types::{DigitLetter, EncodedYear, EventInfo, MnemonicResult, MnemonicStatus};
