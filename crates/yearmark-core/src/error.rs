//! Error types for the mnemonic pipeline.
//!
//! Uses `thiserror` for typed errors at each external boundary. Only
//! [`EncodeError`] and configuration errors ever reach a caller; fetch and
//! generation errors are translated into fallback values inside the
//! resolver and generator.

/// A free-form year string could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The input contained no characters after trimming.
    #[error("year is empty")]
    Empty,

    /// A character other than `0`-`9` was found.
    #[error("non-digit character {found:?} at position {position}")]
    NonDigit {
        /// The offending character.
        found: char,
        /// Zero-based character position within the trimmed input.
        position: usize,
    },
}

/// Fetching a reference document failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The body exceeded the accepted document size.
    #[error("document larger than {limit} bytes")]
    TooLarge {
        /// The byte limit that was exceeded.
        limit: usize,
    },
}

/// Rendering a prompt template failed.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// A template could not be read from disk.
    #[error("failed to read template {path}: {source}")]
    Io {
        /// Path of the template file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),
}

/// The text-generation capability failed.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The request could not be sent or the response could not be read.
    #[error("{backend} request failed: {message}")]
    Request {
        /// Backend name.
        backend: &'static str,
        /// Transport-level failure description.
        message: String,
    },

    /// The provider answered with a non-2xx status (auth, quota, ...).
    #[error("{backend} returned {status}: {body}")]
    Status {
        /// Backend name.
        backend: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, for the error message.
        body: String,
    },

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The provider returned only whitespace.
    #[error("the model returned an empty response")]
    Empty,

    /// The call exceeded the configured deadline.
    #[error("generation timed out after {0} ms")]
    Timeout(u128),

    /// The prompt could not be built.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// The event catalog could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse the catalog YAML.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Building the production pipeline from configuration failed.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The HTTP client for reference lookups could not be built.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The prompt templates could not be loaded.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
