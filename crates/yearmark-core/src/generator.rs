//! Mnemonic generation pipeline.
//!
//! Orchestrates one request end to end:
//! 1. Check that a text-generation capability is configured
//! 2. Resolve the event description and reference link
//! 3. Encode the year into letters
//! 4. Render the prompt
//! 5. Call the text generator (single attempt, with a deadline)
//! 6. Normalize the reply or the failure into a [`MnemonicResult`]
//!
//! [`MnemonicGenerator::generate`] never returns an error: every failure
//! after the credential check becomes an `Error: ...` result so callers
//! always have something to render.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};
use yearmark_types::{EventInfo, MnemonicResult};

use crate::catalog::EventCatalog;
use crate::config::AppConfig;
use crate::digits;
use crate::error::{GenerationError, SetupError};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::llm::{LlmBackend, TextGenerator, create_backend};
use crate::prompt::PromptBuilder;
use crate::resolver::EventInfoResolver;

/// Status text returned when no API key is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "No text-generation API key is configured. \
     Set YEARMARK_API_KEY (or OPENAI_API_KEY) to generate mnemonics.";

/// Default cap on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default deadline for one generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces mnemonic phrases for (event, year) pairs.
///
/// The text-generation capability is fixed at construction. `None` means no
/// credential is configured, and every request returns the missing-credential
/// status without touching the network.
#[derive(Debug)]
pub struct MnemonicGenerator<F = HttpFetcher, G = LlmBackend> {
    resolver: EventInfoResolver<F>,
    prompt: PromptBuilder,
    backend: Option<G>,
    max_tokens: u32,
    timeout: Duration,
}

impl MnemonicGenerator {
    /// Build the production pipeline: HTTP lookups and the configured backend.
    ///
    /// A missing API key is not an error here; it surfaces in each result.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the HTTP client or the prompt templates
    /// cannot be set up.
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let fetcher = HttpFetcher::from_config(&config.lookup)?;
        let resolver = EventInfoResolver::new(fetcher, config.lookup.base_url.clone());
        let prompt = match &config.prompt.templates_dir {
            Some(dir) => PromptBuilder::from_dir(dir)?,
            None => PromptBuilder::new()?,
        };
        let backend = create_backend(&config.llm);

        match &backend {
            Some(b) => info!(
                backend = b.name(),
                model = config.llm.model,
                "text generation backend configured"
            ),
            None => warn!("no API key configured, mnemonics will not be generated"),
        }

        Ok(Self::new(resolver, prompt, backend)
            .with_max_tokens(config.llm.max_tokens)
            .with_timeout(config.llm.timeout()))
    }
}

impl<F: DocumentFetcher, G: TextGenerator> MnemonicGenerator<F, G> {
    /// Assemble a generator from its parts.
    pub const fn new(
        resolver: EventInfoResolver<F>,
        prompt: PromptBuilder,
        backend: Option<G>,
    ) -> Self {
        Self {
            resolver,
            prompt,
            backend,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Set the generated-token cap.
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the deadline for one generation call.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when a text-generation capability is configured.
    pub const fn has_credential(&self) -> bool {
        self.backend.is_some()
    }

    /// The resolver used for description lookups.
    pub const fn resolver(&self) -> &EventInfoResolver<F> {
        &self.resolver
    }

    /// Generate a mnemonic for `event` in `year`.
    pub async fn generate(&self, event: &str, year: u32) -> MnemonicResult {
        let Some(backend) = &self.backend else {
            return MnemonicResult::missing_credential(MISSING_CREDENTIAL_MESSAGE);
        };

        let info = self.resolver.resolve(event).await;
        self.generate_from(backend, event, year, info).await
    }

    /// Generate a mnemonic using a caller-supplied description.
    ///
    /// Skips the reference lookup; the link is still the derived one.
    pub async fn generate_with_description(
        &self,
        event: &str,
        year: u32,
        description: &str,
    ) -> MnemonicResult {
        let Some(backend) = &self.backend else {
            return MnemonicResult::missing_credential(MISSING_CREDENTIAL_MESSAGE);
        };

        let info = EventInfo {
            description: description.to_owned(),
            source_link: self.resolver.reference_link(event),
        };
        self.generate_from(backend, event, year, info).await
    }

    /// Generate a mnemonic, preferring the catalog's curated description.
    ///
    /// Events without a curated description go through the normal lookup.
    pub async fn generate_cataloged(
        &self,
        catalog: &EventCatalog,
        event: &str,
        year: u32,
    ) -> MnemonicResult {
        match catalog.description_of(event) {
            Some(description) => {
                debug!(event = event, "using curated description");
                self.generate_with_description(event, year, description).await
            }
            None => self.generate(event, year).await,
        }
    }

    async fn generate_from(
        &self,
        backend: &G,
        event: &str,
        year: u32,
        info: EventInfo,
    ) -> MnemonicResult {
        let outcome = self.call_backend(backend, event, year, &info.description).await;
        match outcome {
            Ok(text) => {
                info!(
                    event = event,
                    year = year,
                    backend = backend.name(),
                    "mnemonic generated"
                );
                MnemonicResult::generated(text, info)
            }
            Err(e) => {
                warn!(
                    event = event,
                    year = year,
                    backend = backend.name(),
                    error = %e,
                    "mnemonic generation failed"
                );
                MnemonicResult::failed(e)
            }
        }
    }

    /// Encode, render, and call the backend. Returns the trimmed reply.
    async fn call_backend(
        &self,
        backend: &G,
        event: &str,
        year: u32,
        description: &str,
    ) -> Result<String, GenerationError> {
        let letters = digits::encode(year);
        let prompt = self.prompt.build(event, year, &letters, description)?;

        debug!(
            event = event,
            year = year,
            letters = letters.spaced(),
            max_tokens = self.max_tokens,
            "requesting mnemonic"
        );

        let reply = timeout(self.timeout, backend.complete(&prompt, self.max_tokens))
            .await
            .map_err(|_elapsed| GenerationError::Timeout(self.timeout.as_millis()))??;

        let text = reply.trim();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::FetchError;
    use crate::prompt::RenderedPrompt;

    struct OfflineFetcher;

    impl DocumentFetcher for OfflineFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Network("offline".to_owned()))
        }
    }

    /// Replies with a fixed outcome and counts calls.
    struct ScriptedGenerator {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        const fn new(reply: Result<&'static str, &'static str>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        async fn complete(
            &self,
            _prompt: &RenderedPrompt,
            _max_tokens: u32,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(text) => Ok(text.to_owned()),
                Err(status) => Err(GenerationError::Status {
                    backend: "scripted",
                    status: 429,
                    body: status.to_owned(),
                }),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Never answers; used to exercise the deadline.
    struct StalledGenerator;

    impl TextGenerator for StalledGenerator {
        async fn complete(
            &self,
            _prompt: &RenderedPrompt,
            _max_tokens: u32,
        ) -> Result<String, GenerationError> {
            std::future::pending::<()>().await;
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    fn generator<G: TextGenerator>(backend: Option<G>) -> MnemonicGenerator<OfflineFetcher, G> {
        let prompt = PromptBuilder::new().unwrap();
        let resolver = EventInfoResolver::new(OfflineFetcher, "https://en.wikipedia.org/wiki");
        MnemonicGenerator::new(resolver, prompt, backend)
    }

    #[tokio::test]
    async fn missing_credential_returns_status_without_calling() {
        let g = generator::<ScriptedGenerator>(None);
        assert!(!g.has_credential());
        let result = g.generate("Gaspee Affair", 1772).await;
        assert_eq!(result.mnemonic_text, MISSING_CREDENTIAL_MESSAGE);
        assert!(result.description.is_empty());
        assert!(result.source_link.is_empty());
        assert!(!result.is_generated());
    }

    #[tokio::test]
    async fn success_trims_reply_and_keeps_event_info() {
        let g = generator(Some(ScriptedGenerator::new(Ok("\n  Gallant Gunners Torched  \n"))));
        let result = g.generate("Gaspee Affair", 1772).await;
        assert_eq!(result.mnemonic_text, "Gallant Gunners Torched");
        assert_eq!(
            result.description,
            "The Gaspee Affair was a significant historical event."
        );
        assert_eq!(result.source_link, "https://en.wikipedia.org/wiki/Gaspee_Affair");
        assert!(result.is_generated());
    }

    #[tokio::test]
    async fn backend_failure_becomes_error_result() {
        let g = generator(Some(ScriptedGenerator::new(Err("rate limited"))));
        let result = g.generate("Moon Landing", 1969).await;
        assert!(result.mnemonic_text.starts_with("Error:"));
        assert!(result.mnemonic_text.contains("rate limited"));
        assert!(result.description.is_empty());
        assert!(result.source_link.is_empty());
    }

    #[tokio::test]
    async fn single_attempt_per_request() {
        let g = generator(Some(ScriptedGenerator::new(Err("boom"))));
        let _ = g.generate("Moon Landing", 1969).await;
        let calls = g.backend.as_ref().map(|b| b.calls.load(Ordering::SeqCst));
        assert_eq!(calls, Some(1));
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let g = generator(Some(ScriptedGenerator::new(Ok("   "))));
        let result = g.generate("Moon Landing", 1969).await;
        assert_eq!(
            result.mnemonic_text,
            "Error: the model returned an empty response"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_backend_times_out() {
        let g = generator(Some(StalledGenerator));
        let g = g.with_timeout(Duration::from_millis(250));
        let result = g.generate("Moon Landing", 1969).await;
        assert_eq!(result.mnemonic_text, "Error: generation timed out after 250 ms");
    }

    #[tokio::test]
    async fn supplied_description_skips_lookup() {
        let g = generator(Some(ScriptedGenerator::new(Ok("Proud Giants Pace"))));
        let result = g
            .generate_with_description(
                "Moon Landing",
                1969,
                "Apollo 11 landed the first humans on the Moon.",
            )
            .await;
        assert_eq!(result.description, "Apollo 11 landed the first humans on the Moon.");
        assert_eq!(result.source_link, "https://en.wikipedia.org/wiki/Moon_Landing");
    }
}
