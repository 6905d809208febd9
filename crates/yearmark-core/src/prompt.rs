//! Prompt template loading and rendering via `minijinja`.
//!
//! Built-in templates are compiled into the crate. Operators can replace
//! them by pointing [`PromptBuilder::from_dir`] at a directory holding
//! `system.j2` and `user.j2`, which are read once at construction.

use std::path::Path;

use minijinja::{Environment, context};
use yearmark_types::EncodedYear;

use crate::digits;
use crate::error::PromptError;

const SYSTEM_TEMPLATE: &str = include_str!("../templates/system.j2");
const USER_TEMPLATE: &str = include_str!("../templates/user.j2");

/// The complete rendered prompt ready to send to a text generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message establishing the assistant's role.
    pub system: String,
    /// User message carrying the event, letters, and instructions.
    pub user: String,
}

/// Renders mnemonic prompts from templates.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl std::fmt::Debug for PromptBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptBuilder").finish_non_exhaustive()
    }
}

impl PromptBuilder {
    /// A builder using the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Template`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self, PromptError> {
        let mut env = Environment::new();
        env.add_template("system", SYSTEM_TEMPLATE)
            .map_err(|e| PromptError::Template(format!("failed to add system template: {e}")))?;
        env.add_template("user", USER_TEMPLATE)
            .map_err(|e| PromptError::Template(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// A builder loading `system.j2` and `user.j2` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] if a file is missing or unreadable, or
    /// [`PromptError::Template`] if it fails to compile.
    pub fn from_dir(dir: &Path) -> Result<Self, PromptError> {
        let system = load_template(dir, "system.j2")?;
        let user = load_template(dir, "user.j2")?;

        let mut env = Environment::new();
        env.add_template_owned("system", system)
            .map_err(|e| PromptError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("user", user)
            .map_err(|e| PromptError::Template(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the prompt for one event.
    ///
    /// The description is embedded as given, even when empty.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Template`] if rendering fails.
    pub fn build(
        &self,
        event: &str,
        year: u32,
        letters: &EncodedYear,
        description: &str,
    ) -> Result<RenderedPrompt, PromptError> {
        let ctx = context! {
            event => event,
            year => year,
            description => description,
            letters => letters.spaced(),
            count => letters.len(),
            mapping => digits::table(),
        };

        let system = self.render("system", &ctx)?;
        let user = self.render("user", &ctx)?;
        Ok(RenderedPrompt { system, user })
    }

    fn render(&self, name: &str, ctx: &minijinja::Value) -> Result<String, PromptError> {
        self.env
            .get_template(name)
            .map_err(|e| PromptError::Template(format!("missing {name} template: {e}")))?
            .render(ctx)
            .map_err(|e| PromptError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &Path, filename: &str) -> Result<String, PromptError> {
    let path = dir.join(filename);
    std::fs::read_to_string(&path).map_err(|source| PromptError::Io {
        path: path.display().to_string(),
        source,
    })
}
