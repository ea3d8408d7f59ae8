//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::{parse_answer, ConfirmPrompt, OutputMode, UserInterface};

const OVERRIDE_PREFIX: &str = "STEERING_CONFIRM_";

/// UI implementation for non-interactive mode.
///
/// Questions are answered from `STEERING_CONFIRM_<KEY>` environment
/// variables when set, and with the prompt's default otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(OVERRIDE_PREFIX))
            .collect();

        Self { mode, overrides }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self { mode, overrides }
    }

    fn override_for(&self, key: &str) -> Option<bool> {
        let env_key = format!(
            "{}{}",
            OVERRIDE_PREFIX,
            key.to_uppercase().replace('-', "_")
        );
        self.overrides.get(&env_key).and_then(|v| parse_answer(v))
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            eprintln!("  → {}", hint);
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool> {
        Ok(self.override_for(&prompt.key).unwrap_or(prompt.default))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
