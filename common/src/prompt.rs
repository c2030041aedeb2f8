// common/src/prompt.rs
use anyhow::{Context, Result};
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};

/// The interactive questions a swap session asks.
pub trait Prompter {
    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
    fn input(&mut self, prompt: &str) -> Result<String>;
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal prompts on stderr.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        DialoguerPrompter { theme: ColorfulTheme::default(), term: Term::stderr() }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (type to filter)"))
            .items(items)
            .default(0)
            .max_length(10)
            .interact_on(&self.term)
            .context("Failed to get user selection")
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text_on(&self.term)
            .context("Failed to read input")
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact_on(&self.term)
            .context("Failed to read confirmation")
    }
}
