use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for the dictionary language selector
///
/// The selector offers a small fixed set of codes, exactly as they appear as
/// top-level keys in dictionary files. The first code is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelector {
    options: Vec<String>,
    selected: usize,
}

impl LanguageSelector {
    /// Create a selector over `options`, selecting the first one
    pub fn new<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(anyhow!("Language selector needs at least one option"));
        }

        Ok(Self { options, selected: 0 })
    }

    /// Currently selected code
    pub fn current(&self) -> &str {
        &self.options[self.selected]
    }

    /// The code selected when the user makes no choice
    pub fn default_code(&self) -> &str {
        &self.options[0]
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Select `code`. Matching ignores ASCII case, the stored spelling is kept.
    pub fn select(&mut self, code: &str) -> Result<&str> {
        let code = code.trim();
        let index = self
            .options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                anyhow!(
                    "Unsupported language: {}. Available: {}",
                    code,
                    self.options.join(", ")
                )
            })?;

        self.selected = index;
        Ok(self.current())
    }
}

/// Get the English language name for an ISO 639-1 or ISO 639-3 code
pub fn get_language_name(code: &str) -> Option<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    }?;

    Some(language.to_name().to_string())
}

/// Human-readable label such as `RU (Russian)`, or just the code when unknown
pub fn display_label(code: &str) -> String {
    match get_language_name(code) {
        Some(name) => format!("{} ({})", code, name),
        None => code.to_string(),
    }
}
