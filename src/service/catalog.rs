//! Language catalog — fetched once at startup, read-only afterwards.
//!
//! The service answers `GET /supported-languages` with a JSON object mapping
//! code → display name.  Entry order is preserved as received (serde_json is
//! built with `preserve_order`).

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::client::TranscriptionService;

/// Sentinel code meaning "let the service detect the language".
pub const AUTO_LANGUAGE: &str = "auto";

/// Display name of the static [`AUTO_LANGUAGE`] option.
pub const AUTO_LANGUAGE_NAME: &str = "Auto-detect";

// ---------------------------------------------------------------------------
// LanguageCatalog
// ---------------------------------------------------------------------------

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Ordered code → display name mapping as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct LanguageCatalog {
    entries: Vec<Language>,
}

impl TryFrom<Map<String, Value>> for LanguageCatalog {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = map
            .into_iter()
            .map(|(code, name)| match name {
                Value::String(name) => Ok(Language { code, name }),
                other => Err(format!("display name for {code:?} is not a string: {other}")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

impl LanguageCatalog {
    pub fn entries(&self) -> &[Language] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// LanguageSelector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("language {0:?} is not in the catalog")]
pub struct UnknownLanguage(pub String);

/// The language selection widget: a list of options and the chosen code.
///
/// Starts with only the static `auto` option selected.
#[derive(Debug, Clone)]
pub struct LanguageSelector {
    options: Vec<Language>,
    selected: String,
}

impl Default for LanguageSelector {
    fn default() -> Self {
        Self {
            options: vec![Language::new(AUTO_LANGUAGE, AUTO_LANGUAGE_NAME)],
            selected: AUTO_LANGUAGE.into(),
        }
    }
}

impl LanguageSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every catalog entry except the `auto` sentinel, in catalog
    /// order.  Codes already offered are skipped.  Returns how many options
    /// were added.
    pub fn populate(&mut self, catalog: &LanguageCatalog) -> usize {
        let mut added = 0;
        for lang in catalog.entries() {
            if lang.code == AUTO_LANGUAGE || self.contains(&lang.code) {
                continue;
            }
            self.options.push(lang.clone());
            added += 1;
        }
        added
    }

    pub fn select(&mut self, code: &str) -> Result<(), UnknownLanguage> {
        if !self.contains(code) {
            return Err(UnknownLanguage(code.to_string()));
        }
        self.selected = code.to_string();
        Ok(())
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn options(&self) -> &[Language] {
        &self.options
    }

    fn contains(&self, code: &str) -> bool {
        self.options.iter().any(|l| l.code == code)
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Fetch the catalog from `service` and populate `selector`.
///
/// A failed fetch is logged and otherwise ignored: the selector keeps its
/// static defaults and the rest of the workflow is unaffected.
pub async fn load_languages(
    service: &dyn TranscriptionService,
    selector: &mut LanguageSelector,
) -> usize {
    match service.supported_languages().await {
        Ok(catalog) => {
            let added = selector.populate(&catalog);
            log::info!("language catalog loaded ({added} selectable languages)");
            added
        }
        Err(e) => {
            log::warn!("Failed to load languages: {e}");
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
