//! Exercise records as loaded from the catalog JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::Language;

/// Text keyed by two-letter language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized<T>(BTreeMap<String, T>);

impl<T> Localized<T> {
    /// Value for `lang`, falling back to English, then to any entry.
    #[must_use]
    pub fn get(&self, lang: Language) -> Option<&T> {
        self.0
            .get(lang.code())
            .or_else(|| self.0.get(Language::En.code()))
            .or_else(|| self.0.values().next())
    }

    /// Whether a value exists for exactly `lang`.
    #[must_use]
    pub fn has(&self, lang: Language) -> bool {
        self.0.contains_key(lang.code())
    }
}

impl<T> FromIterator<(Language, T)> for Localized<T> {
    fn from_iter<I: IntoIterator<Item = (Language, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(lang, value)| (lang.code().to_string(), value))
                .collect(),
        )
    }
}

/// One stretch from the illustrated sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier recorded in session logs.
    pub id: u32,
    /// Localized display name.
    pub name: Localized<String>,
    /// Localized coaching cues.
    pub cues: Localized<Vec<String>>,
    /// Image reference, relative to the asset root.
    pub image: String,
    /// Whether the stretch is done once per side.
    #[serde(default)]
    pub asym: bool,
}

impl Exercise {
    /// Display name in `lang` (empty if the record has no names at all).
    #[must_use]
    pub fn name_in(&self, lang: Language) -> &str {
        self.name.get(lang).map_or("", String::as_str)
    }

    /// Cues in `lang`.
    #[must_use]
    pub fn cues_in(&self, lang: Language) -> &[String] {
        self.cues.get(lang).map(Vec::as_slice).unwrap_or(&[])
    }
}
