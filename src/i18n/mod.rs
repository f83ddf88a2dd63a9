//! Localized strings for Czech and English.
//!
//! Keys are dotted paths into the YAML tables (`session.phaseA`). Values may
//! contain `{name}` placeholders. A key missing in the active language falls
//! back to English, then to the key itself.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_yaml::Value;
use tracing::debug;

use crate::error::CoachError;
use crate::state::Language;

const CS_TABLE: &str = include_str!("cs.yaml");
const EN_TABLE: &str = include_str!("en.yaml");

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]*)\}").unwrap_or_else(|e| panic!("Invalid placeholder regex: {e}"))
});

type LangListener = Box<dyn FnMut(Language)>;

/// Handle returned by [`Translator::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

/// Active language plus the translation tables.
pub struct Translator {
    lang: Language,
    cs: Value,
    en: Value,
    listeners: Vec<(ListenerId, LangListener)>,
    next_id: usize,
}

impl Translator {
    /// Load the embedded tables with `lang` active.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::Config`] if an embedded table is malformed.
    pub fn new(lang: Language) -> Result<Self, CoachError> {
        let parse = |raw: &str, code: &str| {
            serde_yaml::from_str::<Value>(raw)
                .map_err(|e| CoachError::Config(format!("invalid {code} translations: {e}")))
        };
        Ok(Self {
            lang,
            cs: parse(CS_TABLE, "cs")?,
            en: parse(EN_TABLE, "en")?,
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    /// Active language.
    #[must_use]
    pub const fn lang(&self) -> Language {
        self.lang
    }

    /// Switch language and notify listeners.
    pub fn set_lang(&mut self, lang: Language) {
        self.lang = lang;
        debug!(%lang, "language changed");
        for (_, listener) in &mut self.listeners {
            listener(lang);
        }
    }

    /// Switch language by code; unsupported codes select Czech.
    pub fn set_lang_code(&mut self, code: &str) -> Language {
        let lang = Language::from_code(code).unwrap_or(Language::Cs);
        self.set_lang(lang);
        lang
    }

    /// Register a listener for language changes.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Language) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a language listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    /// Translate `key`.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate `key` and substitute `{name}` placeholders from `vars`.
    /// Unknown placeholders are left as they are.
    #[must_use]
    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let template = lookup(self.table(), key)
            .and_then(Value::as_str)
            .or_else(|| lookup(&self.en, key).and_then(Value::as_str))
            .unwrap_or(key);

        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                let name = &caps[1];
                vars.iter()
                    .find(|(k, _)| *k == name)
                    .map_or_else(|| caps[0].to_string(), |(_, v)| (*v).to_string())
            })
            .into_owned()
    }

    /// Translate a key holding a list of strings (e.g. weekday names).
    #[must_use]
    pub fn t_list(&self, key: &str) -> Vec<String> {
        let as_list = |value: &Value| {
            value.as_sequence().map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
        };
        lookup(self.table(), key)
            .and_then(as_list)
            .or_else(|| lookup(&self.en, key).and_then(as_list))
            .unwrap_or_default()
    }

    const fn table(&self) -> &Value {
        match self.lang {
            Language::Cs => &self.cs,
            Language::En => &self.en,
        }
    }
}

fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(table, |node, segment| node.get(segment))
}
