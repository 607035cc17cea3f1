//! Localized UI strings, looked up by resolved locale and namespaced key.
//!
//! Bundles are embedded at compile time from `messages/<code>.json`. Each
//! bundle is a nested object; nested keys are addressed with dots, so
//! `{"menu": {"title": "Menu"}}` answers `t(locale, "menu.title")`.
//!
//! A bundle that fails to parse degrades to empty and is logged once at load
//! time. A missing key resolves to the key itself and is logged once per
//! locale and key.

use crate::i18n::Locale;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, error};

/// Flattened string table for one locale.
#[derive(Debug, Default, Clone)]
struct Bundle {
    strings: HashMap<String, String>,
}

impl Bundle {
    fn parse(locale: Locale, raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => {
                let mut strings = HashMap::new();
                flatten("", &value, &mut strings);
                Bundle { strings }
            }
            Err(e) => {
                error!(
                    error = %e,
                    locale = locale.code(),
                    "Failed to parse message bundle"
                );
                Bundle::default()
            }
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        // Numbers and booleans are rendered as text; arrays and nulls are skipped
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Array(_) | Value::Null => {}
    }
}

fn embedded_bundle(locale: Locale) -> &'static str {
    match locale.code() {
        "en" => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/en.json")),
        _ => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/de.json")),
    }
}

/// String lookup for every known locale.
#[derive(Debug)]
pub struct Messages {
    bundles: HashMap<Locale, Bundle>,
    reported: Mutex<HashSet<(Locale, String)>>,
}

impl Messages {
    /// Parse the embedded bundles for all known locales.
    pub fn load() -> Self {
        let bundles = Locale::known()
            .map(|locale| (locale, Bundle::parse(locale, embedded_bundle(locale))))
            .collect();
        Self::with_bundles(bundles)
    }

    /// Build from explicit JSON sources. Locales without a source get an
    /// empty bundle.
    pub fn from_sources(sources: &[(Locale, &str)]) -> Self {
        let bundles = sources
            .iter()
            .map(|(locale, raw)| (*locale, Bundle::parse(*locale, raw)))
            .collect();
        Self::with_bundles(bundles)
    }

    fn with_bundles(bundles: HashMap<Locale, Bundle>) -> Self {
        Self {
            bundles,
            reported: Mutex::new(HashSet::new()),
        }
    }

    /// Look up `key` for `locale`, falling back to the key itself.
    pub fn t(&self, locale: Locale, key: &str) -> String {
        match self.get(locale, key) {
            Some(s) => s.to_string(),
            None => {
                if self.first_miss(locale, key) {
                    debug!(locale = locale.code(), key, "Missing message key");
                }
                key.to_string()
            }
        }
    }

    /// True the first time `key` is reported missing for `locale`.
    fn first_miss(&self, locale: Locale, key: &str) -> bool {
        match self.reported.lock() {
            Ok(mut reported) => reported.insert((locale, key.to_string())),
            Err(_) => false,
        }
    }

    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.bundles.get(&locale).and_then(|b| b.lookup(key))
    }

    /// Scoped lookup for one namespace, e.g. `messages.scope(locale, "menu")`.
    pub fn scope<'a>(&'a self, locale: Locale, namespace: &'a str) -> Translator<'a> {
        Translator {
            messages: self,
            locale,
            namespace,
        }
    }
}

/// Lookup bound to one locale and one namespace.
pub struct Translator<'a> {
    messages: &'a Messages,
    locale: Locale,
    namespace: &'a str,
}

impl Translator<'_> {
    pub fn t(&self, key: &str) -> String {
        self.messages
            .t(self.locale, &format!("{}.{}", self.namespace, key))
    }
}
