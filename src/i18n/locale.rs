//! Locale type: a canonical locale the storefront can serve.
//!
//! A `Locale` can only be obtained for codes that have a message bundle, so
//! holding one is proof that downstream string lookup and link generation
//! will work.

use serde::{Serialize, Serializer};
use std::fmt;

/// Metadata for a locale the storefront ships strings for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Canonical primary subtag (e.g., "de", "en")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language
    pub native_name: &'static str,
}

/// Every locale that has a message bundle, in canonical order.
const KNOWN_LOCALES: &[LocaleInfo] = &[
    LocaleInfo {
        code: "de",
        name: "German",
        native_name: "Deutsch",
    },
    LocaleInfo {
        code: "en",
        name: "English",
        native_name: "English",
    },
];

/// A canonical locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const GERMAN: Locale = Locale { code: "de" };
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Look up a locale by its exact canonical code.
    ///
    /// Matching is case-sensitive: `"DE"` is not a known code.
    pub fn from_code(code: &str) -> Option<Locale> {
        KNOWN_LOCALES
            .iter()
            .find(|info| info.code == code)
            .map(|info| Locale { code: info.code })
    }

    /// All locales with a message bundle.
    pub fn known() -> impl Iterator<Item = Locale> {
        KNOWN_LOCALES.iter().map(|info| Locale { code: info.code })
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn info(&self) -> &'static LocaleInfo {
        // Locales are only constructed from KNOWN_LOCALES
        KNOWN_LOCALES
            .iter()
            .find(|info| info.code == self.code)
            .unwrap_or(&KNOWN_LOCALES[0])
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn native_name(&self) -> &'static str {
        self.info().native_name
    }

    /// Prefix a path with this locale, e.g. `/menu` -> `/en/menu`.
    pub fn href(&self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            format!("/{}", self.code)
        } else if path.starts_with('/') {
            format!("/{}{}", self.code, path)
        } else {
            format!("/{}/{}", self.code, path)
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
