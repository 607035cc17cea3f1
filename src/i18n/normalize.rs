//! Locale normalization and browser-preference detection.
//!
//! Two ways of picking a locale from a raw string live here side by side:
//!
//! - [`normalize_locale`] reduces a tag to its primary subtag and checks it
//!   against the supported set exactly. Used for locales that arrive in the
//!   URL path.
//! - [`detect_preferred`] takes the first `accept-language` entry and picks
//!   the first supported locale it starts with. Used when the path carries no
//!   locale and the visitor has to be redirected somewhere.
//!
//! Both read the header through [`primary_preference`]. Quality weights
//! (`q=`) are not honored: only the first listed tag is considered.

use crate::i18n::{Locale, LocaleSettings};

/// What to do when the input is absent or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLocale {
    /// Fall back to the default locale silently
    UseDefault,
    /// Report [`Normalized::Missing`]
    Reject,
}

/// Outcome of normalizing a raw locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The primary subtag is a supported locale
    Supported(Locale),
    /// The input was absent or blank and the policy was [`MissingLocale::Reject`]
    Missing,
    /// The primary subtag is not supported; carries the subtag that was tried
    Unsupported(String),
}

impl Normalized {
    pub fn locale(&self) -> Option<Locale> {
        match self {
            Normalized::Supported(locale) => Some(*locale),
            _ => None,
        }
    }
}

/// Map a raw locale tag to a supported locale.
///
/// Whitespace is trimmed and everything from the first `-` on is discarded
/// (`"de-DE"` -> `"de"`). Case is left alone, so `"DE"` is unsupported.
/// Absent or blank input is handled according to `missing`.
///
/// Total and deterministic: never panics, same input gives same output.
pub fn normalize_locale(
    raw: Option<&str>,
    settings: &LocaleSettings,
    missing: MissingLocale,
) -> Normalized {
    let value = raw.unwrap_or("").trim();
    if value.is_empty() {
        return match missing {
            MissingLocale::UseDefault => Normalized::Supported(settings.default_locale()),
            MissingLocale::Reject => Normalized::Missing,
        };
    }

    let primary = value.split('-').next().unwrap_or(value);
    match settings.get(primary) {
        Some(locale) => Normalized::Supported(locale),
        None => Normalized::Unsupported(primary.to_string()),
    }
}

/// Shorthand for [`normalize_locale`] with [`MissingLocale::UseDefault`].
pub fn normalize(raw: Option<&str>, settings: &LocaleSettings) -> Normalized {
    normalize_locale(raw, settings, MissingLocale::UseDefault)
}

/// First entry of an `accept-language` value, trimmed and lower-cased, with
/// any `;q=` parameters dropped. Absent header yields an empty string.
pub fn primary_preference(header: Option<&str>) -> String {
    let header = header.unwrap_or("");
    let first = header.split(',').next().unwrap_or("");
    let tag = first.split(';').next().unwrap_or("");
    tag.trim().to_lowercase()
}

/// Pick a locale for a visitor from their `accept-language` header.
///
/// This is a prefix test rather than a subtag match: `"en-US"` and
/// `"english"` both pick `en`. Anything no supported code prefixes falls
/// back to the default.
pub fn detect_preferred(header: Option<&str>, settings: &LocaleSettings) -> Locale {
    let preference = primary_preference(header);
    if preference.is_empty() {
        return settings.default_locale();
    }

    settings
        .supported()
        .iter()
        .copied()
        .find(|locale| preference.starts_with(locale.code()))
        .unwrap_or_else(|| settings.default_locale())
}
