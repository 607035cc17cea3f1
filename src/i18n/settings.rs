//! Locale settings: the supported locale set and its fallback.
//!
//! Built once at startup and shared read-only across requests. Nothing in the
//! locale layer reads process-wide constants; every decision function takes a
//! `&LocaleSettings`.

use crate::i18n::Locale;
use anyhow::{bail, Result};

/// Immutable locale configuration for the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    supported: Vec<Locale>,
    default: Locale,
    detection: bool,
}

impl LocaleSettings {
    /// Build settings from an ordered list of locale codes.
    ///
    /// # Arguments
    /// * `codes` - Supported locale codes in priority order
    /// * `default` - Fallback code; must be one of `codes`
    /// * `detection` - Whether the gateway redirects unprefixed paths using
    ///   the browser preference
    ///
    /// # Returns
    /// * `Err` if the list is empty, names an unknown or duplicate code, or
    ///   the default is not a member
    pub fn new(codes: &[&str], default: &str, detection: bool) -> Result<Self> {
        if codes.is_empty() {
            bail!("At least one supported locale is required");
        }

        let mut supported = Vec::with_capacity(codes.len());
        for code in codes {
            let Some(locale) = Locale::from_code(code) else {
                bail!("Unknown locale code: '{}'", code);
            };
            if supported.contains(&locale) {
                bail!("Duplicate locale code: '{}'", code);
            }
            supported.push(locale);
        }

        let default = match Locale::from_code(default) {
            Some(locale) if supported.contains(&locale) => locale,
            _ => bail!(
                "Default locale '{}' is not in the supported set {:?}",
                default,
                codes
            ),
        };

        Ok(Self {
            supported,
            default,
            detection,
        })
    }

    /// Parse a comma-separated list such as `"de,en"`.
    pub fn parse(codes: &str, default: Option<&str>, detection: bool) -> Result<Self> {
        let codes: Vec<&str> = codes
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        let default = default.or_else(|| codes.first().copied()).unwrap_or("");
        Self::new(&codes, default, detection)
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn detection_enabled(&self) -> bool {
        self.detection
    }

    /// Find a supported locale by exact code.
    pub fn get(&self, code: &str) -> Option<Locale> {
        self.supported.iter().copied().find(|l| l.code() == code)
    }
}

impl Default for LocaleSettings {
    /// `{de, en}` with German as the fallback and detection on.
    fn default() -> Self {
        Self {
            supported: vec![Locale::GERMAN, Locale::ENGLISH],
            default: Locale::GERMAN,
            detection: true,
        }
    }
}
