//! Internationalization (i18n) module for the storefront.
//!
//! # Architecture
//!
//! - `locale`: the canonical `Locale` type and the locales that have strings
//! - `settings`: the supported locale set, fallback and detection flag
//! - `normalize`: tag normalization and accept-language detection
//! - `messages`: localized string lookup by locale and namespaced key
//!
//! # Example
//!
//! ```rust,ignore
//! use restaurant_storefront::i18n::{normalize, LocaleSettings, Messages};
//!
//! let settings = LocaleSettings::default();
//! let locale = normalize(Some("en-US"), &settings).locale().unwrap();
//! let title = Messages::load().t(locale, "menu.title");
//! ```

mod locale;
mod messages;
mod normalize;
mod settings;

pub use locale::{Locale, LocaleInfo};
pub use messages::{Messages, Translator};
pub use normalize::{
    detect_preferred, normalize, normalize_locale, primary_preference, MissingLocale, Normalized,
};
pub use settings::LocaleSettings;
