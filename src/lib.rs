//! Localized restaurant storefront.
//!
//! Every request passes through the locale [`gateway`] before a page handler
//! sees it: unprefixed paths are redirected to `/<locale>/...`, unsupported
//! locale prefixes are rejected, and supported ones are bound to the request
//! for string lookup, link generation and backend calls.

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod i18n;
pub mod models;
pub mod pages;
pub mod server;
