//! Resolve binary - shows what the locale gateway does with a request path
//!
//! Usage:
//!   cargo run --bin resolve -- /menu                      # No header
//!   cargo run --bin resolve -- /menu "en-US,en;q=0.9"     # With accept-language
//!   cargo run --bin resolve -- /de-DE/checkout
//!
//! Reads the same locale settings as the server:
//! - LOCALES (defaults to de,en)
//! - DEFAULT_LOCALE (defaults to the first of LOCALES)
//! - LOCALE_DETECTION (defaults to true)

use anyhow::{Context, Result};
use restaurant_storefront::config::Config;
use restaurant_storefront::gateway::{decide, GateDecision};
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resolve=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let target = args
        .next()
        .context("Usage: resolve <path[?query]> [accept-language]")?;
    let accept_language = args.next();

    let config = Config::from_env()?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target.as_str(), None),
    };

    info!(
        "Resolving {} (accept-language: {})",
        target,
        accept_language.as_deref().unwrap_or("<none>")
    );

    match decide(path, query, accept_language.as_deref(), &config.locales) {
        GateDecision::Passthrough => println!("PASSTHROUGH {}", target),
        GateDecision::Bound(locale) => println!("BOUND {} ({})", locale, locale.name()),
        GateDecision::Redirect(location) => println!("REDIRECT 307 {}", location),
        GateDecision::NotFound(segment) => println!("NOT FOUND (unsupported locale '{}')", segment),
    }

    Ok(())
}
