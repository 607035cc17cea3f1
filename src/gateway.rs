//! Request gateway: decides the locale for every inbound request before any
//! page handler runs.
//!
//! Per request, in order:
//!
//! 1. Paths matching [`is_excluded_path`] (API routes, framework internals,
//!    anything with a file extension) pass through untouched.
//! 2. A locale-like first segment is normalized. Supported locales are bound
//!    to the request as [`ResolvedLocale`]; anything else is a 404. A
//!    trailing slash is redirected away first (`/en/` -> `/en`).
//! 3. Everything else is redirected to a locale-prefixed path chosen from the
//!    `accept-language` header.
//!
//! The decision itself ([`decide`]) is a pure function so it can be tested
//! without a server; [`locale_gate`] is the axum middleware that applies it.

use crate::error::StorefrontError;
use crate::i18n::{detect_preferred, normalize_locale, Locale, LocaleSettings, MissingLocale, Normalized};
use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// The canonical locale bound to one request.
///
/// Inserted into the request extensions by [`locale_gate`]. Handlers take it
/// as an extractor; a request the gateway did not bind (a static file path
/// that happens to match a page route) is answered with 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ResolvedLocale {
    type Rejection = StorefrontError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedLocale>()
            .copied()
            .ok_or_else(|| {
                let path = parts.uri.path().trim_start_matches('/');
                let segment = path.split('/').next().unwrap_or("");
                StorefrontError::UnsupportedLocale(segment.to_string())
            })
    }
}

/// What the gateway does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward unchanged, no locale bound
    Passthrough,
    /// Forward with this locale bound
    Bound(Locale),
    /// Redirect to this path
    Redirect(String),
    /// Reject with 404; carries the rejected path segment
    NotFound(String),
}

static LOCALE_SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether a request path bypasses locale handling entirely.
///
/// Excluded are paths whose first segment starts with `api` or `_next`, and
/// any path containing a `.` (static files such as `/favicon.ico`).
pub fn is_excluded_path(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    rest.starts_with("api") || rest.starts_with("_next") || rest.contains('.')
}

/// The first path segment, if it is shaped like a language tag.
///
/// "Shaped like" means 2-3 ASCII letters optionally followed by `-`
/// separated subtags of 1-8 alphanumerics: `en`, `xx`, `de-DE`,
/// `zh-Hant-TW`. Whether it is actually supported is decided later.
pub fn locale_prefix(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    let segment = rest.split('/').next().unwrap_or("");
    let regex = LOCALE_SEGMENT_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(?:-[A-Za-z0-9]{1,8})*$").unwrap());
    regex.is_match(segment).then_some(segment)
}

/// Resolve the locale segment of a path-prefixed request.
///
/// `/de-DE/menu` resolves to `de`; the URL itself is left alone. This entry
/// point never redirects: an unsupported or empty segment is an error that
/// surfaces as a 404.
pub fn resolve_path_locale(
    segment: &str,
    settings: &LocaleSettings,
) -> Result<Locale, StorefrontError> {
    match normalize_locale(Some(segment), settings, MissingLocale::Reject) {
        Normalized::Supported(locale) => Ok(locale),
        Normalized::Missing => Err(StorefrontError::UnsupportedLocale(String::new())),
        Normalized::Unsupported(primary) => Err(StorefrontError::UnsupportedLocale(primary)),
    }
}

/// Where a request for the bare root `/` is sent.
///
/// Always detects from the browser preference, regardless of the detection
/// flag, and always redirects.
pub fn root_redirect_target(accept_language: Option<&str>, settings: &LocaleSettings) -> String {
    detect_preferred(accept_language, settings).href("/")
}

/// Where an unprefixed, non-excluded path is sent.
///
/// Uses the browser preference when detection is enabled, the default locale
/// otherwise. The original path and query are kept after the prefix.
pub fn prefixed_redirect_target(
    path: &str,
    query: Option<&str>,
    accept_language: Option<&str>,
    settings: &LocaleSettings,
) -> String {
    let locale = if settings.detection_enabled() {
        detect_preferred(accept_language, settings)
    } else {
        settings.default_locale()
    };

    with_query(locale.href(path), query)
}

fn with_query(mut target: String, query: Option<&str>) -> String {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// `path` without trailing slashes; the root stays `/`.
fn trim_trailing_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Decide what to do with a request.
pub fn decide(
    path: &str,
    query: Option<&str>,
    accept_language: Option<&str>,
    settings: &LocaleSettings,
) -> GateDecision {
    if is_excluded_path(path) {
        return GateDecision::Passthrough;
    }

    let trimmed = trim_trailing_slash(path);

    if let Some(segment) = locale_prefix(trimmed) {
        return match resolve_path_locale(segment, settings) {
            Ok(_) if trimmed != path => {
                GateDecision::Redirect(with_query(trimmed.to_string(), query))
            }
            Ok(locale) => GateDecision::Bound(locale),
            Err(_) => GateDecision::NotFound(segment.to_string()),
        };
    }

    if trimmed == "/" {
        return GateDecision::Redirect(root_redirect_target(accept_language, settings));
    }

    GateDecision::Redirect(prefixed_redirect_target(
        trimmed,
        query,
        accept_language,
        settings,
    ))
}

/// Middleware applying [`decide`] to every request.
pub async fn locale_gate(
    State(settings): State<Arc<LocaleSettings>>,
    mut req: Request,
    next: Next,
) -> Response {
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let decision = decide(
        req.uri().path(),
        req.uri().query(),
        accept_language,
        &settings,
    );

    match decision {
        GateDecision::Passthrough => next.run(req).await,
        GateDecision::Bound(locale) => {
            debug!(path = req.uri().path(), locale = %locale, "Bound request locale");
            req.extensions_mut().insert(ResolvedLocale(locale));
            next.run(req).await
        }
        GateDecision::Redirect(target) => {
            debug!(path = req.uri().path(), target = %target, "Redirecting to localized path");
            Redirect::temporary(&target).into_response()
        }
        GateDecision::NotFound(segment) => {
            StorefrontError::UnsupportedLocale(segment).into_response()
        }
    }
}
