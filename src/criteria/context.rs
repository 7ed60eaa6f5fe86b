//! Request-side view of the classification axes.

use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;

use super::language::LanguageRange;
use super::media::{parse_quality_list, MediaRange};

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have no more than a handful of path params
/// (e.g. /users/{id}/posts/{post_id}), so the common case stays on the stack.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated path parameter storage for the hot path.
///
/// Parameter names are `Arc<str>` because they come from the static route
/// tree: cloning is an atomic increment, not a string copy. Values are
/// per-request data extracted from the URL and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// The per-axis values of one inbound request, as consumed by the criteria
/// chain.
///
/// Negotiation headers are parsed once at construction: an absent Accept or
/// Accept-Language header defaults to "anything acceptable" per RFC 7231,
/// while an absent Content-Type leaves that axis unconstrained (only
/// content-type-unconstrained routes can then match). Malformed list entries
/// are skipped rather than rejected.
///
/// A successful [`Router::resolve`](crate::router::Router::resolve) populates
/// [`path_params`](Self::path_params) from the committed path pattern branch.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    content_type: Option<MediaRange>,
    accept: Vec<(MediaRange, u16)>,
    languages: Vec<(LanguageRange, u16)>,
    /// Path parameters captured by the committed pattern branch.
    pub path_params: ParamVec,
}

impl RequestContext {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: None,
            accept: vec![(MediaRange::any(), 1000)],
            languages: vec![(LanguageRange::any(), 1000)],
            path_params: ParamVec::new(),
        }
    }

    /// Declare the request body's media type, as from a Content-Type header.
    /// A malformed value leaves the axis unconstrained.
    #[must_use]
    pub fn with_content_type(mut self, header: &str) -> Self {
        self.content_type = MediaRange::parse(header);
        self
    }

    /// Parse an Accept header into the quality-ordered range list.
    #[must_use]
    pub fn with_accept(mut self, header: &str) -> Self {
        self.accept = parse_quality_list(header, MediaRange::parse);
        self
    }

    /// Parse an Accept-Language header into the quality-ordered range list.
    #[must_use]
    pub fn with_accept_language(mut self, header: &str) -> Self {
        self.languages = parse_quality_list(header, LanguageRange::parse);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&MediaRange> {
        self.content_type.as_ref()
    }

    /// Acceptable media ranges, sorted by quality weight, highest first.
    #[must_use]
    pub fn accept_ranges(&self) -> &[(MediaRange, u16)] {
        &self.accept
    }

    /// Acceptable language ranges, sorted by quality weight, highest first.
    #[must_use]
    pub fn language_ranges(&self) -> &[(LanguageRange, u16)] {
        &self.languages
    }

    /// Get a captured path parameter by name.
    ///
    /// Last write wins: with duplicate names at different path depths the
    /// deepest capture is returned.
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}
