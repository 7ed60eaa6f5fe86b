//! Typed resolution failures.
//!
//! A failed resolution is never a bare "not found": the error kind identifies
//! the axis that exhausted, so a caller can render the correct protocol status
//! and, for method and Accept-family failures, the remaining alternatives.

use http::{Method, StatusCode};
use thiserror::Error;

/// Error returned when a request cannot be resolved to a route.
///
/// The variant corresponds to the first axis of the criteria chain that ran
/// out of usable routes: path exhaustion is [`RouteError::NotFound`], method
/// exhaustion is [`RouteError::MethodNotAllowed`], declared content type
/// exhaustion is [`RouteError::UnsupportedMediaType`] and Accept-family
/// exhaustion is [`RouteError::NotAcceptable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matched the request path (or a matched branch held no usable
    /// leaf and no axis could report anything more specific).
    #[error("no route matched the request")]
    NotFound,

    /// The path matched but no registered route accepts the request method.
    ///
    /// `allowed` aggregates the methods registered across *every* path branch
    /// matching the request path, not just one bucket's.
    #[error("method not allowed (allowed: {allowed:?})")]
    MethodNotAllowed {
        /// Methods registered at the matched path, sorted and deduplicated.
        allowed: Vec<Method>,
    },

    /// The declared request content type is not consumed by any matching route.
    #[error("unsupported media type (supported: {supported:?})")]
    UnsupportedMediaType {
        /// Media ranges the matched routes consume, sorted and deduplicated.
        supported: Vec<String>,
    },

    /// No registered representation satisfies the Accept or Accept-Language
    /// header.
    #[error("not acceptable (acceptable: {acceptable:?})")]
    NotAcceptable {
        /// Representations the matched routes can produce, sorted and
        /// deduplicated.
        acceptable: Vec<String>,
    },
}

impl RouteError {
    /// HTTP status a caller should render for this failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::NotFound => StatusCode::NOT_FOUND,
            RouteError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RouteError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
        }
    }

    /// Combine the failure of a sibling branch into this one.
    ///
    /// Same-kind errors union their carried sets, so a 405 raised by several
    /// matching path branches ends up carrying the full aggregated method set.
    /// `NotFound` is the identity: any more specific failure wins over it.
    /// Otherwise the earlier error (the more preferred branch's) is kept.
    #[must_use]
    pub fn merge(self, other: RouteError) -> RouteError {
        match (self, other) {
            (RouteError::NotFound, other) => other,
            (this, RouteError::NotFound) => this,
            (
                RouteError::MethodNotAllowed { allowed: mut a },
                RouteError::MethodNotAllowed { allowed: b },
            ) => {
                a.extend(b);
                a.sort_by(|x, y| x.as_str().cmp(y.as_str()));
                a.dedup();
                RouteError::MethodNotAllowed { allowed: a }
            }
            (
                RouteError::UnsupportedMediaType { supported: mut a },
                RouteError::UnsupportedMediaType { supported: b },
            ) => {
                a.extend(b);
                a.sort();
                a.dedup();
                RouteError::UnsupportedMediaType { supported: a }
            }
            (
                RouteError::NotAcceptable { acceptable: mut a },
                RouteError::NotAcceptable { acceptable: b },
            ) => {
                a.extend(b);
                a.sort();
                a.dedup();
                RouteError::NotAcceptable { acceptable: a }
            }
            (this, _) => this,
        }
    }
}
