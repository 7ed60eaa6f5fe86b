//! Path axis: literal values and patterns with named captures.
//!
//! A route constrains the path axis with a [`PathSpec`]: either a literal
//! string, matched by plain equality and tried before any pattern, or a
//! [`PathPattern`] compiled to an anchored regex. Pattern segments are
//! `{name}` for one segment or `{name:**}` for a multi-segment tail; anything
//! else is a literal segment (escaped before compilation). Trailing slashes
//! are significant: `/pets` and `/pets/` are distinct values with no implicit
//! normalization.

use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

use crate::error::RouteError;
use crate::link::{Candidates, Criterion};
use crate::route::RouteSpec;

use super::context::{ParamVec, RequestContext};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
    /// `{name:**}`: swallows one or more segments.
    CatchAll(Arc<str>),
}

/// A compiled path pattern with named captures.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    /// Capture names in group order.
    params: Vec<Arc<str>>,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

/// Two patterns are the same bucket value iff their raw text is equal.
impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl PathPattern {
    /// Compile a pattern such as `/users/{id}` or `/files/{rest:**}`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trailing_slash = raw.len() > 1 && raw.ends_with('/');
        // Only the leading and trailing slash delimit; interior empty
        // segments (as in `/a//b`) are kept as empty literals, never
        // normalized away.
        let body = raw.strip_prefix('/').unwrap_or(raw);
        let body = if trailing_slash {
            &body[..body.len() - 1]
        } else {
            body
        };
        let mut segments = Vec::new();
        if body.is_empty() {
            if trailing_slash {
                // `//` is one empty segment between the delimiters.
                segments.push(Segment::Literal(String::new()));
            }
        } else {
            for part in body.split('/') {
                let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    Some(inner) => match inner.strip_suffix(":**") {
                        Some(name) => Segment::CatchAll(Arc::from(name)),
                        None => Segment::Param(Arc::from(inner)),
                    },
                    None => Segment::Literal(part.to_string()),
                };
                segments.push(segment);
            }
        }

        let mut pattern = String::with_capacity(raw.len() + 8);
        pattern.push('^');
        let mut params = Vec::new();
        for segment in &segments {
            pattern.push('/');
            match segment {
                Segment::Literal(lit) => pattern.push_str(&regex::escape(lit)),
                Segment::Param(name) => {
                    pattern.push_str("([^/]+)");
                    params.push(Arc::clone(name));
                }
                Segment::CatchAll(name) => {
                    pattern.push_str("(.+)");
                    params.push(Arc::clone(name));
                }
            }
        }
        if segments.is_empty() || trailing_slash {
            pattern.push('/');
        }
        pattern.push('$');
        // The pattern is assembled from escaped literals and fixed groups, so
        // compilation cannot fail on user input.
        let regex = Regex::new(&pattern).expect("failed to compile path pattern regex");

        Self {
            raw: raw.to_string(),
            regex,
            params,
            segments,
            trailing_slash,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Match a concrete path, returning the named captures in group order.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        self.regex.captures(path).map(|caps| {
            self.params
                .iter()
                .enumerate()
                .map(|(i, name)| (Arc::clone(name), caps[i + 1].to_string()))
                .collect()
        })
    }

    /// Partial-order inclusion used by route queries: does every path this
    /// pattern's counterpart could match also match `self`?
    #[must_use]
    pub fn includes(&self, other: &PathPattern) -> bool {
        self.trailing_slash == other.trailing_slash
            && segments_include(&self.segments, &other.segments)
    }
}

fn segments_include(a: &[Segment], b: &[Segment]) -> bool {
    match (a.first(), b.first()) {
        (None, None) => true,
        (Some(Segment::CatchAll(_)), Some(_)) => {
            // The catch-all either keeps swallowing or hands over after this
            // segment.
            segments_include(a, &b[1..]) || segments_include(&a[1..], &b[1..])
        }
        (None, Some(_)) | (Some(_), None) => false,
        (Some(x), Some(y)) => {
            let head = match (x, y) {
                (Segment::Param(_), Segment::CatchAll(_)) => false,
                // A capture needs at least one character, so it cannot cover
                // an empty literal segment.
                (Segment::Param(_), Segment::Literal(l)) => !l.is_empty(),
                (Segment::Param(_), Segment::Param(_)) => true,
                (Segment::Literal(l1), Segment::Literal(l2)) => l1 == l2,
                _ => false,
            };
            head && segments_include(&a[1..], &b[1..])
        }
    }
}

/// A route's constraint on the path axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Matched by string equality; always tried before patterns.
    Literal(String),
    /// Matched by the compiled pattern, in registration order.
    Pattern(PathPattern),
}

impl PathSpec {
    #[must_use]
    pub fn literal(path: impl Into<String>) -> Self {
        PathSpec::Literal(path.into())
    }

    #[must_use]
    pub fn pattern(raw: &str) -> Self {
        PathSpec::Pattern(PathPattern::parse(raw))
    }

    /// Literal if the path carries no `{...}` captures, pattern otherwise.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains('{') {
            Self::pattern(path)
        } else {
            Self::literal(path)
        }
    }

    /// Does this spec accept every path the other one accepts?
    #[must_use]
    pub fn includes(&self, other: &PathSpec) -> bool {
        match (self, other) {
            (PathSpec::Literal(a), PathSpec::Literal(b)) => a == b,
            (PathSpec::Pattern(p), PathSpec::Literal(l)) => p.captures(l).is_some(),
            (PathSpec::Pattern(p), PathSpec::Pattern(q)) => p.includes(q),
            (PathSpec::Literal(_), PathSpec::Pattern(_)) => false,
        }
    }
}

/// Path axis: literals first (highest priority), then patterns in
/// registration order. A matching pattern populates the request context's
/// path parameters once its branch commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCriterion;

impl Criterion<RouteSpec, RequestContext> for PathCriterion {
    type Value = PathSpec;

    fn name(&self) -> &'static str {
        "path"
    }

    fn constraint(&self, spec: &RouteSpec) -> Option<PathSpec> {
        spec.path.clone()
    }

    fn candidates(&self, values: &[PathSpec], input: &RequestContext) -> Candidates {
        let mut matched: SmallVec<[usize; 4]> = SmallVec::new();
        for (idx, value) in values.iter().enumerate() {
            if let PathSpec::Literal(literal) = value {
                if literal == input.path() {
                    matched.push(idx);
                }
            }
        }
        for (idx, value) in values.iter().enumerate() {
            if let PathSpec::Pattern(pattern) = value {
                if pattern.regex.is_match(input.path()) {
                    matched.push(idx);
                }
            }
        }
        Candidates::Matched(matched)
    }

    fn on_match(&self, value: &PathSpec, input: &mut RequestContext) {
        if let PathSpec::Pattern(pattern) = value {
            if let Some(captures) = pattern.captures(input.path()) {
                input.path_params.extend(captures);
            }
        }
    }

    fn exhausted(&self, _values: &[PathSpec], _input: &RequestContext) -> RouteError {
        RouteError::NotFound
    }
}
