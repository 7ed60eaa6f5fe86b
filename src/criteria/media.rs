//! Media range values and the content negotiation criteria.
//!
//! A [`MediaRange`] is a `type/subtype` pair where either side may be the `*`
//! wildcard. Registered route values and request values match symmetrically:
//! equal, or either side structurally subsumes the other. Candidates rank by
//! specificity (exact > `type/*` > `*/*`) and, for the Accept axis, by the
//! client-supplied quality weight first.

use std::fmt;

use smallvec::SmallVec;

use crate::error::RouteError;
use crate::link::{Candidates, Criterion};
use crate::route::RouteSpec;

use super::context::RequestContext;

/// A media type or media range: `application/json`, `text/*`, `*/*`.
/// Parameters other than the quality weight are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange {
    main_type: String,
    subtype: String,
}

impl MediaRange {
    /// The full wildcard `*/*`.
    #[must_use]
    pub fn any() -> Self {
        Self {
            main_type: "*".to_string(),
            subtype: "*".to_string(),
        }
    }

    /// Parse a `type/subtype` token, case-insensitively, dropping any
    /// `;` parameters. Returns `None` when the token is not a media range.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = match token.split_once(';') {
            Some((value, _params)) => value,
            None => token,
        };
        let (main_type, subtype) = token.trim().split_once('/')?;
        let main_type = main_type.trim();
        let subtype = subtype.trim();
        if main_type.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return None;
        }
        if main_type == "*" && subtype != "*" {
            // "*/json" is not a valid range
            return None;
        }
        Some(Self {
            main_type: main_type.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }

    /// Exact > subtype wildcard > full wildcard.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        match (self.main_type.as_str(), self.subtype.as_str()) {
            ("*", _) => 0,
            (_, "*") => 1,
            _ => 2,
        }
    }

    /// Symmetric wildcard-aware match: equal, or either side subsumes the
    /// other (`*/*` matches everything, `text/*` matches `text/html` and vice
    /// versa).
    #[must_use]
    pub fn matches(&self, other: &MediaRange) -> bool {
        if self.main_type != "*" && other.main_type != "*" && self.main_type != other.main_type {
            return false;
        }
        self.main_type == "*"
            || other.main_type == "*"
            || self.subtype == "*"
            || other.subtype == "*"
            || self.subtype == other.subtype
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.subtype)
    }
}

/// Parse an RFC 7231 quality-weighted list header (`Accept`,
/// `Accept-Language`), most wanted first.
///
/// Weights are permille (`q=0.8` is 800) so ordering stays integral. Entries
/// the value parser rejects are skipped; the sort is stable, so entries with
/// equal weight keep header order.
pub(crate) fn parse_quality_list<T>(
    header: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<(T, u16)> {
    let mut out = Vec::new();
    for item in header.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let (value_part, params) = match item.split_once(';') {
            Some((value, params)) => (value.trim(), Some(params)),
            None => (item, None),
        };
        let mut weight = 1000u16;
        if let Some(params) = params {
            for param in params.split(';') {
                if let Some(q) = param.trim().strip_prefix("q=") {
                    weight = parse_qvalue(q);
                }
            }
        }
        if let Some(value) = parse(value_part) {
            out.push((value, weight));
        }
    }
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

fn parse_qvalue(token: &str) -> u16 {
    token
        .trim()
        .parse::<f32>()
        .ok()
        .map_or(1000, |q| (q.clamp(0.0, 1.0) * 1000.0).round() as u16)
}

/// Sorted, deduplicated display strings of the registered ranges, for the
/// `acceptable` set of a negotiation failure.
fn range_names(values: &[MediaRange]) -> Vec<String> {
    let mut names: Vec<String> = values.iter().map(MediaRange::to_string).collect();
    names.sort();
    names.dedup();
    names
}

/// Axis on the request's declared body media type.
///
/// A request without a Content-Type header leaves the axis unconstrained, so
/// only content-type-unconstrained routes can match it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeCriterion;

impl Criterion<RouteSpec, RequestContext> for ContentTypeCriterion {
    type Value = MediaRange;

    fn name(&self) -> &'static str {
        "content_type"
    }

    fn constraint(&self, spec: &RouteSpec) -> Option<MediaRange> {
        spec.content_type.clone()
    }

    fn candidates(&self, values: &[MediaRange], input: &RequestContext) -> Candidates {
        let Some(declared) = input.content_type() else {
            return Candidates::Unconstrained;
        };
        let mut matched: SmallVec<[(usize, u8); 4]> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.matches(declared))
            .map(|(idx, value)| (idx, value.specificity()))
            .collect();
        matched.sort_by(|a, b| b.1.cmp(&a.1));
        Candidates::Matched(matched.into_iter().map(|(idx, _)| idx).collect())
    }

    fn exhausted(&self, values: &[MediaRange], _input: &RequestContext) -> RouteError {
        RouteError::UnsupportedMediaType {
            supported: range_names(values),
        }
    }
}

/// Axis on the representations a route produces, negotiated against the
/// request's Accept header.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptCriterion;

impl Criterion<RouteSpec, RequestContext> for AcceptCriterion {
    type Value = MediaRange;

    fn name(&self) -> &'static str {
        "accept"
    }

    fn constraint(&self, spec: &RouteSpec) -> Option<MediaRange> {
        spec.accept.clone()
    }

    fn candidates(&self, values: &[MediaRange], input: &RequestContext) -> Candidates {
        // Rank each bucket by the best quality weight among the accept ranges
        // it satisfies, then by the registered value's own specificity; the
        // stable sort keeps registration order on full ties.
        let mut matched: SmallVec<[(usize, (u16, u8)); 4]> = SmallVec::new();
        for (idx, value) in values.iter().enumerate() {
            let best = input
                .accept_ranges()
                .iter()
                .filter(|(range, _)| range.matches(value))
                .map(|(_, weight)| *weight)
                .max();
            if let Some(weight) = best {
                matched.push((idx, (weight, value.specificity())));
            }
        }
        matched.sort_by(|a, b| b.1.cmp(&a.1));
        Candidates::Matched(matched.into_iter().map(|(idx, _)| idx).collect())
    }

    fn exhausted(&self, values: &[MediaRange], _input: &RequestContext) -> RouteError {
        RouteError::NotAcceptable {
            acceptable: range_names(values),
        }
    }
}
