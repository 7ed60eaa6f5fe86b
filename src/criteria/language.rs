//! Language range values and the Accept-Language criterion.

use std::fmt;

use smallvec::SmallVec;

use crate::error::RouteError;
use crate::link::{Candidates, Criterion};
use crate::route::RouteSpec;

use super::context::RequestContext;

/// An RFC 4647 language range: `*`, `en`, `en-US`, ...
///
/// Matching is basic filtering: a shorter range matches any longer tag that
/// extends it at a subtag boundary (`en` matches `en-US` but not `eng`), and
/// `*` matches everything. Specificity is the subtag count, with `*` at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageRange {
    tag: String,
}

impl LanguageRange {
    /// The wildcard range `*`.
    #[must_use]
    pub fn any() -> Self {
        Self {
            tag: "*".to_string(),
        }
    }

    /// Parse a language range token, case-insensitively. Returns `None` for
    /// tokens that are not alphanumeric subtags joined by `-` (or a lone `*`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "*" {
            return Some(Self::any());
        }
        if token.is_empty()
            || token.starts_with('-')
            || token.ends_with('-')
            || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return None;
        }
        Some(Self {
            tag: token.to_ascii_lowercase(),
        })
    }

    /// Number of subtags; `*` has none.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        if self.tag == "*" {
            0
        } else {
            self.tag.split('-').count().min(u8::MAX as usize) as u8
        }
    }

    /// Symmetric basic-filtering match.
    #[must_use]
    pub fn matches(&self, other: &LanguageRange) -> bool {
        self.tag == "*"
            || other.tag == "*"
            || self.tag == other.tag
            || extends(&other.tag, &self.tag)
            || extends(&self.tag, &other.tag)
    }
}

/// Whether `longer` extends `shorter` at a subtag boundary.
fn extends(longer: &str, shorter: &str) -> bool {
    longer.len() > shorter.len()
        && longer.starts_with(shorter)
        && longer.as_bytes()[shorter.len()] == b'-'
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Axis on the languages a route produces, negotiated against the request's
/// Accept-Language header. Same ranking as the Accept axis: best matching
/// quality weight first, then the registered range's specificity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageCriterion;

impl Criterion<RouteSpec, RequestContext> for LanguageCriterion {
    type Value = LanguageRange;

    fn name(&self) -> &'static str {
        "language"
    }

    fn constraint(&self, spec: &RouteSpec) -> Option<LanguageRange> {
        spec.language.clone()
    }

    fn candidates(&self, values: &[LanguageRange], input: &RequestContext) -> Candidates {
        let mut matched: SmallVec<[(usize, (u16, u8)); 4]> = SmallVec::new();
        for (idx, value) in values.iter().enumerate() {
            let best = input
                .language_ranges()
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

    fn exhausted(&self, values: &[LanguageRange], _input: &RequestContext) -> RouteError {
        let mut acceptable: Vec<String> = values.iter().map(LanguageRange::to_string).collect();
        acceptable.sort();
        acceptable.dedup();
        RouteError::NotAcceptable { acceptable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(token: &str) -> LanguageRange {
        LanguageRange::parse(token).expect("valid language range")
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert!(LanguageRange::parse("").is_none());
        assert!(LanguageRange::parse("-en").is_none());
        assert!(LanguageRange::parse("en-").is_none());
        assert!(LanguageRange::parse("en_US").is_none());
        assert_eq!(lang("EN-us").to_string(), "en-us");
    }

    #[test]
    fn test_basic_filtering_match() {
        assert!(lang("en").matches(&lang("en-US")));
        assert!(lang("en-US").matches(&lang("en")));
        assert!(!lang("en").matches(&lang("eng")));
        assert!(lang("*").matches(&lang("fr")));
        assert!(!lang("fr").matches(&lang("en")));
    }

    #[test]
    fn test_specificity_by_subtag_count() {
        assert_eq!(lang("*").specificity(), 0);
        assert_eq!(lang("en").specificity(), 1);
        assert_eq!(lang("en-US").specificity(), 2);
    }
}
