//! Exact-match axis on the HTTP method.

use http::Method;
use smallvec::SmallVec;

use crate::error::RouteError;
use crate::link::{Candidates, Criterion};
use crate::route::RouteSpec;

use super::context::RequestContext;

/// Closed-enum exact match on [`http::Method`].
///
/// When buckets exist at a matched path but none accepts the request method,
/// the axis exhausts with [`RouteError::MethodNotAllowed`]; the engine's
/// error merge aggregates the allowed sets of every path branch matching the
/// request path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodCriterion;

impl Criterion<RouteSpec, RequestContext> for MethodCriterion {
    type Value = Method;

    fn name(&self) -> &'static str {
        "method"
    }

    fn constraint(&self, spec: &RouteSpec) -> Option<Method> {
        spec.method.clone()
    }

    fn candidates(&self, values: &[Method], input: &RequestContext) -> Candidates {
        let mut matched = SmallVec::new();
        if let Some(idx) = values.iter().position(|m| m == input.method()) {
            matched.push(idx);
        }
        Candidates::Matched(matched)
    }

    fn exhausted(&self, values: &[Method], _input: &RequestContext) -> RouteError {
        let mut allowed = values.to_vec();
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed.dedup();
        RouteError::MethodNotAllowed { allowed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_method_match() {
        let criterion = MethodCriterion;
        let values = vec![Method::GET, Method::POST];
        let ctx = RequestContext::new(Method::POST, "/pets");
        assert_eq!(
            criterion.candidates(&values, &ctx),
            Candidates::Matched(SmallVec::from_slice(&[1]))
        );
    }

    #[test]
    fn test_mismatch_exhausts_with_allowed_set() {
        let criterion = MethodCriterion;
        let values = vec![Method::POST, Method::GET, Method::DELETE];
        let ctx = RequestContext::new(Method::PUT, "/pets");
        assert_eq!(criterion.candidates(&values, &ctx), Candidates::Matched(SmallVec::new()));
        assert_eq!(
            criterion.exhausted(&values, &ctx),
            RouteError::MethodNotAllowed {
                allowed: vec![Method::DELETE, Method::GET, Method::POST],
            }
        );
    }
}
