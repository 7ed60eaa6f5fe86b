//! Combinatorial coverage of the generic engine over three abstract axes.
//!
//! The canonical fixture registers one route per subset of three exact-match
//! axes (eight routes total). With all axes constrained on the input, the
//! expected precedence treats "axis N constrained" as a higher-order bit than
//! axis N+1: abc > ab > ac > a > bc > b > c > unconstrained.

use smallvec::SmallVec;

use super::chain::{BoxedLink, Candidates, ChainBuilder, ChainRoute, Criterion, Link};
use crate::error::RouteError;

type Spec3 = [Option<&'static str>; 3];

#[derive(Debug, Clone, PartialEq)]
struct TestRoute {
    spec: Spec3,
    name: &'static str,
    enabled: bool,
}

impl ChainRoute for TestRoute {
    type Spec = Spec3;

    fn spec(&self) -> &Spec3 {
        &self.spec
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Exact-match criterion on one slot of the spec/input triple.
#[derive(Debug, Clone)]
struct FieldCriterion {
    axis: usize,
}

impl Criterion<Spec3, Spec3> for FieldCriterion {
    type Value = &'static str;

    fn name(&self) -> &'static str {
        "field"
    }

    fn constraint(&self, spec: &Spec3) -> Option<&'static str> {
        spec[self.axis]
    }

    fn candidates(&self, values: &[&'static str], input: &Spec3) -> Candidates {
        match input[self.axis] {
            None => Candidates::Unconstrained,
            Some(wanted) => Candidates::Matched(
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v == wanted)
                    .map(|(i, _)| i)
                    .collect::<SmallVec<[usize; 4]>>(),
            ),
        }
    }

    fn exhausted(&self, _values: &[&'static str], _input: &Spec3) -> RouteError {
        RouteError::NotFound
    }
}

fn route(spec: Spec3, name: &'static str) -> TestRoute {
    TestRoute {
        spec,
        name,
        enabled: true,
    }
}

fn chain() -> BoxedLink<TestRoute, Spec3> {
    ChainBuilder::new()
        .link(FieldCriterion { axis: 0 })
        .link(FieldCriterion { axis: 1 })
        .link(FieldCriterion { axis: 2 })
        .build()
}

/// One route per subset of the three axes, named after its constrained axes.
fn fixture() -> BoxedLink<TestRoute, Spec3> {
    let mut head = chain();
    head.set(route([Some("a"), Some("b"), Some("c")], "abc"));
    head.set(route([Some("a"), Some("b"), None], "ab"));
    head.set(route([Some("a"), None, Some("c")], "ac"));
    head.set(route([Some("a"), None, None], "a"));
    head.set(route([None, Some("b"), Some("c")], "bc"));
    head.set(route([None, Some("b"), None], "b"));
    head.set(route([None, None, Some("c")], "c"));
    head.set(route([None, None, None], "any"));
    head
}

const FULL_INPUT: Spec3 = [Some("a"), Some("b"), Some("c")];

fn resolved_name(head: &BoxedLink<TestRoute, Spec3>, mut input: Spec3) -> Option<&'static str> {
    head.resolve(&mut input).ok().map(|r| r.name)
}

fn resolve_all_names(head: &BoxedLink<TestRoute, Spec3>, input: Spec3) -> Vec<&'static str> {
    let mut out = Vec::new();
    head.resolve_all(&input, &mut out);
    out.into_iter().map(|r| r.name).collect()
}

#[test]
fn test_resolve_picks_most_constrained_subset() {
    let head = fixture();
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("abc"));
}

#[test]
fn test_resolve_all_orders_every_subset() {
    let head = fixture();
    assert_eq!(
        resolve_all_names(&head, FULL_INPUT),
        vec!["abc", "ab", "ac", "a", "bc", "b", "c", "any"]
    );
}

#[test]
fn test_mutated_fixture_remove_top_route() {
    let mut head = fixture();
    head.remove(&[Some("a"), Some("b"), Some("c")]);
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("ab"));
    assert_eq!(
        resolve_all_names(&head, FULL_INPUT),
        vec!["ab", "ac", "a", "bc", "b", "c", "any"]
    );
}

#[test]
fn test_mutated_fixture_disable_mid_route() {
    let mut head = fixture();
    head.disable(&[Some("a"), Some("b"), None]);
    assert_eq!(
        resolve_all_names(&head, FULL_INPUT),
        vec!["abc", "ac", "a", "bc", "b", "c", "any"]
    );
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("abc"));
}

#[test]
fn test_mutated_fixture_remove_single_axis_route_keeps_supersets() {
    let mut head = fixture();
    head.remove(&[Some("a"), None, None]);
    // (a=X, b=Y) and (a=X, c=Z) must survive the removal of (a=X).
    assert_eq!(resolved_name(&head, [Some("a"), Some("b"), None]), Some("ab"));
    assert_eq!(resolved_name(&head, [Some("a"), None, Some("c")]), Some("ac"));
    assert_eq!(
        resolve_all_names(&head, FULL_INPUT),
        vec!["abc", "ab", "ac", "bc", "b", "c", "any"]
    );
}

#[test]
fn test_mutated_fixture_remove_default_route() {
    let mut head = fixture();
    head.remove(&[None, None, None]);
    assert_eq!(
        resolve_all_names(&head, FULL_INPUT),
        vec!["abc", "ab", "ac", "a", "bc", "b", "c"]
    );
    // A request matching nothing specific now has no fallback at all.
    assert_eq!(resolved_name(&head, [Some("z"), Some("z"), Some("z")]), None);
}

#[test]
fn test_mutated_fixture_unconstrained_input_axis() {
    let head = fixture();
    // The input never declares axis 2, so only axis-2-unconstrained routes
    // are eligible for resolve; the a-branch commits first.
    assert_eq!(resolved_name(&head, [Some("a"), None, Some("c")]), Some("ac"));
    // resolve_all still enumerates every bucket of the undeclared axis,
    // in stable insertion order, ahead of its wildcard.
    assert_eq!(
        resolve_all_names(&head, [Some("a"), None, Some("c")]),
        vec!["abc", "ab", "ac", "a", "bc", "b", "c", "any"]
    );
}

#[test]
fn test_enable_disable_idempotent_and_reversible() {
    let mut head = fixture();
    let spec: Spec3 = [Some("a"), Some("b"), Some("c")];
    let baseline = resolve_all_names(&head, FULL_INPUT);

    head.disable(&spec);
    head.disable(&spec);
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("ab"));

    head.enable(&spec);
    assert_eq!(resolve_all_names(&head, FULL_INPUT), baseline);
    head.enable(&spec);
    assert_eq!(resolve_all_names(&head, FULL_INPUT), baseline);
}

#[test]
fn test_disabled_route_still_extracted() {
    let mut head = fixture();
    head.disable(&[Some("a"), Some("b"), Some("c")]);
    let mut out = Vec::new();
    head.extract(&mut out);
    assert_eq!(out.len(), 8);
    let abc = out
        .iter()
        .find(|r| r.name == "abc")
        .expect("abc route extracted");
    assert!(!abc.enabled);
}

#[test]
fn test_value_branch_commits_without_wildcard_backtracking() {
    let mut head = chain();
    head.set(route([Some("x"), None, Some("z")], "specific"));
    head.set(route([None, None, Some("w")], "fallback"));

    // Axis 0 matches the "x" bucket, so resolution commits to that branch;
    // its axis-2 failure must not fall through to the axis-0 wildcard.
    assert_eq!(resolved_name(&head, [Some("x"), None, Some("w")]), None);

    head.remove(&[Some("x"), None, Some("z")]);
    assert_eq!(
        resolved_name(&head, [Some("x"), None, Some("w")]),
        Some("fallback")
    );
}

#[test]
fn test_no_match_falls_back_to_wildcard_bucket() {
    let head = fixture();
    // Axis 1 bucket "b" does not match "x": fallback to the axis-1 wildcard
    // is allowed because no bucket matched at all.
    assert_eq!(resolved_name(&head, [Some("a"), Some("x"), Some("c")]), Some("ac"));
}

#[test]
fn test_set_same_combination_overwrites() {
    let mut head = chain();
    head.set(route([Some("a"), None, None], "first"));
    head.set(route([Some("a"), None, None], "second"));

    assert_eq!(resolved_name(&head, [Some("a"), Some("b"), Some("c")]), Some("second"));
    let mut out = Vec::new();
    head.extract(&mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn test_remove_unknown_partial_combination_is_noop() {
    let mut head = chain();
    head.set(route([Some("a"), Some("b"), None], "ab"));

    head.remove(&[Some("a"), None, None]);
    head.remove(&[Some("a"), Some("b"), Some("c")]);
    head.remove(&[None, Some("b"), None]);

    let mut out = Vec::new();
    head.extract(&mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("ab"));
}

#[test]
fn test_enable_unknown_combination_is_noop() {
    let mut head = chain();
    head.set(route([Some("a"), None, None], "a"));
    head.enable(&[Some("q"), None, None]);
    head.disable(&[Some("q"), None, None]);
    assert_eq!(resolved_name(&head, FULL_INPUT), Some("a"));
}

#[test]
fn test_empty_chain_resolves_to_not_found() {
    let head = chain();
    let mut input = FULL_INPUT;
    assert_eq!(head.resolve(&mut input), Err(RouteError::NotFound));
    assert!(head.is_empty());
}
