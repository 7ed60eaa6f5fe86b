//! Generic single-axis chain node - the core of the routing engine.
//!
//! A route tree is a chain of [`RoutingLink`] nodes, one per classification
//! axis, terminated by an [`EndLink`]. Each node owns one child chain per
//! registered axis value (a "bucket", kept in stable insertion order) plus one
//! shared wildcard child chain for routes that do not constrain the axis. The
//! matching policy for an axis - exact value, hierarchical pattern, or
//! quality-weighted negotiation - is supplied by a [`Criterion`]; the outer
//! algorithm (priority, fallback, enable/disable, precise removal, extraction)
//! is identical for every axis.
//!
//! ## Resolution semantics
//!
//! A route reaching a node takes exactly one road: the bucket for its value if
//! it constrains the axis, the wildcard otherwise. Resolution mirrors this:
//! buckets compatible with the input are tried first, in the criterion's
//! preference order, and once any bucket matches the input the wildcard of the
//! *same* axis is off the table - a request that matches a concrete method
//! branch but fails language negotiation deeper down surfaces the negotiation
//! failure instead of silently falling through to a method-unconstrained
//! route. Only when no bucket matches does resolution fall back to the
//! wildcard chain.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::RouteError;

/// A boxed chain node. Chains are built from trait objects so that axes with
/// different value types can be composed in any order.
pub type BoxedLink<R, I> = Box<dyn Link<R, I> + Send + Sync>;

/// Factory constructing the head of the next axis's chain. Every bucket of a
/// node gets its own child chain from this factory.
pub type LinkFactory<R, I> = Arc<dyn Fn() -> BoxedLink<R, I> + Send + Sync>;

/// A route as seen by the generic engine: an identity (the per-axis constraint
/// tuple) plus an enabled flag. The payload, if any, travels inside the
/// implementing type.
pub trait ChainRoute: Clone + Send + Sync + 'static {
    /// The per-axis constraint tuple identifying this route. Removal, enable
    /// and disable act only on an entry whose stored spec is structurally
    /// equal to the given one.
    type Spec;

    fn spec(&self) -> &Self::Spec;

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// Buckets of one node compatible with an input, as judged by the axis's
/// [`Criterion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// The input does not constrain this axis at all (e.g. a request without a
    /// declared content type). `resolve` then consults only the wildcard
    /// chain; `resolve_all` enumerates every bucket in stable order.
    Unconstrained,
    /// Bucket indices compatible with the input, most preferred first. Empty
    /// means the input constrains the axis but no bucket matches - the axis is
    /// exhausted unless the wildcard chain can answer.
    Matched(SmallVec<[usize; 4]>),
}

/// One axis's value-matching policy.
///
/// `S` is the route spec type the constraint is read from, `I` the input type
/// matched against. Implementations are cloned into every node the chain
/// factory creates, so they should be cheap value types.
pub trait Criterion<S, I>: Clone + Send + Sync + 'static {
    /// The axis value routes are bucketed by.
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Axis name for logging.
    fn name(&self) -> &'static str;

    /// The constraint a route places on this axis, `None` if unconstrained.
    fn constraint(&self, spec: &S) -> Option<Self::Value>;

    /// Judge the registered bucket values against an input.
    ///
    /// `values` is the node's bucket values in stable insertion order; the
    /// returned indices must refer into it.
    fn candidates(&self, values: &[Self::Value], input: &I) -> Candidates;

    /// Side effect applied once a branch under `value` has resolved, e.g. path
    /// parameter capture. Runs only on the committed branch, never on tried
    /// and abandoned siblings.
    fn on_match(&self, _value: &Self::Value, _input: &mut I) {}

    /// The typed failure for this axis when buckets exist but none can serve
    /// the input.
    fn exhausted(&self, values: &[Self::Value], input: &I) -> RouteError;
}

/// A node of the criteria chain.
///
/// Object safe so heterogeneous axes can be chained behind [`BoxedLink`].
pub trait Link<R: ChainRoute, I> {
    /// Whether the route constrains this node's axis.
    fn can_link(&self, spec: &R::Spec) -> bool;

    /// Insert a route. An entry with an equal residual combination at the
    /// terminal is overwritten: last write wins, never an error.
    fn set(&mut self, route: R);

    /// Delete the entry whose stored combination is structurally equal to
    /// `spec`. A mismatch anywhere along the descent is a silent no-op.
    fn remove(&mut self, spec: &R::Spec);

    /// Restore a soft-hidden entry. Unknown combinations are a no-op.
    fn enable(&mut self, spec: &R::Spec);

    /// Soft-hide an entry without removing its data. Unknown combinations are
    /// a no-op.
    fn disable(&mut self, spec: &R::Spec);

    /// Resolve an input to the most specific enabled route.
    fn resolve<'a>(&'a self, input: &mut I) -> Result<&'a R, RouteError>;

    /// Append every enabled route compatible with `input`, most specific
    /// first. Total precedence treats "axis N constrained" as a higher-order
    /// bit than axis N+1.
    fn resolve_all<'a>(&'a self, input: &I, out: &mut Vec<&'a R>);

    /// Append every stored route, disabled ones included, in traversal order.
    fn extract(&self, out: &mut Vec<R>);

    /// Whether no route is stored at or below this node.
    fn is_empty(&self) -> bool;

    fn boxed_clone(&self) -> BoxedLink<R, I>;
}

impl<R: ChainRoute, I> Clone for BoxedLink<R, I> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Chain node for one axis: per-value child chains plus a shared wildcard
/// child chain, with the matching policy delegated to `C`.
pub struct RoutingLink<R: ChainRoute, I, C: Criterion<R::Spec, I>> {
    criterion: C,
    /// Bucket values, parallel to `chains`, in stable insertion order.
    values: Vec<C::Value>,
    chains: Vec<BoxedLink<R, I>>,
    /// Continuation for routes that do not constrain this axis.
    wildcard: BoxedLink<R, I>,
    next: LinkFactory<R, I>,
}

impl<R: ChainRoute, I, C: Criterion<R::Spec, I>> RoutingLink<R, I, C> {
    pub fn new(criterion: C, next: LinkFactory<R, I>) -> Self {
        let wildcard = next();
        Self {
            criterion,
            values: Vec::new(),
            chains: Vec::new(),
            wildcard,
            next,
        }
    }

    /// The child chain for `value`, created from the factory if absent.
    fn bucket_mut(&mut self, value: C::Value) -> &mut BoxedLink<R, I> {
        let idx = match self.values.iter().position(|v| *v == value) {
            Some(idx) => idx,
            None => {
                self.values.push(value);
                self.chains.push((self.next)());
                self.chains.len() - 1
            }
        };
        &mut self.chains[idx]
    }
}

impl<R, I, C> Link<R, I> for RoutingLink<R, I, C>
where
    R: ChainRoute,
    I: 'static,
    C: Criterion<R::Spec, I>,
{
    fn can_link(&self, spec: &R::Spec) -> bool {
        self.criterion.constraint(spec).is_some()
    }

    fn set(&mut self, route: R) {
        match self.criterion.constraint(route.spec()) {
            Some(value) => self.bucket_mut(value).set(route),
            None => self.wildcard.set(route),
        }
    }

    fn remove(&mut self, spec: &R::Spec) {
        match self.criterion.constraint(spec) {
            Some(value) => {
                if let Some(idx) = self.values.iter().position(|v| *v == value) {
                    self.chains[idx].remove(spec);
                    if self.chains[idx].is_empty() {
                        self.values.remove(idx);
                        self.chains.remove(idx);
                    }
                }
            }
            None => self.wildcard.remove(spec),
        }
    }

    fn enable(&mut self, spec: &R::Spec) {
        match self.criterion.constraint(spec) {
            Some(value) => {
                if let Some(idx) = self.values.iter().position(|v| *v == value) {
                    self.chains[idx].enable(spec);
                }
            }
            None => self.wildcard.enable(spec),
        }
    }

    fn disable(&mut self, spec: &R::Spec) {
        match self.criterion.constraint(spec) {
            Some(value) => {
                if let Some(idx) = self.values.iter().position(|v| *v == value) {
                    self.chains[idx].disable(spec);
                }
            }
            None => self.wildcard.disable(spec),
        }
    }

    fn resolve<'a>(&'a self, input: &mut I) -> Result<&'a R, RouteError> {
        let selection = self.criterion.candidates(&self.values, &*input);
        if let Candidates::Matched(ref indices) = selection {
            if !indices.is_empty() {
                // Committed to the value buckets: errors from the tried
                // branches merge, and the wildcard of this axis stays out of
                // reach even if every branch fails.
                let mut failure: Option<RouteError> = None;
                for &idx in indices.iter() {
                    match self.chains[idx].resolve(input) {
                        Ok(route) => {
                            self.criterion.on_match(&self.values[idx], input);
                            return Ok(route);
                        }
                        Err(err) => {
                            failure = Some(match failure {
                                Some(prev) => prev.merge(err),
                                None => err,
                            });
                        }
                    }
                }
                return Err(failure.unwrap_or(RouteError::NotFound));
            }
        }

        match self.wildcard.resolve(input) {
            Ok(route) => Ok(route),
            Err(err) => {
                // The input constrained the axis, buckets exist, none matched
                // and the wildcard had nothing better to say: this axis is the
                // one that exhausted.
                let axis_exhausted =
                    matches!(selection, Candidates::Matched(_)) && !self.values.is_empty();
                if axis_exhausted && err == RouteError::NotFound {
                    Err(self.criterion.exhausted(&self.values, &*input))
                } else {
                    Err(err)
                }
            }
        }
    }

    fn resolve_all<'a>(&'a self, input: &I, out: &mut Vec<&'a R>) {
        match self.criterion.candidates(&self.values, input) {
            Candidates::Unconstrained => {
                for chain in &self.chains {
                    chain.resolve_all(input, out);
                }
            }
            Candidates::Matched(indices) => {
                for idx in indices {
                    self.chains[idx].resolve_all(input, out);
                }
            }
        }
        self.wildcard.resolve_all(input, out);
    }

    fn extract(&self, out: &mut Vec<R>) {
        for chain in &self.chains {
            chain.extract(out);
        }
        self.wildcard.extract(out);
    }

    fn is_empty(&self) -> bool {
        self.chains.iter().all(|c| c.is_empty()) && self.wildcard.is_empty()
    }

    fn boxed_clone(&self) -> BoxedLink<R, I> {
        Box::new(Self {
            criterion: self.criterion.clone(),
            values: self.values.clone(),
            chains: self.chains.clone(),
            wildcard: self.wildcard.clone(),
            next: Arc::clone(&self.next),
        })
    }
}

/// Terminal of a chain: the slot for the one route whose combination is the
/// exact descent path that reached it.
pub struct EndLink<R> {
    entry: Option<R>,
}

impl<R> EndLink<R> {
    pub fn new() -> Self {
        Self { entry: None }
    }
}

impl<R> Default for EndLink<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ChainRoute, I: 'static> Link<R, I> for EndLink<R> {
    fn can_link(&self, _spec: &R::Spec) -> bool {
        false
    }

    fn set(&mut self, route: R) {
        // Bucket selection upstream already pinned the full combination; an
        // existing entry is the same combination, so last write wins.
        self.entry = Some(route);
    }

    fn remove(&mut self, _spec: &R::Spec) {
        self.entry = None;
    }

    fn enable(&mut self, _spec: &R::Spec) {
        if let Some(route) = self.entry.as_mut() {
            route.set_enabled(true);
        }
    }

    fn disable(&mut self, _spec: &R::Spec) {
        if let Some(route) = self.entry.as_mut() {
            route.set_enabled(false);
        }
    }

    fn resolve<'a>(&'a self, _input: &mut I) -> Result<&'a R, RouteError> {
        match &self.entry {
            Some(route) if route.enabled() => Ok(route),
            _ => Err(RouteError::NotFound),
        }
    }

    fn resolve_all<'a>(&'a self, _input: &I, out: &mut Vec<&'a R>) {
        if let Some(route) = &self.entry {
            if route.enabled() {
                out.push(route);
            }
        }
    }

    fn extract(&self, out: &mut Vec<R>) {
        if let Some(route) = &self.entry {
            out.push(route.clone());
        }
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    fn boxed_clone(&self) -> BoxedLink<R, I> {
        Box::new(Self {
            entry: self.entry.clone(),
        })
    }
}

type Stage<R, I> = Box<dyn FnOnce(LinkFactory<R, I>) -> LinkFactory<R, I>>;

/// Composes criteria into a chain head.
///
/// Axis declaration order is priority order: the first linked criterion is the
/// highest-order bit of route precedence. Factories are folded from the
/// terminal backwards, which keeps "pluggable axis order" without the deep
/// generic nesting a statically typed chain would need.
///
/// ```
/// # use crossbar::link::ChainBuilder;
/// # use crossbar::criteria::{MethodCriterion, PathCriterion};
/// # use crossbar::route::Route;
/// let chain = ChainBuilder::<Route<&'static str>, _>::new()
///     .link(PathCriterion)
///     .link(MethodCriterion)
///     .build();
/// assert!(chain.is_empty());
/// ```
pub struct ChainBuilder<R: ChainRoute, I> {
    stages: Vec<Stage<R, I>>,
}

impl<R: ChainRoute, I: 'static> ChainBuilder<R, I> {
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append an axis to the chain, after all previously linked axes.
    #[must_use]
    pub fn link<C>(mut self, criterion: C) -> Self
    where
        C: Criterion<R::Spec, I>,
    {
        self.stages.push(Box::new(move |next: LinkFactory<R, I>| {
            Arc::new(move || {
                Box::new(RoutingLink::new(criterion.clone(), Arc::clone(&next)))
                    as BoxedLink<R, I>
            })
        }));
        self
    }

    /// Build the chain head. A builder with no linked axes yields a bare
    /// terminal that can hold a single unconstrained route.
    #[must_use]
    pub fn build(self) -> BoxedLink<R, I> {
        let mut factory: LinkFactory<R, I> = Arc::new(|| Box::new(EndLink::new()));
        for stage in self.stages.into_iter().rev() {
            factory = stage(factory);
        }
        factory()
    }
}

impl<R: ChainRoute, I: 'static> Default for ChainBuilder<R, I> {
    fn default() -> Self {
        Self::new()
    }
}
