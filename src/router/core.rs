//! Router façade - owns the criteria chain head.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::criteria::{
    AcceptCriterion, ContentTypeCriterion, LanguageCriterion, MethodCriterion, PathCriterion,
    RequestContext,
};
use crate::error::RouteError;
use crate::link::{BoxedLink, ChainBuilder, Link};
use crate::route::{Route, RouteSpec};

use super::extract::RouteExtractor;
use super::manager::RouteManager;

/// Resolves requests to payloads across the HTTP criteria chain:
/// path > method > content type > accept > accept-language.
///
/// The chain is shared, mutable, in-memory state: read on every inbound
/// request, written rarely (registration at startup, administrative
/// enable/disable). `resolve` and `resolve_all` are synchronous, non-blocking
/// functions of (chain state, input) with no I/O; the router itself carries no
/// lock. Wrap it in [`SharedRouter`](super::SharedRouter) when reads and
/// writes come from different threads.
///
/// # Example
///
/// ```
/// use http::Method;
/// use crossbar::{RequestContext, Router};
///
/// let mut router = Router::new();
/// router.route().path("/pets/{id}").method(Method::GET).set("get_pet");
///
/// let mut ctx = RequestContext::new(Method::GET, "/pets/42");
/// assert_eq!(router.resolve(&mut ctx), Ok(&"get_pet"));
/// assert_eq!(ctx.path_param("id"), Some("42"));
/// ```
pub struct Router<P> {
    chain: BoxedLink<Route<P>, RequestContext>,
}

impl<P: Clone + Send + Sync + 'static> Router<P> {
    #[must_use]
    pub fn new() -> Self {
        let chain = ChainBuilder::new()
            .link(PathCriterion)
            .link(MethodCriterion)
            .link(ContentTypeCriterion)
            .link(AcceptCriterion)
            .link(LanguageCriterion)
            .build();
        Self { chain }
    }

    /// Insert a route. An existing route with a structurally equal spec is
    /// overwritten: last write wins.
    pub fn set_route(&mut self, route: Route<P>) {
        info!(
            spec = ?route.spec(),
            enabled = route.is_enabled(),
            "route registered"
        );
        self.chain.set(route);
    }

    /// Delete the route whose spec is structurally equal to `spec`. Unknown
    /// combinations are a silent no-op.
    pub fn remove_route(&mut self, spec: &RouteSpec) {
        debug!(spec = ?spec, "route removal requested");
        self.chain.remove(spec);
    }

    /// Restore a disabled route. Unknown combinations are a no-op.
    pub fn enable_route(&mut self, spec: &RouteSpec) {
        self.chain.enable(spec);
    }

    /// Soft-hide a route without removing its data. Unknown combinations are
    /// a no-op.
    pub fn disable_route(&mut self, spec: &RouteSpec) {
        self.chain.disable(spec);
    }

    /// Resolve a request to the payload of the most specific enabled route.
    ///
    /// On success the committed path pattern branch has populated
    /// `ctx.path_params`. On failure the error identifies the first exhausted
    /// axis so the caller can render 404/405/415/406 correctly.
    pub fn resolve<'a>(&'a self, ctx: &mut RequestContext) -> Result<&'a P, RouteError> {
        debug!(method = %ctx.method(), path = %ctx.path(), "route match attempt");
        let started = Instant::now();
        match self.chain.resolve(ctx) {
            Ok(route) => {
                info!(
                    method = %ctx.method(),
                    path = %ctx.path(),
                    path_params = ?ctx.path_params,
                    duration_us = started.elapsed().as_micros() as u64,
                    "route matched"
                );
                Ok(route.payload())
            }
            Err(err) => {
                warn!(
                    method = %ctx.method(),
                    path = %ctx.path(),
                    error = %err,
                    duration_us = started.elapsed().as_micros() as u64,
                    "no route matched"
                );
                Err(err)
            }
        }
    }

    /// Every payload compatible with the request, most specific first.
    ///
    /// The sequence is a finite snapshot; it is not restartable across
    /// mutation. Disabled routes are skipped.
    #[must_use]
    pub fn resolve_all(&self, ctx: &RequestContext) -> Vec<&P> {
        let mut routes = Vec::new();
        self.chain.resolve_all(ctx, &mut routes);
        routes.into_iter().map(Route::payload).collect()
    }

    /// Reconstruct every stored route, disabled ones included, with its
    /// last-set payload and enabled flag.
    #[must_use]
    pub fn routes(&self) -> Vec<Route<P>> {
        RouteExtractor::walk(&self.chain).into_routes()
    }

    /// Start declaring (or querying) routes through the builder façade.
    pub fn route(&mut self) -> RouteManager<'_, P> {
        RouteManager::new(self)
    }

    pub(super) fn chain(&self) -> &BoxedLink<Route<P>, RequestContext> {
        &self.chain
    }
}

impl<P: Clone + Send + Sync + 'static> Default for Router<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + Send + Sync + 'static> Clone for Router<P> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
        }
    }
}
