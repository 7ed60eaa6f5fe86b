//! Route extraction - walking the chain back into `Route` values.

use crate::criteria::RequestContext;
use crate::link::{BoxedLink, Link};
use crate::route::{Route, RouteSpec};

/// Traversal visitor reconstructing the routes stored in a chain.
///
/// Every bucket of every node is visited in stable insertion order, value
/// buckets before the wildcard, so extraction order matches registration
/// precedence. Disabled routes are included; their enabled flag says so.
///
/// [`Router::routes`](super::Router::routes) and
/// [`RouteManager::find_routes`](super::RouteManager::find_routes) are the
/// usual entry points; `walk` is public for callers that assemble their own
/// chain through [`ChainBuilder`](crate::link::ChainBuilder).
pub struct RouteExtractor<P> {
    routes: Vec<Route<P>>,
}

impl<P: Clone + Send + Sync + 'static> RouteExtractor<P> {
    /// Collect every route stored at or below `chain`.
    #[must_use]
    pub fn walk(chain: &BoxedLink<Route<P>, RequestContext>) -> Self {
        let mut routes = Vec::new();
        chain.extract(&mut routes);
        Self { routes }
    }

    /// The collected routes, in traversal order.
    #[must_use]
    pub fn into_routes(self) -> Vec<Route<P>> {
        self.routes
    }

    /// Keep only routes whose spec satisfies the predicate.
    #[must_use]
    pub fn routes_matching(
        self,
        mut predicate: impl FnMut(&RouteSpec) -> bool,
    ) -> Vec<Route<P>> {
        self.routes
            .into_iter()
            .filter(|route| predicate(route.spec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::criteria::{MethodCriterion, PathCriterion};
    use crate::link::ChainBuilder;

    #[test]
    fn test_walk_over_a_caller_built_chain() {
        let mut chain: BoxedLink<Route<&'static str>, RequestContext> = ChainBuilder::new()
            .link(PathCriterion)
            .link(MethodCriterion)
            .build();
        chain.set(Route::new(
            RouteSpec::new().path("/pets").method(Method::GET),
            "list_pets",
        ));
        chain.set(Route::disabled(RouteSpec::new().path("/pets"), "fallback"));

        let routes = RouteExtractor::walk(&chain).into_routes();
        assert_eq!(routes.len(), 2);

        let enabled = RouteExtractor::walk(&chain).routes_matching(|spec| spec.method.is_some());
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].payload(), &"list_pets");
    }
}
