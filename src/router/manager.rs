//! Builder/query façade over the router.

use http::Method;

use crate::criteria::{LanguageRange, MediaRange, PathSpec};
use crate::route::{Route, RouteSpec};

use super::core::Router;
use super::extract::RouteExtractor;

/// Accumulates, per axis, a *set* of acceptable values, then either
/// materializes one route per combination or queries the stored routes
/// compatible with the accumulated constraints.
///
/// Zero values on an axis means unconstrained; the distinction between "no
/// value" and "one value" is never lost. `set` takes the cartesian product
/// over the axes that received at least one value, so two methods and one
/// language yield two routes.
///
/// String-taking methods parse their argument and panic on malformed input;
/// route declaration is configuration, and a bad media range or language tag
/// there is a programming error, not a runtime condition.
///
/// # Example
///
/// ```
/// use http::Method;
/// use crossbar::Router;
///
/// let mut router = Router::new();
/// router
///     .route()
///     .path("/pets")
///     .method(Method::GET)
///     .method(Method::POST)
///     .language("en")
///     .set("pets_handler");
/// assert_eq!(router.routes().len(), 2);
/// ```
pub struct RouteManager<'a, P> {
    router: &'a mut Router<P>,
    paths: Vec<PathSpec>,
    methods: Vec<Method>,
    content_types: Vec<MediaRange>,
    accepts: Vec<MediaRange>,
    languages: Vec<LanguageRange>,
}

impl<'a, P: Clone + Send + Sync + 'static> RouteManager<'a, P> {
    pub(super) fn new(router: &'a mut Router<P>) -> Self {
        Self {
            router,
            paths: Vec::new(),
            methods: Vec::new(),
            content_types: Vec::new(),
            accepts: Vec::new(),
            languages: Vec::new(),
        }
    }

    /// Add an acceptable path; `{...}` captures make it a pattern.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.paths.push(PathSpec::from_path(path));
        self
    }

    #[must_use]
    pub fn path_spec(mut self, spec: PathSpec) -> Self {
        self.paths.push(spec);
        self
    }

    /// Add an acceptable request method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Add an acceptable request body media range.
    ///
    /// # Panics
    ///
    /// Panics when `range` is not a media range.
    #[must_use]
    pub fn content_type(mut self, range: &str) -> Self {
        match MediaRange::parse(range) {
            Some(parsed) => self.content_types.push(parsed),
            None => panic!("invalid media range for content_type: {range:?}"),
        }
        self
    }

    /// Add a producible representation, negotiated against Accept.
    ///
    /// # Panics
    ///
    /// Panics when `range` is not a media range.
    #[must_use]
    pub fn produces(mut self, range: &str) -> Self {
        match MediaRange::parse(range) {
            Some(parsed) => self.accepts.push(parsed),
            None => panic!("invalid media range for produces: {range:?}"),
        }
        self
    }

    /// Add a producible language, negotiated against Accept-Language.
    ///
    /// # Panics
    ///
    /// Panics when `tag` is not a language range.
    #[must_use]
    pub fn language(mut self, tag: &str) -> Self {
        match LanguageRange::parse(tag) {
            Some(parsed) => self.languages.push(parsed),
            None => panic!("invalid language range: {tag:?}"),
        }
        self
    }

    /// Materialize one enabled route per combination of the accumulated
    /// values and register them all with the router.
    pub fn set(self, payload: P) {
        let (router, combinations) = self.into_combinations();
        for spec in combinations {
            router.set_route(Route::new(spec, payload.clone()));
        }
    }

    /// Like [`set`](Self::set), but the materialized routes start disabled.
    pub fn set_disabled(self, payload: P) {
        let (router, combinations) = self.into_combinations();
        for spec in combinations {
            router.set_route(Route::disabled(spec, payload.clone()));
        }
    }

    /// Query the stored routes compatible with the accumulated constraints.
    ///
    /// An unconstrained manager axis is don't-care. A constrained axis
    /// matches routes whose value is in the set (paths also through pattern
    /// inclusion) or whose own axis is unconstrained, mirroring the
    /// bucket-versus-wildcard rule of resolution.
    #[must_use]
    pub fn find_routes(&self) -> Vec<Route<P>> {
        RouteExtractor::walk(self.router.chain()).routes_matching(|spec| self.compatible(spec))
    }

    /// Remove every route [`find_routes`](Self::find_routes) returns.
    pub fn remove(self) {
        for route in self.find_routes() {
            self.router.remove_route(route.spec());
        }
    }

    /// Enable every route [`find_routes`](Self::find_routes) returns.
    pub fn enable(self) {
        for route in self.find_routes() {
            self.router.enable_route(route.spec());
        }
    }

    /// Disable every route [`find_routes`](Self::find_routes) returns.
    pub fn disable(self) {
        for route in self.find_routes() {
            self.router.disable_route(route.spec());
        }
    }

    fn compatible(&self, spec: &RouteSpec) -> bool {
        fn axis_ok<T: PartialEq>(set: &[T], value: Option<&T>) -> bool {
            set.is_empty() || value.is_none_or(|v| set.contains(v))
        }

        let path_ok = self.paths.is_empty()
            || spec.path.as_ref().is_none_or(|route_path| {
                self.paths
                    .iter()
                    .any(|p| p == route_path || p.includes(route_path))
            });

        path_ok
            && axis_ok(&self.methods, spec.method.as_ref())
            && axis_ok(&self.content_types, spec.content_type.as_ref())
            && axis_ok(&self.accepts, spec.accept.as_ref())
            && axis_ok(&self.languages, spec.language.as_ref())
    }

    fn into_combinations(self) -> (&'a mut Router<P>, Combinations) {
        let combinations = Combinations::new(
            self.paths,
            self.methods,
            self.content_types,
            self.accepts,
            self.languages,
        );
        (self.router, combinations)
    }
}

/// Explicit, finite cartesian-product iterator over the accumulated axis
/// sets. An empty axis contributes the single unconstrained value; with every
/// axis empty the product is the lone global default spec.
struct Combinations {
    paths: Vec<PathSpec>,
    methods: Vec<Method>,
    content_types: Vec<MediaRange>,
    accepts: Vec<MediaRange>,
    languages: Vec<LanguageRange>,
    cursor: [usize; 5],
    done: bool,
}

impl Combinations {
    fn new(
        paths: Vec<PathSpec>,
        methods: Vec<Method>,
        content_types: Vec<MediaRange>,
        accepts: Vec<MediaRange>,
        languages: Vec<LanguageRange>,
    ) -> Self {
        Self {
            paths,
            methods,
            content_types,
            accepts,
            languages,
            cursor: [0; 5],
            done: false,
        }
    }

    fn dims(&self) -> [usize; 5] {
        [
            self.paths.len().max(1),
            self.methods.len().max(1),
            self.content_types.len().max(1),
            self.accepts.len().max(1),
            self.languages.len().max(1),
        ]
    }
}

impl Iterator for Combinations {
    type Item = RouteSpec;

    fn next(&mut self) -> Option<RouteSpec> {
        if self.done {
            return None;
        }
        let [p, m, c, a, l] = self.cursor;
        let spec = RouteSpec {
            path: self.paths.get(p).cloned(),
            method: self.methods.get(m).cloned(),
            content_type: self.content_types.get(c).cloned(),
            accept: self.accepts.get(a).cloned(),
            language: self.languages.get(l).cloned(),
        };

        // Odometer advance, least significant axis last.
        let dims = self.dims();
        self.done = true;
        for axis in (0..5).rev() {
            self.cursor[axis] += 1;
            if self.cursor[axis] < dims[axis] {
                self.done = false;
                break;
            }
            self.cursor[axis] = 0;
        }
        Some(spec)
    }
}
