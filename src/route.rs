//! Route value objects.

use http::Method;

use crate::criteria::{LanguageRange, MediaRange, PathSpec};
use crate::link::ChainRoute;

/// The identity of a route: its constraint (or lack of one) on every axis of
/// the HTTP chain.
///
/// Structural equality over exactly these fields is what `remove_route`,
/// `enable_route` and `disable_route` act on; a spec that differs on any axis,
/// including by being unconstrained where the stored route is not, names a
/// different combination and the operation is a silent no-op.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteSpec {
    pub path: Option<PathSpec>,
    pub method: Option<Method>,
    pub content_type: Option<MediaRange>,
    pub accept: Option<MediaRange>,
    pub language: Option<LanguageRange>,
}

impl RouteSpec {
    /// A spec constraining no axis: the global default route.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the path axis; `{...}` captures make it a pattern, anything
    /// else a literal.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(PathSpec::from_path(path));
        self
    }

    #[must_use]
    pub fn path_spec(mut self, spec: PathSpec) -> Self {
        self.path = Some(spec);
        self
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn content_type(mut self, range: MediaRange) -> Self {
        self.content_type = Some(range);
        self
    }

    #[must_use]
    pub fn accept(mut self, range: MediaRange) -> Self {
        self.accept = Some(range);
        self
    }

    #[must_use]
    pub fn language(mut self, range: LanguageRange) -> Self {
        self.language = Some(range);
        self
    }
}

/// A registered route: identity, payload and enabled flag.
///
/// The payload is whatever the caller dispatches on, typically a handler
/// reference or handler name.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<P> {
    spec: RouteSpec,
    payload: P,
    enabled: bool,
}

impl<P> Route<P> {
    /// Create an enabled route.
    #[must_use]
    pub fn new(spec: RouteSpec, payload: P) -> Self {
        Self {
            spec,
            payload,
            enabled: true,
        }
    }

    /// Create a route that is registered but soft-hidden until enabled.
    #[must_use]
    pub fn disabled(spec: RouteSpec, payload: P) -> Self {
        Self {
            spec,
            payload,
            enabled: false,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<P: Clone + Send + Sync + 'static> ChainRoute for Route<P> {
    type Spec = RouteSpec;

    fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
