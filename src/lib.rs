//! # crossbar
//!
//! A generic criteria-chain request router. An inbound request is resolved to
//! a registered payload by evaluating independent classification axes in
//! priority order; for HTTP that chain is path > method > content type >
//! accept > accept-language. Axes are pluggable: each supplies its own
//! value-matching policy (exact value, hierarchical path pattern, or RFC 7231
//! quality-weighted negotiation) while the outer algorithm - precedence,
//! wildcard fallback, enable/disable, precise removal, extraction - stays the
//! same for every axis.
//!
//! ## Architecture
//!
//! - **[`link`]** - the generic engine: one chain node per axis, value
//!   buckets plus a shared wildcard child, matching policy behind the
//!   [`Criterion`](link::Criterion) trait
//! - **[`criteria`]** - the HTTP axes and their value types ([`PathSpec`],
//!   [`MediaRange`], [`LanguageRange`]) and the [`RequestContext`] input
//! - **[`route`]** - the [`Route`]/[`RouteSpec`] value objects
//! - **[`router`]** - the [`Router`] façade, the [`RouteManager`]
//!   builder/query surface and the [`SharedRouter`] snapshot wrapper
//! - **[`error`]** - typed resolution failures ([`RouteError`]) mapping to
//!   404/405/415/406
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use crossbar::{RequestContext, RouteError, Router};
//!
//! let mut router = Router::new();
//! router
//!     .route()
//!     .path("/pets/{id}")
//!     .method(Method::GET)
//!     .produces("application/json")
//!     .set("get_pet");
//!
//! let mut ctx = RequestContext::new(Method::GET, "/pets/42")
//!     .with_accept("application/json");
//! assert_eq!(router.resolve(&mut ctx), Ok(&"get_pet"));
//! assert_eq!(ctx.path_param("id"), Some("42"));
//!
//! let mut ctx = RequestContext::new(Method::PUT, "/pets/42");
//! assert_eq!(
//!     router.resolve(&mut ctx),
//!     Err(RouteError::MethodNotAllowed { allowed: vec![Method::GET] })
//! );
//! ```
//!
//! Routes that constrain only some axes act as fallbacks on the others: a
//! route without an `accept` constraint is the default representation,
//! preferred over a negotiation failure yet still individually removable and
//! disableable. Out of scope by design: the HTTP codec that parses the wire,
//! the transport owning sockets, and any handler-discovery machinery - this
//! crate starts at "axis values in, payload out".

pub mod criteria;
pub mod error;
pub mod link;
pub mod route;
pub mod router;

pub use criteria::{
    AcceptCriterion, ContentTypeCriterion, LanguageCriterion, LanguageRange, MediaRange,
    MethodCriterion, ParamVec, PathCriterion, PathPattern, PathSpec, RequestContext,
};
pub use error::RouteError;
pub use route::{Route, RouteSpec};
pub use router::{RouteManager, Router, SharedRouter};
