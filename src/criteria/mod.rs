//! # HTTP criteria
//!
//! The HTTP instantiation of the generic engine: one [`Criterion`] per
//! classification axis, in chain order path > method > content type > accept >
//! accept-language, together with the value types they bucket routes by
//! ([`PathSpec`], [`http::Method`], [`MediaRange`], [`LanguageRange`]) and the
//! [`RequestContext`] input they match against.
//!
//! [`Criterion`]: crate::link::Criterion

mod context;
mod language;
mod media;
mod method;
mod path;

pub use context::{ParamVec, RequestContext, MAX_INLINE_PARAMS};
pub use language::{LanguageCriterion, LanguageRange};
pub use media::{AcceptCriterion, ContentTypeCriterion, MediaRange};
pub use method::MethodCriterion;
pub use path::{PathCriterion, PathPattern, PathSpec};
