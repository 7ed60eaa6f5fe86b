//! # Generic routing engine
//!
//! The engine that resolves an input against a chain of classification axes
//! ("criteria") in priority order. Nothing in this module knows about HTTP:
//! axes are pluggable through the [`Criterion`] trait, and the concrete HTTP
//! instantiation (path, method, content negotiation) lives in
//! [`crate::criteria`].
//!
//! See [`chain`] for the resolution, fallback and lifecycle semantics.

mod chain;
#[cfg(test)]
mod tests;

pub use chain::{
    BoxedLink, Candidates, ChainBuilder, ChainRoute, Criterion, EndLink, Link, LinkFactory,
    RoutingLink,
};
