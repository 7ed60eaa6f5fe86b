//! # Router façade
//!
//! The outward surface of the crate: [`Router`] owns the head of the HTTP
//! criteria chain and exposes resolution plus the full route lifecycle
//! (set/remove/enable/disable). [`RouteManager`] is the builder/query façade
//! declaring multi-valued per-axis constraints, [`RouteExtractor`] walks the
//! chain back into [`Route`](crate::route::Route) values, and
//! [`SharedRouter`] publishes copy-on-write snapshots for concurrent readers.

mod core;
mod extract;
mod manager;
mod shared;

pub use self::core::Router;
pub use extract::RouteExtractor;
pub use manager::RouteManager;
pub use shared::SharedRouter;
