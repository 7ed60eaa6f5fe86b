//! Lock-free snapshot sharing for concurrent resolution.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::router::Router;

/// Copy-on-write wrapper publishing [`Router`] snapshots through an
/// [`ArcSwap`].
///
/// Resolution threads call [`load`](Self::load) and resolve against an
/// immutable snapshot without taking a lock; a snapshot stays valid (and
/// linearizable) for as long as the caller holds the `Arc`, even across a
/// concurrent swap. [`update`](Self::update) clones the current router,
/// applies the mutation and swaps the result in whole.
///
/// Updates follow single-writer discipline: two concurrent `update` calls
/// race clone-against-clone and the loser's mutation is dropped, so serialize
/// writers externally (registration and administrative toggles are rare,
/// typically startup or an admin task).
pub struct SharedRouter<P: Clone + Send + Sync + 'static> {
    inner: ArcSwap<Router<P>>,
}

impl<P: Clone + Send + Sync + 'static> SharedRouter<P> {
    #[must_use]
    pub fn new(router: Router<P>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Router<P>> {
        self.inner.load_full()
    }

    /// Clone the current router, let `mutate` rework it, publish the result.
    pub fn update(&self, mutate: impl FnOnce(&mut Router<P>)) {
        let mut next = Router::clone(&self.inner.load_full());
        mutate(&mut next);
        self.inner.store(Arc::new(next));
    }
}

impl<P: Clone + Send + Sync + 'static> Default for SharedRouter<P> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}
