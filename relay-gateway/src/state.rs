//! Two-phase adapter readiness slot.
//!
//! The directory client finishes initializing asynchronously (key load +
//! first token fetch) after the HTTP surface is constructed. The slot
//! makes that window explicit: it starts empty, handlers that find it
//! empty reject the request, and [`ReadySlot::install`] publishes the
//! ready adapter once initialization completes.

use std::sync::{Arc, RwLock};

/// Holder for an adapter published after asynchronous initialization.
#[derive(Debug)]
pub struct ReadySlot<T: ?Sized> {
    inner: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> ReadySlot<T> {
    /// Create a slot in the not-ready state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Publish the initialized adapter.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread
    /// panicked while holding the write lock).
    pub fn install(&self, adapter: Arc<T>) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut guard = self
            .inner
            .write()
            .expect("ready slot write lock poisoned");
        *guard = Some(adapter);
    }

    /// The installed adapter, or `None` during the not-ready window.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let guard = self.inner.read().expect("ready slot read lock poisoned");
        guard.clone()
    }

    /// `true` once an adapter has been installed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.get().is_some()
    }
}

impl<T: ?Sized> Default for ReadySlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
