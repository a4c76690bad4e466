//! Explicit owner of pipeline tasks
//!
//! Patch streams and mount points don't run in an ambient scope. Whoever
//! owns the UI node owns a [`Lifetime`], binds its streams and futures to
//! it, and cancels it (or drops it) when the node goes away.

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use futures::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type SharedState = Mutex<LifetimeState>;

#[derive(Debug, Default)]
struct LifetimeState {
    cancelled: bool,
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
}

/// Cancels everything bound to it when cancelled or dropped.
///
/// A bound stream ends at its next poll after cancellation; a bound future
/// resolves to `Err(Aborted)`. Work already running inside a poll (such as
/// applying one patch) completes; nothing new is accepted afterwards.
/// A bound task's abort handle is released as soon as the task is dropped
/// (or a bound future completes), so binding repeatedly does not accumulate.
///
/// # Examples
///
/// ```rust
/// use dataflow::Lifetime;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let lifetime = Lifetime::new();
/// let mut ticks = lifetime.bind_stream(futures::stream::repeat(1));
///
/// assert_eq!(ticks.next().await, Some(1));
/// lifetime.cancel();
/// assert_eq!(ticks.next().await, None);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct Lifetime {
    state: Arc<SharedState>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a future; it resolves to `Err(Aborted)` once cancelled.
    pub fn bind<F>(&self, future: F) -> impl Future<Output = Result<F::Output, Aborted>> + use<F>
    where
        F: Future,
    {
        let (registration, registered) = self.register();
        async move {
            let _registered = registered;
            Abortable::new(future, registration).await
        }
    }

    /// Bind a stream; it ends once cancelled.
    pub fn bind_stream<S>(&self, stream: S) -> impl Stream<Item = S::Item> + use<S>
    where
        S: Stream,
    {
        let (registration, registered) = self.register();
        Abortable::new(stream, registration).map(move |item| {
            let _registered = &registered;
            item
        })
    }

    pub fn cancel(&self) {
        let handles = {
            let mut state = lock(&self.state);
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            std::mem::take(&mut state.handles)
        };
        log::debug!("lifetime cancelled, aborting {} bound task(s)", handles.len());
        for handle in handles.into_values() {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        lock(&self.state).cancelled
    }

    /// Number of bound tasks that are still alive.
    pub fn bound_count(&self) -> usize {
        lock(&self.state).handles.len()
    }

    fn register(&self) -> (AbortRegistration, Registered) {
        let (handle, registration) = AbortHandle::new_pair();
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;
        if state.cancelled {
            handle.abort();
        } else {
            state.handles.insert(id, handle);
        }
        let registered = Registered {
            state: Arc::downgrade(&self.state),
            id,
        };
        (registration, registered)
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Releases a bound task's abort handle when the task goes away.
struct Registered {
    state: Weak<SharedState>,
    id: u64,
}

impl Drop for Registered {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            lock(&state).handles.remove(&self.id);
        }
    }
}

fn lock(state: &SharedState) -> MutexGuard<'_, LifetimeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
