//! Single-value reactive Store
//!
//! A Store owns the authoritative current value of some state. Every
//! mutation (`update`, `update_with`, `enqueue`, handlers) goes through one
//! apply point, so concurrent submissions are committed one at a time and
//! observers see them in commit order.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::stream::{Stream, StreamExt};
use futures_signals::signal::{Mutable, Signal};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lossless change stream of a [`Store`]: the value current at subscription
/// time, then every committed value.
pub type StoreStream<T> = UnboundedReceiver<T>;

/// Reactive state container with a serialized apply point.
///
/// # Core Principles
///
/// - **Single Point of Mutation**: every write is committed under one lock
/// - **Commit Order**: observers receive values in exactly the order they were committed
/// - **Copy on Read**: observers get clones, never a reference into the live value
///
/// Cloning a `Store` clones the handle; all clones share the same state.
///
/// # Examples
///
/// ```rust
/// use dataflow::Store;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let counter = Store::new(0);
/// let mut changes = counter.data();
///
/// counter.update(5);
/// counter.update_with(|current| current + 1);
///
/// assert_eq!(changes.next().await, Some(0));
/// assert_eq!(changes.next().await, Some(5));
/// assert_eq!(changes.next().await, Some(6));
/// # });
/// ```
#[derive(Debug)]
pub struct Store<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    // The observer list doubles as the apply lock
    observers: Arc<Mutex<Vec<UnboundedSender<T>>>>,
}

impl<T> Clone for Store<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            observers: Arc::clone(&self.observers),
        }
    }
}

impl<T> Store<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            state: Mutable::new(initial),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The last committed value.
    pub fn current(&self) -> T {
        self.state.get_cloned()
    }

    /// Subscribe to the lossless change stream.
    ///
    /// The stream starts with the current value and then yields every
    /// committed value in commit order. It never ends while the Store is alive.
    pub fn data(&self) -> StoreStream<T> {
        let mut observers = self.lock_observers();
        let (sender, receiver) = unbounded();
        let _ = sender.unbounded_send(self.state.get_cloned());
        observers.push(sender);
        receiver
    }

    /// Latest-value signal.
    ///
    /// Cheaper than [`Store::data`] for rendering: a slow consumer only sees
    /// the newest value and skips intermediate ones.
    pub fn signal(&self) -> impl Signal<Item = T> + Send + use<T> {
        self.state.signal_cloned()
    }

    /// Latest-value signal of something derived from the value, without
    /// cloning the value itself.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + Send + use<T, U, F>
    where
        F: FnMut(&T) -> U + Send + 'static,
    {
        self.state.signal_ref(f)
    }

    /// Replace the current value unconditionally.
    pub fn update(&self, value: T) {
        self.commit(|_| value);
    }

    /// Compute the next value from the current one and commit it.
    ///
    /// `f` runs while the apply lock is held; it must not touch this Store.
    pub fn update_with(&self, f: impl FnOnce(&T) -> T) -> T {
        self.commit(f)
    }

    /// Apply `f` to the latest value through the apply point and resolve
    /// with the committed value.
    pub async fn enqueue(&self, f: impl FnOnce(&T) -> T) -> T {
        self.commit(f)
    }

    /// Create a handler that turns a payload into the next value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dataflow::Store;
    ///
    /// let names = Store::new(Vec::<String>::new());
    /// let add_name = names.handle(|names: &Vec<String>, name: String| {
    ///     let mut names = names.clone();
    ///     names.push(name);
    ///     names
    /// });
    ///
    /// add_name.call("Ada".to_string());
    /// assert_eq!(names.current(), vec!["Ada".to_string()]);
    /// ```
    pub fn handle<P, F>(&self, f: F) -> Handler<T, P>
    where
        F: Fn(&T, P) -> T + Send + Sync + 'static,
    {
        Handler {
            store: self.clone(),
            apply: Arc::new(f),
        }
    }

    /// Number of live lossless subscribers, pruned on the next commit.
    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    fn commit(&self, f: impl FnOnce(&T) -> T) -> T {
        let mut observers = self.lock_observers();
        let next = {
            let mut state = self.state.lock_mut();
            let next = f(&*state);
            *state = next.clone();
            next
        };

        let before = observers.len();
        observers.retain(|observer| observer.unbounded_send(next.clone()).is_ok());
        if observers.len() < before {
            log::debug!("store pruned {} closed observer(s)", before - observers.len());
        }
        next
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<UnboundedSender<T>>> {
        // Observers are pushed or retained in single statements, a poisoned list is still consistent
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Operation bound to a [`Store`] that computes the next value from a payload.
pub struct Handler<T, P>
where
    T: Clone + Send + Sync + 'static,
{
    store: Store<T>,
    apply: Arc<dyn Fn(&T, P) -> T + Send + Sync>,
}

impl<T, P> Clone for Handler<T, P>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T, P> Handler<T, P>
where
    T: Clone + Send + Sync + 'static,
{
    /// Apply one payload and return the committed value.
    pub fn call(&self, payload: P) -> T {
        self.store.commit(|current| (self.apply)(current, payload))
    }

    /// Feed every payload of `payloads` through the handler until the stream ends.
    pub async fn handled_by<S>(&self, payloads: S)
    where
        S: Stream<Item = P>,
    {
        let mut payloads = std::pin::pin!(payloads);
        while let Some(payload) = payloads.next().await {
            self.call(payload);
        }
    }

    pub fn store(&self) -> &Store<T> {
        &self.store
    }
}
