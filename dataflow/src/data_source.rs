//! Raw list sources
//!
//! A list binding reads either a live [`Store`] or a fixed list.

use crate::Store;
use futures::stream::{self, BoxStream, StreamExt};
use futures_signals::signal::{Signal, SignalExt, always};
use std::pin::Pin;

pub type BoxSignal<T> = Pin<Box<dyn Signal<Item = T> + Send>>;

/// Where the raw items of a list binding come from.
pub enum DataSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// A store holding the list; every committed list is a new state
    Store(Store<Vec<T>>),

    /// A fixed list, emitted once
    Static(Vec<T>),
}

impl<T> Clone for DataSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        match self {
            DataSource::Store(store) => DataSource::Store(store.clone()),
            DataSource::Static(items) => DataSource::Static(items.clone()),
        }
    }
}

impl<T> DataSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn from_store(store: Store<Vec<T>>) -> Self {
        DataSource::Store(store)
    }

    pub fn from_static(items: Vec<T>) -> Self {
        DataSource::Static(items)
    }

    /// The list as it is right now.
    pub fn current(&self) -> Vec<T> {
        match self {
            DataSource::Store(store) => store.current(),
            DataSource::Static(items) => items.clone(),
        }
    }

    /// Fresh lossless stream of list states, starting with the current one.
    pub fn values(&self) -> BoxStream<'static, Vec<T>> {
        match self {
            DataSource::Store(store) => store.data().boxed(),
            DataSource::Static(items) => stream::iter([items.clone()]).boxed(),
        }
    }

    /// Fresh latest-value signal of the list.
    pub fn signal(&self) -> BoxSignal<Vec<T>> {
        match self {
            DataSource::Store(store) => store.signal().boxed(),
            DataSource::Static(items) => always(items.clone()).boxed(),
        }
    }
}

impl<T> From<Store<Vec<T>>> for DataSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(store: Store<Vec<T>>) -> Self {
        DataSource::Store(store)
    }
}

impl<T> From<Vec<T>> for DataSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(items: Vec<T>) -> Self {
        DataSource::Static(items)
    }
}
