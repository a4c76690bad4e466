//! Patch streams over list-valued data
//!
//! A patch stream turns a stream of full list states into a stream of
//! [`Patch`]es: the first state is framed as "insert everything", every later
//! state is diffed against the one before it. Transitions that change nothing
//! emit no patch.

use crate::{DataSource, Differ, IdProvider, Patch, Store};
use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};

/// Convert successive list states into patches.
///
/// Patches come out in the order the states came in; nothing is reordered
/// or merged across transitions.
pub fn patches<T, S>(values: S, id: IdProvider<T>) -> impl Stream<Item = Patch<T>> + use<T, S>
where
    T: Clone + PartialEq,
    S: Stream<Item = Vec<T>>,
{
    let differ = Differ::new(id);
    values
        .scan(None::<Vec<T>>, move |previous, next| {
            let patches = match previous.as_deref() {
                None => vec![Patch::insert_all(next.clone())],
                Some(old) => differ.diff(old, &next),
            };
            *previous = Some(next);
            future::ready(Some(stream::iter(patches)))
        })
        .flatten()
}

/// Restartable patch stream over a [`DataSource`].
///
/// Every subscriber gets its own independent sequence, starting with the
/// initial framing of whatever the list holds at subscription time.
pub struct PatchStream<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    source: DataSource<T>,
    id: IdProvider<T>,
}

impl<T> Clone for PatchStream<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            id: self.id.clone(),
        }
    }
}

impl<T> PatchStream<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(source: impl Into<DataSource<T>>, id: IdProvider<T>) -> Self {
        Self {
            source: source.into(),
            id,
        }
    }

    pub fn subscribe(&self) -> BoxStream<'static, Patch<T>> {
        patches(self.source.values(), self.id.clone()).boxed()
    }

    pub fn source(&self) -> &DataSource<T> {
        &self.source
    }
}

impl<T> Store<Vec<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Patch stream over this list store.
    pub fn each(&self, id: IdProvider<T>) -> PatchStream<T> {
        PatchStream::new(self.clone(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn next_patches<T>(stream: &mut BoxStream<'static, Patch<T>>, count: usize) -> Vec<Patch<T>> {
        let mut collected = Vec::with_capacity(count);
        for _ in 0..count {
            collected.push(stream.next().await.expect("patch stream ended early"));
        }
        collected
    }

    #[tokio::test]
    async fn appending_at_end() {
        let store = Store::new(Vec::<i32>::new());
        let mut patches = store.each(IdProvider::structural()).subscribe();

        for i in 0..5 {
            store
                .enqueue(|list| {
                    let mut list = list.clone();
                    list.push(i);
                    list
                })
                .await;
        }

        let mut expected = vec![Patch::insert_all(vec![])];
        expected.extend((0..5).map(|i| Patch::new(i as usize, vec![i], 0)));
        assert_eq!(next_patches(&mut patches, 6).await, expected);
    }

    #[tokio::test]
    async fn appending_at_beginning() {
        let store = Store::new(vec![0]);
        let mut patches = store.each(IdProvider::structural()).subscribe();

        store.update_with(|list| {
            let mut list = list.clone();
            list.insert(0, 1);
            list
        });

        assert_eq!(
            next_patches(&mut patches, 2).await,
            vec![Patch::new(0, vec![0], 0), Patch::new(0, vec![1], 0)]
        );
    }

    #[tokio::test]
    async fn appending_in_the_middle() {
        let store = Store::new(vec![0, 2]);
        let mut patches = store.each(IdProvider::structural()).subscribe();

        store.update(vec![0, 1, 2]);

        assert_eq!(
            next_patches(&mut patches, 2).await,
            vec![Patch::new(0, vec![0, 2], 0), Patch::new(1, vec![1], 0)]
        );
    }

    #[tokio::test]
    async fn removing_at_end_beginning_and_middle() {
        let store = Store::new(vec![0, 1, 2, 3, 4]);
        let mut patches = store.each(IdProvider::structural()).subscribe();

        store.update(vec![0, 1, 2, 3]);
        store.update(vec![1, 2, 3]);
        store.update(vec![1, 3]);

        assert_eq!(
            next_patches(&mut patches, 4).await,
            vec![
                Patch::new(0, vec![0, 1, 2, 3, 4], 0),
                Patch::new(4, vec![], 1),
                Patch::new(0, vec![], 1),
                Patch::new(1, vec![], 1),
            ]
        );
    }

    #[tokio::test]
    async fn unchanged_states_emit_nothing() {
        let store = Store::new(vec![1, 2]);
        let mut patches = store.each(IdProvider::structural()).subscribe();

        store.update(vec![1, 2]);
        store.update(vec![1, 2, 3]);

        assert_eq!(
            next_patches(&mut patches, 2).await,
            vec![Patch::new(0, vec![1, 2], 0), Patch::new(2, vec![3], 0)]
        );
    }

    #[tokio::test]
    async fn every_subscriber_starts_with_its_own_framing() {
        let store = Store::new(vec!["a"]);
        let stream = store.each(IdProvider::structural());
        let mut early = stream.subscribe();

        store.update(vec!["a", "b"]);
        let mut late = stream.subscribe();
        store.update(vec!["b"]);

        assert_eq!(
            next_patches(&mut early, 3).await,
            vec![
                Patch::new(0, vec!["a"], 0),
                Patch::new(1, vec!["b"], 0),
                Patch::new(0, vec![], 1),
            ]
        );
        assert_eq!(
            next_patches(&mut late, 2).await,
            vec![Patch::new(0, vec!["a", "b"], 0), Patch::new(0, vec![], 1)]
        );
    }

    #[tokio::test]
    async fn keyed_content_edits_are_patched() {
        let store = Store::new(vec![(1, "Ada"), (2, "Grace")]);
        let mut patches = store.each(IdProvider::by_key(|item: &(u8, &str)| item.0)).subscribe();

        store.update(vec![(1, "Ada Lovelace"), (2, "Grace")]);

        assert_eq!(
            next_patches(&mut patches, 2).await,
            vec![
                Patch::new(0, vec![(1, "Ada"), (2, "Grace")], 0),
                Patch::new(0, vec![(1, "Ada Lovelace")], 1),
            ]
        );
    }

    #[tokio::test]
    async fn any_list_stream_can_be_patched() {
        let states = stream::iter(vec![vec![3], vec![3, 4], vec![4]]);
        let collected: Vec<Patch<i32>> = patches(states, IdProvider::structural()).collect().await;
        assert_eq!(
            collected,
            vec![
                Patch::new(0, vec![3], 0),
                Patch::new(1, vec![4], 0),
                Patch::new(0, vec![], 1),
            ]
        );
    }
}
