//! Single and multi selection

use dataflow::{BoxSignal, IdProvider, Store};
use futures_signals::signal::{SignalExt, always};

/// Where a collection writes its selection.
///
/// The stores belong to the caller; the collection only toggles them.
pub enum Selection<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Read-only collection, selection gestures are ignored
    None,

    /// At most one selected item
    Single(Store<Option<T>>),

    /// Any number of selected items, in the order they were selected
    Multi(Store<Vec<T>>),
}

impl<T> Clone for Selection<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Selection::None => Selection::None,
            Selection::Single(store) => Selection::Single(store.clone()),
            Selection::Multi(store) => Selection::Multi(store.clone()),
        }
    }
}

impl<T> Selection<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn is_configured(&self) -> bool {
        !matches!(self, Selection::None)
    }

    /// Toggle `item`.
    ///
    /// Single mode selects the item, or clears the selection when the item
    /// is already the selected one. Multi mode removes the item if present
    /// and appends it otherwise.
    pub fn toggle(&self, item: T, id: &IdProvider<T>) {
        match self {
            Selection::None => {
                log::trace!("selection gesture ignored, no selection configured");
            }
            Selection::Single(store) => {
                store.update_with(|current| {
                    if id.is_same_opt(current.as_ref(), &item) {
                        None
                    } else {
                        Some(item)
                    }
                });
            }
            Selection::Multi(store) => {
                store.update_with(|current| {
                    let mut next = current.clone();
                    if id.contains(current, &item) {
                        next.retain(|selected| !id.is_same(selected, &item));
                    } else {
                        next.push(item);
                    }
                    next
                });
            }
        }
    }

    pub fn is_selected(&self, item: &T, id: &IdProvider<T>) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(store) => id.is_same_opt(store.current().as_ref(), item),
            Selection::Multi(store) => id.contains(&store.current(), item),
        }
    }

    /// Whether `item` is selected, emitted only when it flips.
    pub fn selected_signal(&self, item: T, id: IdProvider<T>) -> BoxSignal<bool> {
        match self {
            Selection::None => always(false).boxed(),
            Selection::Single(store) => store
                .signal_ref(move |current| id.is_same_opt(current.as_ref(), &item))
                .dedupe()
                .boxed(),
            Selection::Multi(store) => store
                .signal_ref(move |current| id.contains(current, &item))
                .dedupe()
                .boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
    }

    fn by_id() -> IdProvider<Person> {
        IdProvider::by_key(|p: &Person| p.id)
    }

    #[test]
    fn single_selection_toggles_by_key() {
        let selected = Store::new(None);
        let selection = Selection::Single(selected.clone());
        let ada = Person { id: 1, name: "Ada" };
        let ada_copy = Person { id: 1, name: "Ada (edited)" };

        selection.toggle(ada.clone(), &by_id());
        assert_eq!(selected.current(), Some(ada));
        assert!(selection.is_selected(&ada_copy, &by_id()));

        selection.toggle(ada_copy, &by_id());
        assert_eq!(selected.current(), None);
    }

    #[test]
    fn single_selection_switches_to_another_item() {
        let selected = Store::new(Some(1));
        let selection = Selection::Single(selected.clone());

        selection.toggle(2, &IdProvider::structural());
        assert_eq!(selected.current(), Some(2));
    }

    #[test]
    fn multi_selection_keeps_insertion_order() {
        let selected = Store::new(Vec::new());
        let selection = Selection::Multi(selected.clone());
        let id = IdProvider::structural();

        for n in [3, 1, 2] {
            selection.toggle(n, &id);
        }
        assert_eq!(selected.current(), vec![3, 1, 2]);

        selection.toggle(1, &id);
        selection.toggle(1, &id);
        assert_eq!(selected.current(), vec![3, 2, 1]);
    }

    #[test]
    fn unconfigured_selection_is_a_noop() {
        let selection = Selection::<u8>::None;
        selection.toggle(1, &IdProvider::structural());
        assert!(!selection.is_configured());
        assert!(!selection.is_selected(&1, &IdProvider::structural()));
    }

    #[tokio::test]
    async fn selected_signal_follows_the_store() {
        let selected = Store::new(Vec::new());
        let selection = Selection::Multi(selected.clone());
        let grace = Person { id: 7, name: "Grace" };
        let mut flags = selection.selected_signal(grace.clone(), by_id()).to_stream();

        assert_eq!(flags.next().await, Some(false));
        selection.toggle(Person { id: 7, name: "G." }, &by_id());
        assert_eq!(flags.next().await, Some(true));
        assert!(selection.is_selected(&grace, &by_id()));
    }
}
