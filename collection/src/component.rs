//! DataCollection component
//!
//! Owns the sort, filter and active-item state of one list and derives the
//! visible view, its patches and the per-item signals from it.

use crate::{ActiveItem, Filter, Key, Selection, SortDirection, Sorting, SortingOrder, navigate};
use dataflow::{BoxSignal, DataSource, Handler, IdProvider, Patch, Store, patches};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use futures_signals::map_ref;
use futures_signals::signal::{Signal, SignalExt};
use shared::{CollectionSettings, ScrollIntoViewOptions};
use std::sync::Arc;

/// UI gesture delivered to a [`DataCollection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction<T> {
    PointerMoved(T),
    /// The pointer left the collection; `has_focus` tells whether it still holds focus
    PointerLeft { has_focus: bool },
    FocusLost,
    KeyPressed(Key),
    Clicked(T),
}

/// Request to bring an item into view, produced by keyboard navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest<T> {
    pub item: T,
    pub options: ScrollIntoViewOptions,
}

/// A list of items that can be filtered, sorted, navigated and selected.
///
/// Raw items come from a [`DataSource`]; the visible view is
/// `sort(filter(raw))`, recomputed whenever the raw items, the filter or
/// the sort order change. Renderers consume [`DataCollection::patches`]
/// and the per-item signals.
pub struct DataCollection<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    source: DataSource<T>,
    id: IdProvider<T>,
    selection: Selection<T>,
    settings: CollectionSettings,
    sorting: Store<Option<SortingOrder<T>>>,
    filtering: Store<Option<Filter<T>>>,
    active: Store<Option<ActiveItem<T>>>,
}

impl<T> DataCollection<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub(crate) fn new(
        source: DataSource<T>,
        id: IdProvider<T>,
        selection: Selection<T>,
        settings: CollectionSettings,
    ) -> Self {
        Self {
            source,
            id,
            selection,
            settings,
            sorting: Store::new(None),
            filtering: Store::new(None),
            active: Store::new(None),
        }
    }

    pub fn id_provider(&self) -> &IdProvider<T> {
        &self.id
    }

    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    pub fn settings(&self) -> &CollectionSettings {
        &self.settings
    }

    // ===== SORTING =====

    pub fn sort_by(&self, order: Option<SortingOrder<T>>) {
        self.sorting.update(order);
    }

    /// Pick a sort dimension: the active one cycles its direction, another starts ascending.
    pub fn toggle_sorting(&self, sorting: &Sorting<T>) -> SortDirection {
        let order = self
            .sorting
            .update_with(|current| Some(SortingOrder::toggle(current.as_ref(), sorting)));
        SortingOrder::direction_of(order.as_ref(), sorting)
    }

    /// Handler for sort button clicks.
    pub fn toggle_sorting_handler(&self) -> Handler<Option<SortingOrder<T>>, Sorting<T>> {
        self.sorting.handle(|current: &Option<SortingOrder<T>>, sorting: Sorting<T>| {
            Some(SortingOrder::toggle(current.as_ref(), &sorting))
        })
    }

    /// Direction to show on the button of `sorting`.
    pub fn sorting_direction(&self, sorting: &Sorting<T>) -> impl Signal<Item = SortDirection> + Send + use<T> {
        let sorting = sorting.clone();
        self.sorting
            .signal_ref(move |current| SortingOrder::direction_of(current.as_ref(), &sorting))
            .dedupe()
    }

    pub fn sorting_order(&self) -> Option<SortingOrder<T>> {
        self.sorting.current()
    }

    // ===== FILTERING =====

    pub fn filter_by(&self, filter: Option<Filter<T>>) {
        self.filtering.update(filter);
    }

    /// Handler turning query text into a text filter over `to_string(item)`.
    pub fn filter_by_text<F>(&self, to_string: F) -> Handler<Option<Filter<T>>, String>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let to_string = Arc::new(to_string);
        let options = self.settings.text_filter;
        self.filtering.handle(move |_: &Option<Filter<T>>, query: String| {
            let to_string = Arc::clone(&to_string);
            Some(Filter::text(query, move |item: &T| to_string(item), options))
        })
    }

    // ===== DERIVED VIEW =====

    /// The visible items, latest value only.
    pub fn items_signal(&self) -> impl Signal<Item = Vec<T>> + Send + use<T> {
        map_ref! {
            let items = self.source.signal(),
            let filter = self.filtering.signal(),
            let order = self.sorting.signal() => {
                derive_view(items, filter.as_ref(), order.as_ref())
            }
        }
    }

    pub fn current_items(&self) -> Vec<T> {
        derive_view(
            &self.source.current(),
            self.filtering.current().as_ref(),
            self.sorting.current().as_ref(),
        )
    }

    /// Patches of the visible items, starting with the current view.
    ///
    /// Each call is an independent subscription. Intermediate views that
    /// are superseded before the consumer polls are skipped; every patch is
    /// still relative to the view delivered before it.
    pub fn patches(&self) -> BoxStream<'static, Patch<T>> {
        patches(self.items_signal().to_stream(), self.id.clone()).boxed()
    }

    // ===== INTERACTION =====

    /// Pointer over `item`: make it active unless it already is.
    pub fn pointer_moved(&self, item: T) {
        let current = self.active.current();
        if !self.id.is_same_opt(current.as_ref().map(|active| &active.item), &item) {
            self.active.update(Some(ActiveItem::by_pointer(item)));
        }
    }

    /// Pointer left the collection; the active item stays while the collection holds focus.
    pub fn pointer_left(&self, has_focus: bool) {
        if !has_focus {
            self.reset_active();
        }
    }

    pub fn focus_lost(&self) {
        self.reset_active();
    }

    /// Handle a key press. Returns `true` when the key was consumed and
    /// its default action should be suppressed.
    pub fn key_pressed(&self, key: Key) -> bool {
        let active = self.active.current();
        let active_item = active.as_ref().map(|active| &active.item);

        if key.is_navigation() {
            let items = self.current_items();
            return match navigate(&items, active_item, key, &self.id) {
                Some(next) => {
                    self.active.update(Some(next));
                    true
                }
                None => false,
            };
        }

        if key.is_activation() && self.selection.is_configured() {
            if let Some(item) = active_item {
                self.selection.toggle(item.clone(), &self.id);
                return true;
            }
        }
        false
    }

    pub fn clicked(&self, item: T) {
        self.selection.toggle(item, &self.id);
    }

    /// Dispatch one gesture; returns whether it was consumed.
    pub fn interact(&self, interaction: Interaction<T>) -> bool {
        match interaction {
            Interaction::PointerMoved(item) => self.pointer_moved(item),
            Interaction::PointerLeft { has_focus } => self.pointer_left(has_focus),
            Interaction::FocusLost => self.focus_lost(),
            Interaction::KeyPressed(key) => return self.key_pressed(key),
            Interaction::Clicked(item) => self.clicked(item),
        }
        true
    }

    /// Feed gestures (usually a relay stream) until the stream ends.
    pub async fn handle_interactions<S>(&self, interactions: S)
    where
        S: Stream<Item = Interaction<T>>,
    {
        let mut interactions = std::pin::pin!(interactions);
        while let Some(interaction) = interactions.next().await {
            self.interact(interaction);
        }
    }

    fn reset_active(&self) {
        if self.active.current().is_some() {
            self.active.update(None);
        }
    }

    // ===== PER-ITEM STATE =====

    /// Element id for `item`: `{collection id}-{key}`, or just the key when
    /// the collection has no id. `None` without a key function.
    pub fn item_id(&self, item: &T) -> Option<String> {
        let key = self.id.key_text(item)?;
        Some(match &self.settings.id {
            Some(collection_id) => format!("{collection_id}-{key}"),
            None => key,
        })
    }

    pub fn active_item(&self) -> impl Signal<Item = Option<ActiveItem<T>>> + Send + use<T> {
        self.active.signal()
    }

    pub fn current_active_item(&self) -> Option<ActiveItem<T>> {
        self.active.current()
    }

    pub fn is_selected(&self, item: &T) -> BoxSignal<bool> {
        self.selection.selected_signal(item.clone(), self.id.clone())
    }

    pub fn is_active(&self, item: &T) -> impl Signal<Item = bool> + Send + use<T> {
        let id = self.id.clone();
        let item = item.clone();
        self.active
            .signal_ref(move |active| id.is_same_opt(active.as_ref().map(|active| &active.item), &item))
            .dedupe()
    }

    /// Keyboard-driven activations to scroll into view.
    ///
    /// Empty unless scroll-into-view is configured. The active item present
    /// at subscription time is not replayed.
    pub fn scroll_requests(&self) -> BoxStream<'static, ScrollRequest<T>> {
        let Some(options) = self.settings.scroll_into_view else {
            return stream::empty().boxed();
        };
        self.active
            .data()
            .skip(1)
            .filter_map(move |active| {
                let request = active
                    .filter(|active| active.from_keyboard)
                    .map(|active| ScrollRequest {
                        item: active.item,
                        options,
                    });
                futures::future::ready(request)
            })
            .boxed()
    }
}

/// `sort(filter(items))`
fn derive_view<T>(items: &[T], filter: Option<&Filter<T>>, order: Option<&SortingOrder<T>>) -> Vec<T>
where
    T: Clone,
{
    let mut view = match filter {
        Some(filter) => filter.apply(items),
        None => items.to_vec(),
    };
    if let Some(order) = order {
        order.sort(&mut view);
    }
    view
}
