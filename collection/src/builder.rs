//! Fluent configuration of a data collection

use crate::{ConfigError, DataCollection, Selection};
use dataflow::{DataSource, IdProvider, Store};
use shared::{CollectionSettings, ScrollIntoViewOptions};

/// Builder for configuring a [`DataCollection`] with a fluent API
pub struct DataCollectionBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    data: Option<DataSource<T>>,
    id_provider: Option<IdProvider<T>>,
    single_selection: Option<Store<Option<T>>>,
    multi_selection: Option<Store<Vec<T>>>,
    settings: CollectionSettings,
    scroll_into_view: Option<ScrollIntoViewOptions>,
}

impl<T> DataCollectionBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            data: None,
            id_provider: None,
            single_selection: None,
            multi_selection: None,
            settings: CollectionSettings::default(),
            scroll_into_view: None,
        }
    }

    /// Set the raw items: a `Store<Vec<T>>` or a static `Vec<T>`
    pub fn data(mut self, source: impl Into<DataSource<T>>) -> Self {
        self.data = Some(source.into());
        self
    }

    /// Match items by key instead of structural equality
    pub fn id_provider(mut self, id: IdProvider<T>) -> Self {
        self.id_provider = Some(id);
        self
    }

    /// Bind a single-selection store
    pub fn single_selection(mut self, store: Store<Option<T>>) -> Self {
        self.single_selection = Some(store);
        self
    }

    /// Bind a multi-selection store
    pub fn multi_selection(mut self, store: Store<Vec<T>>) -> Self {
        self.multi_selection = Some(store);
        self
    }

    pub fn settings(mut self, settings: CollectionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load settings from a TOML document
    pub fn settings_toml(self, source: &str) -> Result<Self, ConfigError> {
        let settings = CollectionSettings::from_toml_str(source)?;
        Ok(self.settings(settings))
    }

    /// Request scrolling for keyboard-driven activations (overrides settings)
    pub fn scroll_into_view(mut self, options: ScrollIntoViewOptions) -> Self {
        self.scroll_into_view = Some(options);
        self
    }

    /// Build the DataCollection
    ///
    /// Without data the collection shows an empty static list.
    pub fn build(self) -> Result<DataCollection<T>, ConfigError> {
        let selection = match (self.single_selection, self.multi_selection) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingSelection),
            (Some(single), None) => Selection::Single(single),
            (None, Some(multi)) => Selection::Multi(multi),
            (None, None) => Selection::None,
        };

        let mut settings = self.settings;
        if let Some(options) = self.scroll_into_view {
            settings.scroll_into_view = Some(options);
        }

        log::debug!(
            "building data collection {:?}: selection configured {}, scroll into view {}",
            settings.id,
            selection.is_configured(),
            settings.scroll_into_view.is_some()
        );

        Ok(DataCollection::new(
            self.data.unwrap_or_else(|| DataSource::from_static(Vec::new())),
            self.id_provider.unwrap_or_default(),
            selection,
            settings,
        ))
    }
}

impl<T> Default for DataCollectionBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
