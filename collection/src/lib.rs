// DataCollection - sortable, filterable, selectable list rendered through patches
//
// Raw items flow from a Store (or a static list) through filter and sort into
// a patch stream; a MountPoint applies those patches to live nodes. Selection
// and the active item are driven by pointer, focus and keyboard gestures.

mod active_item;
mod builder;
mod component;
mod error;
mod filtering;
mod mount_point;
mod selection;
mod sorting;

// Public API exports
pub use active_item::{ActiveItem, Key, navigate};
pub use builder::DataCollectionBuilder;
pub use component::{DataCollection, Interaction, ScrollRequest};
pub use error::ConfigError;
pub use filtering::Filter;
pub use mount_point::{MountPoint, NodeContainer};
pub use selection::Selection;
pub use sorting::{SortDirection, Sorting, SortingOrder};

// Builder pattern entry point
pub fn data_collection<T>() -> DataCollectionBuilder<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    DataCollectionBuilder::new()
}
