//! Item identity
//!
//! Whether two list items are the same entity, by key or by value.

use std::fmt;
use std::sync::Arc;

type KeyText<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Decides whether two items denote the same entity.
///
/// With a key function two items are the same iff their keys are equal,
/// even when other fields differ. Without one, structural equality is used.
pub struct IdProvider<T> {
    same: Arc<dyn Fn(&T, &T) -> bool + Send + Sync>,
    key_text: Option<KeyText<T>>,
}

impl<T> Clone for IdProvider<T> {
    fn clone(&self) -> Self {
        Self {
            same: Arc::clone(&self.same),
            key_text: self.key_text.clone(),
        }
    }
}

impl<T> fmt::Debug for IdProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdProvider")
            .field("keyed", &self.is_keyed())
            .finish()
    }
}

impl<T> IdProvider<T> {
    /// Match items by a stable key.
    ///
    /// The key's text form is what [`IdProvider::key_text`] reports, so
    /// renderers can derive element ids from it.
    pub fn by_key<K, F>(key: F) -> Self
    where
        T: 'static,
        K: PartialEq + fmt::Display,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        let text = Arc::clone(&key);
        Self {
            same: Arc::new(move |a: &T, b: &T| key(a) == key(b)),
            key_text: Some(Arc::new(move |item: &T| text(item).to_string())),
        }
    }

    pub fn is_keyed(&self) -> bool {
        self.key_text.is_some()
    }

    /// Text form of the item's key; `None` for structural identity.
    pub fn key_text(&self, item: &T) -> Option<String> {
        self.key_text.as_ref().map(|text| text(item))
    }

    pub fn is_same(&self, a: &T, b: &T) -> bool {
        (self.same)(a, b)
    }

    /// `None` is never the same as an item.
    pub fn is_same_opt(&self, a: Option<&T>, b: &T) -> bool {
        a.is_some_and(|a| self.is_same(a, b))
    }

    pub fn index_of(&self, list: &[T], item: &T) -> Option<usize> {
        list.iter().position(|candidate| self.is_same(candidate, item))
    }

    pub fn contains(&self, list: &[T], item: &T) -> bool {
        self.index_of(list, item).is_some()
    }
}

impl<T> IdProvider<T>
where
    T: PartialEq + 'static,
{
    /// Match items by structural equality.
    pub fn structural() -> Self {
        Self {
            same: Arc::new(|a: &T, b: &T| a == b),
            key_text: None,
        }
    }
}

impl<T> Default for IdProvider<T>
where
    T: PartialEq + 'static,
{
    fn default() -> Self {
        Self::structural()
    }
}
