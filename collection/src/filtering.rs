//! Filters over raw items

use shared::TextFilterOptions;
use std::fmt;
use std::sync::Arc;

/// A list-to-list function narrowing the raw items of a collection.
pub struct Filter<T> {
    apply: Arc<dyn Fn(&[T]) -> Vec<T> + Send + Sync>,
}

impl<T> Filter<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[T]) -> Vec<T> + Send + Sync + 'static,
    {
        Self { apply: Arc::new(f) }
    }

    /// Keep the items matching `keep`, in list order.
    pub fn predicate<P>(keep: P) -> Self
    where
        T: Clone,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |items: &[T]| items.iter().filter(|item| keep(item)).cloned().collect())
    }

    /// Keep the items whose text contains `query`.
    ///
    /// Matching ignores case unless `options.case_sensitive` is set.
    pub fn text<F>(query: impl Into<String>, to_string: F, options: TextFilterOptions) -> Self
    where
        T: Clone,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let query = query.into();
        if options.case_sensitive {
            Self::predicate(move |item| to_string(item).contains(&query))
        } else {
            let query = query.to_lowercase();
            Self::predicate(move |item| to_string(item).to_lowercase().contains(&query))
        }
    }

    pub fn apply(&self, items: &[T]) -> Vec<T> {
        (self.apply)(items)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_keeps_order() {
        let even = Filter::predicate(|n: &i32| n % 2 == 0);
        assert_eq!(even.apply(&[5, 4, 3, 2, 1, 0]), vec![4, 2, 0]);
    }

    #[test]
    fn text_filter_ignores_case_by_default() {
        let names = ["Ada Lovelace", "Alan Turing", "Grace Hopper"];
        let filter = Filter::text("LOVE", |s: &&str| s.to_string(), TextFilterOptions::default());
        assert_eq!(filter.apply(&names), vec!["Ada Lovelace"]);

        let strict = Filter::text(
            "love",
            |s: &&str| s.to_string(),
            TextFilterOptions { case_sensitive: true },
        );
        assert!(strict.apply(&names).is_empty());
    }

    #[test]
    fn empty_query_keeps_everything() {
        let filter = Filter::text("", |n: &u8| n.to_string(), TextFilterOptions::default());
        assert_eq!(filter.apply(&[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn custom_list_function() {
        let first_two = Filter::new(|items: &[char]| items.iter().take(2).copied().collect());
        assert_eq!(first_two.apply(&['a', 'b', 'c']), vec!['a', 'b']);
    }
}
