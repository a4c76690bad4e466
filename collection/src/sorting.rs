//! Sort dimensions and their direction cycle

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Direction of the active sort dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Next direction when the same dimension is toggled again: None → Asc → Desc → None.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }
}

struct Comparators<T> {
    ascending: Comparator<T>,
    descending: Comparator<T>,
}

/// One sortable dimension, e.g. "by name".
///
/// Identity is the allocation: clones of a `Sorting` are equal, two
/// separately built sortings are not, even with identical comparators.
/// Create one per column and keep it around.
pub struct Sorting<T> {
    comparators: Arc<Comparators<T>>,
}

impl<T> Sorting<T> {
    pub fn new<A, D>(ascending: A, descending: D) -> Self
    where
        A: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
        D: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            comparators: Arc::new(Comparators {
                ascending: Box::new(ascending),
                descending: Box::new(descending),
            }),
        }
    }

    /// Sort by a key; descending is the reverse of ascending.
    pub fn by_key<K, F>(key: F) -> Self
    where
        T: 'static,
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        let descending_key = Arc::clone(&key);
        Self::new(
            move |a: &T, b: &T| key(a).cmp(&key(b)),
            move |a: &T, b: &T| descending_key(b).cmp(&descending_key(a)),
        )
    }

    pub fn compare(&self, direction: SortDirection, a: &T, b: &T) -> Ordering {
        match direction {
            SortDirection::None => Ordering::Equal,
            SortDirection::Asc => (self.comparators.ascending)(a, b),
            SortDirection::Desc => (self.comparators.descending)(a, b),
        }
    }
}

impl<T> Clone for Sorting<T> {
    fn clone(&self) -> Self {
        Self {
            comparators: Arc::clone(&self.comparators),
        }
    }
}

impl<T> PartialEq for Sorting<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.comparators, &other.comparators)
    }
}

impl<T> Eq for Sorting<T> {}

impl<T> fmt::Debug for Sorting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sorting")
            .field(&Arc::as_ptr(&self.comparators))
            .finish()
    }
}

/// The active sort dimension and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingOrder<T> {
    pub sorting: Sorting<T>,
    pub direction: SortDirection,
}

impl<T> SortingOrder<T> {
    pub fn new(sorting: Sorting<T>, direction: SortDirection) -> Self {
        Self { sorting, direction }
    }

    /// Order after the user picks `sorting`.
    ///
    /// The same dimension cycles its direction; a different one starts at `Asc`.
    pub fn toggle(current: Option<&SortingOrder<T>>, sorting: &Sorting<T>) -> Self {
        match current {
            Some(current) if current.sorting == *sorting => {
                Self::new(sorting.clone(), current.direction.next())
            }
            _ => Self::new(sorting.clone(), SortDirection::Asc),
        }
    }

    /// Stable sort; `SortDirection::None` keeps the incoming order.
    pub fn sort(&self, items: &mut [T]) {
        if self.direction == SortDirection::None {
            return;
        }
        items.sort_by(|a, b| self.sorting.compare(self.direction, a, b));
    }

    /// Direction shown for `sorting`: ours if it is the active dimension, `None` otherwise.
    pub fn direction_of(current: Option<&SortingOrder<T>>, sorting: &Sorting<T>) -> SortDirection {
        match current {
            Some(current) if current.sorting == *sorting => current.direction,
            _ => SortDirection::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_cycles() {
        let mut direction = SortDirection::None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            direction = direction.next();
            seen.push(direction);
        }
        assert_eq!(
            seen,
            vec![
                SortDirection::Asc,
                SortDirection::Desc,
                SortDirection::None,
                SortDirection::Asc
            ]
        );
    }

    #[test]
    fn toggling_the_same_dimension_cycles_and_another_resets() {
        let by_len = Sorting::by_key(|s: &&str| s.len());
        let by_text = Sorting::by_key(|s: &&str| *s);

        let first = SortingOrder::toggle(None, &by_len);
        assert_eq!(first.direction, SortDirection::Asc);
        let second = SortingOrder::toggle(Some(&first), &by_len.clone());
        assert_eq!(second.direction, SortDirection::Desc);

        let switched = SortingOrder::toggle(Some(&second), &by_text);
        assert_eq!(switched, SortingOrder::new(by_text.clone(), SortDirection::Asc));
        assert_eq!(SortingOrder::direction_of(Some(&switched), &by_len), SortDirection::None);
    }

    #[test]
    fn identity_is_the_allocation() {
        let a = Sorting::by_key(|n: &i32| *n);
        let b = Sorting::by_key(|n: &i32| *n);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn sort_is_stable_and_none_keeps_order() {
        let by_len = Sorting::by_key(|s: &&str| s.len());
        let mut words = vec!["ccc", "a", "bb", "b", "aa"];

        SortingOrder::new(by_len.clone(), SortDirection::None).sort(&mut words);
        assert_eq!(words, vec!["ccc", "a", "bb", "b", "aa"]);

        SortingOrder::new(by_len.clone(), SortDirection::Asc).sort(&mut words);
        assert_eq!(words, vec!["a", "b", "bb", "aa", "ccc"]);

        SortingOrder::new(by_len, SortDirection::Desc).sort(&mut words);
        assert_eq!(words, vec!["ccc", "bb", "aa", "a", "b"]);
    }
}
