//! List deltas
//!
//! A [`Patch`] is one contiguous splice; a [`Differ`] finds the splice that
//! turns one list state into the next.

use crate::IdProvider;

/// One contiguous structural edit between two successive list states.
///
/// Applying a patch removes `removed_count` items at `start_index` and
/// inserts `replaced_items` in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<T> {
    /// Position where the change begins, valid in both the old and the new list
    pub start_index: usize,
    /// Items present in the new list starting at `start_index`
    pub replaced_items: Vec<T>,
    /// Number of old items removed starting at `start_index`
    pub removed_count: usize,
}

impl<T> Patch<T> {
    pub fn new(start_index: usize, replaced_items: Vec<T>, removed_count: usize) -> Self {
        Self {
            start_index,
            replaced_items,
            removed_count,
        }
    }

    /// The initial framing: insert every item at index 0.
    pub fn insert_all(items: Vec<T>) -> Self {
        Self::new(0, items, 0)
    }

    pub fn is_noop(&self) -> bool {
        self.replaced_items.is_empty() && self.removed_count == 0
    }

    /// Length change caused by this patch.
    pub fn len_delta(&self) -> isize {
        self.replaced_items.len() as isize - self.removed_count as isize
    }

    /// Apply the patch to a list that is in the patch's old index space.
    pub fn apply(&self, list: &mut Vec<T>)
    where
        T: Clone,
    {
        let end = self.start_index + self.removed_count;
        debug_assert!(
            end <= list.len(),
            "patch removes {}..{} from a list of {} items",
            self.start_index,
            end,
            list.len()
        );
        list.splice(self.start_index..end, self.replaced_items.iter().cloned());
    }
}

/// Computes the structural delta between two list states.
///
/// The changed region is found by trimming the longest common prefix and
/// then the longest common suffix. An item is kept only when the
/// [`IdProvider`] matches it and its content is equal, so a keyed item whose
/// other fields changed lands inside the region and is replaced.
/// Everything in between becomes one [`Patch`]: appends, prepends, middle
/// insertions and removals each come out as a single minimal patch, and
/// scattered edits coarsen into one replace of the span that covers them.
/// The scan is linear in the list lengths.
pub struct Differ<T> {
    id: IdProvider<T>,
}

impl<T> Differ<T>
where
    T: Clone + PartialEq,
{
    pub fn new(id: IdProvider<T>) -> Self {
        Self { id }
    }

    pub fn id_provider(&self) -> &IdProvider<T> {
        &self.id
    }

    /// Patches transforming `old` into `new`, in application order.
    ///
    /// Returns no patch when nothing changed and at most one otherwise.
    pub fn diff(&self, old: &[T], new: &[T]) -> Vec<Patch<T>> {
        self.changed_region(old, new).into_iter().collect()
    }

    fn changed_region(&self, old: &[T], new: &[T]) -> Option<Patch<T>> {
        let prefix = old
            .iter()
            .zip(new)
            .take_while(|(a, b)| self.unchanged(a, b))
            .count();

        // The suffix must not overlap the prefix in either list
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| self.unchanged(a, b))
            .count();

        let patch = Patch::new(
            prefix,
            new[prefix..new.len() - suffix].to_vec(),
            old.len() - prefix - suffix,
        );
        (!patch.is_noop()).then_some(patch)
    }

    fn unchanged(&self, a: &T, b: &T) -> bool {
        self.id.is_same(a, b) && a == b
    }
}
