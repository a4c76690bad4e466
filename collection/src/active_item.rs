//! Active item and keyboard navigation

use dataflow::IdProvider;

/// The highlighted entry of a collection, distinct from the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveItem<T> {
    pub item: T,
    /// Reached with the keyboard; only these activations scroll into view
    pub from_keyboard: bool,
}

impl<T> ActiveItem<T> {
    pub fn by_pointer(item: T) -> Self {
        Self {
            item,
            from_keyboard: false,
        }
    }

    pub fn by_keyboard(item: T) -> Self {
        Self {
            item,
            from_keyboard: true,
        }
    }
}

/// Keys the collection reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Other,
}

impl Key {
    pub fn is_navigation(self) -> bool {
        matches!(self, Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End)
    }

    pub fn is_activation(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Item to activate after `key` is pressed.
///
/// Moves within `list` and clamps at both ends, never wrapping. When the
/// current item is missing from `list` (none yet, or filtered out), both
/// arrows land on the first item. Returns `None` for non-navigation keys
/// and for an empty list.
pub fn navigate<T>(list: &[T], current: Option<&T>, key: Key, id: &IdProvider<T>) -> Option<ActiveItem<T>>
where
    T: Clone,
{
    let last = list.len().checked_sub(1)?;
    let index = current.and_then(|current| id.index_of(list, current));
    let target = match (key, index) {
        (Key::ArrowUp, Some(index)) => index.saturating_sub(1),
        (Key::ArrowDown, Some(index)) => (index + 1).min(last),
        (Key::ArrowUp | Key::ArrowDown, None) => 0,
        (Key::Home, _) => 0,
        (Key::End, _) => last,
        (Key::Enter | Key::Space | Key::Other, _) => return None,
    };
    log::trace!("navigation {key:?} moves active index {index:?} -> {target}");
    Some(ActiveItem::by_keyboard(list[target].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(list: &[i32], current: Option<i32>, key: Key) -> Option<i32> {
        navigate(list, current.as_ref(), key, &IdProvider::structural()).map(|active| {
            assert!(active.from_keyboard);
            active.item
        })
    }

    #[test]
    fn arrows_move_by_one_and_clamp() {
        let list = [10, 20, 30];
        assert_eq!(go(&list, Some(20), Key::ArrowDown), Some(30));
        assert_eq!(go(&list, Some(30), Key::ArrowDown), Some(30));
        assert_eq!(go(&list, Some(20), Key::ArrowUp), Some(10));
        assert_eq!(go(&list, Some(10), Key::ArrowUp), Some(10));
    }

    #[test]
    fn home_and_end_jump() {
        let list = [10, 20, 30];
        assert_eq!(go(&list, Some(20), Key::Home), Some(10));
        assert_eq!(go(&list, None, Key::End), Some(30));
    }

    #[test]
    fn missing_current_starts_at_the_top() {
        let list = [10, 20, 30];
        assert_eq!(go(&list, None, Key::ArrowDown), Some(10));
        assert_eq!(go(&list, Some(99), Key::ArrowUp), Some(10));
    }

    #[test]
    fn empty_list_and_other_keys_do_nothing() {
        assert_eq!(go(&[], None, Key::ArrowDown), None);
        assert_eq!(go(&[], None, Key::End), None);
        assert_eq!(go(&[1, 2], Some(1), Key::Enter), None);
        assert_eq!(go(&[1, 2], Some(1), Key::Other), None);
    }

    #[test]
    fn keyed_lookup_finds_edited_items() {
        let id = IdProvider::by_key(|pair: &(u8, char)| pair.0);
        let list = [(1, 'a'), (2, 'b')];
        let next = navigate(&list, Some(&(1, 'A')), Key::ArrowDown, &id);
        assert_eq!(next, Some(ActiveItem::by_keyboard((2, 'b'))));
    }
}
