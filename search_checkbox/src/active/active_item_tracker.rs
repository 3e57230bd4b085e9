// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Focus is tracked by *value*, not by row index. The row index is derived from the value
//! every time the display list changes, so:
//!
//! - A focused item that is still visible after the search term changes keeps focus.
//! - A focused item that was filtered out yields focus to the first selectable row of the
//!   current display list.
//!
//! ```text
//!   stored value ──derive_index()──▶ display index ──sync()──▶ stored value
//!                                    (never the other way around in one pass)
//! ```

use crate::{ChoiceValue, FilteredView, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveItemTracker<V> {
    value: Option<V>,
}

impl<V> Default for ActiveItemTracker<V> {
    fn default() -> Self { Self { value: None } }
}

impl<V: ChoiceValue> ActiveItemTracker<V> {
    #[must_use]
    pub fn value(&self) -> Option<&V> { self.value.as_ref() }

    /// Keep focus on `value`, eg: while the item under it is being mutated.
    pub fn pin(&mut self, value: V) { self.value = Some(value); }

    /// Display list index of the focused row.
    ///
    /// 1. No stored value: the first selectable row, or 0.
    /// 2. Otherwise the row of the choice whose value equals the stored value.
    /// 3. Not found (filtered out): same as 1.
    pub fn derive_index(&self, items: &[Item<V>], view: &FilteredView) -> usize {
        let first_selectable =
            || view.iter(items).position(Item::is_selectable).unwrap_or(0);

        match &self.value {
            None => first_selectable(),
            Some(value) => view
                .iter(items)
                .position(|item| {
                    item.as_choice()
                        .is_some_and(|choice| &choice.value == value)
                })
                .unwrap_or_else(first_selectable),
        }
    }

    /// Post-processing pass, run once after every state change. Derives the index and
    /// then writes the value found there back into the tracker, if that row is
    /// selectable and holds a different value.
    pub fn sync(&mut self, items: &[Item<V>], view: &FilteredView) -> usize {
        let index = self.derive_index(items, view);

        if let Some(item) = view.get(items, index)
            && item.is_selectable()
            && let Some(choice) = item.as_choice()
            && self.value.as_ref() != Some(&choice.value)
        {
            self.value = Some(choice.value.clone());
        }

        index
    }

    /// Move focus one selectable row up or down. Separators and disabled choices are
    /// skipped. With `should_loop` the focus wraps around at both ends, otherwise it
    /// stops at the first / last selectable row.
    pub fn navigate(
        &mut self,
        items: &[Item<V>],
        view: &FilteredView,
        direction: Direction,
        should_loop: bool,
    ) {
        let selectable = view.selectable_positions(items);
        let Some(last) = selectable.len().checked_sub(1) else {
            return;
        };

        let current_index = self.derive_index(items, view);
        let current = selectable
            .iter()
            .position(|view_index| *view_index >= current_index)
            .unwrap_or(0);

        let next = match (direction, should_loop) {
            (Direction::Down, _) if current < last => current + 1,
            (Direction::Down, true) => 0,
            (Direction::Down, false) => last,
            (Direction::Up, _) if current > 0 => current - 1,
            (Direction::Up, true) => last,
            (Direction::Up, false) => 0,
        };

        if let Some(choice) = view.get(items, selectable[next]).and_then(Item::as_choice) {
            self.value = Some(choice.value.clone());
        }
    }
}
