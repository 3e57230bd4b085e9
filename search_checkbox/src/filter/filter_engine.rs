// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Derives the visible, ordered display list from the master list and the search term.
//!
//! The display list is a [`FilteredView`]: a list of indices into the master list. Items
//! are never copied into it, so `checked` and `disabled` read through the view are always
//! the live values from the master list.

use std::sync::Arc;

use unicode_normalization::{UnicodeNormalization as _, char::is_combining_mark};

use crate::{Choice, ChoiceValue, Item};

/// Custom search predicate. It receives the search term and every non-separator choice
/// of the master list, and returns the values of the choices that should stay visible.
/// Order of the returned values does not matter, the master list order is kept.
pub type FilterFn<V> = Arc<dyn Fn(&str, &[&Choice<V>]) -> Vec<V> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Choices are a fixed list, filtered locally by the search term.
    #[default]
    Static,
    /// Choices come from a source, which already did the filtering.
    SourceDriven,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Every item of a master list of length `len`, in order.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.indices.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    /// Master list indices, in display order.
    #[must_use]
    pub fn indices(&self) -> &[usize] { &self.indices }

    #[must_use]
    pub fn master_index(&self, view_index: usize) -> Option<usize> {
        self.indices.get(view_index).copied()
    }

    pub fn get<'a, V>(&self, items: &'a [Item<V>], view_index: usize) -> Option<&'a Item<V>> {
        self.master_index(view_index)
            .and_then(|master_index| items.get(master_index))
    }

    pub fn iter<'a, V>(
        &'a self,
        items: &'a [Item<V>],
    ) -> impl Iterator<Item = &'a Item<V>> + 'a {
        self.indices
            .iter()
            .filter_map(move |master_index| items.get(*master_index))
    }

    /// Display list positions of the items that can receive focus.
    pub fn selectable_positions<V>(&self, items: &[Item<V>]) -> Vec<usize> {
        self.iter(items)
            .enumerate()
            .filter(|(_, item)| item.is_selectable())
            .map(|(view_index, _)| view_index)
            .collect()
    }
}

/// Runs the filter for the current mode and search term.
///
/// - In [`FilterMode::SourceDriven`] mode, or when the term is blank, the whole master list
///   is visible.
/// - Otherwise the predicate (`maybe_filter`, or [`default_filter`]) decides which choices
///   stay, and separators are always kept in place.
pub fn filter_items<V: ChoiceValue>(
    items: &[Item<V>],
    search_term: &str,
    mode: FilterMode,
    maybe_filter: Option<&FilterFn<V>>,
) -> FilteredView {
    if mode == FilterMode::SourceDriven || search_term.trim().is_empty() {
        return FilteredView::all(items.len());
    }

    let choices: Vec<&Choice<V>> = items.iter().filter_map(Item::as_choice).collect();
    let matched_values = match maybe_filter {
        Some(filter_fn) => filter_fn(search_term, &choices),
        None => default_filter(search_term, &choices),
    };

    let indices = items
        .iter()
        .enumerate()
        .filter(|(_, item)| match item {
            Item::Separator(_) => true,
            Item::Choice(choice) => matched_values.contains(&choice.value),
        })
        .map(|(master_index, _)| master_index)
        .collect();

    FilteredView { indices }
}

/// Case-insensitive, accent-insensitive substring match against the name, the
/// description, and the stringified value of each choice.
pub fn default_filter<V: ChoiceValue>(search_term: &str, choices: &[&Choice<V>]) -> Vec<V> {
    let folded_term = fold_for_search(search_term.trim());
    choices
        .iter()
        .filter(|choice| choice_matches(choice, &folded_term))
        .map(|choice| choice.value.clone())
        .collect()
}

fn choice_matches<V: ChoiceValue>(choice: &Choice<V>, folded_term: &str) -> bool {
    fold_for_search(&choice.name).contains(folded_term)
        || choice
            .description
            .as_deref()
            .is_some_and(|it| fold_for_search(it).contains(folded_term))
        || fold_for_search(&choice.value.to_string()).contains(folded_term)
}

/// Decompose (NFD), drop the combining marks, then lowercase. So `"Crème"` and `"CREME"`
/// both fold to `"creme"`.
#[must_use]
pub fn fold_for_search(text: &str) -> String {
    text.nfd()
        .filter(|it| !is_combining_mark(*it))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{ChoiceInput, RawChoice, Separator, assert_eq2, normalize_choices};

    fn fruit() -> Vec<Item<String>> {
        normalize_choices(vec![
            ChoiceInput::from("Apple"),
            ChoiceInput::from(Separator::new("--")),
            ChoiceInput::from("Banana"),
            ChoiceInput::from(
                RawChoice::new("cherry".to_string())
                    .with_name("Cherry")
                    .with_description("Crème de cerise"),
            ),
        ])
    }

    fn visible_names(items: &[Item<String>], view: &FilteredView) -> Vec<String> {
        view.iter(items)
            .map(|item| match item {
                Item::Choice(choice) => choice.name.to_string(),
                Item::Separator(separator) => separator.text.to_string(),
            })
            .collect()
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t" ; "tab")]
    fn test_blank_term_keeps_identical_items(term: &str) {
        let items = fruit();
        let view = filter_items(&items, term, FilterMode::Static, None);
        assert_eq2!(view.len(), items.len());
        for (view_index, item) in items.iter().enumerate() {
            let visible = view.get(&items, view_index).unwrap();
            assert!(std::ptr::eq(visible, item));
        }
    }

    #[test]
    fn test_case_insensitive_substring_on_name() {
        let items = fruit();
        let view = filter_items(&items, "an", FilterMode::Static, None);
        assert_eq2!(visible_names(&items, &view), vec!["--", "Banana"]);
    }

    #[test]
    fn test_accent_folded_match_on_description() {
        let items = fruit();
        let view = filter_items(&items, "CREME", FilterMode::Static, None);
        assert_eq2!(visible_names(&items, &view), vec!["--", "Cherry"]);
    }

    #[test]
    fn test_match_on_stringified_value() {
        let items = normalize_choices(vec![
            ChoiceInput::from("Apple"),
            ChoiceInput::from(RawChoice::new("sku-991".to_string()).with_name("Dragonfruit")),
        ]);
        let view = filter_items(&items, "991", FilterMode::Static, None);
        assert_eq2!(visible_names(&items, &view), vec!["Dragonfruit"]);
    }

    #[test]
    fn test_no_match_keeps_separators_only() {
        let items = fruit();
        let view = filter_items(&items, "zzz", FilterMode::Static, None);
        assert_eq2!(visible_names(&items, &view), vec!["--"]);
        assert!(view.selectable_positions(&items).is_empty());
    }

    #[test]
    fn test_empty_master_list() {
        let items: Vec<Item<String>> = vec![];
        let view = filter_items(&items, "a", FilterMode::Static, None);
        assert!(view.is_empty());
    }

    #[test]
    fn test_source_driven_mode_ignores_term() {
        let items = fruit();
        let view = filter_items(&items, "zzz", FilterMode::SourceDriven, None);
        assert_eq2!(view, FilteredView::all(items.len()));
    }

    #[test]
    fn test_custom_filter_keeps_master_order_and_live_state() {
        let mut items = fruit();
        // Returns values in reverse order, the view must still follow master order.
        let filter_fn: FilterFn<String> = Arc::new(|_: &str, choices: &[&Choice<String>]| {
            choices.iter().rev().map(|it| it.value.clone()).collect()
        });
        let view = filter_items(&items, "x", FilterMode::Static, Some(&filter_fn));
        assert_eq2!(visible_names(&items, &view), vec![
            "Apple", "--", "Banana", "Cherry"
        ]);

        // Mutating the master list is visible through the view.
        if let Some(choice) = items[2].as_choice_mut() {
            choice.checked = true;
        }
        let banana = view.get(&items, 2).and_then(Item::as_choice).unwrap();
        assert!(banana.checked);
    }

    #[test]
    fn test_fold_for_search() {
        assert_eq2!(fold_for_search("Crème Brûlée"), "creme brulee");
        assert_eq2!(fold_for_search("ÅNGSTRÖM"), "angstrom");
    }
}
