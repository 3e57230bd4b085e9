// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ActiveItemTracker, Choice, ChoiceInput, ChoiceSource, ChoiceValue,
            Direction, FilteredView, Item, PromptConfig, filter_items, normalize_choices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Idle,
    /// A source request is in flight. Only text keys are accepted.
    Loading,
    /// Submitted. No further input is accepted.
    Done,
}

/// All of the prompt's mutable state. The only way to change it is
/// [`crate::reduce`], which ends every transition with [`PromptState::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub struct PromptState<V> {
    /// Master list. The only place where `checked` lives.
    pub(crate) items: Vec<Item<V>>,
    pub(crate) search_term: String,
    pub(crate) active: ActiveItemTracker<V>,
    pub(crate) status: Status,
    pub(crate) search_error: Option<String>,
    pub(crate) validation_error: Option<String>,
    /// Checked values that are not in the master list (a source load dropped them, or
    /// they are defaults that have not shown up yet). Never rendered or submitted.
    pub(crate) retained_checked: Vec<V>,
    pub(crate) show_help_tip: bool,
    /// An async validation is outstanding.
    pub(crate) submit_in_flight: bool,
    // Derived, see refresh().
    view: FilteredView,
    active_index: usize,
}

impl<V: ChoiceValue> PromptState<V> {
    /// Initial state for `config`. With a static list, the defaults are checked right
    /// away. With a source, the master list starts empty and the status is
    /// [`Status::Loading`], since the first load is issued immediately.
    pub fn new(config: &PromptConfig<V>) -> Self {
        let (inputs, status) = match &config.choice_source {
            ChoiceSource::Static(inputs) => (inputs.clone(), Status::Idle),
            ChoiceSource::Source(_) => (vec![], Status::Loading),
        };

        let mut state = Self {
            items: vec![],
            search_term: String::new(),
            active: ActiveItemTracker::default(),
            status,
            search_error: None,
            validation_error: None,
            retained_checked: config.default_values.clone(),
            show_help_tip: true,
            submit_in_flight: false,
            view: FilteredView::default(),
            active_index: 0,
        };
        state.replace_items(inputs);
        state.refresh(config);
        state
    }

    /// Replaces the master list wholesale, carrying over checked state:
    /// - A value in both lists keeps its old flag.
    /// - A value only in the new list is checked if it was retained, otherwise it keeps
    ///   the flag it came with.
    /// - Checked values that are not in the new list are retained.
    pub(crate) fn replace_items(&mut self, inputs: Vec<ChoiceInput<V>>) {
        let mut new_items = normalize_choices(inputs);

        let previous: Vec<(V, bool)> = self
            .items
            .iter()
            .filter_map(Item::as_choice)
            .map(|it| (it.value.clone(), it.checked))
            .collect();

        for choice in new_items.iter_mut().filter_map(Item::as_choice_mut) {
            let maybe_previous = previous.iter().find(|(value, _)| *value == choice.value);
            match maybe_previous {
                Some((_, checked)) => choice.checked = *checked,
                None => choice.checked |= self.retained_checked.contains(&choice.value),
            }
        }

        let is_in_new_items = |value: &V| {
            new_items
                .iter()
                .filter_map(Item::as_choice)
                .any(|it| it.value == *value)
        };

        let retained = previous
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(value, _)| value)
            .chain(self.retained_checked.iter())
            .filter(|value| !is_in_new_items(*value))
            .fold(Vec::new(), |mut acc: Vec<V>, value| {
                if !acc.contains(value) {
                    acc.push(value.clone());
                }
                acc
            });

        self.retained_checked = retained;
        self.items = new_items;
    }

    /// The post-processing pass. Re-derives the display list from the master list, and
    /// then the active row from the active value (which may update the value, never
    /// the other way around).
    pub fn refresh(&mut self, config: &PromptConfig<V>) {
        self.view = filter_items(
            &self.items,
            &self.search_term,
            config.filter_mode(),
            config.filter.as_ref(),
        );
        self.active_index = self.active.sync(&self.items, &self.view);
    }

    pub(crate) fn navigate(&mut self, direction: Direction, should_loop: bool) {
        self.active
            .navigate(&self.items, &self.view, direction, should_loop);
    }

    /// Master list, in source order.
    #[must_use]
    pub fn items(&self) -> &[Item<V>] { &self.items }

    #[must_use]
    pub fn search_term(&self) -> &str { &self.search_term }

    #[must_use]
    pub fn status(&self) -> Status { self.status }

    #[must_use]
    pub fn active(&self) -> &ActiveItemTracker<V> { &self.active }

    #[must_use]
    pub fn search_error(&self) -> Option<&str> { self.search_error.as_deref() }

    #[must_use]
    pub fn validation_error(&self) -> Option<&str> { self.validation_error.as_deref() }

    /// Checked values that are not in the master list.
    #[must_use]
    pub fn retained_checked(&self) -> &[V] { &self.retained_checked }

    #[must_use]
    pub fn show_help_tip(&self) -> bool { self.show_help_tip }

    #[must_use]
    pub fn submit_in_flight(&self) -> bool { self.submit_in_flight }

    /// Display list, as of the last [`Self::refresh`].
    #[must_use]
    pub fn view(&self) -> &FilteredView { &self.view }

    /// Display list index of the focused row, as of the last [`Self::refresh`].
    #[must_use]
    pub fn active_index(&self) -> usize { self.active_index }

    /// The focused choice, if the focused row is selectable.
    #[must_use]
    pub fn active_choice(&self) -> Option<&Choice<V>> {
        self.view
            .get(&self.items, self.active_index)
            .filter(|it| it.is_selectable())
            .and_then(Item::as_choice)
    }

    /// Checked choices in master list order. Independent of the search term.
    pub fn checked_choices(&self) -> impl Iterator<Item = &Choice<V>> {
        self.items
            .iter()
            .filter_map(Item::as_choice)
            .filter(|it| it.checked)
    }

    #[must_use]
    pub fn selected_values(&self) -> Vec<V> {
        self.checked_choices().map(|it| it.value.clone()).collect()
    }

    /// Validation errors are the answer to the last Enter, so they win over a search
    /// error. At most one error line is shown.
    #[must_use]
    pub fn error_line(&self) -> Option<&str> {
        self.validation_error
            .as_deref()
            .or(self.search_error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, REQUIRED_ERROR_MESSAGE, RawChoice, SourceFn, assert_eq2, reduce,
                source_fn};

    fn checked_values(state: &PromptState<String>) -> Vec<&str> {
        state.checked_choices().map(|it| it.value.as_str()).collect()
    }

    #[test]
    fn test_static_defaults_are_checked_up_front() {
        let config = PromptConfig::<String>::with_choices("Pick", ["a", "b", "c"])
            .set_default_values(["c".to_string(), "zzz".to_string()]);
        let state = PromptState::new(&config);
        assert_eq2!(state.status, Status::Idle);
        assert_eq2!(checked_values(&state), vec!["c"]);
        assert_eq2!(state.retained_checked, vec!["zzz".to_string()]);
        assert_eq2!(state.active_choice().map(|it| it.value.as_str()), Some("a"));
    }

    #[test]
    fn test_source_mode_starts_loading_and_empty() {
        let source: SourceFn<String> = source_fn(|_term: Option<String>, _token| async {
            Ok(vec![ChoiceInput::from("x")])
        });
        let config = PromptConfig::with_source("Pick", source);
        let state = PromptState::new(&config);
        assert_eq2!(state.status, Status::Loading);
        assert!(state.items.is_empty());
        assert_eq2!(state.active_choice(), None);
    }

    #[test]
    fn test_replace_items_carries_checked_state() {
        let config = PromptConfig::<String>::with_choices("Pick", ["a", "b", "c"]);
        let mut state = PromptState::new(&config);
        for item in &mut state.items {
            if let Some(choice) = item.as_choice_mut()
                && choice.value != "b"
            {
                choice.checked = true;
            }
        }

        // "a" is dropped, "c" stays, "d" is new and comes in checked.
        state.replace_items(vec![
            ChoiceInput::from("b"),
            ChoiceInput::from("c"),
            ChoiceInput::from(RawChoice::new("d".to_string()).with_checked(true)),
        ]);
        assert_eq2!(checked_values(&state), vec!["c", "d"]);
        assert_eq2!(state.retained_checked, vec!["a".to_string()]);

        // "a" comes back, and is checked again.
        state.replace_items(vec![ChoiceInput::from("a"), ChoiceInput::from("b")]);
        assert_eq2!(checked_values(&state), vec!["a"]);
        assert_eq2!(state.retained_checked, vec!["c".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_validation_error_wins_over_search_error() {
        let config = PromptConfig::<String>::with_choices("Pick", ["a"]);
        let mut state = PromptState::new(&config);
        state.search_error = Some("offline".into());
        assert_eq2!(state.error_line(), Some("offline"));
        state.validation_error = Some("pick one".into());
        assert_eq2!(state.error_line(), Some("pick one"));
    }

    #[test]
    fn test_read_accessors_follow_reduce() {
        let config = PromptConfig::<String>::with_choices("Pick", ["apple", "banana"])
            .set_required(true);
        let mut state = PromptState::new(&config);
        assert!(state.show_help_tip());
        assert!(!state.submit_in_flight());

        reduce(&mut state, &config, Action::Submit);
        assert_eq2!(state.validation_error(), Some(REQUIRED_ERROR_MESSAGE));
        assert_eq2!(state.error_line(), state.validation_error());

        reduce(&mut state, &config, Action::SetSearchTerm("ban".into()));
        reduce(&mut state, &config, Action::ToggleActive);
        assert_eq2!(state.search_term(), "ban");
        assert_eq2!(state.status(), Status::Idle);
        assert_eq2!(state.validation_error(), None);
        assert_eq2!(state.search_error(), None);
        assert!(!state.show_help_tip());
        assert_eq2!(state.items().len(), 2);
        assert_eq2!(checked_values(&state), vec!["banana"]);
        assert!(state.retained_checked().is_empty());
    }
}
