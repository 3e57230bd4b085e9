// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The prompt's transition function. Every change to [`PromptState`] goes through
//! [`reduce`], one [`Action`] per turn, so partial state is never observable.
//!
//! ```text
//!   Action ──▶ transition ──▶ refresh() (display list, then active row) ──▶ Effect
//! ```
//!
//! I/O is never performed here. It is described by the returned [`Effect`], and carried
//! out by the host loop, which feeds the completion back in as another [`Action`].

use crate::{ChoiceValue, DEVELOPMENT_MODE, Direction, FilterMode, Item, LoadOutcome,
            PromptConfig, PromptState, REQUIRED_ERROR_MESSAGE, SourceError, Status, Validate,
            ValidationOutcome};

#[derive(Debug)]
pub enum Action<V> {
    SetSearchTerm(String),
    ClearSearchTerm,
    Navigate(Direction),
    ToggleActive,
    Submit,
    LoadFinished(LoadOutcome<V>),
    ValidationFinished {
        selection: Vec<V>,
        outcome: ValidationOutcome,
    },
}

/// What the host has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<V> {
    /// Nothing changed.
    None,
    Rerender,
    /// Issue a source request for `term`, then rerender (the status is now loading).
    Fetch { term: String },
    /// Run the async validator on `selection`. Submit is single flight until it
    /// finishes.
    Validate { selection: Vec<V> },
    /// Done. Emit `selection`.
    Submit { selection: Vec<V> },
}

pub fn reduce<V: ChoiceValue>(
    state: &mut PromptState<V>,
    config: &PromptConfig<V>,
    action: Action<V>,
) -> Effect<V> {
    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "reduce", action = ?action, status = ?state.status);
    });

    if state.status == Status::Done {
        return Effect::None;
    }

    // A stale load must not touch the state at all, not even the post-processing pass.
    if let Action::LoadFinished(outcome) = &action
        && outcome.is_stale()
    {
        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(message = "dropping stale load", term = ?outcome.term);
        });
        return Effect::None;
    }

    let effect = transition(state, config, action);
    state.refresh(config);
    effect
}

fn transition<V: ChoiceValue>(
    state: &mut PromptState<V>,
    config: &PromptConfig<V>,
    action: Action<V>,
) -> Effect<V> {
    match action {
        Action::SetSearchTerm(term) => set_search_term(state, config, term),
        Action::ClearSearchTerm => set_search_term(state, config, String::new()),
        Action::Navigate(direction) => {
            if state.status != Status::Idle {
                return Effect::None;
            }
            state.navigate(direction, config.should_loop);
            Effect::Rerender
        }
        Action::ToggleActive => toggle_active(state),
        Action::Submit => submit(state, config),
        Action::LoadFinished(outcome) => {
            state.status = Status::Idle;
            match outcome.result {
                Ok(inputs) => {
                    state.search_error = None;
                    state.replace_items(inputs);
                }
                Err(SourceError::Failed(message)) => state.search_error = Some(message),
                Err(SourceError::Cancelled) => {}
            }
            Effect::Rerender
        }
        Action::ValidationFinished { selection, outcome } => {
            state.submit_in_flight = false;
            finish_submit(state, selection, outcome)
        }
    }
}

/// Source mode issues a request for every accepted change, there is no debounce.
fn set_search_term<V: ChoiceValue>(
    state: &mut PromptState<V>,
    config: &PromptConfig<V>,
    term: String,
) -> Effect<V> {
    if state.search_term == term {
        return Effect::None;
    }
    state.search_term = term;

    match config.filter_mode() {
        FilterMode::Static => Effect::Rerender,
        FilterMode::SourceDriven => {
            state.status = Status::Loading;
            state.search_error = None;
            Effect::Fetch {
                term: state.search_term.clone(),
            }
        }
    }
}

/// Flips the master list entry under the active value, and nothing else. Focus is
/// pinned to that value so it does not drift during the mutation.
fn toggle_active<V: ChoiceValue>(state: &mut PromptState<V>) -> Effect<V> {
    if state.status != Status::Idle {
        return Effect::None;
    }
    let Some(value) = state.active_choice().map(|it| it.value.clone()) else {
        return Effect::None;
    };

    let maybe_choice = state
        .items
        .iter_mut()
        .filter_map(Item::as_choice_mut)
        .find(|it| it.value == value && !it.disabled.is_disabled());
    let Some(choice) = maybe_choice else {
        return Effect::None;
    };

    choice.checked = !choice.checked;
    state.active.pin(value);
    state.show_help_tip = false;
    state.validation_error = None;
    Effect::Rerender
}

fn submit<V: ChoiceValue>(state: &mut PromptState<V>, config: &PromptConfig<V>) -> Effect<V> {
    if state.status != Status::Idle || state.submit_in_flight {
        return Effect::None;
    }

    state.validation_error = None;
    let selection = state.selected_values();

    if config.required && selection.is_empty() {
        state.validation_error = Some(REQUIRED_ERROR_MESSAGE.into());
        return Effect::Rerender;
    }

    match &config.validate {
        None => finish_submit(state, selection, ValidationOutcome::Valid),
        Some(Validate::Sync(validate_fn)) => {
            let outcome = validate_fn(&selection);
            finish_submit(state, selection, outcome)
        }
        Some(Validate::Async(_)) => {
            state.submit_in_flight = true;
            Effect::Validate { selection }
        }
    }
}

fn finish_submit<V: ChoiceValue>(
    state: &mut PromptState<V>,
    selection: Vec<V>,
    outcome: ValidationOutcome,
) -> Effect<V> {
    match outcome.error_message() {
        Some(message) => {
            state.validation_error = Some(message);
            Effect::Rerender
        }
        None => {
            state.status = Status::Done;
            Effect::Submit { selection }
        }
    }
}
