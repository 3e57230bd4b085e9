// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Display};

use crate::InlineString;

/// Anything that can be used as the value of a [`Choice`]. Values identify choices, so
/// two choices in the same list should never have equal values. The [`Display`] impl is
/// used as the default display name, and it is also matched against the search term.
pub trait ChoiceValue: Clone + PartialEq + Debug + Display + Send + Sync + 'static {}

impl<T> ChoiceValue for T where T: Clone + PartialEq + Debug + Display + Send + Sync + 'static
{}

/// Whether a choice can be toggled. A disabled choice is still rendered, and still
/// matches searches, but it can never receive focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Disabled {
    #[default]
    No,
    Yes,
    Reason(InlineString),
}

impl Disabled {
    #[must_use]
    pub fn is_disabled(&self) -> bool { !matches!(self, Disabled::No) }
}

impl From<bool> for Disabled {
    fn from(it: bool) -> Self {
        if it { Disabled::Yes } else { Disabled::No }
    }
}

impl From<&str> for Disabled {
    fn from(reason: &str) -> Self { Disabled::Reason(reason.into()) }
}

/// A choice as supplied by the caller. Everything except `value` is optional, see
/// [`crate::normalize_choices`] for the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChoice<V> {
    pub value: V,
    pub name: Option<InlineString>,
    pub description: Option<String>,
    pub short: Option<InlineString>,
    pub disabled: Disabled,
    pub checked: bool,
}

impl<V> RawChoice<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            name: None,
            description: None,
            short: None,
            disabled: Disabled::No,
            checked: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.into());
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: impl Into<Disabled>) -> Self {
        self.disabled = disabled.into();
        self
    }

    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

pub const DEFAULT_SEPARATOR_TEXT: &str = "──────────────";

/// Non-selectable divider between groups of choices. It never matches a search, and
/// never receives focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub text: InlineString,
}

impl Separator {
    #[must_use]
    pub fn new(text: &str) -> Self { Self { text: text.into() } }
}

impl Default for Separator {
    fn default() -> Self { Self::new(DEFAULT_SEPARATOR_TEXT) }
}

/// One entry of the input list handed to the prompt (or returned by a source).
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceInput<V> {
    Raw(RawChoice<V>),
    Separator(Separator),
}

mod convert_to_choice_input {
    use super::{ChoiceInput, RawChoice, Separator};

    impl From<&str> for ChoiceInput<String> {
        fn from(it: &str) -> Self { ChoiceInput::Raw(RawChoice::new(it.to_string())) }
    }

    impl From<String> for ChoiceInput<String> {
        fn from(it: String) -> Self { ChoiceInput::Raw(RawChoice::new(it)) }
    }

    impl<V> From<RawChoice<V>> for ChoiceInput<V> {
        fn from(it: RawChoice<V>) -> Self { ChoiceInput::Raw(it) }
    }

    impl<V> From<Separator> for ChoiceInput<V> {
        fn from(it: Separator) -> Self { ChoiceInput::Separator(it) }
    }
}

/// A normalized choice. This lives in the master list of the prompt, which is the only
/// place where `checked` is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<V> {
    pub value: V,
    pub name: InlineString,
    pub short: InlineString,
    pub disabled: Disabled,
    pub checked: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item<V> {
    Choice(Choice<V>),
    Separator(Separator),
}

impl<V> Item<V> {
    #[must_use]
    pub fn as_choice(&self) -> Option<&Choice<V>> {
        match self {
            Item::Choice(choice) => Some(choice),
            Item::Separator(_) => None,
        }
    }

    pub fn as_choice_mut(&mut self) -> Option<&mut Choice<V>> {
        match self {
            Item::Choice(choice) => Some(choice),
            Item::Separator(_) => None,
        }
    }

    /// Can receive focus and be toggled: not a separator, and not disabled.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.as_choice()
            .is_some_and(|choice| !choice.disabled.is_disabled())
    }
}
