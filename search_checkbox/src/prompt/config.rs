// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

use crate::{ChoiceInput, ChoiceValue, FilterFn, FilterMode, PageSize, SourceFn, Theme,
            Validate};

pub const DEFAULT_INSTRUCTIONS: &str =
    "(Press <tab> to select, <enter> to submit, <esc> to clear search)";

/// Where the choices come from. Exactly one of the two.
#[derive(Clone)]
pub enum ChoiceSource<V> {
    /// Fixed list, filtered locally.
    Static(Vec<ChoiceInput<V>>),
    /// Async source, called with every new search term. Its result is shown as is.
    Source(SourceFn<V>),
}

impl<V> ChoiceSource<V> {
    #[must_use]
    pub fn filter_mode(&self) -> FilterMode {
        match self {
            ChoiceSource::Static(_) => FilterMode::Static,
            ChoiceSource::Source(_) => FilterMode::SourceDriven,
        }
    }
}

impl<V: Debug> Debug for ChoiceSource<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceSource::Static(it) => f.debug_tuple("Static").field(it).finish(),
            ChoiceSource::Source(_) => f.write_str("Source"),
        }
    }
}

/// Help text shown next to the message, until the first toggle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Instructions {
    #[default]
    Default,
    Custom(String),
    Hidden,
}

impl Instructions {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Instructions::Default => Some(DEFAULT_INSTRUCTIONS),
            Instructions::Custom(it) => Some(it),
            Instructions::Hidden => None,
        }
    }
}

impl From<&str> for Instructions {
    fn from(it: &str) -> Self { Instructions::Custom(it.into()) }
}

impl From<bool> for Instructions {
    /// `false` hides the instructions, `true` shows the default ones.
    fn from(it: bool) -> Self {
        if it {
            Instructions::Default
        } else {
            Instructions::Hidden
        }
    }
}

/// Everything the caller can configure. Build it with [`PromptConfig::with_choices`] or
/// [`PromptConfig::with_source`], then chain the `with_*` / `set_*` methods.
#[derive(Clone)]
pub struct PromptConfig<V> {
    pub message: String,
    pub choice_source: ChoiceSource<V>,
    pub page_size: PageSize,
    pub instructions: Instructions,
    /// Replaces the default substring search. Only used with a static list.
    pub filter: Option<FilterFn<V>>,
    pub should_loop: bool,
    pub required: bool,
    pub validate: Option<Validate<V>>,
    pub theme: Theme,
    /// Values checked up front. With a source, they get checked as soon as a load
    /// returns them.
    pub default_values: Vec<V>,
}

impl<V: ChoiceValue> PromptConfig<V> {
    pub fn with_choices(
        message: impl Into<String>,
        choices: impl IntoIterator<Item = impl Into<ChoiceInput<V>>>,
    ) -> Self {
        Self::new(
            message.into(),
            ChoiceSource::Static(choices.into_iter().map(Into::into).collect()),
        )
    }

    pub fn with_source(message: impl Into<String>, source: SourceFn<V>) -> Self {
        Self::new(message.into(), ChoiceSource::Source(source))
    }

    fn new(message: String, choice_source: ChoiceSource<V>) -> Self {
        Self {
            message,
            choice_source,
            page_size: PageSize::default(),
            instructions: Instructions::default(),
            filter: None,
            should_loop: true,
            required: false,
            validate: None,
            theme: Theme::default(),
            default_values: vec![],
        }
    }

    #[must_use]
    pub fn set_page_size(mut self, page_size: impl Into<PageSize>) -> Self {
        self.page_size = page_size.into();
        self
    }

    #[must_use]
    pub fn set_instructions(mut self, instructions: impl Into<Instructions>) -> Self {
        self.instructions = instructions.into();
        self
    }

    #[must_use]
    pub fn set_filter(mut self, filter: FilterFn<V>) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn set_loop(mut self, should_loop: bool) -> Self {
        self.should_loop = should_loop;
        self
    }

    #[must_use]
    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn set_validate(mut self, validate: Validate<V>) -> Self {
        self.validate = Some(validate);
        self
    }

    #[must_use]
    pub fn set_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn set_default_values(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.default_values = values.into_iter().collect();
        self
    }

    #[must_use]
    pub fn filter_mode(&self) -> FilterMode { self.choice_source.filter_mode() }
}

impl<V: Debug> Debug for PromptConfig<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptConfig")
            .field("message", &self.message)
            .field("choice_source", &self.choice_source)
            .field("page_size", &self.page_size)
            .field("instructions", &self.instructions)
            .field("filter", &self.filter.as_ref().map(|_| "FilterFn"))
            .field("should_loop", &self.should_loop)
            .field("required", &self.required)
            .field("validate", &self.validate)
            .field("default_values", &self.default_values)
            .finish_non_exhaustive()
    }
}
