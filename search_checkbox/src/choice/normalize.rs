// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Choice, ChoiceInput, ChoiceValue, InlineString, Item, RawChoice, inline_string};

/// Maps the caller supplied inputs into [`Item`]s, one-to-one and in order.
///
/// - `name` defaults to the stringified value.
/// - `short` defaults to `name`.
/// - An empty description is dropped.
/// - [`crate::Separator`]s pass through unchanged.
pub fn normalize_choices<V: ChoiceValue>(
    inputs: impl IntoIterator<Item = ChoiceInput<V>>,
) -> Vec<Item<V>> {
    inputs
        .into_iter()
        .map(|input| match input {
            ChoiceInput::Raw(raw) => Item::Choice(normalize_choice(raw)),
            ChoiceInput::Separator(separator) => Item::Separator(separator),
        })
        .collect()
}

pub fn normalize_choice<V: ChoiceValue>(raw: RawChoice<V>) -> Choice<V> {
    let RawChoice {
        value,
        name,
        description,
        short,
        disabled,
        checked,
    } = raw;

    let name: InlineString = name.unwrap_or_else(|| inline_string!("{value}"));
    let short = short.unwrap_or_else(|| name.clone());
    let description = description.filter(|it| !it.is_empty());

    Choice {
        value,
        name,
        short,
        disabled,
        checked,
        description,
    }
}
