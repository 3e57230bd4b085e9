// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Action, ChoiceValue, DEVELOPMENT_MODE, Direction, PromptState, Status};

/// A decoded key press. Only the real arrow keys navigate. Letters such as `j` / `k`
/// are [`PromptKey::Char`], and end up in the search term like any other text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Up,
    Down,
    Tab,
    Enter,
    Escape,
    Char(char),
    Backspace,
    Other,
}

impl PromptKey {
    /// Keys that only edit the search term. These are accepted during a load.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, PromptKey::Char(_) | PromptKey::Backspace | PromptKey::Other)
    }
}

/// The host's editable line, which holds the raw search text. The host applies each
/// key to it before the key is dispatched.
pub trait LineBuffer {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
}

impl LineBuffer for String {
    fn text(&self) -> &str { self }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Maps one key press to at most one [`Action`]. It may also rewrite `line` to undo
/// what the host line editor did with a key that isn't text (eg: `Tab`).
pub fn dispatch_key<V: ChoiceValue>(
    state: &PromptState<V>,
    key: PromptKey,
    line: &mut impl LineBuffer,
) -> Option<Action<V>> {
    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "dispatch_key", key = ?key, line = %line.text());
    });

    if state.status == Status::Done {
        return None;
    }

    if state.status != Status::Idle && !key.is_text() {
        line.set_text(&state.search_term);
        return None;
    }

    match key {
        PromptKey::Escape => {
            line.set_text("");
            Some(Action::ClearSearchTerm)
        }
        PromptKey::Up | PromptKey::Down => {
            line.set_text(&state.search_term);
            let direction = if key == PromptKey::Up {
                Direction::Up
            } else {
                Direction::Down
            };
            Some(Action::Navigate(direction))
        }
        PromptKey::Tab => {
            line.set_text(&state.search_term);
            Some(Action::ToggleActive)
        }
        PromptKey::Enter => Some(Action::Submit),
        PromptKey::Char(_) | PromptKey::Backspace | PromptKey::Other => {
            Some(Action::SetSearchTerm(line.text().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PromptConfig, assert_eq2};

    fn state() -> PromptState<String> {
        let config = PromptConfig::<String>::with_choices("Pick", ["Apple", "Banana"]);
        PromptState::new(&config)
    }

    #[test]
    fn test_text_keys_reflect_line_buffer() {
        let state = state();
        let mut line = String::from("ba");
        let action = dispatch_key(&state, PromptKey::Char('a'), &mut line);
        assert!(matches!(action, Some(Action::SetSearchTerm(it)) if it == "ba"));
    }

    #[test]
    fn test_letter_aliases_are_text() {
        let state = state();
        let mut line = String::from("j");
        let action = dispatch_key(&state, PromptKey::Char('j'), &mut line);
        assert!(matches!(action, Some(Action::SetSearchTerm(it)) if it == "j"));
    }

    #[test]
    fn test_tab_restores_line_and_toggles() {
        let mut state = state();
        state.search_term = "ap".into();
        // The host editor inserted a tab character.
        let mut line = String::from("ap\t");
        let action = dispatch_key(&state, PromptKey::Tab, &mut line);
        assert!(matches!(action, Some(Action::ToggleActive)));
        assert_eq2!(line, "ap");
    }

    #[test]
    fn test_arrows_reset_line_and_navigate() {
        let mut state = state();
        state.search_term = "a".into();
        let mut line = String::from("a\u{1b}[B");
        let action = dispatch_key(&state, PromptKey::Down, &mut line);
        assert!(matches!(action, Some(Action::Navigate(Direction::Down))));
        assert_eq2!(line, "a");
    }

    #[test]
    fn test_escape_clears_line() {
        let mut state = state();
        state.search_term = "zz".into();
        let mut line = String::from("zz");
        let action = dispatch_key(&state, PromptKey::Escape, &mut line);
        assert!(matches!(action, Some(Action::ClearSearchTerm)));
        assert_eq2!(line, "");
    }

    #[test]
    fn test_only_text_keys_while_loading() {
        let mut state = state();
        state.status = Status::Loading;
        state.search_term = "k".into();

        for key in [
            PromptKey::Up,
            PromptKey::Down,
            PromptKey::Tab,
            PromptKey::Enter,
            PromptKey::Escape,
        ] {
            let mut line = String::from("k");
            assert!(dispatch_key(&state, key, &mut line).is_none());
            assert_eq2!(line, "k");
        }

        let mut line = String::from("ki");
        let action = dispatch_key(&state, PromptKey::Char('i'), &mut line);
        assert!(matches!(action, Some(Action::SetSearchTerm(it)) if it == "ki"));
    }
}
