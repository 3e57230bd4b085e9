// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation as _;

use crate::{LineBuffer, PromptKey};

/// Minimal single line editor that holds the search text. Keys are appended at the end,
/// and backspace removes one grapheme cluster (so `"é"` written as `e` + a combining
/// accent goes away in one key press). Keys that aren't text are left alone, the key
/// dispatcher decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn apply_key(&mut self, key: PromptKey) {
        match key {
            PromptKey::Char(it) if !it.is_control() => self.buffer.push(it),
            PromptKey::Backspace => self.pop_grapheme(),
            _ => {}
        }
    }

    pub fn pop_grapheme(&mut self) {
        if let Some((index, _)) = self.buffer.grapheme_indices(true).next_back() {
            self.buffer.truncate(index);
        }
    }
}

impl LineBuffer for LineEditor {
    fn text(&self) -> &str { &self.buffer }

    fn set_text(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }
}
