// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{PromptKey, Size};

/// What a raw terminal event means to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Key(PromptKey),
    /// `Ctrl+C` or `Ctrl+D`. The prompt is abandoned without a result.
    Cancel,
    Resize(Size),
    Ignore,
}

pub fn decode_event(event: &Event) -> HostEvent {
    match event {
        Event::Key(key_event) => decode_key_event(key_event),
        Event::Resize(col_width, row_height) => HostEvent::Resize(Size {
            col_width: *col_width,
            row_height: *row_height,
        }),
        _ => HostEvent::Ignore,
    }
}

fn decode_key_event(key_event: &KeyEvent) -> HostEvent {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key_event;

    if *kind == KeyEventKind::Release {
        return HostEvent::Ignore;
    }

    let is_ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let key = match code {
        KeyCode::Char('c' | 'd') if is_ctrl => return HostEvent::Cancel,
        KeyCode::Char(_) if is_ctrl => PromptKey::Other,
        KeyCode::Char(it) => PromptKey::Char(*it),
        KeyCode::Up => PromptKey::Up,
        KeyCode::Down => PromptKey::Down,
        KeyCode::Tab => PromptKey::Tab,
        KeyCode::Enter => PromptKey::Enter,
        KeyCode::Esc => PromptKey::Escape,
        KeyCode::Backspace => PromptKey::Backspace,
        _ => PromptKey::Other,
    };
    HostEvent::Key(key)
}
