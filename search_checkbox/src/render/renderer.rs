// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Produces the display payload for the current state. This is a pure function of the
//! state, the config, and the resolved page size. Painting it is the host's job.
//!
//! ```text
//!   ? Pick fruit (Press <tab> to select, ...)     header
//!   Search: an▌                                    search line (caret)
//!   > At least one choice must be selected        error line (at most one)
//!   ❯ ◯ Banana                                     body, one page
//!     ◯ Mango
//!   A yellow fruit                                 description of the active choice
//! ```
//!
//! The host paints one line per terminal row, so a frame that is still going to be
//! repainted is clipped to the terminal width with [`RenderedFrame::clip_to_width`].

use strip_ansi_escapes::strip_str;
use unicode_segmentation::UnicodeSegmentation as _;
use unicode_width::UnicodeWidthStr as _;

use crate::{Choice, ChoiceValue, Disabled, Item, PromptConfig, PromptState, Separator,
            Status, paint};

/// Where to park the caret, relative to the first line of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedFrame {
    pub lines: Vec<String>,
    /// [`None`] once the prompt is done, the caret stays hidden.
    pub cursor: Option<CursorPosition>,
}

impl RenderedFrame {
    /// The frame without any styling, one `\n` between lines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(strip_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Clips every line to `max_width` columns, and keeps the caret inside them. A done
    /// frame is left alone, it is never repainted so it may wrap.
    #[must_use]
    pub fn clip_to_width(mut self, max_width: usize) -> Self {
        let Some(cursor) = self.cursor.as_mut() else {
            return self;
        };
        cursor.col = cursor.col.min(max_width.saturating_sub(1));
        self.lines = self
            .lines
            .iter()
            .map(|it| clip_line_to_width(it, max_width))
            .collect();
        self
    }
}

/// Display width of `text` on the terminal, ignoring escape sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize { strip_str(text).width() }

pub const ELLIPSIS: &str = "…";

const RESET_STYLE: &str = "\u{1b}[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Text,
    Escape,
    Csi,
}

fn is_csi_final_byte(ch: char) -> bool { ('@'..='~').contains(&ch) }

/// Clips `line` to at most `max_width` columns, ending it with [`ELLIPSIS`] when
/// anything was cut. Escape sequences take no columns and are copied up to the cut.
/// The style is reset after the cut, since the sequences that closed it are gone.
#[must_use]
pub fn clip_line_to_width(line: &str, max_width: usize) -> String {
    if visible_width(line) <= max_width {
        return line.to_string();
    }

    let ellipsis_width = ELLIPSIS.width();
    let budget = max_width.saturating_sub(ellipsis_width);
    let mut clipped = String::with_capacity(line.len());
    let mut used = 0;
    let mut scan = Scan::Text;
    let mut has_escapes = false;

    for grapheme in line.graphemes(true) {
        scan = match (scan, grapheme) {
            (Scan::Text, "\u{1b}") => {
                has_escapes = true;
                Scan::Escape
            }
            (Scan::Text, text) => {
                let width = text.width();
                if used + width > budget {
                    break;
                }
                used += width;
                Scan::Text
            }
            (Scan::Escape, "[") => Scan::Csi,
            (Scan::Escape, _) => Scan::Text,
            (Scan::Csi, it) if it.starts_with(is_csi_final_byte) => Scan::Text,
            (Scan::Csi, _) => Scan::Csi,
        };
        clipped.push_str(grapheme);
    }

    if max_width >= ellipsis_width {
        clipped.push_str(ELLIPSIS);
    }
    if has_escapes {
        clipped.push_str(RESET_STYLE);
    }
    clipped
}

pub fn render_frame<V: ChoiceValue>(
    state: &PromptState<V>,
    config: &PromptConfig<V>,
    page_size: usize,
) -> RenderedFrame {
    if state.status == Status::Done {
        return RenderedFrame {
            lines: vec![render_done_line(state, config)],
            cursor: None,
        };
    }

    let theme = &config.theme;
    let style = &theme.style;
    let mut lines = vec![render_header_line(state, config)];

    let search_line = format!(
        "{}{}",
        paint(&style.help_style, &theme.search_label),
        paint(&style.search_term_style, &state.search_term)
    );
    let cursor = CursorPosition {
        row: lines.len(),
        col: visible_width(&search_line),
    };
    lines.push(search_line);

    if let Some(error) = state.error_line() {
        lines.push(paint(&style.error_style, &format!("> {error}")));
    }

    lines.extend(render_body(state, config, page_size));

    if let Some(description) = state.active_choice().and_then(|it| it.description.as_deref())
    {
        lines.extend(
            description
                .split('\n')
                .map(|it| paint(&style.description_style, it)),
        );
    }

    RenderedFrame {
        lines,
        cursor: Some(cursor),
    }
}

fn render_header_line<V: ChoiceValue>(
    state: &PromptState<V>,
    config: &PromptConfig<V>,
) -> String {
    let theme = &config.theme;
    let style = &theme.style;
    let prefix = match state.status {
        Status::Loading => &theme.prefix_loading,
        Status::Idle | Status::Done => &theme.prefix_idle,
    };

    let mut line = format!(
        "{} {}",
        paint(&style.prefix_style, &prefix.render(&config.message)),
        paint(&style.message_style, &config.message)
    );
    if state.show_help_tip
        && let Some(help) = config.instructions.text()
    {
        line.push(' ');
        line.push_str(&paint(&style.help_style, help));
    }
    line
}

fn render_done_line<V: ChoiceValue>(state: &PromptState<V>, config: &PromptConfig<V>) -> String {
    let theme = &config.theme;
    let style = &theme.style;
    let answer = state
        .checked_choices()
        .map(|it| it.short.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {} {}",
        paint(&style.prefix_style, &theme.prefix_done.render(&config.message)),
        paint(&style.message_style, &config.message),
        paint(&style.answer_style, &answer)
    )
}

fn render_body<V: ChoiceValue>(
    state: &PromptState<V>,
    config: &PromptConfig<V>,
    page_size: usize,
) -> Vec<String> {
    let theme = &config.theme;
    let view = state.view();

    if view.selectable_positions(&state.items).is_empty() {
        let text = if state.status == Status::Loading {
            &theme.loading_text
        } else {
            &theme.no_results_text
        };
        return vec![paint(&theme.style.help_style, text)];
    }

    let (start, end) = page_window(view.len(), state.active_index(), page_size);
    view.iter(&state.items)
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(view_index, item)| match item {
            Item::Separator(separator) => render_separator(separator, config),
            Item::Choice(choice) => {
                render_choice(choice, view_index == state.active_index(), config)
            }
        })
        .collect()
}

/// Rows `[start, end)` of a display list of `len` rows to show, keeping `active`
/// visible and roughly centered, and never showing a short last page when the list is
/// long enough to fill it.
#[must_use]
pub fn page_window(len: usize, active: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    if len <= page_size {
        return (0, len);
    }
    let start = active
        .saturating_sub(page_size / 2)
        .min(len - page_size);
    (start, start + page_size)
}

fn render_separator<V>(separator: &Separator, config: &PromptConfig<V>) -> String {
    format!(
        "  {}",
        paint(&config.theme.style.separator_style, &separator.text)
    )
}

fn render_choice<V: ChoiceValue>(
    choice: &Choice<V>,
    is_active: bool,
    config: &PromptConfig<V>,
) -> String {
    let theme = &config.theme;
    let style = &theme.style;

    let maybe_disabled_reason = match &choice.disabled {
        Disabled::No => None,
        Disabled::Yes => Some(theme.disabled_suffix.as_str()),
        Disabled::Reason(reason) => Some(reason.as_str()),
    };
    if let Some(reason) = maybe_disabled_reason {
        return format!(
            "  {}",
            paint(&style.disabled_style, &format!("- {} {reason}", choice.name))
        );
    }

    let checkbox = if choice.checked {
        theme.icon_checked.render(&choice.name)
    } else {
        theme.icon_unchecked.render(&choice.name)
    };

    if is_active {
        let cursor = theme.icon_cursor.render(&choice.name);
        paint(
            &style.focused_style,
            &format!("{cursor} {checkbox} {}", choice.name),
        )
    } else {
        format!("  {checkbox} {}", choice.name)
    }
}
