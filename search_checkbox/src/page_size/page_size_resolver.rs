// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a [`PageSize`] into a concrete number of body rows.
//!
//! ```text
//!   base ──▶ - effective buffer ──▶ max ──▶ min ──▶ floor of 1
//!    │              │
//!    │              ╰─ auto buffer (tallest description) or `buffer`,
//!    │                 raised to at least `minBuffer`
//!    ╰─ `base`, or terminal height - 6 (at least 2, at most 50),
//!       or the fallback when the terminal height is unavailable
//! ```

use unicode_width::UnicodeWidthStr as _;

use crate::{ChoiceValue, DEVELOPMENT_MODE, Item, PageSize, PageSizeConfig,
            PageSizeConfigError, TerminalGeometry};

/// Used when the terminal height can't be read.
pub const DEFAULT_PAGE_SIZE_FALLBACK: usize = 7;
/// Rows of the terminal taken by the header, search line, error line, etc.
pub const TERMINAL_CHROME_ROWS: i64 = 6;
pub const MIN_ADAPTIVE_PAGE_SIZE: i64 = 2;
pub const MAX_ADAPTIVE_PAGE_SIZE: i64 = 50;

/// Resolves `page_size` against the current items and the *current* terminal geometry.
/// The geometry is read on every call, it is never cached.
///
/// # Errors
///
/// Returns a [`PageSizeConfigError`] if the config is invalid. A [`PageSize::Fixed`] is
/// never validated.
pub fn resolve_page_size<V: ChoiceValue>(
    page_size: &PageSize,
    items: &[Item<V>],
    terminal: &impl TerminalGeometry,
    fallback: usize,
) -> Result<usize, PageSizeConfigError> {
    let config = match page_size {
        PageSize::Fixed(it) => return Ok(*it),
        PageSize::Config(config) => config,
    };

    config.validate()?;

    let base = match config.base {
        Some(base) => i64::from(base),
        None => adaptive_base(terminal, fallback),
    };

    let buffer = if config.auto_buffer_descriptions {
        let counts_line_width = config.auto_buffer_counts_line_width;
        let lines =
            calculate_description_lines(items, counts_line_width, terminal.col_width());
        i64::try_from(lines).unwrap_or(i64::MAX)
    } else {
        i64::from(config.buffer.unwrap_or(0))
    };
    let buffer = buffer.max(i64::from(config.min_buffer.unwrap_or(0)));

    let size = apply_constraints(base.saturating_sub(buffer), config);

    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "resolve_page_size",
            base = %base,
            buffer = %buffer,
            size = %size
        );
    });

    Ok(usize::try_from(size).unwrap_or(1))
}

/// `max` first, then `min` (so `min` wins a conflict), then the floor of 1.
fn apply_constraints(size: i64, config: &PageSizeConfig) -> i64 {
    let size = match config.max {
        Some(max) => size.min(i64::from(max)),
        None => size,
    };
    let size = match config.min {
        Some(min) => size.max(i64::from(min)),
        None => size,
    };
    size.max(1)
}

fn adaptive_base(terminal: &impl TerminalGeometry, fallback: usize) -> i64 {
    match terminal.row_height() {
        Some(rows) if rows > 0 => (i64::from(rows) - TERMINAL_CHROME_ROWS)
            .max(MIN_ADAPTIVE_PAGE_SIZE)
            .min(MAX_ADAPTIVE_PAGE_SIZE),
        _ => i64::try_from(fallback).unwrap_or(i64::MAX),
    }
}

/// Rows needed by the tallest description, 0 if no choice has one.
///
/// A description is split on `\n`, and every segment counts as one row. With
/// `counts_line_width` (and a known, non zero `terminal_width`) a segment counts as
/// `max(1, ceil(width / terminal_width))` rows instead. An empty segment still counts,
/// so `"\n\n\n"` needs 4 rows.
pub fn calculate_description_lines<V>(
    items: &[Item<V>],
    counts_line_width: bool,
    terminal_width: Option<u16>,
) -> usize {
    let terminal_width = terminal_width
        .filter(|_| counts_line_width)
        .filter(|it| *it > 0)
        .map(usize::from);

    items
        .iter()
        .filter_map(Item::as_choice)
        .filter_map(|choice| choice.description.as_deref())
        .map(|description| {
            description
                .split('\n')
                .map(|segment| match terminal_width {
                    Some(columns) => segment.width().div_ceil(columns).max(1),
                    None => 1,
                })
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0)
}
