// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;
use serde::Deserialize;

/// Declarative sizing policy for the paginated body of the prompt. Every field is
/// optional. It can be loaded from JSON (or any other serde format), using camelCase
/// keys:
///
/// ```json
/// { "base": 20, "minBuffer": 2, "max": 15, "autoBufferDescriptions": true }
/// ```
///
/// See [`crate::resolve_page_size`] for how the fields combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PageSizeConfig {
    /// Starting size. When absent, the size adapts to the terminal height.
    pub base: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
    /// Rows reserved below the body, eg: for a description line.
    pub buffer: Option<i32>,
    /// Lower bound for the effective buffer, applied after auto buffering.
    pub min_buffer: Option<i32>,
    /// Reserve as many rows as the tallest description. Supersedes `buffer`.
    pub auto_buffer_descriptions: bool,
    /// When auto buffering, also count rows added by long description lines wrapping
    /// at the terminal width.
    pub auto_buffer_counts_line_width: bool,
}

impl PageSizeConfig {
    #[must_use]
    pub fn with_base(mut self, base: i32) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: i32) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: i32) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_buffer(mut self, buffer: i32) -> Self {
        self.buffer = Some(buffer);
        self
    }

    #[must_use]
    pub fn with_min_buffer(mut self, min_buffer: i32) -> Self {
        self.min_buffer = Some(min_buffer);
        self
    }

    #[must_use]
    pub fn with_auto_buffer_descriptions(mut self, counts_line_width: bool) -> Self {
        self.auto_buffer_descriptions = true;
        self.auto_buffer_counts_line_width = counts_line_width;
        self
    }

    /// Checks every constraint up front. Bad values are never clamped into range.
    ///
    /// # Errors
    ///
    /// Returns the first [`PageSizeConfigError`] found.
    pub fn validate(&self) -> Result<(), PageSizeConfigError> {
        if let Some(min) = self.min
            && min < 1
        {
            return Err(PageSizeConfigError::MinTooSmall { min });
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(PageSizeConfigError::MinGreaterThanMax { min, max });
        }
        if let Some(buffer) = self.buffer
            && buffer < 0
        {
            return Err(PageSizeConfigError::NegativeBuffer { buffer });
        }
        if let Some(min_buffer) = self.min_buffer
            && min_buffer < 0
        {
            return Err(PageSizeConfigError::NegativeMinBuffer { min_buffer });
        }
        if let Some(base) = self.base
            && base < 1
        {
            return Err(PageSizeConfigError::BaseTooSmall { base });
        }
        Ok(())
    }
}

/// Invalid [`PageSizeConfig`]. These are programmer errors, so they are reported as
/// soon as the page size is resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum PageSizeConfigError {
    #[error("page size `min` must be at least 1, got {min}")]
    #[diagnostic(code(r3bl_search_checkbox::page_size::min))]
    MinTooSmall { min: i32 },

    #[error("page size `min` ({min}) must not be greater than `max` ({max})")]
    #[diagnostic(
        code(r3bl_search_checkbox::page_size::min_max),
        help("Swap the values, or drop one of the two constraints")
    )]
    MinGreaterThanMax { min: i32, max: i32 },

    #[error("page size `buffer` must not be negative, got {buffer}")]
    #[diagnostic(code(r3bl_search_checkbox::page_size::buffer))]
    NegativeBuffer { buffer: i32 },

    #[error("page size `minBuffer` must not be negative, got {min_buffer}")]
    #[diagnostic(code(r3bl_search_checkbox::page_size::min_buffer))]
    NegativeMinBuffer { min_buffer: i32 },

    #[error("page size `base` must be at least 1, got {base}")]
    #[diagnostic(
        code(r3bl_search_checkbox::page_size::base),
        help("Leave `base` out to size the page from the terminal height")
    )]
    BaseTooSmall { base: i32 },
}

/// Either a fixed number of rows, or a [`PageSizeConfig`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// Used as is. Not validated, and not clamped.
    Fixed(usize),
    Config(PageSizeConfig),
}

impl Default for PageSize {
    fn default() -> Self { PageSize::Config(PageSizeConfig::default()) }
}

impl From<usize> for PageSize {
    fn from(it: usize) -> Self { PageSize::Fixed(it) }
}

impl From<PageSizeConfig> for PageSize {
    fn from(it: PageSizeConfig) -> Self { PageSize::Config(it) }
}
