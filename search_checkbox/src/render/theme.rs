// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crossterm::style::{Attribute, Color, ContentStyle, Stylize as _};

use crate::InlineString;

/// A glyph that is either fixed text, or computed from the text it decorates. It is
/// only resolved at render time.
#[derive(Clone)]
pub enum Icon {
    Static(InlineString),
    Computed(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Icon {
    pub fn computed(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Icon::Computed(Arc::new(f))
    }

    /// `text` is what the icon sits next to, eg: the message for a prefix, the name of a
    /// choice for a checkbox.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        match self {
            Icon::Static(it) => it.to_string(),
            Icon::Computed(f) => f(text),
        }
    }
}

impl Debug for Icon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Icon::Static(it) => write!(f, "Icon::Static({it:?})"),
            Icon::Computed(_) => f.write_str("Icon::Computed"),
        }
    }
}

impl From<&str> for Icon {
    fn from(it: &str) -> Self { Icon::Static(it.into()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    pub prefix_style: ContentStyle,
    pub message_style: ContentStyle,
    pub help_style: ContentStyle,
    pub search_term_style: ContentStyle,
    pub focused_style: ContentStyle,
    pub disabled_style: ContentStyle,
    pub separator_style: ContentStyle,
    pub description_style: ContentStyle,
    pub error_style: ContentStyle,
    pub answer_style: ContentStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let cyan = Color::Rgb { r: 0, g: 190, b: 220 };
        let lizard_green = Color::Rgb { r: 20, g: 244, b: 0 };
        let medium_gray = Color::Rgb { r: 110, g: 110, b: 110 };
        let pink = Color::Rgb { r: 255, g: 105, b: 180 };

        StyleSheet {
            prefix_style: ContentStyle::new().with(lizard_green),
            message_style: ContentStyle::new().attribute(Attribute::Bold),
            help_style: ContentStyle::new().with(medium_gray),
            search_term_style: ContentStyle::new().with(cyan),
            focused_style: ContentStyle::new().with(cyan),
            disabled_style: ContentStyle::new().with(medium_gray).attribute(Attribute::Dim),
            separator_style: ContentStyle::new().with(medium_gray),
            description_style: ContentStyle::new().with(cyan),
            error_style: ContentStyle::new().with(pink),
            answer_style: ContentStyle::new().with(cyan),
        }
    }
}

impl StyleSheet {
    /// No colors and no attributes, for `NO_COLOR` terminals and tests.
    #[must_use]
    pub fn plain() -> Self {
        let it = ContentStyle::new();
        StyleSheet {
            prefix_style: it,
            message_style: it,
            help_style: it,
            search_term_style: it,
            focused_style: it,
            disabled_style: it,
            separator_style: it,
            description_style: it,
            error_style: it,
            answer_style: it,
        }
    }

    #[must_use]
    pub fn sea_foam_style() -> Self {
        let bright_cyan = Color::Rgb { r: 0, g: 255, b: 255 };
        let light_cyan = Color::Rgb { r: 150, g: 230, b: 230 };
        let light_gray = Color::Rgb { r: 190, g: 190, b: 190 };
        let light_yellow_green = Color::Rgb { r: 190, g: 230, b: 100 };
        StyleSheet {
            prefix_style: ContentStyle::new().with(light_yellow_green),
            focused_style: ContentStyle::new().with(bright_cyan),
            search_term_style: ContentStyle::new().with(bright_cyan),
            description_style: ContentStyle::new().with(light_cyan),
            answer_style: ContentStyle::new().with(light_cyan),
            separator_style: ContentStyle::new().with(light_gray),
            ..StyleSheet::default()
        }
    }
}

/// Apply `style` to `text`. Produces no escape sequences for an empty style.
#[must_use]
pub fn paint(style: &ContentStyle, text: &str) -> String {
    if *style == ContentStyle::new() {
        text.to_string()
    } else {
        style.apply(text).to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub prefix_idle: Icon,
    pub prefix_loading: Icon,
    pub prefix_done: Icon,
    pub icon_checked: Icon,
    pub icon_unchecked: Icon,
    pub icon_cursor: Icon,
    /// Shown in front of the search term.
    pub search_label: InlineString,
    pub disabled_suffix: InlineString,
    pub no_results_text: InlineString,
    pub loading_text: InlineString,
    pub style: StyleSheet,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prefix_idle: "?".into(),
            prefix_loading: "…".into(),
            prefix_done: "✔".into(),
            icon_checked: "◉".into(),
            icon_unchecked: "◯".into(),
            icon_cursor: "❯".into(),
            search_label: "Search: ".into(),
            disabled_suffix: "(disabled)".into(),
            no_results_text: "No results".into(),
            loading_text: "Loading...".into(),
            style: StyleSheet::default(),
        }
    }
}

impl Theme {
    /// Default glyphs without any colors.
    #[must_use]
    pub fn plain() -> Self {
        Theme {
            style: StyleSheet::plain(),
            ..Theme::default()
        }
    }
}
