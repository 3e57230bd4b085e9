// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_search_checkbox
//!
//! A searchable multi-select checkbox prompt for CLI apps. The user types to narrow a
//! list of choices, moves with the arrow keys, toggles with `Tab`, and submits with
//! `Enter`. Checked choices stay checked while the filter changes.
//!
//! This crate can be used in two ways:
//! 1. As a library. Call [`search_checkbox()`] with a [`PromptConfig`].
//! 1. As a binary. The binary target is called `rsc`. Pipe lines into it, check some of
//!    them, and the checked lines are printed to `stdout`.
//!
//! ## How to use it as a library?
//!
//! ```no_run
//! use r3bl_search_checkbox::{DefaultIoDevices, PromptConfig, search_checkbox};
//!
//! # async fn run() -> miette::Result<()> {
//! let config = PromptConfig::<String>::with_choices(
//!     "Pick fruit",
//!     ["Apple", "Banana", "Cherry"],
//! )
//! .set_required(true);
//!
//! let mut io_devices = DefaultIoDevices::default();
//! let maybe_selected = search_checkbox(config, io_devices.as_mut_tuple()).await?;
//! println!("{maybe_selected:?}");
//! # Ok(())
//! # }
//! ```
//!
//! Choices can also come from an async source that is called with the search term,
//! see [`PromptConfig::with_source`] and [`source_fn`]. Every new term cancels the
//! request that is still in flight, and only the latest response is ever shown.
//!
//! ## Layers
//!
//! - [`SearchCheckbox`] is the engine. It has no terminal I/O, and can be driven
//!   directly (eg: in tests) with [`SearchCheckbox::handle_key`] and
//!   [`SearchCheckbox::apply`].
//! - [`enter_event_loop_async`] drives the engine from a stream of crossterm events,
//!   and paints each [`RenderedFrame`] with a [`FramePainter`].
//! - [`search_checkbox()`] adds raw mode and the interactive terminal check on top.
//!
//! ## How to use it as a binary?
//!
//! ```sh
//! cargo install r3bl_search_checkbox
//! ls -1 | rsc --required --page-size-config '{"min": 3, "max": 20}'
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]
#![warn(rust_2018_idioms)]

// Attach sources.
pub mod active;
pub mod choice;
pub mod core;
pub mod filter;
pub mod host;
pub mod log;
pub mod page_size;
pub mod prompt;
pub mod render;
pub mod source;

// Re-export.
pub use active::*;
pub use choice::*;
pub use crate::core::*;
pub use filter::*;
pub use host::*;
pub use log::*;
pub use page_size::*;
pub use prompt::*;
pub use render::*;
pub use source::*;

/// Enable verbose `tracing::debug!` output from the engine and the event loop. Pair it
/// with `rsc --log` and watch with `tail -f log.txt`.
pub const DEVELOPMENT_MODE: bool = false;
