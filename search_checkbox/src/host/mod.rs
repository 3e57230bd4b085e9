// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod event_loop;
pub mod frame_painter;
pub mod key_decoder;
pub mod line_editor;
pub mod public_api;

// Re-export.
pub use event_loop::*;
pub use frame_painter::*;
pub use key_decoder::*;
pub use line_editor::*;
pub use public_api::*;
