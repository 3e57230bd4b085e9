// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod renderer;
pub mod theme;

// Re-export.
pub use renderer::*;
pub use theme::*;
