// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod filter_engine;

// Re-export.
pub use filter_engine::*;
