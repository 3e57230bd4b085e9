// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod source_loader;

// Re-export.
pub use source_loader::*;
