// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod decl_macros;
pub mod sizes;
pub mod term;

// Re-export.
pub use sizes::*;
pub use term::*;
