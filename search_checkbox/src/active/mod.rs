// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod active_item_tracker;

// Re-export.
pub use active_item_tracker::*;
