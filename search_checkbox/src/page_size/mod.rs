// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod page_size_config;
pub mod page_size_resolver;

// Re-export.
pub use page_size_config::*;
pub use page_size_resolver::*;
