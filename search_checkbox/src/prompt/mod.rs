// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config;
pub mod engine;
pub mod key_dispatcher;
pub mod reducer;
pub mod state;
pub mod validation;

// Re-export.
pub use config::*;
pub use engine::*;
pub use key_dispatcher::*;
pub use reducer::*;
pub use state::*;
pub use validation::*;
