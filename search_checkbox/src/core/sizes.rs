// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keep these small. Choice names and short forms are usually a word or two, so a 16
//! byte inline buffer covers most of them without a heap allocation.

use smallstr::SmallString;

pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;

/// Stack allocated string storage for small strings. When this gets larger than
/// [`DEFAULT_STRING_STORAGE_SIZE`], it will be [`smallstr::SmallString::spilled`] on the
/// heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;
