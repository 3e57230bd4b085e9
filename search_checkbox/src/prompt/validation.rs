// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use futures_util::{FutureExt as _, future::BoxFuture};

pub const REQUIRED_ERROR_MESSAGE: &str = "At least one choice must be selected";
pub const INVALID_SELECTION_ERROR_MESSAGE: &str = "You must select a valid value";

/// What a validate callback returns. `true` / `false` and strings convert into it, so
/// callbacks can stay short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// Rejected, shown with a generic message.
    Invalid,
    /// Rejected, shown with this message.
    Message(String),
}

impl ValidationOutcome {
    /// Text for the error line, [`None`] when the selection is accepted.
    #[must_use]
    pub fn error_message(self) -> Option<String> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid => Some(INVALID_SELECTION_ERROR_MESSAGE.into()),
            ValidationOutcome::Message(message) => Some(message),
        }
    }
}

impl From<bool> for ValidationOutcome {
    fn from(it: bool) -> Self {
        if it {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid
        }
    }
}

impl From<String> for ValidationOutcome {
    fn from(it: String) -> Self { ValidationOutcome::Message(it) }
}

impl From<&str> for ValidationOutcome {
    fn from(it: &str) -> Self { ValidationOutcome::Message(it.into()) }
}

pub type SyncValidateFn<V> = Arc<dyn Fn(&[V]) -> ValidationOutcome + Send + Sync>;

pub type AsyncValidateFn<V> =
    Arc<dyn Fn(Vec<V>) -> BoxFuture<'static, ValidationOutcome> + Send + Sync>;

/// Runs on submit, after the `required` check, with the checked values in master list
/// order.
#[derive(Clone)]
pub enum Validate<V> {
    /// Resolved within the same turn as the key press.
    Sync(SyncValidateFn<V>),
    /// Resolved by the host loop. Submit is single flight while it is outstanding.
    Async(AsyncValidateFn<V>),
}

impl<V> Debug for Validate<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Validate::Sync(_) => f.write_str("Validate::Sync"),
            Validate::Async(_) => f.write_str("Validate::Async"),
        }
    }
}

impl<V: 'static> Validate<V> {
    pub fn sync<O: Into<ValidationOutcome>>(
        f: impl Fn(&[V]) -> O + Send + Sync + 'static,
    ) -> Self {
        Validate::Sync(Arc::new(move |selection: &[V]| f(selection).into()))
    }

    pub fn with_async<O, Fut>(f: impl Fn(Vec<V>) -> Fut + Send + Sync + 'static) -> Self
    where
        O: Into<ValidationOutcome> + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        Validate::Async(Arc::new(
            move |selection: Vec<V>| -> BoxFuture<'static, ValidationOutcome> {
                f(selection).map(Into::into).boxed()
            },
        ))
    }
}
