// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Issues requests to the caller supplied async source, one per accepted search term
//! change (no debounce). Every request owns a fresh [`CancellationToken`]. Starting a new
//! request cancels the previous token, and the token travels back with the result in a
//! [`LoadOutcome`], so the reducer can drop a stale result right before it would commit
//! it.
//!
//! ```text
//!   term "a"  ──▶ token#1 ─────────────────────────────▶ outcome#1 (cancelled: dropped)
//!   term "ab" ──▶ cancel token#1, token#2 ──▶ outcome#2 (committed)
//! ```

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use futures_util::{FutureExt as _, future::BoxFuture};
use miette::Diagnostic;
use tokio_util::sync::CancellationToken;

use crate::{ChoiceInput, DEVELOPMENT_MODE};

/// The source could not produce choices for a term.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum SourceError {
    /// The request was superseded. This is not an error, it is never displayed.
    #[error("request cancelled")]
    #[diagnostic(code(r3bl_search_checkbox::source::cancelled))]
    Cancelled,

    #[error("{0}")]
    #[diagnostic(code(r3bl_search_checkbox::source::failed))]
    Failed(String),
}

impl SourceError {
    pub fn failed(message: impl std::fmt::Display) -> Self {
        SourceError::Failed(message.to_string())
    }
}

pub type SourceResult<V> = Result<Vec<ChoiceInput<V>>, SourceError>;

pub type SourceFuture<V> = BoxFuture<'static, SourceResult<V>>;

/// Async choice source. It receives the search term (`None` when blank) and the token of
/// this request. Honoring the token is optional, a cancelled request's result is
/// dropped either way.
pub type SourceFn<V> =
    Arc<dyn Fn(Option<String>, CancellationToken) -> SourceFuture<V> + Send + Sync>;

/// Wraps an async closure into a [`SourceFn`].
pub fn source_fn<V, F, Fut>(f: F) -> SourceFn<V>
where
    V: Send + 'static,
    F: Fn(Option<String>, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = SourceResult<V>> + Send + 'static,
{
    Arc::new(move |term, token| -> SourceFuture<V> { f(term, token).boxed() })
}

/// A finished request, paired with the token it was issued with.
#[derive(Debug)]
pub struct LoadOutcome<V> {
    pub token: CancellationToken,
    pub term: Option<String>,
    pub result: SourceResult<V>,
}

impl<V> LoadOutcome<V> {
    /// True when a newer request superseded this one, or when the source itself reported
    /// cancellation. Either way the outcome must not touch the prompt state.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled() || matches!(self.result, Err(SourceError::Cancelled))
    }
}

pub struct SourceLoader<V> {
    source: SourceFn<V>,
    in_flight: Option<CancellationToken>,
}

impl<V> Debug for SourceLoader<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceLoader")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<V: Send + 'static> SourceLoader<V> {
    pub fn new(source: SourceFn<V>) -> Self {
        Self {
            source,
            in_flight: None,
        }
    }

    /// Cancels the previous request (if any) and issues a new one for `search_term`. The
    /// returned future never fails, errors are carried in [`LoadOutcome::result`]. It
    /// resolves with [`SourceError::Cancelled`] as soon as the request is superseded,
    /// even if the source never looks at its token.
    pub fn start(&mut self, search_term: &str) -> BoxFuture<'static, LoadOutcome<V>> {
        self.cancel();

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let term = source_term(search_term);

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "source request", term = ?term);
        });

        let request = (self.source)(term.clone(), token.clone());
        async move {
            let result = tokio::select! {
                biased;
                () = token.cancelled() => Err(SourceError::Cancelled),
                result = request => result,
            };
            LoadOutcome {
                token,
                term,
                result,
            }
        }
        .boxed()
    }

    /// Cancels the in-flight request, eg: when the prompt is torn down.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|it| !it.is_cancelled())
    }
}

/// A blank term is passed to the source as absent.
#[must_use]
pub fn source_term(search_term: &str) -> Option<String> {
    if search_term.trim().is_empty() {
        None
    } else {
        Some(search_term.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::{future, sync::Mutex, time::Duration};

    use tokio::time::timeout;

    use super::*;
    use crate::assert_eq2;

    fn echo_source(seen: Arc<Mutex<Vec<Option<String>>>>) -> SourceFn<String> {
        source_fn(move |term: Option<String>, _token| {
            let seen = seen.clone();
            async move {
                if let Ok(mut seen) = seen.lock() {
                    seen.push(term.clone());
                }
                Ok(vec![ChoiceInput::from(term.unwrap_or_else(|| "all".into()))])
            }
        })
    }

    #[tokio::test]
    async fn test_blank_term_is_passed_as_absent() {
        let seen = Arc::new(Mutex::new(vec![]));
        let mut loader = SourceLoader::new(echo_source(seen.clone()));

        let outcome = loader.start("   ").await;
        assert!(!outcome.is_stale());
        assert_eq2!(outcome.term, None);

        let outcome = loader.start("kiwi").await;
        assert_eq2!(outcome.term.as_deref(), Some("kiwi"));
        assert_eq2!(outcome.result, Ok(vec![ChoiceInput::from("kiwi")]));

        assert_eq2!(*seen.lock().unwrap(), vec![None, Some("kiwi".to_string())]);
    }

    #[tokio::test]
    async fn test_new_request_cancels_previous() {
        let source = source_fn(move |term: Option<String>, _token| async move {
            if term.as_deref() == Some("a") {
                // Hangs, and never looks at its token.
                future::pending::<()>().await;
            }
            Ok(vec![ChoiceInput::from(term.unwrap_or_default())])
        });
        let mut loader = SourceLoader::new(source);

        let first = loader.start("a");
        let second = loader.start("ab").await;
        assert!(!second.is_stale());
        assert_eq2!(second.result, Ok(vec![ChoiceInput::from("ab")]));

        let first = timeout(Duration::from_millis(200), first).await.unwrap();
        assert!(first.is_stale());
        assert_eq2!(first.term.as_deref(), Some("a"));
        assert_eq2!(first.result, Err(SourceError::Cancelled));
    }

    #[tokio::test]
    async fn test_source_can_observe_its_token() {
        let source = source_fn(|_term: Option<String>, token: CancellationToken| async move {
            token.cancelled().await;
            Err::<Vec<ChoiceInput<String>>, _>(SourceError::Cancelled)
        });
        let mut loader = SourceLoader::new(source);

        let pending = tokio::spawn(loader.start("slow"));
        assert!(loader.has_in_flight());
        loader.cancel();
        assert!(!loader.has_in_flight());

        let outcome = pending.await.unwrap();
        assert!(outcome.is_stale());
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let source = source_fn(|_term: Option<String>, _token| async {
            Err::<Vec<ChoiceInput<String>>, _>(SourceError::failed("backend offline"))
        });
        let mut loader = SourceLoader::new(source);
        let outcome = loader.start("x").await;
        assert!(!outcome.is_stale());
        assert_eq2!(outcome.result, Err(SourceError::Failed("backend offline".into())));
    }
}
