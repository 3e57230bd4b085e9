// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::event::Event;
use futures_util::{Stream, StreamExt as _,
                   future::{BoxFuture, OptionFuture},
                   stream::FuturesUnordered};
use miette::IntoDiagnostic as _;

use crate::{Action, ChoiceValue, DEVELOPMENT_MODE, Effect, FramePainter, HostEvent,
            LineEditor, LoadOutcome, SearchCheckbox, TerminalGeometry, decode_event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLoopResult<V> {
    ExitWithResult(Vec<V>),
    ExitWithoutResult,
}

/// Work that completes outside of the key stream.
struct PendingWork<V> {
    /// A superseded load resolves right after its token is cancelled, and the reducer
    /// drops it.
    loads: FuturesUnordered<BoxFuture<'static, LoadOutcome<V>>>,
    validation: Option<BoxFuture<'static, Action<V>>>,
}

/// Drives `engine` until the user submits or cancels. Key presses come from `events`,
/// frames are painted on `output`, and every repaint reads the current size from
/// `terminal`. The caller owns raw mode.
///
/// # Errors
///
/// Returns an error if `events` fails, or if painting on `output` fails.
pub async fn enter_event_loop_async<V, S, W>(
    engine: &mut SearchCheckbox<V>,
    events: &mut S,
    output: &mut W,
    terminal: &impl TerminalGeometry,
) -> miette::Result<EventLoopResult<V>>
where
    V: ChoiceValue,
    S: Stream<Item = io::Result<Event>> + Unpin,
    W: Write,
{
    let mut painter = FramePainter::default();
    let mut editor = LineEditor::default();
    let mut pending = PendingWork {
        loads: FuturesUnordered::new(),
        validation: None,
    };

    let effect = engine.initial_effect();
    if let Some(result) =
        run_effect(engine, effect, &mut pending, &mut painter, output, terminal)?
    {
        return Ok(result);
    }

    loop {
        let effect = tokio::select! {
            biased;

            Some(outcome) = pending.loads.next(), if !pending.loads.is_empty() => {
                engine.apply(Action::LoadFinished(outcome))
            }

            Some(action) = OptionFuture::from(pending.validation.as_mut()),
                if pending.validation.is_some() => {
                pending.validation = None;
                engine.apply(action)
            }

            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    engine.cancel();
                    painter.clear(output)?;
                    return Ok(EventLoopResult::ExitWithoutResult);
                };
                let event = event.into_diagnostic()?;

                DEVELOPMENT_MODE.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(message = "enter_event_loop_async", event = ?event);
                });

                match decode_event(&event) {
                    HostEvent::Key(key) => {
                        editor.apply_key(key);
                        engine.handle_key(key, &mut editor)
                    }
                    HostEvent::Resize(_) => Effect::Rerender,
                    HostEvent::Cancel => {
                        engine.cancel();
                        painter.clear(output)?;
                        return Ok(EventLoopResult::ExitWithoutResult);
                    }
                    HostEvent::Ignore => Effect::None,
                }
            }
        };

        if let Some(result) =
            run_effect(engine, effect, &mut pending, &mut painter, output, terminal)?
        {
            return Ok(result);
        }
    }
}

fn run_effect<V: ChoiceValue>(
    engine: &mut SearchCheckbox<V>,
    effect: Effect<V>,
    pending: &mut PendingWork<V>,
    painter: &mut FramePainter,
    output: &mut impl Write,
    terminal: &impl TerminalGeometry,
) -> miette::Result<Option<EventLoopResult<V>>> {
    match effect {
        Effect::None => return Ok(None),
        Effect::Rerender => {}
        Effect::Fetch { term } => {
            if let Some(load) = engine.start_load(&term) {
                pending.loads.push(load);
            }
        }
        Effect::Validate { selection } => {
            pending.validation = engine.validate_async(selection);
        }
        Effect::Submit { selection } => {
            painter.paint(output, &engine.render(terminal)?)?;
            painter.finish(output)?;
            return Ok(Some(EventLoopResult::ExitWithResult(selection)));
        }
    }

    painter.paint(output, &engine.render(terminal)?)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures_util::stream;
    use strip_ansi_escapes::strip_str;

    use super::*;
    use crate::{ChoiceInput, FixedTerminal, PromptConfig, SourceFn, Theme,
                assert_eq2, source_fn};

    fn key(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn text(it: &str) -> Vec<io::Result<Event>> {
        it.chars().map(|it| key(KeyCode::Char(it))).collect()
    }

    fn static_engine() -> SearchCheckbox<String> {
        let config = PromptConfig::<String>::with_choices("Pick", ["Apple", "Banana", "Cherry"])
            .set_theme(Theme::plain());
        SearchCheckbox::try_new(config).unwrap()
    }

    #[tokio::test]
    async fn test_select_and_submit() {
        let mut engine = static_engine();
        let mut input: Vec<io::Result<Event>> = text("an");
        input.extend([key(KeyCode::Tab), key(KeyCode::Esc), key(KeyCode::Enter)]);
        let mut events = stream::iter(input);
        let mut output: Vec<u8> = vec![];

        let result = enter_event_loop_async(
            &mut engine,
            &mut events,
            &mut output,
            &FixedTerminal::new(80, 24),
        )
        .await
        .unwrap();

        assert_eq2!(
            result,
            EventLoopResult::ExitWithResult(vec!["Banana".to_string()])
        );
        let painted = strip_str(String::from_utf8(output).unwrap());
        assert!(painted.contains("Search: an"));
        assert!(painted.contains("✔ Pick Banana"));
    }

    #[tokio::test]
    async fn test_ctrl_c_exits_without_result() {
        let mut engine = static_engine();
        let mut events = stream::iter(vec![
            key(KeyCode::Tab),
            Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
            key(KeyCode::Enter),
        ]);
        let mut output: Vec<u8> = vec![];

        let result = enter_event_loop_async(
            &mut engine,
            &mut events,
            &mut output,
            &FixedTerminal::new(80, 24),
        )
        .await
        .unwrap();
        assert_eq2!(result, EventLoopResult::ExitWithoutResult);
        assert!(!engine.is_done());
    }

    #[tokio::test]
    async fn test_end_of_input_exits_without_result() {
        let mut engine = static_engine();
        let mut events = stream::iter(text("ch"));
        let mut output: Vec<u8> = vec![];

        let result = enter_event_loop_async(
            &mut engine,
            &mut events,
            &mut output,
            &FixedTerminal::unavailable(),
        )
        .await
        .unwrap();
        assert_eq2!(result, EventLoopResult::ExitWithoutResult);
        assert_eq2!(engine.state().search_term, "ch");
    }

    #[tokio::test]
    async fn test_input_error_is_reported() {
        let mut engine = static_engine();
        let mut events = stream::iter(vec![Err(io::Error::other("tty gone"))]);
        let mut output: Vec<u8> = vec![];

        let result = enter_event_loop_async(
            &mut engine,
            &mut events,
            &mut output,
            &FixedTerminal::new(80, 24),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_source_loads_before_keys_are_handled() {
        let source: SourceFn<String> = source_fn(|_term: Option<String>, _token| async {
            Ok(vec![ChoiceInput::from("Apple"), ChoiceInput::from("Avocado")])
        });
        let config = PromptConfig::with_source("Pick", source).set_theme(Theme::plain());
        let mut engine = SearchCheckbox::try_new(config).unwrap();

        // The initial load resolves before Tab is read, since loads are polled first.
        let mut events = stream::iter(vec![
            key(KeyCode::Down),
            key(KeyCode::Tab),
            key(KeyCode::Enter),
        ]);
        let mut output: Vec<u8> = vec![];

        let result = enter_event_loop_async(
            &mut engine,
            &mut events,
            &mut output,
            &FixedTerminal::new(80, 24),
        )
        .await
        .unwrap();
        assert_eq2!(
            result,
            EventLoopResult::ExitWithResult(vec!["Avocado".to_string()])
        );
    }
}
