// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use futures_util::{FutureExt as _, future::BoxFuture};

use crate::{Action, ChoiceSource, ChoiceValue, DEFAULT_PAGE_SIZE_FALLBACK, Effect,
            LineBuffer, LoadOutcome, PageSize, PromptConfig, PromptKey, PromptState,
            RenderedFrame, SourceLoader, Status, TerminalGeometry, Validate, dispatch_key,
            reduce, render_frame, resolve_page_size};

/// The searchable checkbox prompt, without any terminal I/O. A host drives it:
///
/// 1. Run [`Self::initial_effect`].
/// 2. For every key press, apply the key to the line buffer, then call
///    [`Self::handle_key`] and run the returned [`Effect`].
/// 3. Feed completions (loads, async validations) back in with [`Self::apply`].
/// 4. Paint [`Self::render`] whenever an effect asks for it.
#[derive(Debug)]
pub struct SearchCheckbox<V> {
    config: PromptConfig<V>,
    state: PromptState<V>,
    loader: Option<SourceLoader<V>>,
}

impl<V: ChoiceValue> SearchCheckbox<V> {
    /// # Errors
    ///
    /// Returns an error if the page size config is invalid.
    pub fn try_new(config: PromptConfig<V>) -> miette::Result<Self> {
        if let PageSize::Config(page_size_config) = &config.page_size {
            page_size_config.validate()?;
        }

        let loader = match &config.choice_source {
            ChoiceSource::Static(_) => None,
            ChoiceSource::Source(source) => Some(SourceLoader::new(source.clone())),
        };
        let state = PromptState::new(&config);

        Ok(Self {
            config,
            state,
            loader,
        })
    }

    #[must_use]
    pub fn state(&self) -> &PromptState<V> { &self.state }

    #[must_use]
    pub fn config(&self) -> &PromptConfig<V> { &self.config }

    #[must_use]
    pub fn is_done(&self) -> bool { self.state.status == Status::Done }

    /// A source backed prompt starts with a load for the blank term.
    #[must_use]
    pub fn initial_effect(&self) -> Effect<V> {
        match (&self.loader, self.state.status) {
            (Some(_), Status::Loading) => Effect::Fetch {
                term: self.state.search_term.clone(),
            },
            _ => Effect::Rerender,
        }
    }

    pub fn handle_key(&mut self, key: PromptKey, line: &mut impl LineBuffer) -> Effect<V> {
        match dispatch_key(&self.state, key, line) {
            Some(action) => self.apply(action),
            None => Effect::None,
        }
    }

    pub fn apply(&mut self, action: Action<V>) -> Effect<V> {
        reduce(&mut self.state, &self.config, action)
    }

    /// Issues a source request for `term`, cancelling the previous one. [`None`] for a
    /// static list.
    pub fn start_load(&mut self, term: &str) -> Option<BoxFuture<'static, LoadOutcome<V>>> {
        self.loader.as_mut().map(|it| it.start(term))
    }

    /// Runs the async validator on `selection`. The future resolves to the action that
    /// finishes the submit. [`None`] when the validator isn't async.
    #[must_use]
    pub fn validate_async(&self, selection: Vec<V>) -> Option<BoxFuture<'static, Action<V>>> {
        let Some(Validate::Async(validate_fn)) = &self.config.validate else {
            return None;
        };
        let pending = validate_fn(selection.clone());
        Some(
            pending
                .map(move |outcome| Action::ValidationFinished { selection, outcome })
                .boxed(),
        )
    }

    /// Cancels the in-flight source request, if any.
    pub fn cancel(&mut self) {
        if let Some(loader) = self.loader.as_mut() {
            loader.cancel();
        }
    }

    /// Resolves the page size against the current terminal geometry and renders. When
    /// the width is known, every line is clipped to it, so each line is one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size config is invalid.
    pub fn render(&self, terminal: &impl TerminalGeometry) -> miette::Result<RenderedFrame> {
        let page_size = resolve_page_size(
            &self.config.page_size,
            &self.state.items,
            terminal,
            DEFAULT_PAGE_SIZE_FALLBACK,
        )?;
        let frame = render_frame(&self.state, &self.config, page_size);
        Ok(match terminal.col_width().filter(|it| *it > 0) {
            Some(col_width) => frame.clip_to_width(usize::from(col_width)),
            None => frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChoiceInput, FixedTerminal, PageSizeConfig, SourceError, SourceFn, Theme,
                ValidationOutcome, assert_eq2, source_fn, visible_width};

    /// Applies each key to the line the way a line editor would, then dispatches it.
    fn press(
        engine: &mut SearchCheckbox<String>,
        line: &mut String,
        keys: &[PromptKey],
    ) -> Effect<String> {
        let mut effect = Effect::None;
        for key in keys {
            match key {
                PromptKey::Char(it) => line.push(*it),
                PromptKey::Backspace => {
                    line.pop();
                }
                PromptKey::Tab => line.push('\t'),
                _ => {}
            }
            effect = engine.handle_key(*key, line);
        }
        effect
    }

    fn type_text(text: &str) -> Vec<PromptKey> { text.chars().map(PromptKey::Char).collect() }

    /// Source that filters a fixed catalog by the term.
    fn catalog_source() -> SourceFn<String> {
        source_fn(|term: Option<String>, _token| async move {
            let catalog = ["Apple", "Apricot", "Banana", "Blueberry"];
            Ok(catalog
                .iter()
                .filter(|it| term.as_deref().is_none_or(|term| it.starts_with(term)))
                .map(|it| ChoiceInput::from(*it))
                .collect())
        })
    }

    async fn run_fetch(engine: &mut SearchCheckbox<String>, effect: Effect<String>) {
        let Effect::Fetch { term } = effect else {
            panic!("expected a fetch, got {effect:?}");
        };
        let outcome = engine.start_load(&term).unwrap().await;
        engine.apply(Action::LoadFinished(outcome));
    }

    #[test]
    fn test_end_to_end_static() {
        let config = PromptConfig::<String>::with_choices("Pick", ["Apple", "Banana", "Cherry"]);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        assert_eq2!(engine.initial_effect(), Effect::Rerender);

        let mut line = String::new();
        press(&mut engine, &mut line, &type_text("an"));
        let visible: Vec<&str> = engine
            .state()
            .view()
            .iter(&engine.state().items)
            .filter_map(|it| it.as_choice())
            .map(|it| it.name.as_str())
            .collect();
        assert_eq2!(visible, vec!["Banana"]);

        press(&mut engine, &mut line, &[PromptKey::Tab]);
        assert_eq2!(line, "an");
        press(&mut engine, &mut line, &[PromptKey::Escape]);
        assert_eq2!(line, "");
        assert_eq2!(engine.state().search_term, "");

        let effect = press(&mut engine, &mut line, &[PromptKey::Enter]);
        assert_eq2!(effect, Effect::Submit {
            selection: vec!["Banana".to_string()]
        });
        assert!(engine.is_done());
    }

    #[test]
    fn test_required_then_success() {
        let config = PromptConfig::<String>::with_choices("Pick", ["Apple", "Banana"])
            .set_required(true);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let mut line = String::new();

        let effect = press(&mut engine, &mut line, &[PromptKey::Enter]);
        assert_eq2!(effect, Effect::Rerender);
        assert!(engine.state().validation_error.is_some());

        let effect = press(&mut engine, &mut line, &[
            PromptKey::Down,
            PromptKey::Tab,
            PromptKey::Enter,
        ]);
        assert_eq2!(effect, Effect::Submit {
            selection: vec!["Banana".to_string()]
        });
    }

    #[test]
    fn test_letter_keys_do_not_navigate() {
        let config = PromptConfig::<String>::with_choices("Pick", ["jam", "kale"]);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let mut line = String::new();
        press(&mut engine, &mut line, &[PromptKey::Char('k')]);
        assert_eq2!(engine.state().search_term, "k");
        assert_eq2!(
            engine.state().active_choice().map(|it| it.value.as_str()),
            Some("kale")
        );
    }

    #[test]
    fn test_invalid_page_size_config_fails_fast() {
        let config = PromptConfig::<String>::with_choices("Pick", ["a"])
            .set_page_size(PageSizeConfig::default().with_buffer(-1));
        assert!(SearchCheckbox::try_new(config).is_err());
    }

    #[test]
    fn test_render_uses_current_terminal() {
        let items: Vec<String> = (0..30).map(|it| format!("n{it}")).collect();
        let config = PromptConfig::<String>::with_choices("Pick", items)
            .set_theme(Theme::plain())
            .set_instructions(false);
        let engine = SearchCheckbox::try_new(config).unwrap();

        // Header and search line, plus a page of 12 - 6 rows.
        let frame = engine.render(&FixedTerminal::new(80, 12)).unwrap();
        assert_eq2!(frame.lines.len(), 2 + 6);
        // Terminal grew.
        let frame = engine.render(&FixedTerminal::new(80, 20)).unwrap();
        assert_eq2!(frame.lines.len(), 2 + 14);
        // Terminal size unavailable.
        let frame = engine.render(&FixedTerminal::unavailable()).unwrap();
        assert_eq2!(frame.lines.len(), 2 + DEFAULT_PAGE_SIZE_FALLBACK);
    }

    #[test]
    fn test_every_repaint_fits_terminal_width() {
        let config = PromptConfig::<String>::with_choices("Pick the lines to keep", [
            "Cargo.toml",
            "README.md",
            "src",
        ]);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let mut line = String::new();
        let terminal = FixedTerminal::new(40, 24);

        for key in [PromptKey::Down, PromptKey::Down, PromptKey::Up] {
            press(&mut engine, &mut line, &[key]);
            let frame = engine.render(&terminal).unwrap();
            assert_eq2!(frame.lines.len(), 5);
            for it in &frame.lines {
                assert!(visible_width(it) <= 40, "{it:?} wraps");
            }
            assert!(frame.to_plain_text().starts_with("? Pick the lines to keep (Press"));
        }
    }

    #[tokio::test]
    async fn test_source_driven_flow() {
        let config = PromptConfig::with_source("Pick", catalog_source())
            .set_default_values(["Blueberry".to_string()]);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        assert_eq2!(engine.state().status, Status::Loading);

        let effect = engine.initial_effect();
        run_fetch(&mut engine, effect).await;
        assert_eq2!(engine.state().status, Status::Idle);
        assert_eq2!(engine.state().items.len(), 4);

        let mut line = String::new();
        let effect = press(&mut engine, &mut line, &type_text("A"));
        // Keys other than text are ignored while loading.
        assert_eq2!(press(&mut engine, &mut line, &[PromptKey::Enter]), Effect::None);
        run_fetch(&mut engine, effect).await;
        assert_eq2!(engine.state().items.len(), 2);

        let effect = press(&mut engine, &mut line, &[PromptKey::Tab, PromptKey::Escape]);
        run_fetch(&mut engine, effect).await;

        let effect = press(&mut engine, &mut line, &[PromptKey::Enter]);
        assert_eq2!(effect, Effect::Submit {
            selection: vec!["Apple".to_string(), "Blueberry".to_string()]
        });
    }

    #[tokio::test]
    async fn test_out_of_order_loads_only_commit_latest() {
        let config = PromptConfig::with_source("Pick", catalog_source());
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let effect = engine.initial_effect();
        run_fetch(&mut engine, effect).await;

        let mut line = String::new();
        press(&mut engine, &mut line, &type_text("A"));
        let first = engine.start_load("A").unwrap();
        press(&mut engine, &mut line, &type_text("p"));
        let second = engine.start_load("Ap").unwrap();

        let second = second.await;
        engine.apply(Action::LoadFinished(second));
        let committed = engine.state().clone();

        let first = first.await;
        assert_eq2!(engine.apply(Action::LoadFinished(first)), Effect::None);
        assert_eq2!(*engine.state(), committed);
        assert_eq2!(engine.state().items.len(), 2);
        assert_eq2!(engine.state().search_term, "Ap");
    }

    #[tokio::test]
    async fn test_failing_source_keeps_prompt_interactive() {
        let source: SourceFn<String> = source_fn(|_term: Option<String>, _token| async {
            Err(SourceError::failed("service unavailable"))
        });
        let config = PromptConfig::with_source("Pick", source);
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let effect = engine.initial_effect();
        run_fetch(&mut engine, effect).await;
        assert_eq2!(engine.state().status, Status::Idle);
        assert_eq2!(engine.state().error_line(), Some("service unavailable"));
    }

    #[tokio::test]
    async fn test_async_validation_round_trip() {
        let config = PromptConfig::<String>::with_choices("Pick", ["a", "b"]).set_validate(
            Validate::with_async(|selection: Vec<String>| async move {
                if selection.len() == 1 {
                    ValidationOutcome::Valid
                } else {
                    ValidationOutcome::from("Pick exactly one")
                }
            }),
        );
        let mut engine = SearchCheckbox::try_new(config).unwrap();
        let mut line = String::new();

        let Effect::Validate { selection } = press(&mut engine, &mut line, &[PromptKey::Enter])
        else {
            panic!("expected validation");
        };
        let action = engine.validate_async(selection).unwrap().await;
        assert_eq2!(engine.apply(action), Effect::Rerender);
        assert_eq2!(engine.state().error_line(), Some("Pick exactly one"));

        let Effect::Validate { selection } =
            press(&mut engine, &mut line, &[PromptKey::Tab, PromptKey::Enter])
        else {
            panic!("expected validation");
        };
        let action = engine.validate_async(selection).unwrap().await;
        assert_eq2!(engine.apply(action), Effect::Submit {
            selection: vec!["a".to_string()]
        });
    }
}
