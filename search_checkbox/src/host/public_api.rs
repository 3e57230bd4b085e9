// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Stdout, Write};

use crossterm::{cursor::Show,
                event::{Event, EventStream},
                terminal::{disable_raw_mode, enable_raw_mode}};
use futures_util::Stream;
use miette::IntoDiagnostic as _;

use crate::{ChoiceValue, CrosstermTerminal, EventLoopResult, PromptConfig, SearchCheckbox,
            TTYResult, enter_event_loop_async, execute_commands,
            is_fully_interactive_terminal, throws};

/// This struct is provided for convenience to create a default set of IO devices which
/// can be used in the [`search_checkbox()`] function. Mutable references to these are
/// passed to it, so they have to be created outside of it.
#[allow(missing_debug_implementations)]
pub struct DefaultIoDevices {
    pub output_device: Stdout,
    pub input_device: EventStream,
}

impl Default for DefaultIoDevices {
    fn default() -> Self {
        Self {
            output_device: io::stdout(),
            input_device: EventStream::new(),
        }
    }
}

impl DefaultIoDevices {
    pub fn as_mut_tuple(&mut self) -> (&mut Stdout, &mut EventStream) {
        (&mut self.output_device, &mut self.input_device)
    }
}

/// Show the searchable checkbox prompt described by `config`, and wait for the user to
/// submit or cancel.
///
/// Returns the values of the checked choices in the order they were presented, or
/// [`None`] if the user cancelled (`Ctrl+C`, `Ctrl+D`, end of input).
///
/// If the terminal is *fully* un-interactive, it returns [`None`] right away. This is
/// useful so that it won't block `cargo test` or when run in non-interactive CI/CD
/// environments.
///
/// # Arguments
///
/// * `config` - What to show, see [`PromptConfig`].
/// * `io` - The output and input devices to use. Call [`DefaultIoDevices::as_mut_tuple`]
///   if you don't want to specify anything here.
///
/// # Errors
///
/// Returns an error if the page size config is invalid (before anything is painted), or
/// if the terminal can't be read from or written to.
pub async fn search_checkbox<V, W, S>(
    config: PromptConfig<V>,
    io: (&mut W, &mut S),
) -> miette::Result<Option<Vec<V>>>
where
    V: ChoiceValue,
    W: Write,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut engine = SearchCheckbox::try_new(config)?;

    if is_fully_interactive_terminal() == TTYResult::IsNotInteractive {
        return Ok(None);
    }

    // Destructure the io tuple.
    let (output_device, input_device) = io;

    enable_raw_mode().into_diagnostic()?;
    let res_user_input = enter_event_loop_async(
        &mut engine,
        input_device,
        output_device,
        &CrosstermTerminal,
    )
    .await;
    // Restore the terminal even if the event loop failed.
    let res_restore = restore_terminal(output_device);

    let event_loop_result = res_user_input?;
    res_restore?;

    Ok(match event_loop_result {
        EventLoopResult::ExitWithResult(it) => Some(it),
        EventLoopResult::ExitWithoutResult => None,
    })
}

fn restore_terminal(output_device: &mut impl Write) -> miette::Result<()> {
    throws!({
        execute_commands!(output_device, Show);
        disable_raw_mode().into_diagnostic()?;
    });
}
