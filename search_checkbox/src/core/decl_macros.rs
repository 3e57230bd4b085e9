// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given block or stmt so that it returns a `Result<()>`. It is just syntactic
/// sugar that helps having to write `Ok(())` repeatedly at the end of each block.
#[macro_export]
macro_rules! throws {
    ($it: block) => {{
        $it
        return Ok(())
    }};
    ($it: stmt) => {{
        $it
        return Ok(())
    }};
}

/// Syntactic sugar for `Ok(())` or `Ok($value)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Uses [`pretty_assertions::assert_eq`] so that the diff is easy to read when a test
/// fails. Only available to tests.
#[cfg(test)]
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Format into an [`crate::InlineString`] rather than a [`String`].
#[macro_export]
macro_rules! inline_string {
    ($($format:tt)*) => {{
        use std::fmt::Write as _;
        let mut acc = $crate::InlineString::new();
        _ = write!(acc, $($format)*);
        acc
    }};
}

/// Queue crossterm commands onto any [`std::io::Write`], converting errors into
/// [`miette::Report`]s. The caller is responsible for flushing.
#[macro_export]
macro_rules! queue_commands {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                $writer,
                $command
            ).into_diagnostic()?;
        )*
    }}
}

/// Same as [`queue_commands!`] but flushes the writer afterwards.
#[macro_export]
macro_rules! execute_commands {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                $writer,
                $command
            ).into_diagnostic()?;
        )*
        ::std::io::Write::flush($writer).into_diagnostic()?;
    }}
}
