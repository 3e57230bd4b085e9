// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty

use std::io::IsTerminal as _;

/// Terminal dimensions in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub col_width: u16,
    pub row_height: u16,
}

/// Source of terminal geometry. Every call must read the *current* value, since the
/// terminal can be resized between two page size resolutions. Any value may be
/// unavailable (piped output, CI, etc.), in which case [`None`] is returned.
pub trait TerminalGeometry {
    fn size(&self) -> Option<Size>;

    fn row_height(&self) -> Option<u16> { self.size().map(|it| it.row_height) }

    fn col_width(&self) -> Option<u16> { self.size().map(|it| it.col_width) }
}

/// Reads the size of the real terminal using [`crossterm::terminal::size`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermTerminal;

impl TerminalGeometry for CrosstermTerminal {
    fn size(&self) -> Option<Size> {
        let (columns, rows) = crossterm::terminal::size().ok()?;
        Some(Size {
            col_width: columns,
            row_height: rows,
        })
    }
}

/// Fixed geometry. Used in tests, and by hosts that know their viewport up front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedTerminal(pub Option<Size>);

impl FixedTerminal {
    #[must_use]
    pub fn new(col_width: u16, row_height: u16) -> Self {
        Self(Some(Size {
            col_width,
            row_height,
        }))
    }

    #[must_use]
    pub fn unavailable() -> Self { Self(None) }
}

impl TerminalGeometry for FixedTerminal {
    fn size(&self) -> Option<Size> { self.0 }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// The prompt needs keyboard input and a screen to paint on. `stdout` has to be a TTY.
/// Keys are read from `stdin` when it is a TTY, otherwise crossterm falls back to
/// `/dev/tty` (eg: when choices are piped in), so that has to be openable.
#[must_use]
pub fn is_fully_interactive_terminal() -> TTYResult {
    let has_screen = std::io::stdout().is_terminal();
    let has_keyboard = std::io::stdin().is_terminal() || has_controlling_tty();
    if has_screen && has_keyboard {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}

#[cfg(unix)]
fn has_controlling_tty() -> bool { std::fs::File::open("/dev/tty").is_ok() }

#[cfg(not(unix))]
fn has_controlling_tty() -> bool { false }

#[derive(Debug)]
pub enum StdinIsPipedResult {
    StdinIsPiped,
    StdinIsNotPiped,
}

#[derive(Debug)]
pub enum StdoutIsPipedResult {
    StdoutIsPiped,
    StdoutIsNotPiped,
}

/// If you run `echo "test" | cargo run` the following will return true.
/// More info: <https://unix.stackexchange.com/questions/597083/how-does-piping-affect-stdin>
#[must_use]
pub fn is_stdin_piped() -> StdinIsPipedResult {
    if std::io::stdin().is_terminal() {
        StdinIsPipedResult::StdinIsNotPiped
    } else {
        StdinIsPipedResult::StdinIsPiped
    }
}

/// If you run `cargo run | grep foo` the following will return true.
#[must_use]
pub fn is_stdout_piped() -> StdoutIsPipedResult {
    if std::io::stdout().is_terminal() {
        StdoutIsPipedResult::StdoutIsNotPiped
    } else {
        StdoutIsPipedResult::StdoutIsPiped
    }
}
