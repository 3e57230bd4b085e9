// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Paints a [`RenderedFrame`] in place, below wherever the caret was when the prompt
//! started. Every repaint moves back up to the first row of the previous frame, clears
//! from there down, and prints the new frame.

use std::io::Write;

use crossterm::{cursor::{Hide, MoveToColumn, MoveUp, Show},
                style::Print,
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic as _;

use crate::{RenderedFrame, queue_commands, throws};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramePainter {
    /// Row (relative to the top of the frame) the caret was left on.
    caret_row: usize,
}

impl FramePainter {
    /// # Errors
    ///
    /// Returns an error if writing to `output` fails.
    pub fn paint(&mut self, output: &mut impl Write, frame: &RenderedFrame) -> miette::Result<()> {
        throws!({
            self.move_to_frame_top(output)?;
            queue_commands!(output, Clear(ClearType::FromCursorDown));
            queue_commands!(output, Print(frame.lines.join("\r\n")));

            let last_row = frame.lines.len().saturating_sub(1);
            match frame.cursor {
                Some(cursor) => {
                    move_up(output, last_row.saturating_sub(cursor.row))?;
                    queue_commands!(output, MoveToColumn(to_u16(cursor.col)), Show);
                    self.caret_row = cursor.row.min(last_row);
                }
                None => {
                    queue_commands!(output, Hide);
                    self.caret_row = last_row;
                }
            }

            output.flush().into_diagnostic()?;
        });
    }

    /// Erases the frame, eg: when the prompt is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `output` fails.
    pub fn clear(&mut self, output: &mut impl Write) -> miette::Result<()> {
        throws!({
            self.move_to_frame_top(output)?;
            queue_commands!(output, Clear(ClearType::FromCursorDown), Show);
            self.caret_row = 0;
            output.flush().into_diagnostic()?;
        });
    }

    /// Leaves the last painted frame on screen, and moves to the start of the next line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `output` fails.
    pub fn finish(&mut self, output: &mut impl Write) -> miette::Result<()> {
        throws!({
            queue_commands!(output, Print("\r\n"), Show);
            self.caret_row = 0;
            output.flush().into_diagnostic()?;
        });
    }

    fn move_to_frame_top(&self, output: &mut impl Write) -> miette::Result<()> {
        throws!({
            move_up(output, self.caret_row)?;
            queue_commands!(output, MoveToColumn(0));
        });
    }
}

fn move_up(output: &mut impl Write, rows: usize) -> miette::Result<()> {
    throws!({
        // MoveUp(0) still moves one row on most terminals.
        if rows > 0 {
            queue_commands!(output, MoveUp(to_u16(rows)));
        }
    });
}

fn to_u16(it: usize) -> u16 { u16::try_from(it).unwrap_or(u16::MAX) }
