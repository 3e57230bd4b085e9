// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{BufRead as _, stdin};

use StdinIsPipedResult::{StdinIsNotPiped, StdinIsPiped};
use StdoutIsPipedResult::{StdoutIsNotPiped, StdoutIsPiped};
use clap::{CommandFactory as _, Parser};
use crossterm::style::Stylize as _;
use miette::IntoDiagnostic as _;
use r3bl_search_checkbox::{DEVELOPMENT_MODE, DefaultIoDevices, PageSize, PageSizeConfig,
                           PromptConfig, StdinIsPipedResult, StdoutIsPipedResult,
                           TracingConfig, is_stdin_piped, is_stdout_piped, ok,
                           search_checkbox, try_initialize_logging_global};

#[derive(Debug, Parser)]
#[command(bin_name = "rsc")]
#[command(about = "Search and check one or more lines, piped in via stdin 👉", long_about = None)]
#[command(version)]
#[command(next_line_help = true)]
struct CliArgs {
    /// Message shown above the search line
    #[arg(value_name = "message", long, short = 'm', default_value = "Select lines")]
    message: String,

    /// Fixed number of rows in the list. Without it the list adapts to the terminal
    #[arg(value_name = "rows", long, short = 'p', conflicts_with = "page_size_config")]
    page_size: Option<usize>,

    /// Adaptive page size as JSON. For eg: '{"min": 3, "max": 20, "buffer": 4}' 💡
    #[arg(value_name = "json", long)]
    page_size_config: Option<String>,

    /// At least one line has to be checked before submitting
    #[arg(long, short = 'r')]
    required: bool,

    /// Stop at the first and last line instead of wrapping around
    #[arg(long)]
    no_loop: bool,

    /// Write debug logs to `log.txt` in the current folder
    #[arg(long, short = 'l')]
    log: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_args = CliArgs::parse();

    if cli_args.log {
        try_initialize_logging_global(TracingConfig::default())?;
    }

    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_args = ?cli_args);
    });

    let bin_name = CliArgs::command();
    let bin_name = bin_name.get_bin_name().unwrap_or("this command");

    match (is_stdin_piped(), is_stdout_piped()) {
        (StdinIsPiped, StdoutIsNotPiped) => {
            show_tui(cli_args).await?;
        }
        (StdinIsPiped, StdoutIsPiped) => {
            show_error_do_not_pipe_stdout(bin_name);
        }
        (StdinIsNotPiped, StdoutIsPiped) => {
            show_error_need_to_pipe_stdin(bin_name);
            show_error_do_not_pipe_stdout(bin_name);
        }
        (StdinIsNotPiped, StdoutIsNotPiped) => {
            show_error_need_to_pipe_stdin(bin_name);
        }
    }

    ok!()
}

fn show_error_need_to_pipe_stdin(bin_name: &str) {
    let msg = format!(
        "Please pipe the output of another command into {bin_name}. \
         \n✅ For example: `ls -1 | {bin_name} --required`",
    )
    .green()
    .to_string();
    println!("{msg}");
}

fn show_error_do_not_pipe_stdout(bin_name: &str) {
    let msg = format!(
        "Please do *not* pipe the output of {bin_name} to another command. \
         \n❎ For eg, don't do this: `ls -1 | {bin_name} | cat`",
    )
    .red()
    .to_string();
    println!("{msg}");
}

async fn show_tui(cli_args: CliArgs) -> miette::Result<()> {
    let lines = stdin()
        .lock()
        .lines()
        .map_while(Result::ok)
        .filter(|it| !it.trim().is_empty())
        .collect::<Vec<String>>();

    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "show_tui", lines = ?lines);
    });

    // Early return, nothing to do. No content found in stdin.
    if lines.is_empty() {
        return ok!();
    }

    let config = PromptConfig::<String>::with_choices(&cli_args.message, lines)
        .set_page_size(page_size(&cli_args)?)
        .set_required(cli_args.required)
        .set_loop(!cli_args.no_loop);

    let mut io_devices = DefaultIoDevices::default();
    let maybe_selected = search_checkbox(config, io_devices.as_mut_tuple()).await?;

    DEVELOPMENT_MODE.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "show_tui", selected = ?maybe_selected);
    });

    for selected_item in maybe_selected.unwrap_or_default() {
        println!("{selected_item}");
    }

    ok!()
}

fn page_size(cli_args: &CliArgs) -> miette::Result<PageSize> {
    if let Some(rows) = cli_args.page_size {
        return ok!(PageSize::Fixed(rows));
    }
    match &cli_args.page_size_config {
        Some(json) => {
            let page_size_config: PageSizeConfig =
                serde_json::from_str(json).into_diagnostic()?;
            ok!(page_size_config.into())
        }
        None => ok!(PageSize::default()),
    }
}
