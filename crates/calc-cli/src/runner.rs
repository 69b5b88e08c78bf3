//! Command runners
//!
//! Each runner writes to the streams it is given, so tests drive them with
//! in-memory buffers.

use crate::commands::{PressArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use keypad_calc::wasm::CalculatorUi;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Lines that end a repl session
const QUIT_COMMANDS: &[&str] = &["quit", "exit"];

fn write_screen(ui: &CalculatorUi, out: &mut impl Write, show_expression: bool) -> CliResult<()> {
    let expression = ui.expression_text();
    if show_expression && !expression.is_empty() {
        writeln!(out, "{expression}")?;
    }
    writeln!(out, "{}", ui.result_text())?;
    Ok(())
}

/// Presses every key, then prints the expression line and display
pub fn run_press(config: &CliConfig, args: &PressArgs, out: &mut impl Write) -> CliResult<()> {
    let mut ui = CalculatorUi::with_config(&config.calc)?;
    for key in &args.keys {
        if let Some(line) = ui.press_key(key)? {
            info!(history = %line, "evaluated");
        }
    }

    if args.json {
        let snapshot = ui.engine().snapshot();
        writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    } else {
        write_screen(&ui, out, true)?;
    }
    Ok(())
}

/// Reads whitespace-separated key sequences line by line.
///
/// A bad key is reported on `err` and the rest of its line is skipped; the
/// session continues. Returns the number of lines processed.
pub fn run_repl(
    config: &CliConfig,
    args: &ReplArgs,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<usize> {
    let mut ui = CalculatorUi::with_config(&config.calc)?;
    let mut processed = 0;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&line) {
            debug!("repl quit");
            break;
        }

        for key in line.split_whitespace() {
            if let Err(e) = ui.press_key(key) {
                warn!(key, "rejected key");
                writeln!(err, "error: {e}")?;
                break;
            }
        }
        write_screen(&ui, out, args.show_expression)?;
        processed += 1;
    }

    Ok(processed)
}

/// Prints the effective calculator configuration as YAML
pub fn run_config(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    write!(out, "{}", config.calc.to_yaml()?)?;
    Ok(())
}
