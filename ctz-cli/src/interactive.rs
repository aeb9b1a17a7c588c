//! Interactive mode (REPL) for the ctz CLI
//!
//! Reads one depth per line, evaluates it and reports the bracket. Errors are
//! reported and the prompt comes back; only exit/quit, CTRL-C or CTRL-D leave
//! the loop.

use std::path::PathBuf;

use ctz_core::{Config, CoreResult, StateSystem};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::format::{
    eprintln_colored, print_evaluation, print_help, println_colored, report_error,
};
use crate::processor::evaluate_depth;
use crate::{Args, Verbosity};

/// A parsed line of input
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    /// Bracket the constant at this depth
    Evaluate(u32),
    /// Print the program of a depth at a trial constant
    Show { depth: u32, lambda: f64 },
    Help,
    Exit,
}

/// Parse one trimmed, non-empty input line
fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty input".to_string());
    };

    let command = match head {
        "exit" | "quit" => Command::Exit,
        "help" => Command::Help,
        "show" => {
            let depth = words
                .next()
                .ok_or("usage: show <k> <lambda>")?
                .parse::<u32>()
                .map_err(|e| format!("invalid depth: {}", e))?;
            let lambda = words
                .next()
                .ok_or("usage: show <k> <lambda>")?
                .parse::<f64>()
                .map_err(|e| format!("invalid lambda: {}", e))?;
            Command::Show { depth, lambda }
        }
        _ => Command::Evaluate(
            head.parse::<u32>()
                .map_err(|_| format!("expected a depth, got '{}' (type help)", head))?,
        ),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument '{}'", extra));
    }
    Ok(command)
}

/// Print the program generated for `depth` at `lambda`
fn show_program(args: &Args, config: &Config, depth: u32, lambda: f64) -> CoreResult<()> {
    let system = StateSystem::with_config(depth, config.generation)?;
    println_colored(args, &system.generate(lambda).to_string(), None);
    Ok(())
}

/// Run interactive mode
pub(crate) fn run_interactive(args: &Args, config: &Config, verbosity: Verbosity) {
    let mut rl = DefaultEditor::new().unwrap_or_else(|e| {
        eprintln_colored(args, &format!("Failed to initialize editor: {}", e));
        std::process::exit(1);
    });

    // Load history
    let history_path = dirs::home_dir()
        .map(|mut p| {
            p.push(".ctz_history");
            p
        })
        .unwrap_or_else(|| PathBuf::from(".ctz_history"));

    let _ = rl.load_history(&history_path);

    if verbosity >= Verbosity::Normal {
        println_colored(
            args,
            &format!("ctz v{}", env!("CARGO_PKG_VERSION")),
            Some(owo_colors::AnsiColors::Green),
        );
        println_colored(args, "Type exit to quit, help for help, or a depth k.", None);
        println!();
    }

    loop {
        let readline = rl.readline("enter value of k : ");
        match readline {
            Ok(input) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match parse_command(input) {
                    Ok(Command::Exit) => break,
                    Ok(Command::Help) => print_help(args),
                    Ok(Command::Show { depth, lambda }) => {
                        if let Err(err) = show_program(args, config, depth, lambda) {
                            report_error(args, Some(depth), &err);
                        }
                    }
                    Ok(Command::Evaluate(depth)) => {
                        match evaluate_depth(depth, args, config, verbosity) {
                            Ok(evaluation) => print_evaluation(args, &evaluation),
                            Err(err) => report_error(args, Some(depth), &err),
                        }
                    }
                    Err(message) => eprintln_colored(args, &format!("Error: {}", message)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if verbosity >= Verbosity::Normal {
                    println_colored(args, "CTRL-C", None);
                }
                break;
            }
            Err(ReadlineError::Eof) => {
                if verbosity >= Verbosity::Normal {
                    println_colored(args, "CTRL-D", None);
                }
                break;
            }
            Err(err) => {
                eprintln_colored(args, &format!("Error: {}", err));
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);
}
