//! Output formatting and display utilities for the ctz CLI

use ctz_core::{CoreError, Evaluation};
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, error};

use crate::Args;

/// Report lines for one evaluated depth
pub(crate) fn format_evaluation(evaluation: &Evaluation) -> Vec<String> {
    vec![
        format!("lambda : {}", evaluation.bracket),
        format!("gamma : {}", evaluation.gamma()),
        format!(
            "evaluation time : {:.6}",
            evaluation.elapsed.as_secs_f64()
        ),
    ]
}

/// Print the report of one evaluated depth
pub(crate) fn print_evaluation(args: &Args, evaluation: &Evaluation) {
    let mut lines = format_evaluation(evaluation).into_iter();
    if let Some(lambda) = lines.next() {
        println_colored(args, &lambda, Some(owo_colors::AnsiColors::Green));
    }
    if let Some(gamma) = lines.next() {
        println_colored(args, &gamma, Some(owo_colors::AnsiColors::Cyan));
    }
    for line in lines {
        println_colored(args, &line, Some(owo_colors::AnsiColors::BrightBlack));
    }
}

/// One-line description of a failed evaluation
pub(crate) fn format_error(depth: Option<u32>, err: &CoreError) -> String {
    match depth {
        Some(depth) => format!("Error (k = {}): {}", depth, err),
        None => format!("Error: {}", err),
    }
}

/// Log and print a failed evaluation
///
/// The full tableau of an unbounded system goes to the debug log; the
/// terminal only gets the summary.
pub(crate) fn report_error(args: &Args, depth: Option<u32>, err: &CoreError) {
    if let Some(diagnostic) = err.unbounded_diagnostic() {
        debug!("unbounded system diagnostic\n{}", diagnostic);
    }
    error!(?depth, "{}", err);
    eprintln_colored(args, &format_error(depth, err));
}

/// Print help for the interactive prompt
pub(crate) fn print_help(args: &Args) {
    println_colored(
        args,
        "ctz Interactive Mode Help",
        Some(owo_colors::AnsiColors::Green),
    );
    println_colored(
        args,
        "=========================",
        Some(owo_colors::AnsiColors::Green),
    );
    println!();

    println_colored(args, "Commands:", Some(owo_colors::AnsiColors::Yellow));
    println_colored(args, "  <k>               - Bracket the growth constant at depth k", None);
    println_colored(args, "  show <k> <lambda> - Print the program generated at depth k", None);
    println_colored(args, "  help              - Show this help message", None);
    println_colored(args, "  exit, quit        - Leave the interactive mode", None);
    println!();
}

/// Print colored text to stdout
pub(crate) fn println_colored(args: &Args, text: &str, color: Option<owo_colors::AnsiColors>) {
    if args.no_color {
        println!("{}", text);
    } else if let Some(c) = color {
        println!("{}", text.if_supports_color(Stream::Stdout, |t| t.color(c)));
    } else {
        println!("{}", text);
    }
}

/// Print colored error message to stderr
pub(crate) fn eprintln_colored(args: &Args, text: &str) {
    if args.no_color {
        eprintln!("{}", text);
    } else {
        eprintln!("{}", text.if_supports_color(Stream::Stderr, |t| t.red()));
    }
}
