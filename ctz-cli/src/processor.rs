//! Depth evaluation with progress display

use ctz_core::{BisectionStep, Config, CoreResult, Evaluation, evaluate};
use indicatif::{ProgressBar, ProgressStyle};

use crate::format::{print_evaluation, println_colored, report_error};
use crate::{Args, Verbosity};

/// Evaluate one depth, drawing a progress bar over the bisection steps
pub(crate) fn evaluate_depth(
    depth: u32,
    args: &Args,
    config: &Config,
    verbosity: Verbosity,
) -> CoreResult<Evaluation> {
    let progress = if !args.no_progress && verbosity >= Verbosity::Normal {
        let pb = ProgressBar::new(config.search.iterations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let result = evaluate(depth, config, |step: &BisectionStep| {
        if let Some(ref pb) = progress {
            pb.set_message(format!("lambda = {:.6}", step.lambda));
            pb.inc(1);
        }
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    result
}

/// Evaluate and report every depth given on the command line
///
/// Returns `false` if any depth failed; the remaining depths still run.
pub(crate) fn run_depths(
    depths: &[u32],
    args: &Args,
    config: &Config,
    verbosity: Verbosity,
) -> bool {
    let mut all_ok = true;

    for &depth in depths {
        if depths.len() > 1 && verbosity >= Verbosity::Normal {
            println_colored(
                args,
                &format!("k = {}", depth),
                Some(owo_colors::AnsiColors::Yellow),
            );
        }

        match evaluate_depth(depth, args, config, verbosity) {
            Ok(evaluation) => print_evaluation(args, &evaluation),
            Err(err) => {
                report_error(args, Some(depth), &err);
                all_ok = false;
            }
        }
    }

    all_ok
}
