//! ctz CLI - Bracket the critical growth constant of a Collatz-like system

mod format;
mod interactive;
mod processor;

use clap::{Parser, ValueEnum};
use ctz_core::{Arithmetic, Config};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use format::eprintln_colored;
use interactive::run_interactive;
use processor::run_depths;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CliConfig {
    /// Default verbosity level
    #[serde(default)]
    verbosity: Option<String>,
    /// Enable colors by default
    #[serde(default)]
    color: Option<bool>,
    /// Show the bisection progress bar by default
    #[serde(default)]
    progress: Option<bool>,
    /// Default number of bisection steps
    #[serde(default)]
    precision: Option<usize>,
    /// Default lower end of the bracket
    #[serde(default)]
    lower: Option<f64>,
    /// Default upper end of the bracket
    #[serde(default)]
    upper: Option<f64>,
    /// Default Big-M penalty
    #[serde(default)]
    big_m: Option<f64>,
    /// Default numeric tolerance
    #[serde(default)]
    tolerance: Option<f64>,
    /// Default truncation baseline
    #[serde(default)]
    mu: Option<f64>,
    /// Deepest system the driver will build
    #[serde(default)]
    max_depth: Option<u32>,
    /// Solve over exact rationals by default
    #[serde(default)]
    exact: Option<bool>,
    /// Stop each solve as soon as feasibility is established
    #[serde(default)]
    early_exit: Option<bool>,
}

impl CliConfig {
    /// Load configuration from file
    fn load() -> Self {
        let config_path = dirs::home_dir()
            .map(|mut p| {
                p.push(".ctzrc");
                p
            })
            .filter(|p| p.exists())
            .or_else(|| {
                dirs::config_dir().map(|mut p| {
                    p.push("ctz");
                    p.push("config.yaml");
                    p
                })
            });

        if let Some(path) = config_path
            && path.exists()
            && let Ok(contents) = fs::read_to_string(&path)
            && let Ok(config) = serde_yaml::from_str(&contents)
        {
            return config;
        }

        Self::default()
    }

    /// Merge configuration with command-line arguments
    fn merge_with_args(&self, args: &mut Args) {
        // Only apply config if arg is not explicitly set
        if args.verbosity == Verbosity::Normal
            && let Some(ref v) = self.verbosity
        {
            match v.as_str() {
                "quiet" => args.verbosity = Verbosity::Quiet,
                "verbose" => args.verbosity = Verbosity::Verbose,
                "debug" => args.verbosity = Verbosity::Debug,
                "trace" => args.verbosity = Verbosity::Trace,
                _ => {}
            }
        }

        args.precision = args.precision.or(self.precision);
        args.lower = args.lower.or(self.lower);
        args.upper = args.upper.or(self.upper);
        args.big_m = args.big_m.or(self.big_m);
        args.tolerance = args.tolerance.or(self.tolerance);
        args.mu = args.mu.or(self.mu);
        args.max_depth = args.max_depth.or(self.max_depth);

        if self.exact == Some(true) {
            args.exact = true;
        }

        if self.early_exit == Some(false) {
            args.no_early_exit = true;
        }

        if let Some(color) = self.color
            && !color
        {
            args.no_color = true;
        }

        if let Some(progress) = self.progress
            && !progress
        {
            args.no_progress = true;
        }
    }
}

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// No output except results
    Quiet,
    /// Results and progress
    Normal,
    /// Also log one line per evaluation
    Verbose,
    /// Log every solve and bisection step
    Debug,
    /// Log every simplex pivot
    Trace,
}

/// ctz - Growth-constant search for a Collatz-like functional system
#[derive(Parser, Debug, Clone)]
#[command(name = "ctz")]
#[command(version)]
#[command(about = "Brackets the critical growth constant of a Collatz-like functional system")]
struct Args {
    /// Recursion depth(s) to evaluate. Starts the interactive prompt if omitted.
    #[arg(value_name = "DEPTH")]
    depths: Vec<u32>,

    /// Run in interactive mode (REPL)
    #[arg(short, long)]
    interactive: bool,

    /// Number of bisection steps (default: 20)
    #[arg(short, long, value_name = "P")]
    precision: Option<usize>,

    /// Initial lower end of the bracket on lambda (default: 1)
    #[arg(long)]
    lower: Option<f64>,

    /// Initial upper end of the bracket on lambda (default: 2)
    #[arg(long)]
    upper: Option<f64>,

    /// Big-M penalty for artificial variables (default: 1e6)
    #[arg(long, value_name = "M")]
    big_m: Option<f64>,

    /// Numeric comparison tolerance (default: 1e-6)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Baseline substituted for negative exponents (default: 0)
    #[arg(long)]
    mu: Option<f64>,

    /// Reject depths above this one (default: 8)
    #[arg(long, value_name = "K")]
    max_depth: Option<u32>,

    /// Solve over exact rationals instead of f64
    #[arg(long)]
    exact: bool,

    /// Run every solve to optimality instead of stopping once feasible
    #[arg(long)]
    no_early_exit: bool,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal")]
    verbosity: Verbosity,

    /// Enable quiet mode (equivalent to --verbosity quiet)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Hide the bisection progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    /// Library configuration resulting from defaults and overrides
    fn to_config(&self) -> Config {
        let mut config = Config::default();

        if let Some(mu) = self.mu {
            config.generation = config.generation.with_baseline(mu);
        }
        if let Some(max_depth) = self.max_depth {
            config.generation = config.generation.with_max_depth(max_depth);
        }

        let mut search = config.search;
        if let Some(precision) = self.precision {
            search = search.with_iterations(precision);
        }
        search = search.with_bracket(
            self.lower.unwrap_or(search.lower),
            self.upper.unwrap_or(search.upper),
        );
        if self.exact {
            search = search.with_arithmetic(Arithmetic::Exact);
        }

        let mut solver = search.solver;
        if let Some(big_m) = self.big_m {
            solver = solver.with_big_m(big_m);
        }
        if let Some(tolerance) = self.tolerance {
            solver = solver.with_tolerance(tolerance);
        }
        if self.no_early_exit {
            solver = solver.with_early_exit(false);
        }
        config.search = search.with_solver(solver);

        config
    }
}

fn main() {
    let mut args = Args::parse();

    // Load configuration file and merge with args
    let cli_config = CliConfig::load();
    cli_config.merge_with_args(&mut args);

    // Determine verbosity level
    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else {
        args.verbosity
    };

    // Set up logging
    if verbosity >= Verbosity::Verbose {
        let level = match verbosity {
            Verbosity::Trace => Level::TRACE,
            Verbosity::Debug => Level::DEBUG,
            _ => Level::INFO,
        };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln_colored(&args, &format!("Failed to set tracing subscriber: {}", e));
            std::process::exit(1);
        }
    }

    let config = args.to_config();

    if args.interactive || args.depths.is_empty() {
        run_interactive(&args, &config, verbosity);
    } else if !run_depths(&args.depths, &args, &config, verbosity) {
        std::process::exit(1);
    }
}
