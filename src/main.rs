//! # `sudoku_solver`
//!
//! `sudoku_solver` is a configurable command-line solver for generalised
//! N x N Sudoku boards (4x4, 9x9, 16x16 and 25x25). Puzzles are given as
//! one character per cell: `.` for a blank, `1`-`9` then `A`-`Z` for
//! values.
//!
//! Three strategies are available:
//! 1.  **naive**: depth-first search over bare assignments. Correct but
//!     only practical on small boards.
//! 2.  **propagating**: constraint propagation to a fixpoint with
//!     fewest-candidates-first branching. The default.
//! 3.  **sat**: the board is encoded as a CNF formula, written to a
//!     DIMACS file and handed to an external SAT engine.
//!
//! ## Usage
//!
//! ### General Syntax
//!
//! ```sh
//! sudoku_solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     it's treated as a path to a puzzle file to be solved.
//!
//!     ```sh
//!     sudoku_solver <path_to_puzzle_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a puzzle file.
//!     ```sh
//!     sudoku_solver file --path <path_to_puzzle_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a puzzle provided as plain text.
//!     ```sh
//!     sudoku_solver text --input "1...2..........3" [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: Solve every `.sudoku` file under a directory.
//!     ```sh
//!     sudoku_solver dir --path <path_to_directory> [OPTIONS]
//!     ```
//!
//! 4.  **`completions`**: Generate shell completion scripts.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `-v, --verify`: Enable verification of the solution (default: `true`).
//! -   `-s, --stats`: Enable printing of statistics (default: `true`).
//! -   `-p, --print-solution`: Also print the solution as a single line.
//! -   `--strategy <STRATEGY>`: `naive`, `propagating` or `sat`
//!     (default: `propagating`).
//! -   `--timeout <SECONDS>`: Give up after this many seconds.
//! -   `--engine <PATH>`: External SAT executable, required with
//!     `--strategy sat`.
//!
//! ## Example Invocations
//!
//! ```sh
//! # Solve a puzzle file with the default strategy
//! sudoku_solver puzzle.sudoku
//!
//! # Solve with plain depth-first search and a 10 second budget
//! sudoku_solver file --path puzzle.sudoku --strategy naive --timeout 10
//!
//! # Reduce to CNF and let minisat do the work, keeping the DIMACS file
//! sudoku_solver file --path puzzle.sudoku --strategy sat --engine minisat --export-dimacs
//!
//! # Solve a 4x4 board given inline
//! sudoku_solver text --input "1...2..........3"
//! ```

#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::SolveError;
use sudoku_solver::puzzle::Grid;
use sudoku_solver::sat::encode::encode;
use sudoku_solver::sat::process::ExternalEngine;
use sudoku_solver::solver::{
    Deadline, NaiveSearch, Outcome, PropagatingSearch, SatReduction, SolveStats, Strategy,
    StrategyKind,
};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A configurable Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file. The file holds one character per cell,
        /// optionally preceded by a line giving the board size, with `#`
        /// starting a comment.
        #[arg(long)]
        path: PathBuf,

        /// If true, the generated DIMACS CNF representation of the puzzle
        /// will be printed and saved next to the input file.
        #[arg(short, long, default_value_t = false)]
        export_dimacs: bool,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The puzzle as a string, one character per cell in scan order
        /// (e.g. "1...2..........3" for a 4x4 board).
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory to scan. Files without the `.sudoku`
        /// extension are skipped.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found solution. If a solution is found,
    /// it's checked against the board rules.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Also print the solution as a single line in puzzle format.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,

    /// Specifies the solving strategy to use.
    #[arg(long, value_enum, default_value_t = StrategyKind::Propagating)]
    strategy: StrategyKind,

    /// Give up after this many seconds of solving.
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to the external SAT engine executable. Required with
    /// `--strategy sat`.
    #[arg(long)]
    engine: Option<PathBuf>,
}

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), String> {
    // A bare path without a subcommand is treated as a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_file(&path, false, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File {
            path,
            export_dimacs,
            common,
        }) => solve_file(&path, export_dimacs, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            print_completions(shell);
            Ok(())
        }
        None => Err("No command provided. Use --help for more information.".to_string()),
    }
}

/// Solve a puzzle file.
///
/// # Errors
///
/// If the file doesn't exist, doesn't parse, or the solve itself fails.
fn solve_file(path: &Path, export_dimacs: bool, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = Instant::now();
    let grid = Grid::from_file(path).map_err(|e| format!("Error parsing puzzle file: {e}"))?;
    let parse_time = time.elapsed();

    println!("Parsed puzzle:\n{grid}");

    if export_dimacs {
        let dimacs = encode(&grid).to_string();
        println!("DIMACS:\n{dimacs}");

        let dimacs_path = scratch_path(path);
        if let Err(e) = std::fs::write(&dimacs_path, &dimacs) {
            return Err(format!("Unable to write {}: {e}", dimacs_path.display()));
        }
        println!("DIMACS written to: {}", dimacs_path.display());
    }

    solve_and_report(&grid, common, Some(path), parse_time, scratch_path(path))
}

/// Solve a puzzle given as text on the command line.
///
/// # Errors
///
/// If the text doesn't parse or the solve itself fails.
fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let grid = Grid::from_source(input).map_err(|e| format!("Error parsing puzzle text: {e}"))?;
    let parse_time = time.elapsed();

    println!("Parsed puzzle:\n{grid}");

    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let scratch = std::env::temp_dir().join(format!("sudoku_solver_{unique}.cnf"));

    solve_and_report(&grid, common, None, parse_time, scratch)
}

/// Solves a directory of puzzle files.
///
/// Walks the directory recursively and solves every file with the
/// `.sudoku` extension; everything else is skipped quietly.
///
/// # Errors
///
/// If the path is not a directory, or any puzzle fails to parse or solve.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            continue;
        }

        if !file_path.is_file() {
            continue;
        }

        solve_file(&file_path, false, common)?;
    }

    Ok(())
}

/// Where the DIMACS rendering of a puzzle file goes.
fn scratch_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.cnf", path.display()))
}

fn build_strategy(common: &CommonOptions, scratch: PathBuf) -> Result<Box<dyn Strategy>, String> {
    match common.strategy {
        StrategyKind::Naive => Ok(Box::new(NaiveSearch)),
        StrategyKind::Propagating => Ok(Box::new(PropagatingSearch)),
        StrategyKind::Sat => {
            let engine = common.engine.as_ref().ok_or_else(|| {
                "The sat strategy needs --engine pointing at a SAT executable".to_string()
            })?;
            Ok(Box::new(SatReduction::new(
                ExternalEngine::new(engine),
                scratch,
            )))
        }
    }
}

/// Solves a parsed board and reports results including stats and
/// verification.
///
/// # Errors
///
/// If the strategy cannot be built or fails for a reason other than the
/// puzzle being unsatisfiable.
fn solve_and_report(
    grid: &Grid,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
    scratch: PathBuf,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Board size: {}", grid.size());
        println!("Givens: {}", grid.given_count());
        println!("Strategy: {}", common.strategy);
        if let Some(engine) = &common.engine {
            println!("Engine: {}", engine.display());
        }
    }

    let strategy = build_strategy(common, scratch)?;
    let deadline = common
        .timeout
        .map(|secs| Deadline::after(Duration::from_secs(secs)));

    epoch::advance().unwrap();

    let time = Instant::now();
    let result = strategy.attempt(grid, deadline);
    let elapsed = time.elapsed();

    if common.debug {
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    match result {
        Ok(outcome) => {
            if common.verify {
                verify_solution(grid, &outcome);
            }

            if common.stats {
                print_stats(
                    parse_time,
                    elapsed,
                    grid,
                    &outcome.stats,
                    allocated_mib,
                    resident_mib,
                    true,
                );
            }

            if common.print_solution {
                println!("Solution line: {}", outcome.assignment.to_line());
            }
            println!("Solution:\n{}", outcome.assignment);
            Ok(())
        }
        Err(SolveError::Unsatisfiable) => {
            if common.stats {
                print_stats(
                    parse_time,
                    elapsed,
                    grid,
                    &SolveStats::default(),
                    allocated_mib,
                    resident_mib,
                    false,
                );
            }

            println!("No solution found");
            Ok(())
        }
        Err(e) => Err(format!("Error solving puzzle: {e}")),
    }
}

/// Verifies a found solution against the board rules.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics.
fn verify_solution(grid: &Grid, outcome: &Outcome) {
    let ok = outcome.assignment.check(grid);
    println!("Verified: {ok:?}");
    assert!(ok, "Solution failed verification!");
}

/// Helper function to print a single statistic line in a formatted table
/// row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Board size", grid.size());
    stat_line("Givens", grid.given_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}

fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scratch_path_appends_cnf() {
        let path = scratch_path(Path::new("puzzles/easy.sudoku"));
        assert_eq!(path, PathBuf::from("puzzles/easy.sudoku.cnf"));
    }

    #[test]
    fn test_sat_strategy_requires_an_engine() {
        let common = CommonOptions {
            strategy: StrategyKind::Sat,
            ..CommonOptions::default()
        };
        let err = build_strategy(&common, PathBuf::from("scratch.cnf"))
            .err()
            .unwrap();
        assert!(err.contains("--engine"));
    }

    #[test]
    fn test_default_strategy_builds() {
        let common = CommonOptions::default();
        assert!(build_strategy(&common, PathBuf::from("scratch.cnf")).is_ok());
    }
}
