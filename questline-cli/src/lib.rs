//! Command-line front end for the questline optimization engine.
//!
//! Loads a sectioned problem file, merges its settings with command
//! line overrides, runs the bounded-frontier solver, and renders the
//! selected walk either as a step-by-step report or as JSON.

#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use clap::Parser;
use questline_core::{QuestSolver, SearchOptions, SolveRequest, Vertex};
use questline_solver::FrontierSolver;

mod error;
pub mod parse;
pub mod report;

pub use error::CliError;
pub use parse::{ParseError, Problem};

/// Run the questline CLI with the current process arguments.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    run_with(&cli)
}

#[derive(Debug, Parser)]
#[command(
    name = "questline",
    about = "Minimum-length quest routes over weighted graphs",
    long_about = "Compute a minimum-length walk that visits the stops of every \
                  quest line in order. The problem file supplies the graph, the \
                  quest lines and optionally a pinned start vertex; flags tune \
                  the search.",
    version
)]
struct Cli {
    /// Path to the problem file.
    #[arg(value_name = "path")]
    problem: Utf8PathBuf,
    /// Pin the answer to this start vertex, overriding the file.
    #[arg(long, value_name = "vertex")]
    start: Option<Vertex>,
    /// Move between any two vertices at unit cost, ignoring edges.
    #[arg(long)]
    fast_travel: bool,
    /// Keep edge weights directed instead of collapsing each pair to
    /// its minimum.
    #[arg(long)]
    directed: bool,
    /// Admission slack multiplier for search states lagging behind
    /// the best seen.
    #[arg(long, value_name = "factor")]
    error_afford: Option<f64>,
    /// Worker pool size.
    #[arg(long, value_name = "count")]
    workers: Option<usize>,
    /// Search frontier capacity.
    #[arg(long, value_name = "count")]
    frontier_cap: Option<usize>,
    /// Stop after recording this many completed solutions.
    #[arg(long, value_name = "count")]
    solutions: Option<u64>,
    /// Seed for the randomized frontier selection and eviction.
    #[arg(long, value_name = "seed")]
    seed: Option<u64>,
    /// Emit the solve response as JSON instead of a report.
    #[arg(long)]
    json: bool,
}

fn run_with(cli: &Cli) -> Result<(), CliError> {
    let input = std::fs::read_to_string(&cli.problem).map_err(|source| CliError::ReadProblem {
        path: cli.problem.clone(),
        source,
    })?;
    let problem = parse::parse_str(&input).map_err(|source| CliError::ParseProblem {
        path: cli.problem.clone(),
        source,
    })?;
    log::info!(
        "loaded {:?}: {} vertices, {} quest lines",
        cli.problem,
        problem.graph.vertex_count(),
        problem.quest_lines.len()
    );

    let request = SolveRequest {
        graph: problem.graph.clone(),
        quest_lines: problem.quest_lines.clone(),
        options: solve_options(cli, &problem),
    };
    let solver = FrontierSolver::new();
    let response = solver.solve(&request)?;
    log::info!(
        "solve took {:?}: {} states expanded, {} solutions recorded",
        response.diagnostics.solve_time,
        response.diagnostics.states_expanded,
        response.diagnostics.solutions_recorded
    );

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&response).map_err(CliError::SerializeResponse)?;
        println!("{rendered}");
        return Ok(());
    }
    match &response.route {
        Some(route) => print!("{}", report::render_report(route, &problem)),
        None => println!("no walk satisfies every quest line"),
    }
    Ok(())
}

/// Merge file-level settings with command line overrides.
fn solve_options(cli: &Cli, problem: &Problem) -> SearchOptions {
    let defaults = SearchOptions::default();
    SearchOptions {
        fast_travel: cli.fast_travel,
        bidirectional: !cli.directed,
        start: cli.start.or(problem.start),
        error_afford: cli.error_afford.unwrap_or(defaults.error_afford),
        num_workers: cli.workers.unwrap_or(defaults.num_workers),
        max_frontier_size: cli.frontier_cap.unwrap_or(defaults.max_frontier_size),
        target_solution_count: cli.solutions.unwrap_or(defaults.target_solution_count),
        seed: cli.seed.unwrap_or(defaults.seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[rstest]
    fn flags_override_file_settings() {
        let cli = parse_cli(&[
            "questline",
            "problem.txt",
            "--start",
            "2",
            "--fast-travel",
            "--directed",
            "--workers",
            "8",
        ]);
        let problem = parse::parse_str("Vertex Count:\n4\nStart:\n0\n").unwrap();
        let options = solve_options(&cli, &problem);
        assert_eq!(options.start, Some(2));
        assert!(options.fast_travel);
        assert!(!options.bidirectional);
        assert_eq!(options.num_workers, 8);
    }

    #[rstest]
    fn file_start_applies_when_no_flag_is_given() {
        let cli = parse_cli(&["questline", "problem.txt"]);
        let problem = parse::parse_str("Vertex Count:\n4\nStart:\n3\n").unwrap();
        let options = solve_options(&cli, &problem);
        assert_eq!(options.start, Some(3));
        assert!(options.bidirectional);
        assert_eq!(
            options.max_frontier_size,
            SearchOptions::default().max_frontier_size
        );
    }
}
