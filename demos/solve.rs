//! Solve a saved layout and print the path.
//!
//! Run: cargo run --bin gridpath-solve -- maze.txt [--binary]
//!
//! Exit status: 0 when a path is found, 2 when there is none, 1 on error.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use gridpath_demos::{init_logger, load_layout, to_ascii};
use gridpath_search::{Ignore, NeighborGraph, Never, Outcome, SearchEngine};

const USAGE: &str = "usage: gridpath-solve <layout-file> [--binary]";

fn main() -> ExitCode {
    init_logger();

    let mut file = None;
    let mut binary = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--binary" => binary = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::from(1);
            }
        }
    }
    let Some(file) = file else {
        eprintln!("{USAGE}");
        return ExitCode::from(1);
    };

    match solve(&file, binary) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn solve(file: &std::path::Path, binary: bool) -> Result<bool, Box<dyn Error>> {
    let mut grid = load_layout(file, binary)?;
    let graph = NeighborGraph::build(&grid);
    let engine = SearchEngine::new(&graph);
    let report = engine.run_marked_report(&mut grid, &mut Ignore, &Never);

    match report.outcome {
        Outcome::Found(path) => {
            print!("{}", to_ascii(&grid));
            println!(
                "path: {} steps ({} diagonal), cost {:.4}, {} cells expanded",
                path.steps(),
                path.diagonal_steps(),
                path.cost,
                report.stats.expanded
            );
            Ok(true)
        }
        Outcome::NotFound => {
            print!("{}", to_ascii(&grid));
            println!("no path ({} cells expanded)", report.stats.expanded);
            Ok(false)
        }
        Outcome::InvalidInput(reason) => Err(reason.into()),
        Outcome::Cancelled => Err("search cancelled".into()),
    }
}
