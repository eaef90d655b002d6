use std::thread;
use std::time::Duration;

use gridpath_core::{Coord, Grid, Role, SearchTag};
use gridpath_search::{CancelToken, Deadline, NeighborGraph, Outcome, SearchEngine, VisitLog};

fn walled(rows: i32, cols: i32) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for r in 0..rows - 1 {
        grid.set_role(Coord::new(r, cols / 2), Role::Barrier);
    }
    grid
}

#[test]
fn token_cancels_search_on_another_thread() {
    let token = CancelToken::new();
    let remote = token.clone();

    let handle = thread::spawn(move || {
        let mut grid = walled(50, 50);
        let graph = NeighborGraph::build(&grid);
        let engine = SearchEngine::new(&graph);
        // A slow renderer.
        let mut visitor = |_: Coord, _: SearchTag| thread::sleep(Duration::from_millis(2));
        let report = engine.run_report(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(0, 49),
            &mut visitor,
            &remote,
        );
        (report, grid)
    });

    thread::sleep(Duration::from_millis(30));
    token.cancel();
    let (report, mut grid) = handle.join().unwrap();

    assert_eq!(report.outcome, Outcome::Cancelled);
    assert!(report.stats.expanded > 0);
    assert_eq!(grid.count_tag(SearchTag::Path), 0);

    grid.reset_search();
    assert_eq!(grid.count_tag(SearchTag::Unvisited), grid.len());
}

#[test]
fn expired_deadline_cancels_immediately() {
    let mut grid = walled(20, 20);
    let graph = NeighborGraph::build(&grid);
    let engine = SearchEngine::new(&graph);
    let mut log = VisitLog::new();
    let outcome = engine.run(
        &mut grid,
        Coord::new(0, 0),
        Coord::new(0, 19),
        &mut log,
        &Deadline::after(Duration::ZERO),
    );
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(log.is_empty());
}

#[test]
fn rerun_after_cancel_finds_path() {
    let mut grid = walled(10, 10);
    let graph = NeighborGraph::build(&grid);
    let engine = SearchEngine::new(&graph);
    let token = CancelToken::new();
    token.cancel();
    let (start, end) = (Coord::new(0, 0), Coord::new(0, 9));
    assert_eq!(
        engine.run(&mut grid, start, end, &mut (), &token),
        Outcome::Cancelled
    );

    token.reset();
    grid.reset_search();
    let outcome = engine.run(&mut grid, start, end, &mut (), &token);
    let path = outcome.path().unwrap();
    assert!(path.cells.contains(&Coord::new(9, 5)));
}
