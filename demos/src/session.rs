use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use gridpath_core::{Coord, Grid, Role};
use gridpath_search::{CancelToken, NeighborGraph, SearchEngine, SearchReport, Visitor};

use crate::LiveConfig;

/// Fill a `rows × cols` grid with barriers at the given density, then place
/// a start and an end on two distinct cells.
pub fn scatter(rows: i32, cols: i32, density: f64, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(rows.max(2), cols.max(2));
    let bounds = grid.bounds();
    for c in bounds.iter() {
        if rng.random_bool(density.clamp(0.0, 1.0)) {
            grid.set_role(c, Role::Barrier);
        }
    }
    let start = random_cell(&grid, rng);
    let end = loop {
        let c = random_cell(&grid, rng);
        if c != start {
            break c;
        }
    };
    grid.place_start(start);
    grid.place_end(end);
    grid
}

fn random_cell(grid: &Grid, rng: &mut impl Rng) -> Coord {
    Coord::new(
        rng.random_range(0..grid.rows()),
        rng.random_range(0..grid.cols()),
    )
}

/// Shared view of whether a session's search is in progress.
///
/// Clones share one flag, so a visitor holding a clone sees it set for the
/// whole run.
#[derive(Clone, Debug, Default)]
pub struct Running(Arc<AtomicBool>);

impl Running {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, on: bool) {
        self.0.store(on, Ordering::Relaxed);
    }
}

/// State of one demo session: the grid being edited and searched, its
/// neighbor graph, and the token that cancels a running search.
pub struct Session {
    grid: Grid,
    graph: NeighborGraph,
    cfg: LiveConfig,
    rng: StdRng,
    token: CancelToken,
    running: Running,
}

impl Session {
    /// A session on a freshly generated layout.
    pub fn new(cfg: LiveConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let grid = scatter(cfg.rows, cfg.cols, cfg.density, &mut rng);
        Self::with_rng(grid, cfg, rng)
    }

    /// A session on a loaded layout.
    pub fn from_grid(grid: Grid, cfg: LiveConfig) -> Self {
        Self::with_rng(grid, cfg, StdRng::seed_from_u64(cfg.seed))
    }

    fn with_rng(grid: Grid, cfg: LiveConfig, rng: StdRng) -> Self {
        let graph = NeighborGraph::build(&grid);
        Self {
            grid,
            graph,
            cfg,
            rng,
            token: CancelToken::new(),
            running: Running::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &LiveConfig {
        &self.cfg
    }

    /// A handle on the session's cancellation token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Whether a search is in progress.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// A handle on the running flag, readable while [`solve`](Self::solve)
    /// holds the session.
    pub fn running(&self) -> Running {
        self.running.clone()
    }

    /// Replace the layout with a new random one.
    pub fn regenerate(&mut self) {
        self.grid = scatter(self.cfg.rows, self.cfg.cols, self.cfg.density, &mut self.rng);
        self.graph.rebuild(&self.grid);
        log::info!("generated {} layout", self.grid.bounds());
    }

    /// Change a cell's role, keeping the neighbor graph in step.
    pub fn set_role(&mut self, c: Coord, role: Role) {
        match role {
            Role::Start => {
                self.grid.place_start(c);
            }
            Role::End => {
                self.grid.place_end(c);
            }
            _ => self.grid.set_role(c, role),
        }
        self.graph.rebuild(&self.grid);
    }

    /// Clear the search tags left by the previous run.
    pub fn clear_search(&mut self) {
        self.grid.reset_search();
    }

    /// Search between the start and end markers, reporting every event to
    /// `visitor`. The session's token cancels the run; it is cleared first.
    pub fn solve<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> SearchReport {
        self.grid.reset_search();
        self.token.reset();
        self.running.set(true);
        let engine = SearchEngine::new(&self.graph);
        let report = engine.run_marked_report(&mut self.grid, visitor, &self.token);
        self.running.set(false);
        log::info!("{} ({} cells expanded)", report.outcome, report.stats.expanded);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_search::{Ignore, Outcome, VisitLog};

    #[test]
    fn scatter_is_seeded() {
        let a = scatter(20, 30, 0.3, &mut StdRng::seed_from_u64(9));
        let b = scatter(20, 30, 0.3, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.count(Role::Start), 1);
        assert_eq!(a.count(Role::End), 1);
        assert_ne!(a.start(), a.end());
        let walls = a.count(Role::Barrier);
        assert!(walls > 60 && walls < 300, "{walls} barriers");
    }

    #[test]
    fn full_density_still_places_markers() {
        let grid = scatter(3, 3, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(grid.count(Role::Barrier), 7);
        assert!(grid.start().is_some() && grid.end().is_some());
    }

    #[test]
    fn session_solves_open_layout() {
        let cfg = LiveConfig {
            density: 0.0,
            ..LiveConfig::default()
        };
        let mut session = Session::new(cfg);
        let mut log = VisitLog::new();
        let report = session.solve(&mut log);
        assert!(report.outcome.is_found());
        assert!(!session.is_running());
        assert!(!log.is_empty());

        session.clear_search();
        assert_eq!(session.grid().count_tag(gridpath_core::SearchTag::Path), 0);
    }

    #[test]
    fn running_flag_is_set_during_solve() {
        let mut session = Session::new(LiveConfig {
            density: 0.0,
            ..LiveConfig::default()
        });
        let running = session.running();
        assert!(!running.get());
        let mut events = 0usize;
        let mut idle_events = 0usize;
        let mut visitor = |_: Coord, _: gridpath_core::SearchTag| {
            events += 1;
            if !running.get() {
                idle_events += 1;
            }
        };
        assert!(session.solve(&mut visitor).outcome.is_found());
        assert!(events > 0);
        assert_eq!(idle_events, 0);
        assert!(!session.is_running());
        assert!(!session.running().get());
    }

    #[test]
    fn edits_rebuild_the_graph() {
        let mut grid = Grid::new(1, 3);
        grid.place_start(Coord::new(0, 0));
        grid.place_end(Coord::new(0, 2));
        let mut session = Session::from_grid(grid, LiveConfig::default());
        assert!(session.solve(&mut Ignore).outcome.is_found());

        session.set_role(Coord::new(0, 1), Role::Barrier);
        assert_eq!(session.solve(&mut Ignore).outcome, Outcome::NotFound);

        session.set_role(Coord::new(0, 1), Role::End);
        assert_eq!(session.grid().role(Coord::new(0, 2)), Some(Role::Empty));
        let report = session.solve(&mut Ignore);
        assert_eq!(report.outcome.path().map(|p| p.steps()), Some(1));
    }

    #[test]
    fn cancelled_from_visitor() {
        let mut session = Session::new(LiveConfig {
            density: 0.0,
            ..LiveConfig::default()
        });
        let token = session.token();
        let mut visitor = |_: Coord, _: gridpath_core::SearchTag| token.cancel();
        assert_eq!(session.solve(&mut visitor).outcome, Outcome::Cancelled);
    }

    #[test]
    fn regenerate_changes_layout() {
        let mut session = Session::new(LiveConfig::default());
        let before = session.grid().clone();
        session.regenerate();
        assert_ne!(&before, session.grid());
        assert_eq!(session.grid().bounds(), before.bounds());
    }
}
