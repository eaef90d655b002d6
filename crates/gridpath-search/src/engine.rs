use gridpath_core::{Coord, Grid, Role, SearchTag};

use crate::config::{ConfigError, SearchConfig};
use crate::distance::{octile_with, step_cost_with};
use crate::frontier::Frontier;
use crate::neighbors::NeighborGraph;
use crate::outcome::{FoundPath, InvalidInput, Outcome, SearchReport, SearchStats};
use crate::state::SearchState;
use crate::traits::{Cancel, Visitor};

/// A* search over a grid, using a prebuilt [`NeighborGraph`].
///
/// The engine holds no per-run state: every call to [`run`](Self::run)
/// allocates fresh bookkeeping, so one engine can serve any number of runs
/// as long as its graph matches the grid searched.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'g> {
    graph: &'g NeighborGraph,
    config: SearchConfig,
}

impl<'g> SearchEngine<'g> {
    /// An engine with the default configuration (diagonal cost `√2`).
    pub fn new(graph: &'g NeighborGraph) -> Self {
        Self {
            graph,
            config: SearchConfig::default(),
        }
    }

    /// An engine with a custom configuration, validated first.
    pub fn with_config(graph: &'g NeighborGraph, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// The neighbor graph in use.
    #[inline]
    pub fn graph(&self) -> &'g NeighborGraph {
        self.graph
    }

    /// Search for a shortest path from `start` to `end`.
    ///
    /// Search tags on `grid` are updated as the search progresses and every
    /// change is reported to `visitor`. `cancel` is polled once before each
    /// frontier pop. Roles are never written.
    ///
    /// Tags are not reset beforehand: call [`Grid::reset_search`] between
    /// runs if the previous run's tags should not show.
    pub fn run<V, C>(&self, grid: &mut Grid, start: Coord, end: Coord, visitor: &mut V, cancel: &C) -> Outcome
    where
        V: Visitor + ?Sized,
        C: Cancel + ?Sized,
    {
        self.run_report(grid, start, end, visitor, cancel).outcome
    }

    /// Like [`run`](Self::run), also returning the run's statistics.
    pub fn run_report<V, C>(
        &self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        visitor: &mut V,
        cancel: &C,
    ) -> SearchReport
    where
        V: Visitor + ?Sized,
        C: Cancel + ?Sized,
    {
        self.execute(grid, start, end, visitor, cancel).0
    }

    /// Search between the cells whose roles are [`Role::Start`] and
    /// [`Role::End`].
    pub fn run_marked<V, C>(&self, grid: &mut Grid, visitor: &mut V, cancel: &C) -> Outcome
    where
        V: Visitor + ?Sized,
        C: Cancel + ?Sized,
    {
        self.run_marked_report(grid, visitor, cancel).outcome
    }

    /// Like [`run_marked`](Self::run_marked), also returning the run's
    /// statistics.
    pub fn run_marked_report<V, C>(&self, grid: &mut Grid, visitor: &mut V, cancel: &C) -> SearchReport
    where
        V: Visitor + ?Sized,
        C: Cancel + ?Sized,
    {
        let markers = match (grid.find(Role::Start), grid.find(Role::End)) {
            (None, _) => Err(InvalidInput::MissingStart),
            (_, None) => Err(InvalidInput::MissingEnd),
            (Some(start), Some(end)) => Ok((start, end)),
        };
        match markers {
            Ok((start, end)) => self.run_report(grid, start, end, visitor, cancel),
            Err(reason) => {
                log::debug!("search rejected: {reason}");
                SearchReport {
                    outcome: Outcome::InvalidInput(reason),
                    stats: SearchStats::default(),
                }
            }
        }
    }

    /// Validate the preconditions, returning the flat indices of `start`
    /// and `end`.
    fn check(&self, grid: &Grid, start: Coord, end: Coord) -> Result<(usize, usize), InvalidInput> {
        let bounds = grid.bounds();
        if self.graph.bounds() != bounds {
            return Err(InvalidInput::GraphMismatch {
                graph: self.graph.bounds(),
                grid: bounds,
            });
        }
        let si = bounds.index(start).ok_or(InvalidInput::StartOutOfBounds(start))?;
        let ei = bounds.index(end).ok_or(InvalidInput::EndOutOfBounds(end))?;
        if si == ei {
            return Err(InvalidInput::SameCell(start));
        }
        if grid.role(start) == Some(Role::Barrier) {
            return Err(InvalidInput::StartOnBarrier(start));
        }
        if grid.role(end) == Some(Role::Barrier) {
            return Err(InvalidInput::EndOnBarrier(end));
        }
        Ok((si, ei))
    }

    /// The expansion loop. Also returns the final bookkeeping, which is
    /// absent when the preconditions failed.
    pub(crate) fn execute<V, C>(
        &self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        visitor: &mut V,
        cancel: &C,
    ) -> (SearchReport, Option<SearchState>)
    where
        V: Visitor + ?Sized,
        C: Cancel + ?Sized,
    {
        let (si, ei) = match self.check(grid, start, end) {
            Ok(idx) => idx,
            Err(reason) => {
                log::debug!("search rejected: {reason}");
                let report = SearchReport {
                    outcome: Outcome::InvalidInput(reason),
                    stats: SearchStats::default(),
                };
                return (report, None);
            }
        };
        log::debug!("search {start} -> {end} on {} grid", grid.bounds());

        let diagonal = self.config.diagonal_cost;
        let mut st = SearchState::new(grid.bounds());
        let mut frontier = Frontier::with_capacity(grid.len().min(1024));
        let mut stats = SearchStats::default();

        st.g[si] = 0.0;
        st.f[si] = octile_with(start, end, diagonal);
        let seq = st.take_seq();
        st.seq[si] = seq;
        st.open[si] = true;
        frontier.push(si, st.f[si], seq);
        stats.pushed += 1;

        let outcome = 'search: loop {
            if cancel.is_cancelled() {
                break 'search Outcome::Cancelled;
            }
            let Some((ci, f, _)) = frontier.pop() else {
                break 'search Outcome::NotFound;
            };

            // Skip stale entries: superseded by a re-push, or already expanded.
            if !st.open[ci] || f != st.f[ci] {
                stats.stale_skipped += 1;
                continue;
            }
            st.open[ci] = false;
            stats.expanded += 1;
            let current = st.coord(ci);

            if ci == ei {
                let cells = st.path_to(end);
                if let Some(interior) = cells.get(1..cells.len().saturating_sub(1)) {
                    for &c in interior.iter().rev() {
                        grid.set_tag(c, SearchTag::Path);
                        visitor.visit(c, SearchTag::Path);
                    }
                }
                grid.set_tag(end, SearchTag::Closed);
                visitor.visit(end, SearchTag::Closed);
                break 'search Outcome::Found(FoundPath {
                    cells,
                    cost: st.g[ei],
                });
            }

            let current_g = st.g[ci];
            for &n in self.graph.neighbors(current) {
                let Some(ni) = st.idx(n) else {
                    continue;
                };
                let tentative = current_g + step_cost_with(current, n, diagonal);
                if tentative >= st.g[ni] {
                    continue;
                }
                st.came_from[ni] = Some(ci);
                st.g[ni] = tentative;
                st.f[ni] = tentative + octile_with(n, end, diagonal);
                stats.pushed += 1;
                if st.open[ni] {
                    // Re-key under the first-push sequence number so ties
                    // still resolve by first insertion.
                    frontier.push(ni, st.f[ni], st.seq[ni]);
                    continue;
                }
                let seq = st.take_seq();
                st.seq[ni] = seq;
                st.open[ni] = true;
                frontier.push(ni, st.f[ni], seq);
                grid.set_tag(n, SearchTag::Open);
                visitor.visit(n, SearchTag::Open);
            }

            if ci != si {
                grid.set_tag(current, SearchTag::Closed);
            }
            visitor.visit(current, grid.tag(current).unwrap_or_default());
            log::trace!("expanded {current}: g {current_g:.3}, f {f:.3}, frontier {}", frontier.len());
        };

        stats.frontier_high_water = frontier.high_water();
        log::debug!(
            "search {}: expanded {}, pushed {}, stale {}, frontier high water {}",
            outcome.label(),
            stats.expanded,
            stats.pushed,
            stats.stale_skipped,
            stats.frontier_high_water
        );
        (SearchReport { outcome, stats }, Some(st))
    }
}
