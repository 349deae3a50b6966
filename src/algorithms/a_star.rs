use crate::algorithms::common::{run_search, Policy, SearchResult};
use crate::grid::{Grid, Position};

/// A*: priority frontier ordered by f = g + Manhattan distance to the target.
/// The heuristic is admissible and consistent on a 4-directional unit-cost
/// grid, so the returned path is optimal. Apart from the ordering key the run
/// is identical to Dijkstra.
pub fn search(grid: &Grid, start: Position, target: Position) -> SearchResult {
    run_search(grid, start, target, Policy::Heuristic)
}
