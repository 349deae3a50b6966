use crate::algorithms::common::{run_search, Policy, SearchResult};
use crate::grid::{Grid, Position};

/// Breadth-first search: FIFO frontier, expands in distance tiers. Optimal
/// under unit step cost. Visited order is the dequeue order.
pub fn search(grid: &Grid, start: Position, target: Position) -> SearchResult {
    run_search(grid, start, target, Policy::Fifo)
}
