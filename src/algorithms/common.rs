use crate::frontier::Frontier;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Outcome of a single search run. `visited` is the exact order in which the
/// algorithm settled cells; callers replay it for animation and count it when
/// ranking algorithms, so it must not be an arbitrary traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub found: bool,
    /// Start to target inclusive; empty when no route exists.
    pub path: Vec<Position>,
    pub visited: Vec<Position>,
}

impl SearchResult {
    pub fn not_found(visited: Vec<Position>) -> Self {
        SearchResult {
            found: false,
            path: Vec::new(),
            visited,
        }
    }

    /// Path length counted in cells, including the start cell.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// How the shared loop orders and relaxes its frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Policy {
    /// FIFO frontier, mark-on-push: BFS.
    Fifo,
    /// LIFO frontier, mark-on-push: DFS.
    Lifo,
    /// Priority frontier ordered by g: Dijkstra.
    UniformCost,
    /// Priority frontier ordered by g + Manhattan distance to target: A*.
    Heuristic,
}

/// The one search loop behind all four algorithms. The frontier policy is the
/// only thing that differs between them, which keeps tie-breaking and path
/// reconstruction identical everywhere.
///
/// Termination is on *pop* of the target, not on discovery; for the LIFO
/// policy those coincide since a cell counts as visited when popped.
pub(crate) fn run_search(
    grid: &Grid,
    start: Position,
    target: Position,
    policy: Policy,
) -> SearchResult {
    match policy {
        Policy::Fifo => unweighted_search(grid, start, target, Frontier::fifo()),
        Policy::Lifo => unweighted_search(grid, start, target, Frontier::lifo()),
        Policy::UniformCost => relaxing_search(grid, start, target, false),
        Policy::Heuristic => relaxing_search(grid, start, target, true),
    }
}

/// BFS/DFS share this body: cells are marked discovered when pushed so no
/// cell ever enters the frontier twice, and the parent link is fixed at
/// discovery time.
fn unweighted_search(
    grid: &Grid,
    start: Position,
    target: Position,
    mut frontier: Frontier,
) -> SearchResult {
    let mut discovered = FxHashSet::default();
    let mut parent: FxHashMap<Position, Position> = FxHashMap::default();
    let mut visited = Vec::new();

    discovered.insert(start);
    frontier.push(start, 0);

    while let Some(current) = frontier.pop() {
        visited.push(current);
        if current == target {
            return finish(&parent, start, target, visited);
        }
        for neighbor in grid.open_neighbors(current) {
            if discovered.insert(neighbor) {
                parent.insert(neighbor, current);
                frontier.push(neighbor, 0);
            }
        }
    }

    SearchResult::not_found(visited)
}

/// Dijkstra/A* share this body: neighbors are relaxed whenever a cheaper g is
/// found, duplicates in the heap are tolerated and skipped once settled.
fn relaxing_search(
    grid: &Grid,
    start: Position,
    target: Position,
    use_heuristic: bool,
) -> SearchResult {
    let mut frontier = Frontier::priority();
    let mut g_scores: FxHashMap<Position, u32> = FxHashMap::default();
    let mut parent: FxHashMap<Position, Position> = FxHashMap::default();
    let mut settled = FxHashSet::default();
    let mut visited = Vec::new();

    let heuristic = |pos: Position| -> u32 {
        if use_heuristic {
            pos.manhattan_distance(&target) as u32
        } else {
            0
        }
    };

    g_scores.insert(start, 0);
    frontier.push(start, heuristic(start));

    while let Some(current) = frontier.pop() {
        // Stale heap entry for a cell that was already settled via a cheaper
        // route; it must not appear in the visitation order twice.
        if !settled.insert(current) {
            continue;
        }
        visited.push(current);
        if current == target {
            return finish(&parent, start, target, visited);
        }

        let current_g = g_scores[&current];
        for neighbor in grid.open_neighbors(current) {
            if settled.contains(&neighbor) {
                continue;
            }
            let tentative_g = current_g + 1;
            if tentative_g < g_scores.get(&neighbor).copied().unwrap_or(u32::MAX) {
                g_scores.insert(neighbor, tentative_g);
                parent.insert(neighbor, current);
                frontier.push(neighbor, tentative_g + heuristic(neighbor));
            }
        }
    }

    SearchResult::not_found(visited)
}

fn finish(
    parent: &FxHashMap<Position, Position>,
    start: Position,
    target: Position,
    visited: Vec<Position>,
) -> SearchResult {
    match reconstruct_path(parent, start, target) {
        Some(path) => SearchResult {
            found: true,
            path,
            visited,
        },
        // Broken parent chain; report the run as unsuccessful rather than
        // returning a partial path.
        None => SearchResult::not_found(visited),
    }
}

/// Walks parent links from the target back to the start, then reverses.
fn reconstruct_path(
    parent: &FxHashMap<Position, Position>,
    start: Position,
    target: Position,
) -> Option<Vec<Position>> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = *parent.get(&current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;

    fn walled_off_grid() -> Grid {
        // Row 1 is a solid wall, so (0, _) and (2, _) are disconnected.
        let mut grid = Grid::empty(3).unwrap();
        for col in 0..3 {
            grid.set_kind(Position::new(1, col), CellKind::Wall);
        }
        grid
    }

    #[test]
    fn disconnected_grid_reports_not_found() {
        let grid = walled_off_grid();
        for policy in [
            Policy::Fifo,
            Policy::Lifo,
            Policy::UniformCost,
            Policy::Heuristic,
        ] {
            let result = run_search(&grid, Position::new(0, 0), Position::new(2, 2), policy);
            assert!(!result.found);
            assert!(result.path.is_empty());
            // The reachable half of the grid was still explored.
            assert_eq!(result.visited_count(), 3);
        }
    }

    #[test]
    fn visited_starts_at_start_and_ends_at_target() {
        let grid = Grid::empty(4).unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(3, 3);
        for policy in [
            Policy::Fifo,
            Policy::Lifo,
            Policy::UniformCost,
            Policy::Heuristic,
        ] {
            let result = run_search(&grid, start, target, policy);
            assert!(result.found);
            assert_eq!(result.visited.first(), Some(&start));
            assert_eq!(result.visited.last(), Some(&target));
            assert_eq!(result.path.first(), Some(&start));
            assert_eq!(result.path.last(), Some(&target));
        }
    }
}
