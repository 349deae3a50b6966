use crate::algorithms::common::{run_search, Policy, SearchResult};
use crate::grid::{Grid, Position};

/// Dijkstra: priority frontier ordered by g score, ties broken by insertion
/// order. Relaxes neighbors to `g + 1` when improved. Optimal for the
/// non-negative (here uniform) weights of the grid.
pub fn search(grid: &Grid, start: Position, target: Position) -> SearchResult {
    run_search(grid, start, target, Policy::UniformCost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;

    #[test]
    fn settles_cells_in_nondecreasing_g_order() {
        let mut grid = Grid::empty(5).unwrap();
        grid.set_kind(Position::new(2, 1), CellKind::Wall);
        grid.set_kind(Position::new(2, 2), CellKind::Wall);

        let start = Position::new(0, 0);
        let result = search(&grid, start, Position::new(4, 4));
        assert!(result.found);

        // With walls the true cost differs from Manhattan distance, so walk
        // an independent BFS to get each settled cell's actual g.
        let oracle = |pos: Position| {
            pathfinding::prelude::bfs(&start, |p| grid.open_neighbors(*p), |p| *p == pos)
                .map(|path| path.len() - 1)
                .unwrap()
        };
        let mut last_g = 0;
        for pos in &result.visited {
            let g = oracle(*pos);
            assert!(g >= last_g);
            last_g = g;
        }
    }
}
