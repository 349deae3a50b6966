use crate::algorithms::common::{run_search, Policy, SearchResult};
use crate::grid::{Grid, Position};

/// Depth-first search: LIFO frontier. Cells are marked on push, so nothing
/// re-enters the stack and cycles are impossible. No optimality guarantee;
/// the returned path is whatever parent chain discovery happened to build.
pub fn search(grid: &Grid, start: Position, target: Position) -> SearchResult {
    run_search(grid, start, target, Policy::Lifo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs;
    use crate::grid::CellKind;

    #[test]
    fn takes_detour_where_bfs_goes_straight() {
        // Two walls steer the stack away from the direct column-0 route, so
        // the target is discovered through a longer corridor first.
        let mut grid = Grid::empty(3).unwrap();
        grid.set_kind(Position::new(0, 2), CellKind::Wall);
        grid.set_kind(Position::new(1, 2), CellKind::Wall);

        let start = Position::new(0, 0);
        let target = Position::new(2, 0);
        let dfs_result = search(&grid, start, target);
        let bfs_result = bfs::search(&grid, start, target);

        assert!(dfs_result.found);
        assert_eq!(bfs_result.path_length(), 3);
        assert_eq!(dfs_result.path_length(), 5);
    }

    #[test]
    fn never_visits_a_cell_twice() {
        let grid = Grid::empty(6).unwrap();
        let result = search(&grid, Position::new(0, 0), Position::new(5, 5));
        let mut seen = std::collections::HashSet::new();
        for pos in &result.visited {
            assert!(seen.insert(*pos), "revisited {}", pos);
        }
    }
}
