use crate::error::EngineError;
use crate::frontier::Frontier;
use crate::grid::{CellKind, Grid, Position};
use rand::rngs::StdRng;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    clap::ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Target share of cells turned into walls by the obstruction pass.
    pub fn wall_density(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.20,
            Difficulty::Medium => 0.30,
            Difficulty::Hard => 0.40,
        }
    }

    /// Chance that an unprotected neighbor of start/target is force-cleared
    /// after wall placement. Harder mazes keep their endpoints tighter.
    pub fn clear_probability(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Medium => 0.7,
            Difficulty::Hard => 0.5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Builds a maze the size of `base` with a guaranteed route between start and
/// target. The solvability invariant holds for every difficulty: the corridor
/// laid down first is protected from every later wall-placing step.
///
/// Phases:
/// 1. greedy best-first corridor from start to target over the wall-free
///    grid; its cells become the protected set,
/// 2. randomized depth-first backtracking from start over the remaining
///    cells for an organic spanning-tree openness pattern,
/// 3. obstruction: unvisited cells always become walls, visited ones with
///    probability equal to the difficulty's wall density,
/// 4. safety margin: neighbors of start/target are force-cleared, protected
///    ones always, others with the difficulty's clear probability.
pub fn generate(
    base: &Grid,
    start: Position,
    target: Position,
    difficulty: Difficulty,
    rng: &mut StdRng,
) -> Result<Grid, EngineError> {
    let size = base.size();
    for pos in [start, target] {
        if !base.in_bounds(pos) {
            return Err(EngineError::OutOfBounds { pos, size });
        }
    }
    if start == target {
        return Err(EngineError::StartEqualsTarget);
    }

    let protected = guaranteed_corridor(size, start, target);

    // Phase 2: recursive backtracking over everything the corridor didn't
    // already claim.
    let mut visited = vec![vec![false; size]; size];
    for pos in &protected {
        visited[pos.row][pos.col] = true;
    }
    let mut stack = vec![start];
    visited[start.row][start.col] = true;
    while let Some(&current) = stack.last() {
        let unvisited: Vec<Position> = free_neighbors(size, current)
            .into_iter()
            .filter(|n| !visited[n.row][n.col])
            .collect();
        if unvisited.is_empty() {
            stack.pop();
        } else {
            let next = unvisited[rng.gen_range(0..unvisited.len())];
            visited[next.row][next.col] = true;
            stack.push(next);
        }
    }

    // Phase 3: obstruction, never touching the corridor or the endpoints.
    let wall_density = difficulty.wall_density();
    let mut grid = Grid::empty(size)?;
    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            if pos == start || pos == target || protected.contains(&pos) {
                continue;
            }
            if !visited[row][col] || rng.gen::<f64>() < wall_density {
                grid.set_kind(pos, CellKind::Wall);
            }
        }
    }
    grid.set_kind(start, CellKind::Start);
    grid.set_kind(target, CellKind::Target);

    // Phase 4: keep the endpoints from being boxed in by the random pass.
    for endpoint in [start, target] {
        for neighbor in grid.neighbors(endpoint) {
            if neighbor == start || neighbor == target {
                continue;
            }
            if protected.contains(&neighbor) || rng.gen::<f64>() < difficulty.clear_probability() {
                grid.set_kind(neighbor, CellKind::Empty);
            }
        }
    }

    Ok(grid)
}

/// Greedy best-first search over the empty grid: frontier ordered by
/// remaining Manhattan distance, ties by discovery order. Returns the cells
/// of the discovered start-to-target path.
fn guaranteed_corridor(size: usize, start: Position, target: Position) -> FxHashSet<Position> {
    let mut frontier = Frontier::priority();
    let mut discovered = FxHashSet::default();
    let mut parent: FxHashMap<Position, Position> = FxHashMap::default();

    discovered.insert(start);
    frontier.push(start, start.manhattan_distance(&target) as u32);

    while let Some(current) = frontier.pop() {
        if current == target {
            break;
        }
        for neighbor in free_neighbors(size, current) {
            if discovered.insert(neighbor) {
                parent.insert(neighbor, current);
                frontier.push(neighbor, neighbor.manhattan_distance(&target) as u32);
            }
        }
    }

    // The wall-free grid is fully connected, so the walk below always reaches
    // the start.
    let mut corridor = FxHashSet::default();
    let mut current = target;
    corridor.insert(current);
    while current != start {
        current = parent[&current];
        corridor.insert(current);
    }
    corridor
}

/// In-bounds 4-neighbors on a grid that has no walls yet.
fn free_neighbors(size: usize, pos: Position) -> Vec<Position> {
    let mut neighbors = Vec::with_capacity(4);
    for (dr, dc) in crate::grid::DIRECTIONS {
        let row = pos.row as i32 + dr;
        let col = pos.col as i32 + dc;
        if row >= 0 && row < size as i32 && col >= 0 && col < size as i32 {
            neighbors.push(Position::new(row as usize, col as usize));
        }
    }
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rejects_equal_endpoints() {
        let base = Grid::empty(10).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = Position::new(3, 3);
        assert!(matches!(
            generate(&base, pos, pos, Difficulty::Medium, &mut rng),
            Err(EngineError::StartEqualsTarget)
        ));
    }

    #[test]
    fn endpoints_keep_their_kinds() {
        let base = Grid::empty(15).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let start = Position::new(0, 0);
        let target = Position::new(14, 14);
        let maze = generate(&base, start, target, Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(maze.kind(start), CellKind::Start);
        assert_eq!(maze.kind(target), CellKind::Target);
    }

    #[test]
    fn corridor_connects_arbitrary_endpoints() {
        let corridor = guaranteed_corridor(9, Position::new(8, 1), Position::new(0, 7));
        assert!(corridor.contains(&Position::new(8, 1)));
        assert!(corridor.contains(&Position::new(0, 7)));
        // Greedy best-first on an open grid walks a monotone staircase, so
        // the corridor has exactly manhattan + 1 cells.
        assert_eq!(corridor.len(), 15);
    }

    #[test]
    fn same_seed_same_maze() {
        let base = Grid::empty(20).unwrap();
        let start = Position::new(2, 3);
        let target = Position::new(17, 16);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let maze_a = generate(&base, start, target, Difficulty::Medium, &mut rng_a).unwrap();
        let maze_b = generate(&base, start, target, Difficulty::Medium, &mut rng_b).unwrap();
        assert_eq!(maze_a, maze_b);
    }
}
