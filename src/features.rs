use crate::error::EngineError;
use crate::grid::{Grid, Position};
use pathfinding::prelude::bfs;
use serde::{Deserialize, Serialize};

/// Upper bound on the path-length / straight-line ratio before normalizing.
const COMPLEXITY_CAP: f64 = 3.0;

/// Seven structural maze features, each normalized to roughly [0, 1]. Derived
/// deterministically from a grid plus endpoints; there is no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeFeatures {
    /// Share of cells that are walls.
    pub wall_density: f64,
    /// Share of cells that are open with exactly one open neighbor.
    pub dead_ends: f64,
    /// Average open-neighbor count per open cell, over the max degree of 4.
    pub branching_factor: f64,
    /// BFS path length over Manhattan distance, capped at 3 and normalized.
    pub path_complexity: f64,
    /// Grid size mapped onto the calibrated size range.
    pub maze_size: f64,
    /// Manhattan distance over the grid's maximum possible distance.
    pub distance: f64,
    /// Share of cells that are open.
    pub open_ratio: f64,
}

impl MazeFeatures {
    /// The fixed feature order the predictor's weight vectors are written in.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.wall_density,
            self.dead_ends,
            self.branching_factor,
            self.path_complexity,
            self.maze_size,
            self.distance,
            self.open_ratio,
        ]
    }
}

/// Normalization range for the `maze_size` feature. The default is calibrated
/// to the product's supported sizes {15, 20, 25}; engines working with other
/// size ranges can supply their own.
#[derive(Debug, Clone, Copy)]
pub struct SizeNormalization {
    pub min: usize,
    pub range: usize,
}

impl Default for SizeNormalization {
    fn default() -> Self {
        SizeNormalization { min: 15, range: 10 }
    }
}

pub fn extract(grid: &Grid, start: Position, target: Position) -> Result<MazeFeatures, EngineError> {
    extract_with(grid, start, target, SizeNormalization::default())
}

/// Walks the grid once for the density/degree features, then runs one BFS for
/// the path-length estimate. O(N²) in the grid area.
pub fn extract_with(
    grid: &Grid,
    start: Position,
    target: Position,
    norm: SizeNormalization,
) -> Result<MazeFeatures, EngineError> {
    grid.validate_endpoints(start, target)?;

    let size = grid.size();
    let total = (size * size) as f64;

    let mut wall_count = 0usize;
    let mut dead_end_count = 0usize;
    let mut open_cell_count = 0usize;
    let mut total_open_neighbors = 0usize;
    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            if !grid.is_open(pos) {
                wall_count += 1;
                continue;
            }
            open_cell_count += 1;
            let neighbors = grid.open_neighbor_count(pos);
            total_open_neighbors += neighbors;
            if neighbors == 1 {
                dead_end_count += 1;
            }
        }
    }

    let branching_factor = if open_cell_count > 0 {
        total_open_neighbors as f64 / open_cell_count as f64
    } else {
        0.0
    };

    let manhattan = start.manhattan_distance(&target);
    let path_complexity = if manhattan == 0 {
        // Unreachable behind validate_endpoints, but the neutral default
        // keeps the division safe regardless.
        1.0 / COMPLEXITY_CAP
    } else {
        // An unreachable target gets a penalty estimate of 3x the straight
        // line, which clamps the feature to 1.0.
        let estimated = estimate_path_length(grid, start, target).unwrap_or(3 * manhattan);
        (estimated as f64 / manhattan as f64).min(COMPLEXITY_CAP) / COMPLEXITY_CAP
    };

    let maze_size = if norm.range > 0 {
        ((size as f64 - norm.min as f64) / norm.range as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let max_distance = 2 * (size - 1);
    let distance = if max_distance > 0 {
        manhattan as f64 / max_distance as f64
    } else {
        0.0
    };

    Ok(MazeFeatures {
        wall_density: wall_count as f64 / total,
        dead_ends: dead_end_count as f64 / total,
        branching_factor: branching_factor / 4.0,
        path_complexity,
        maze_size,
        distance,
        open_ratio: open_cell_count as f64 / total,
    })
}

/// Unweighted shortest-path distance in steps, or `None` when disconnected.
fn estimate_path_length(grid: &Grid, start: Position, target: Position) -> Option<usize> {
    bfs(&start, |p| grid.open_neighbors(*p), |p| *p == target).map(|path| path.len() - 1)
}
