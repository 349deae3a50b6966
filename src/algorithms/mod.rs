pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod dijkstra;

use crate::error::EngineError;
use crate::grid::{Grid, Position};
use common::SearchResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four competing search strategies. The declaration order is the
/// canonical order used for score tie-breaking, so don't reorder variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    AStar,
    Bfs,
    Dfs,
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::AStar => "aStar",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per algorithm, in canonical order. Used for predictor scores and
/// per-algorithm race results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerAlgorithm<T> {
    pub a_star: T,
    pub bfs: T,
    pub dfs: T,
    pub dijkstra: T,
}

impl<T> PerAlgorithm<T> {
    pub fn get(&self, algorithm: Algorithm) -> &T {
        match algorithm {
            Algorithm::AStar => &self.a_star,
            Algorithm::Bfs => &self.bfs,
            Algorithm::Dfs => &self.dfs,
            Algorithm::Dijkstra => &self.dijkstra,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &T)> {
        Algorithm::ALL.iter().map(move |&algo| (algo, self.get(algo)))
    }
}

/// Runs one algorithm over a grid snapshot. Pure: two calls on the same
/// inputs yield identical visited and path sequences. A disconnected grid is
/// a `found = false` result, not an error; only malformed endpoints fail.
pub fn search(
    grid: &Grid,
    start: Position,
    target: Position,
    algorithm: Algorithm,
) -> Result<SearchResult, EngineError> {
    grid.validate_endpoints(start, target)?;
    Ok(match algorithm {
        Algorithm::AStar => a_star::search(grid, start, target),
        Algorithm::Bfs => bfs::search(grid, start, target),
        Algorithm::Dfs => dfs::search(grid, start, target),
        Algorithm::Dijkstra => dijkstra::search(grid, start, target),
    })
}
