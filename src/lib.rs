//! Engine behind a maze "algorithm battle" visualizer: four grid-search
//! algorithms raced over generated mazes, with a linear feature-based
//! predictor that guesses the winner before any search runs.

pub mod algorithms;
pub mod arena;
pub mod batch;
pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod frontier;
pub mod grid;
pub mod maze;
pub mod predictor;
pub mod samples;

pub use algorithms::common::SearchResult;
pub use algorithms::{search, Algorithm, PerAlgorithm};
pub use error::EngineError;
pub use features::{extract, MazeFeatures};
pub use grid::{CellKind, Grid, Position};
pub use maze::{generate, Difficulty};
pub use predictor::{predict, ModelWeights, Prediction};
