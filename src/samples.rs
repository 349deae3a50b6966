use crate::algorithms::{Algorithm, PerAlgorithm};
use crate::error::EngineError;
use crate::features::MazeFeatures;
use crate::maze::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How one algorithm fared on one maze. Path length counts cells including
/// the start; a failed run is recorded as `usize::MAX` so it sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmPerformance {
    pub path_length: usize,
    pub visited_count: usize,
}

/// One collected run, the unit the sample sink stores. Note `actual_winner`
/// uses the empirical ranking below, which is a different notion of "best"
/// than the predictor's biased score; the two disagreeing is a signal worth
/// keeping, so they are never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSample {
    pub features: MazeFeatures,
    pub results: PerAlgorithm<AlgorithmPerformance>,
    pub actual_winner: Algorithm,
    pub difficulty: Difficulty,
    pub grid_size: usize,
    /// Unix epoch milliseconds at collection time.
    pub timestamp: u64,
}

impl TrainingSample {
    pub fn new(
        features: MazeFeatures,
        results: PerAlgorithm<AlgorithmPerformance>,
        difficulty: Difficulty,
        grid_size: usize,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        TrainingSample {
            features,
            actual_winner: determine_winner(&results),
            results,
            difficulty,
            grid_size,
            timestamp,
        }
    }
}

/// Empirical winner: shortest path first, fewest visited cells second. Ties
/// beyond that fall to canonical algorithm order.
pub fn determine_winner(results: &PerAlgorithm<AlgorithmPerformance>) -> Algorithm {
    let mut winner = Algorithm::AStar;
    for algorithm in Algorithm::ALL {
        let candidate = results.get(algorithm);
        let best = results.get(winner);
        if (candidate.path_length, candidate.visited_count)
            < (best.path_length, best.visited_count)
        {
            winner = algorithm;
        }
    }
    winner
}

/// Append-only store for collected samples. The core never picks the storage
/// medium; callers inject whichever sink they want.
pub trait SampleSink {
    fn record(&mut self, sample: TrainingSample) -> Result<(), EngineError>;
    fn read_all(&self) -> Result<Vec<TrainingSample>, EngineError>;
    fn clear(&mut self) -> Result<(), EngineError>;
}

/// In-memory sink, mostly for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    samples: Vec<TrainingSample>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }
}

impl SampleSink for MemorySink {
    fn record(&mut self, sample: TrainingSample) -> Result<(), EngineError> {
        self.samples.push(sample);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TrainingSample>, EngineError> {
        Ok(self.samples.clone())
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        self.samples.clear();
        Ok(())
    }
}

/// File-backed sink holding one JSON array of samples. Each record rewrites
/// the file with the sample appended; a missing file reads as empty.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }
}

impl SampleSink for JsonFileSink {
    fn record(&mut self, sample: TrainingSample) -> Result<(), EngineError> {
        let mut samples = self.read_all()?;
        samples.push(sample);
        let json = serde_json::to_string_pretty(&samples)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TrainingSample>, EngineError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Aggregate view over collected samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStats {
    pub total: usize,
    pub winners: BTreeMap<Algorithm, usize>,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
}

pub fn stats(samples: &[TrainingSample]) -> SampleStats {
    let mut winners = BTreeMap::new();
    let mut by_difficulty = BTreeMap::new();
    for sample in samples {
        *winners.entry(sample.actual_winner).or_insert(0) += 1;
        *by_difficulty.entry(sample.difficulty).or_insert(0) += 1;
    }
    SampleStats {
        total: samples.len(),
        winners,
        by_difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performance(path_length: usize, visited_count: usize) -> AlgorithmPerformance {
        AlgorithmPerformance {
            path_length,
            visited_count,
        }
    }

    fn features() -> MazeFeatures {
        MazeFeatures {
            wall_density: 0.3,
            dead_ends: 0.1,
            branching_factor: 0.6,
            path_complexity: 0.5,
            maze_size: 0.5,
            distance: 0.5,
            open_ratio: 0.7,
        }
    }

    #[test]
    fn winner_ranks_by_path_then_visited() {
        let results = PerAlgorithm {
            a_star: performance(11, 40),
            bfs: performance(11, 90),
            dfs: performance(25, 30),
            dijkstra: performance(11, 38),
        };
        assert_eq!(determine_winner(&results), Algorithm::Dijkstra);
    }

    #[test]
    fn full_tie_goes_to_canonical_order() {
        let tied = performance(9, 20);
        let results = PerAlgorithm {
            a_star: tied,
            bfs: tied,
            dfs: tied,
            dijkstra: tied,
        };
        assert_eq!(determine_winner(&results), Algorithm::AStar);
    }

    #[test]
    fn memory_sink_round_trip() {
        let results = PerAlgorithm {
            a_star: performance(9, 20),
            bfs: performance(9, 25),
            dfs: performance(15, 12),
            dijkstra: performance(9, 22),
        };
        let mut sink = MemorySink::new();
        sink.record(TrainingSample::new(
            features(),
            results,
            Difficulty::Easy,
            15,
        ))
        .unwrap();
        sink.record(TrainingSample::new(
            features(),
            results,
            Difficulty::Hard,
            25,
        ))
        .unwrap();

        let samples = sink.read_all().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].actual_winner, Algorithm::AStar);

        let stats = stats(&samples);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.winners.get(&Algorithm::AStar), Some(&2));
        assert_eq!(stats.by_difficulty.get(&Difficulty::Hard), Some(&1));

        sink.clear().unwrap();
        assert!(sink.read_all().unwrap().is_empty());
    }

    #[test]
    fn json_file_sink_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "maze_arena_samples_{}.json",
            std::process::id()
        ));
        let mut sink = JsonFileSink::new(&path);
        sink.clear().unwrap();

        let results = PerAlgorithm {
            a_star: performance(9, 20),
            bfs: performance(9, 25),
            dfs: performance(15, 12),
            dijkstra: performance(9, 22),
        };
        sink.record(TrainingSample::new(
            features(),
            results,
            Difficulty::Medium,
            20,
        ))
        .unwrap();

        let samples = sink.read_all().unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].grid_size, 20);
        assert_eq!(samples[0].difficulty, Difficulty::Medium);

        sink.clear().unwrap();
        assert!(sink.read_all().unwrap().is_empty());
    }
}
