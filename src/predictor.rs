use crate::algorithms::{Algorithm, PerAlgorithm};
use crate::error::EngineError;
use crate::explain;
use crate::features::MazeFeatures;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed prior per algorithm, added to the weighted feature sum. A* and
/// Dijkstra win by default; BFS and DFS need strong feature evidence.
fn bias(algorithm: Algorithm) -> f64 {
    match algorithm {
        Algorithm::AStar => 0.50,
        Algorithm::Bfs => -0.40,
        Algorithm::Dfs => -0.45,
        Algorithm::Dijkstra => 0.35,
    }
}

/// Per-algorithm weight vectors over the seven features, in the order of
/// `MazeFeatures::as_array`. Loaded from a JSON artifact so the table can be
/// retuned without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelWeights {
    pub a_star: Vec<f64>,
    pub bfs: Vec<f64>,
    pub dfs: Vec<f64>,
    pub dijkstra: Vec<f64>,
}

impl ModelWeights {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let weights: ModelWeights = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn for_algorithm(&self, algorithm: Algorithm) -> &[f64] {
        match algorithm {
            Algorithm::AStar => &self.a_star,
            Algorithm::Bfs => &self.bfs,
            Algorithm::Dfs => &self.dfs,
            Algorithm::Dijkstra => &self.dijkstra,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        for algorithm in Algorithm::ALL {
            let len = self.for_algorithm(algorithm).len();
            if len != 7 {
                return Err(EngineError::BadWeights(format!(
                    "{} has {} weights, expected 7",
                    algorithm, len
                )));
            }
        }
        Ok(())
    }
}

/// The predictor's forecast: which algorithm should win this maze, and how
/// sure it is. Confidence is deliberately bounded away from certainty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub winner: Algorithm,
    /// Percentage in {50} when all scores tie, otherwise [60, 95].
    pub confidence: u8,
    pub reason: String,
    pub scores: PerAlgorithm<f64>,
}

/// Scores every algorithm as bias + weights . features and picks the argmax.
/// Ties fall to the earlier algorithm in canonical order. Pure and
/// deterministic for a fixed weight table.
pub fn predict(features: &MazeFeatures, weights: &ModelWeights) -> Prediction {
    let feature_array = features.as_array();
    let score_of = |algorithm: Algorithm| -> f64 {
        bias(algorithm)
            + weights
                .for_algorithm(algorithm)
                .iter()
                .zip(feature_array)
                .map(|(w, f)| w * f)
                .sum::<f64>()
    };

    let scores = PerAlgorithm {
        a_star: score_of(Algorithm::AStar),
        bfs: score_of(Algorithm::Bfs),
        dfs: score_of(Algorithm::Dfs),
        dijkstra: score_of(Algorithm::Dijkstra),
    };

    let mut winner = Algorithm::AStar;
    for algorithm in Algorithm::ALL {
        if *scores.get(algorithm) > *scores.get(winner) {
            winner = algorithm;
        }
    }

    let reason = explain::generate_reason(features, winner);
    Prediction {
        winner,
        confidence: confidence(&scores, winner),
        reason,
        scores,
    }
}

/// Maps the winner's margin over the runner-up onto [60, 95], relative to the
/// full score spread. All-equal scores collapse to a coin-flip 50.
fn confidence(scores: &PerAlgorithm<f64>, winner: Algorithm) -> u8 {
    let winner_score = *scores.get(winner);
    let mut runner_up = f64::NEG_INFINITY;
    let mut min_score = f64::INFINITY;
    for (algorithm, &score) in scores.iter() {
        min_score = min_score.min(score);
        if algorithm != winner && score > runner_up {
            runner_up = score;
        }
    }

    let range = winner_score - min_score;
    if range > 0.0 {
        let gap = winner_score - runner_up;
        (60.0 + 35.0 * gap / range).clamp(60.0, 95.0).round() as u8
    } else {
        50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_weights() -> ModelWeights {
        ModelWeights {
            a_star: vec![0.0; 7],
            bfs: vec![0.0; 7],
            dfs: vec![0.0; 7],
            dijkstra: vec![0.0; 7],
        }
    }

    fn flat_features() -> MazeFeatures {
        MazeFeatures {
            wall_density: 1.0,
            dead_ends: 0.0,
            branching_factor: 0.0,
            path_complexity: 0.0,
            maze_size: 0.0,
            distance: 0.0,
            open_ratio: 0.0,
        }
    }

    #[test]
    fn bias_alone_picks_a_star() {
        let prediction = predict(&flat_features(), &zero_weights());
        assert_eq!(prediction.winner, Algorithm::AStar);
        // Gap over Dijkstra is 0.15, range over DFS is 0.95.
        let expected = (60.0 + 35.0 * 0.15 / 0.95_f64).round() as u8;
        assert_eq!(prediction.confidence, expected);
    }

    #[test]
    fn all_equal_scores_mean_coin_flip() {
        // Weights sized to cancel each algorithm's bias at wall_density = 1.
        let mut weights = zero_weights();
        weights.a_star[0] = -0.50;
        weights.bfs[0] = 0.40;
        weights.dfs[0] = 0.45;
        weights.dijkstra[0] = -0.35;

        let prediction = predict(&flat_features(), &weights);
        assert_eq!(prediction.winner, Algorithm::AStar);
        assert_eq!(prediction.confidence, 50);
    }

    #[test]
    fn exact_tie_goes_to_canonical_order() {
        // A* and Dijkstra both land on 0.40, ahead of BFS and DFS.
        let mut weights = zero_weights();
        weights.a_star[0] = -0.10;
        weights.dijkstra[0] = 0.05;

        let prediction = predict(&flat_features(), &weights);
        assert!((prediction.scores.a_star - prediction.scores.dijkstra).abs() < 1e-12);
        assert_eq!(prediction.winner, Algorithm::AStar);
    }

    #[test]
    fn weight_table_shape_is_validated() {
        let json = r#"{"aStar": [1.0], "bfs": [0,0,0,0,0,0,0], "dfs": [0,0,0,0,0,0,0], "dijkstra": [0,0,0,0,0,0,0]}"#;
        assert!(matches!(
            ModelWeights::from_json(json),
            Err(EngineError::BadWeights(_))
        ));
    }

    #[test]
    fn prediction_is_deterministic() {
        let weights = ModelWeights::from_json(include_str!("../weights.json")).unwrap();
        let features = MazeFeatures {
            wall_density: 0.3,
            dead_ends: 0.1,
            branching_factor: 0.6,
            path_complexity: 0.5,
            maze_size: 0.5,
            distance: 0.7,
            open_ratio: 0.7,
        };
        let first = predict(&features, &weights);
        let second = predict(&features, &weights);
        assert_eq!(first.winner, second.winner);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.scores, second.scores);
        assert!(first.confidence == 50 || (60..=95).contains(&first.confidence));
    }
}
