use crate::arena;
use crate::error::EngineError;
use crate::grid::{Grid, Position};
use crate::maze::{self, Difficulty};
use crate::predictor::{self, ModelWeights};
use crate::samples::{SampleSink, TrainingSample};
use crate::{algorithms::Algorithm, features};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;

/// Batch driver: generates mazes across size/difficulty combinations, races
/// the algorithms on each, records samples into the sink, and keeps score of
/// how often the predictor's forecast matched the battle winner.
pub struct BatchRunner {
    pub grid_sizes: Vec<usize>,
    pub difficulties: Vec<Difficulty>,
    pub runs_per_combo: usize,
    pub quiet: bool,
}

impl BatchRunner {
    pub fn new(grid_sizes: Vec<usize>, difficulties: Vec<Difficulty>, runs_per_combo: usize) -> Self {
        BatchRunner {
            grid_sizes,
            difficulties,
            runs_per_combo,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn run(
        &self,
        weights: &ModelWeights,
        sink: &mut dyn SampleSink,
        rng: &mut StdRng,
    ) -> Result<BatchSummary, EngineError> {
        let mut summary = BatchSummary::default();

        for &size in &self.grid_sizes {
            for &difficulty in &self.difficulties {
                if !self.quiet {
                    println!(
                        "Batch: {}x{} {} ({} runs)",
                        size, size, difficulty, self.runs_per_combo
                    );
                }
                for _ in 0..self.runs_per_combo {
                    let outcome = run_once(size, difficulty, weights, rng)?;
                    summary.absorb(&outcome, difficulty);
                    sink.record(outcome.sample)?;
                }
            }
        }

        Ok(summary)
    }
}

struct RunOutcome {
    sample: TrainingSample,
    predicted: Algorithm,
    predictor_hit: bool,
}

/// One full generate → extract → predict → race → collect cycle.
fn run_once(
    size: usize,
    difficulty: Difficulty,
    weights: &ModelWeights,
    rng: &mut StdRng,
) -> Result<RunOutcome, EngineError> {
    let base = Grid::empty(size)?;
    let (start, target) = random_endpoints(size, rng);
    let maze = maze::generate(&base, start, target, difficulty, rng)?;

    let features = features::extract(&maze, start, target)?;
    let prediction = predictor::predict(&features, weights);
    let report = arena::race(&maze, start, target)?;

    let sample = TrainingSample::new(features, report.performances(), difficulty, size);
    let predictor_hit = prediction.winner == sample.actual_winner;
    Ok(RunOutcome {
        sample,
        predicted: prediction.winner,
        predictor_hit,
    })
}

/// Two distinct random cells anywhere on the grid.
pub fn random_endpoints(size: usize, rng: &mut StdRng) -> (Position, Position) {
    let start = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
    loop {
        let target = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if target != start {
            return (start, target);
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total_runs: usize,
    pub predictor_hits: usize,
    pub hits_by_difficulty: BTreeMap<Difficulty, (usize, usize)>,
    pub predicted_winners: BTreeMap<Algorithm, usize>,
    pub actual_winners: BTreeMap<Algorithm, usize>,
}

impl BatchSummary {
    fn absorb(&mut self, outcome: &RunOutcome, difficulty: Difficulty) {
        self.total_runs += 1;
        let (hits, total) = self.hits_by_difficulty.entry(difficulty).or_insert((0, 0));
        *total += 1;
        if outcome.predictor_hit {
            self.predictor_hits += 1;
            *hits += 1;
        }
        *self.predicted_winners.entry(outcome.predicted).or_insert(0) += 1;
        *self
            .actual_winners
            .entry(outcome.sample.actual_winner)
            .or_insert(0) += 1;
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        self.predictor_hits as f64 / self.total_runs as f64
    }

    pub fn print(&self) {
        println!("\n=== BATCH SUMMARY ===");
        println!("Total runs: {}", self.total_runs);
        println!(
            "Predictor accuracy: {}/{} ({:.1}%)",
            self.predictor_hits,
            self.total_runs,
            self.accuracy() * 100.0
        );
        for (difficulty, (hits, total)) in &self.hits_by_difficulty {
            println!(
                "  {}: {}/{} ({:.1}%)",
                difficulty,
                hits,
                total,
                if *total > 0 {
                    *hits as f64 / *total as f64 * 100.0
                } else {
                    0.0
                }
            );
        }
        println!("Predicted winners: {}", winner_histogram(&self.predicted_winners));
        println!("Actual winners:    {}", winner_histogram(&self.actual_winners));
    }
}

fn winner_histogram(counts: &BTreeMap<Algorithm, usize>) -> String {
    Algorithm::ALL
        .iter()
        .map(|algo| format!("{}={}", algo.name(), counts.get(algo).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(" ")
}
