use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_arena::arena::BattleReport;
use maze_arena::batch::{self, BatchRunner};
use maze_arena::config::Config;
use maze_arena::predictor::{ModelWeights, Prediction};
use maze_arena::samples::{JsonFileSink, SampleSink, TrainingSample};
use maze_arena::{algorithms, arena, features, maze, predictor, Difficulty, Grid};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let weights = ModelWeights::load(&config.weights)
        .with_context(|| format!("loading weight table from {}", config.weights))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if config.batch {
        let mut sink = JsonFileSink::new(&config.samples_file);
        let runner = BatchRunner::new(
            vec![15, 20, 25],
            Difficulty::ALL.to_vec(),
            config.runs,
        )
        .quiet(config.quiet);
        let summary = runner.run(&weights, &mut sink, &mut rng)?;
        summary.print();
        println!("Samples written to {}", config.samples_file);
        return Ok(());
    }

    run_single(&config, &weights, &mut rng)
}

fn run_single(config: &Config, weights: &ModelWeights, rng: &mut StdRng) -> anyhow::Result<()> {
    let base = Grid::empty(config.grid_size)?;
    let (start, target) = match (config.start, config.target) {
        (Some(start), Some(target)) => (start, target),
        _ => batch::random_endpoints(config.grid_size, rng),
    };

    if !config.quiet {
        println!(
            "Maze: {}x{} {} | start {} -> target {}",
            config.grid_size, config.grid_size, config.difficulty, start, target
        );
    }

    let grid = maze::generate(&base, start, target, config.difficulty, rng)?;
    let features = features::extract(&grid, start, target)?;
    let prediction = predictor::predict(&features, weights);

    if !config.quiet {
        print_prediction(&prediction);
    }

    if let Some(algorithm) = config.algorithm {
        let result = algorithms::search(&grid, start, target, algorithm)?;
        println!(
            "{}: found={} path={} visited={}",
            algorithm.label(),
            result.found,
            result.path_length(),
            result.visited_count()
        );
        if !config.no_render {
            println!("\n{}", grid.with_markings(&result));
        }
        return Ok(());
    }

    let report = arena::race(&grid, start, target)?;
    print_battle(&report, &prediction);

    if !config.no_render {
        println!("\n{}", grid.with_markings(&report.winning_run().result));
    }

    if config.collect {
        let sample = TrainingSample::new(
            features,
            report.performances(),
            config.difficulty,
            config.grid_size,
        );
        let mut sink = JsonFileSink::new(&config.samples_file);
        sink.record(sample)?;
        if !config.quiet {
            println!(
                "Sample recorded ({} total in {})",
                sink.read_all()?.len(),
                config.samples_file
            );
        }
    }

    Ok(())
}

fn print_prediction(prediction: &Prediction) {
    println!("\n=== PREDICTION ===");
    println!(
        "Winner: {} ({}% confidence)",
        prediction.winner.label(),
        prediction.confidence
    );
    println!("Reason: {}", prediction.reason);
    print!("Scores:");
    for (algorithm, score) in prediction.scores.iter() {
        print!(" {}={:.3}", algorithm.name(), score);
    }
    println!();
}

fn print_battle(report: &BattleReport, prediction: &Prediction) {
    println!("\n=== BATTLE RESULTS ===");
    println!("{:<10} {:<7} {:<10} {:<10}", "Algorithm", "Found", "Path", "Visited");
    println!("{}", "-".repeat(40));
    for (algorithm, run) in report.runs.iter() {
        let (path, visited) = if run.result.found {
            (
                run.result.path_length().to_string(),
                run.result.visited_count().to_string(),
            )
        } else {
            ("-".to_string(), run.result.visited_count().to_string())
        };
        let marker = if algorithm == report.winner { " <- winner" } else { "" };
        println!(
            "{:<10} {:<7} {:<10} {:<10}{}",
            algorithm.label(),
            run.result.found,
            path,
            visited,
            marker
        );
    }

    if prediction.winner == report.winner {
        println!(
            "Prediction was right: {} won as forecast ({}%)",
            report.winner.label(),
            prediction.confidence
        );
    } else {
        println!(
            "Prediction missed: forecast {} but {} won",
            prediction.winner.label(),
            report.winner.label()
        );
    }
}
