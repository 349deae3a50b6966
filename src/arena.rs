use crate::algorithms::{self, Algorithm, PerAlgorithm};
use crate::algorithms::common::SearchResult;
use crate::error::EngineError;
use crate::grid::{Grid, Position};
use crate::samples::{self, AlgorithmPerformance};

/// One algorithm's empirical outcome in a race.
#[derive(Debug, Clone)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    pub result: SearchResult,
}

impl AlgorithmRun {
    pub fn performance(&self) -> AlgorithmPerformance {
        AlgorithmPerformance {
            // Failed runs sort behind every successful one.
            path_length: if self.result.found {
                self.result.path_length()
            } else {
                usize::MAX
            },
            visited_count: if self.result.found {
                self.result.visited_count()
            } else {
                usize::MAX
            },
        }
    }
}

/// All four algorithms raced over one grid snapshot, plus the battle winner
/// under the path-length-then-visited-count ranking.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub runs: PerAlgorithm<AlgorithmRun>,
    pub winner: Algorithm,
}

impl BattleReport {
    pub fn performances(&self) -> PerAlgorithm<AlgorithmPerformance> {
        PerAlgorithm {
            a_star: self.runs.a_star.performance(),
            bfs: self.runs.bfs.performance(),
            dfs: self.runs.dfs.performance(),
            dijkstra: self.runs.dijkstra.performance(),
        }
    }

    pub fn winning_run(&self) -> &AlgorithmRun {
        self.runs.get(self.winner)
    }
}

/// Runs every algorithm against the same grid. Each run gets the unmodified
/// snapshot, so exploration order cannot leak between algorithms.
pub fn race(grid: &Grid, start: Position, target: Position) -> Result<BattleReport, EngineError> {
    let run = |algorithm: Algorithm| -> Result<AlgorithmRun, EngineError> {
        Ok(AlgorithmRun {
            algorithm,
            result: algorithms::search(grid, start, target, algorithm)?,
        })
    };
    let runs = PerAlgorithm {
        a_star: run(Algorithm::AStar)?,
        bfs: run(Algorithm::Bfs)?,
        dfs: run(Algorithm::Dfs)?,
        dijkstra: run(Algorithm::Dijkstra)?,
    };

    let winner = samples::determine_winner(&PerAlgorithm {
        a_star: runs.a_star.performance(),
        bfs: runs.bfs.performance(),
        dfs: runs.dfs.performance(),
        dijkstra: runs.dijkstra.performance(),
    });

    Ok(BattleReport { runs, winner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;

    #[test]
    fn race_runs_every_algorithm() {
        let mut grid = Grid::empty(6).unwrap();
        grid.set_kind(Position::new(2, 2), CellKind::Wall);
        grid.set_kind(Position::new(3, 2), CellKind::Wall);

        let report = race(&grid, Position::new(0, 0), Position::new(5, 5)).unwrap();
        for (_, run) in report.runs.iter() {
            assert!(run.result.found);
        }
        // The optimal algorithms share the shortest path length and beat DFS.
        let optimal = report.runs.a_star.result.path_length();
        assert_eq!(report.runs.dijkstra.result.path_length(), optimal);
        assert_eq!(report.runs.bfs.result.path_length(), optimal);
        assert!(report.runs.dfs.result.path_length() >= optimal);

        // The battle winner beats or ties every other run under the
        // path-then-visited ranking.
        let best = report.winning_run().performance();
        for (_, run) in report.runs.iter() {
            let other = run.performance();
            assert!(
                (best.path_length, best.visited_count)
                    <= (other.path_length, other.visited_count)
            );
        }
    }
}
