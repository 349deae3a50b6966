use crate::algorithms::Algorithm;
use crate::features::MazeFeatures;

/// Short human-readable justification for a predicted winner. This is a fixed
/// decision table over feature thresholds, evaluated top to bottom per
/// winner; the predicates overlap, so the order decides which rule fires.
pub fn generate_reason(features: &MazeFeatures, winner: Algorithm) -> String {
    let high_dead_ends = features.dead_ends > 0.15;
    // 2.5 open neighbors out of 4.
    let low_branching = features.branching_factor < 0.625;
    let high_branching = features.branching_factor > 0.75;
    let low_wall_density = features.wall_density < 0.25;
    let high_wall_density = features.wall_density > 0.35;
    let high_complexity = features.path_complexity > 0.6;

    let reason = match winner {
        Algorithm::AStar => {
            if high_dead_ends && low_branching {
                "Low branching, high dead-ends favor A*"
            } else if high_dead_ends {
                "High dead-ends make A* heuristic efficient"
            } else if high_complexity && high_wall_density {
                "Complex maze structure favors A* heuristic"
            } else if low_branching {
                "Low branching factor favors A*"
            } else {
                "A* optimal for this maze structure"
            }
        }
        Algorithm::Bfs => {
            if low_wall_density && low_branching {
                "Open maze structure favors BFS"
            } else if low_wall_density {
                "Wide open areas favor BFS exploration"
            } else if low_branching {
                "Low branching factor suits BFS"
            } else {
                "BFS optimal for this maze layout"
            }
        }
        Algorithm::Dfs => {
            if high_branching {
                "High branching factor favors DFS"
            } else if high_wall_density && high_branching {
                "Complex branching paths favor DFS"
            } else if features.path_complexity > 0.5 {
                "Maze structure suits DFS exploration"
            } else {
                "DFS optimal for this maze pattern"
            }
        }
        Algorithm::Dijkstra => {
            if high_dead_ends && high_complexity {
                "Complex maze with dead-ends favors Dijkstra"
            } else if high_wall_density {
                "Dense maze structure favors Dijkstra"
            } else if high_complexity {
                "Path complexity makes Dijkstra efficient"
            } else {
                "Dijkstra optimal for this maze configuration"
            }
        }
    };
    reason.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> MazeFeatures {
        MazeFeatures {
            wall_density: 0.30,
            dead_ends: 0.05,
            branching_factor: 0.70,
            path_complexity: 0.40,
            maze_size: 0.5,
            distance: 0.5,
            open_ratio: 0.70,
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        // Both the dead-ends and the low-branching predicates hold; the
        // combined rule sits first in the chain and must fire.
        let mut f = features();
        f.dead_ends = 0.20;
        f.branching_factor = 0.50;
        assert_eq!(
            generate_reason(&f, Algorithm::AStar),
            "Low branching, high dead-ends favor A*"
        );
    }

    #[test]
    fn fallback_when_no_predicate_holds() {
        let f = features();
        assert_eq!(
            generate_reason(&f, Algorithm::Bfs),
            "BFS optimal for this maze layout"
        );
        assert_eq!(
            generate_reason(&f, Algorithm::Dijkstra),
            "Dijkstra optimal for this maze configuration"
        );
    }

    #[test]
    fn dfs_uses_its_own_complexity_threshold() {
        let mut f = features();
        f.path_complexity = 0.55;
        assert_eq!(
            generate_reason(&f, Algorithm::Dfs),
            "Maze structure suits DFS exploration"
        );
        f.branching_factor = 0.80;
        assert_eq!(
            generate_reason(&f, Algorithm::Dfs),
            "High branching factor favors DFS"
        );
    }
}
