use crate::algorithms::Algorithm;
use crate::grid::Position;
use crate::maze::Difficulty;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Run a single algorithm instead of racing all four.
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Start cell as "row,col". Random when omitted.
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Target cell as "row,col". Random when omitted.
    #[arg(long, value_parser = parse_position)]
    pub target: Option<Position>,

    /// Seed for reproducible maze generation.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "weights.json")]
    pub weights: String,

    /// Record each run into the samples file.
    #[arg(long, default_value_t = false)]
    pub collect: bool,

    #[arg(long, default_value = "samples.json")]
    pub samples_file: String,

    /// Run the batch collector over all sizes and difficulties.
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Runs per size/difficulty combination in batch mode.
    #[arg(long, default_value_t = 20)]
    pub runs: usize,

    #[arg(long, default_value_t = false)]
    pub no_render: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"row,col\", got \"{value}\""))?;
    let row = row.trim().parse().map_err(|_| format!("bad row in \"{value}\""))?;
    let col = col.trim().parse().map_err(|_| format!("bad col in \"{value}\""))?;
    Ok(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!(parse_position("3,7"), Ok(Position::new(3, 7)));
        assert_eq!(parse_position(" 0 , 12 "), Ok(Position::new(0, 12)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,b").is_err());
    }
}
