use crate::algorithms::common::SearchResult;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed 4-directional neighborhood: up, down, left, right. The order is part
/// of the engine's determinism contract, so every component iterates it the
/// same way.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell currently is. Exactly one kind holds at a time; `Visited` and
/// `Path` are presentation markings layered on after a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    Start,
    Target,
    Visited,
    Path,
}

/// A square grid of cells. Treated as a copy-on-write value: transformations
/// like `with_markings` return a new grid instead of mutating in place, so a
/// caller can always re-run a different algorithm against the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    /// Creates an all-empty grid. Sizes below 2 cannot hold distinct start and
    /// target cells and are rejected.
    pub fn empty(size: usize) -> Result<Self, EngineError> {
        if size < 2 {
            return Err(EngineError::GridTooSmall(size));
        }
        Ok(Grid {
            size,
            cells: vec![vec![CellKind::Empty; size]; size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn kind(&self, pos: Position) -> CellKind {
        self.cells[pos.row][pos.col]
    }

    pub fn set_kind(&mut self, pos: Position, kind: CellKind) {
        self.cells[pos.row][pos.col] = kind;
    }

    /// A cell is open when it can be stepped on, i.e. anything but a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.kind(pos) != CellKind::Wall
    }

    /// In-bounds 4-neighbors regardless of what they contain.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        for (dr, dc) in DIRECTIONS {
            let row = pos.row as i32 + dr;
            let col = pos.col as i32 + dc;
            if row >= 0 && row < self.size as i32 && col >= 0 && col < self.size as i32 {
                neighbors.push(Position::new(row as usize, col as usize));
            }
        }
        neighbors
    }

    /// In-bounds 4-neighbors that are not walls.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|n| self.kind(*n) != CellKind::Wall)
            .collect()
    }

    pub fn open_neighbor_count(&self, pos: Position) -> usize {
        self.neighbors(pos)
            .iter()
            .filter(|n| self.kind(**n) != CellKind::Wall)
            .count()
    }

    /// Puts the start marker on `pos`, demoting any previous start cell to
    /// empty. At most one start exists at a time, and it never lands on a
    /// wall.
    pub fn place_start(&mut self, pos: Position) -> Result<(), EngineError> {
        self.place_endpoint(pos, CellKind::Start)
    }

    /// Same as `place_start` for the target marker.
    pub fn place_target(&mut self, pos: Position) -> Result<(), EngineError> {
        self.place_endpoint(pos, CellKind::Target)
    }

    fn place_endpoint(&mut self, pos: Position, kind: CellKind) -> Result<(), EngineError> {
        if !self.in_bounds(pos) {
            return Err(EngineError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        if self.kind(pos) == CellKind::Wall {
            return Err(EngineError::EndpointOnWall(pos));
        }
        for row in 0..self.size {
            for col in 0..self.size {
                let cell = Position::new(row, col);
                if self.kind(cell) == kind {
                    self.set_kind(cell, CellKind::Empty);
                }
            }
        }
        self.set_kind(pos, kind);
        Ok(())
    }

    /// Checks that start and target are usable search endpoints: in bounds,
    /// distinct, and not on walls. Downstream feature math divides by their
    /// Manhattan distance, so an equal pair must be rejected up front.
    pub fn validate_endpoints(&self, start: Position, target: Position) -> Result<(), EngineError> {
        for pos in [start, target] {
            if !self.in_bounds(pos) {
                return Err(EngineError::OutOfBounds {
                    pos,
                    size: self.size,
                });
            }
        }
        if start == target {
            return Err(EngineError::StartEqualsTarget);
        }
        if self.kind(start) == CellKind::Wall {
            return Err(EngineError::EndpointOnWall(start));
        }
        if self.kind(target) == CellKind::Wall {
            return Err(EngineError::EndpointOnWall(target));
        }
        Ok(())
    }

    /// Returns a copy of this grid with the search trace painted on: visited
    /// cells first, then the path on top. Wall, start and target cells are
    /// never overwritten.
    pub fn with_markings(&self, result: &SearchResult) -> Grid {
        let mut grid = self.clone();
        for &pos in &result.visited {
            if matches!(grid.kind(pos), CellKind::Empty) {
                grid.set_kind(pos, CellKind::Visited);
            }
        }
        for &pos in &result.path {
            if matches!(grid.kind(pos), CellKind::Empty | CellKind::Visited) {
                grid.set_kind(pos, CellKind::Path);
            }
        }
        grid
    }

    /// Returns a copy with all visited/path markings erased, ready for the
    /// next algorithm to run against the same obstacles.
    pub fn cleared_of_markings(&self) -> Grid {
        let mut grid = self.clone();
        for row in 0..grid.size {
            for col in 0..grid.size {
                let pos = Position::new(row, col);
                if matches!(grid.kind(pos), CellKind::Visited | CellKind::Path) {
                    grid.set_kind(pos, CellKind::Empty);
                }
            }
        }
        grid
    }
}

impl fmt::Display for Grid {
    /// Visual grid dump. Legend: S=start, T=target, #=wall, *=path,
    /// o=visited, .=empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{:2}", col % 10)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:2} ", row)?;
            for col in 0..self.size {
                let ch = match self.cells[row][col] {
                    CellKind::Empty => '.',
                    CellKind::Wall => '#',
                    CellKind::Start => 'S',
                    CellKind::Target => 'T',
                    CellKind::Visited => 'o',
                    CellKind::Path => '*',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
