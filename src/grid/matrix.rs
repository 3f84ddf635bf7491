//! The playing grid: a fixed matrix of hole and card cells.
//!
//! Cell storage uses `im::Vector` so a grid clones in O(1); look-ahead
//! strategies clone the whole game for every candidate they simulate.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::position::{Placed, Position};
use crate::cards::Direction;
use crate::core::error::{GameError, Result};
use crate::core::Player;

/// Fixed-size grid of cells.
///
/// The hole mask is fixed at construction. The number of card (non-hole)
/// cells is always odd, so that with one surplus card in hand the two
/// players alternate exactly over a full board.
///
/// ## Example
///
/// ```
/// use grid_duel::grid::Grid;
///
/// let grid = Grid::from_rows(&["CCX", "CCC", "XCC"]).unwrap();
///
/// assert_eq!(grid.card_cell_count(), 7);
/// assert!(grid.is_hole(0, 2).unwrap());
/// assert!(Grid::open(2, 2).is_err()); // four card cells
/// ```
///
/// Deserialising goes through the same checks as `with_holes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridLayout")]
pub struct Grid {
    rows: usize,
    cols: usize,
    holes: Vector<bool>,
    cells: Vector<Option<Placed>>,
    card_cells: usize,
    occupied: usize,
}

/// Serialised form of a `Grid`. Derived counters are recomputed.
#[derive(Deserialize)]
struct GridLayout {
    rows: usize,
    cols: usize,
    holes: Vec<bool>,
    cells: Vec<Option<Placed>>,
}

impl TryFrom<GridLayout> for Grid {
    type Error = GameError;

    fn try_from(layout: GridLayout) -> Result<Self> {
        let mut grid = Self::with_holes(layout.rows, layout.cols, layout.holes)?;
        if layout.cells.len() != layout.rows * layout.cols {
            return Err(GameError::CellCountMismatch {
                expected: layout.rows * layout.cols,
                actual: layout.cells.len(),
            });
        }

        for (idx, cell) in layout.cells.into_iter().enumerate() {
            if let Some(placed) = cell {
                grid.place_card(idx / layout.cols, idx % layout.cols, placed)?;
            }
        }
        Ok(grid)
    }
}

impl Grid {
    /// Create a grid with no holes.
    pub fn open(rows: usize, cols: usize) -> Result<Self> {
        Self::with_holes(rows, cols, vec![false; rows * cols])
    }

    /// Create a grid from a row-major hole mask (`true` = hole).
    pub fn with_holes(rows: usize, cols: usize, holes: Vec<bool>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        if holes.len() != rows * cols {
            return Err(GameError::HoleMaskMismatch {
                expected: rows * cols,
                actual: holes.len(),
            });
        }

        let card_cells = holes.iter().filter(|&&h| !h).count();
        if card_cells % 2 == 0 {
            return Err(GameError::EvenCardCells(card_cells));
        }

        Ok(Self {
            rows,
            cols,
            holes: holes.into_iter().collect(),
            cells: Vector::from(vec![None; rows * cols]),
            card_cells,
            occupied: 0,
        })
    }

    /// Create a grid from rows of characters: `X` marks a hole,
    /// `C` or `.` marks a card cell.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut holes = Vec::with_capacity(rows.len() * cols);

        for row in rows {
            if row.chars().count() != cols {
                return Err(GameError::InvalidDimensions {
                    rows: rows.len(),
                    cols: row.chars().count(),
                });
            }
            for ch in row.chars() {
                match ch {
                    'X' | 'x' => holes.push(true),
                    'C' | 'c' | '.' => holes.push(false),
                    other => return Err(GameError::InvalidCell(other)),
                }
            }
        }

        Self::with_holes(rows.len(), cols, holes)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of non-hole cells. Always odd.
    #[must_use]
    pub fn card_cell_count(&self) -> usize {
        self.card_cells
    }

    /// Number of cells currently holding a card.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// True when no card cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied == self.card_cells
    }

    /// Validate a coordinate.
    pub fn position(&self, row: usize, col: usize) -> Result<Position> {
        if row < self.rows && col < self.cols {
            Ok(Position::new(row, col))
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// Is the cell a hole?
    pub fn is_hole(&self, row: usize, col: usize) -> Result<bool> {
        let pos = self.position(row, col)?;
        Ok(self.holes[self.index(pos)])
    }

    /// The card in a cell, if any.
    pub fn card_at(&self, row: usize, col: usize) -> Result<Option<Placed>> {
        let pos = self.position(row, col)?;
        Ok(self.placed(pos))
    }

    /// True if a card could be placed at the coordinate right now.
    #[must_use]
    pub fn can_place(&self, row: usize, col: usize) -> bool {
        self.check_placement(row, col).is_ok()
    }

    /// Check that a coordinate is in bounds, not a hole and empty.
    pub fn check_placement(&self, row: usize, col: usize) -> Result<Position> {
        let pos = self.position(row, col)?;
        let idx = self.index(pos);
        if self.holes[idx] {
            return Err(GameError::Hole { row, col });
        }
        if self.cells[idx].is_some() {
            return Err(GameError::Occupied { row, col });
        }
        Ok(pos)
    }

    /// Place a card into an empty card cell.
    pub fn place_card(&mut self, row: usize, col: usize, placed: Placed) -> Result<Position> {
        let pos = self.check_placement(row, col)?;
        let idx = self.index(pos);
        self.cells.set(idx, Some(placed));
        self.occupied += 1;
        Ok(pos)
    }

    /// Change the owner of an occupied cell. Empty cells are left alone.
    pub(crate) fn set_owner(&mut self, pos: Position, owner: Player) {
        let idx = self.index(pos);
        if let Some(placed) = self.cells[idx] {
            self.cells.set(idx, Some(Placed { owner, ..placed }));
        }
    }

    /// Contents of an in-bounds position.
    #[must_use]
    pub(crate) fn placed(&self, pos: Position) -> Option<Placed> {
        self.cells.get(self.index(pos)).copied().flatten()
    }

    /// Is the in-bounds position an empty card cell?
    #[must_use]
    pub(crate) fn is_open(&self, pos: Position) -> bool {
        let idx = self.index(pos);
        !self.holes[idx] && self.cells[idx].is_none()
    }

    /// The in-bounds neighbour in a direction, if any.
    #[must_use]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then(|| Position::new(row, col))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Empty card cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&pos| self.is_open(pos))
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn corners(&self) -> [Position; 4] {
        let last_row = self.rows - 1;
        let last_col = self.cols - 1;
        [
            Position::new(0, 0),
            Position::new(0, last_col),
            Position::new(last_row, 0),
            Position::new(last_row, last_col),
        ]
    }

    /// Is the position one of the four corners?
    #[must_use]
    pub fn is_corner(&self, pos: Position) -> bool {
        self.corners().contains(&pos)
    }

    /// Number of cells owned by a player.
    #[must_use]
    pub fn count_owned(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(p) if p.owner == player))
            .count()
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn red(id: u32) -> Placed {
        Placed {
            card: CardId::new(id),
            owner: Player::Red,
        }
    }

    #[test]
    fn test_open_grid_parity() {
        assert!(Grid::open(3, 3).is_ok());
        assert!(Grid::open(1, 1).is_ok());
        assert_eq!(Grid::open(2, 3).unwrap_err(), GameError::EvenCardCells(6));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::open(0, 3).unwrap_err(),
            GameError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert_eq!(
            Grid::with_holes(2, 2, vec![false; 3]).unwrap_err(),
            GameError::HoleMaskMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_holes_make_parity_odd() {
        // 2x2 with one hole leaves three card cells
        let grid = Grid::with_holes(2, 2, vec![false, true, false, false]).unwrap();
        assert_eq!(grid.card_cell_count(), 3);
        assert!(grid.is_hole(0, 1).unwrap());
        assert!(!grid.is_hole(1, 1).unwrap());
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["CC.", "XCC"]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.card_cell_count(), 5);

        assert_eq!(Grid::from_rows(&["CQC"]).unwrap_err(), GameError::InvalidCell('Q'));
        assert!(Grid::from_rows(&["CCC", "C"]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_place_card_errors() {
        let mut grid = Grid::from_rows(&["CX", "CC"]).unwrap();

        assert_eq!(
            grid.place_card(2, 0, red(0)).unwrap_err(),
            GameError::OutOfBounds { row: 2, col: 0 }
        );
        assert_eq!(
            grid.place_card(0, 1, red(0)).unwrap_err(),
            GameError::Hole { row: 0, col: 1 }
        );

        grid.place_card(0, 0, red(0)).unwrap();
        assert_eq!(
            grid.place_card(0, 0, red(1)).unwrap_err(),
            GameError::Occupied { row: 0, col: 0 }
        );
        assert_eq!(grid.card_at(0, 0).unwrap(), Some(red(0)));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_is_full() {
        let mut grid = Grid::from_rows(&["CX", "CC"]).unwrap();
        assert!(!grid.is_full());

        grid.place_card(0, 0, red(0)).unwrap();
        grid.place_card(1, 0, red(1)).unwrap();
        assert!(!grid.is_full());
        grid.place_card(1, 1, red(2)).unwrap();
        assert!(grid.is_full());
        assert_eq!(grid.empty_positions().count(), 0);
    }

    #[test]
    fn test_set_owner_and_count() {
        let mut grid = Grid::open(1, 3).unwrap();
        grid.place_card(0, 0, red(0)).unwrap();
        grid.place_card(0, 2, red(1)).unwrap();

        grid.set_owner(Position::new(0, 2), Player::Blue);
        grid.set_owner(Position::new(0, 1), Player::Blue);

        assert_eq!(grid.count_owned(Player::Red), 1);
        assert_eq!(grid.count_owned(Player::Blue), 1);
        assert_eq!(grid.placed(Position::new(0, 1)), None);
    }

    #[test]
    fn test_neighbors_and_corners() {
        let grid = Grid::open(3, 3).unwrap();
        let origin = Position::new(0, 0);

        assert_eq!(grid.neighbor(origin, Direction::North), None);
        assert_eq!(grid.neighbor(origin, Direction::West), None);
        assert_eq!(grid.neighbor(origin, Direction::South), Some(Position::new(1, 0)));
        assert_eq!(grid.neighbor(origin, Direction::East), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(Position::new(2, 2), Direction::East), None);

        assert_eq!(
            grid.corners(),
            [
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 2)
            ]
        );
        assert!(grid.is_corner(Position::new(2, 0)));
        assert!(!grid.is_corner(Position::new(1, 1)));
    }

    #[test]
    fn test_empty_positions_row_major() {
        let grid = Grid::from_rows(&["XC", "CC", "CC"]).unwrap();
        let empty: Vec<_> = grid.empty_positions().collect();
        assert_eq!(
            empty,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(2, 0),
                Position::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_public_queries_reject_wrapped_columns() {
        let mut grid = Grid::open(3, 3).unwrap();
        grid.place_card(1, 2, red(0)).unwrap();

        // (0, 5) would land on (1, 2) in row-major storage.
        assert_eq!(
            grid.card_at(0, 5).unwrap_err(),
            GameError::OutOfBounds { row: 0, col: 5 }
        );
        assert_eq!(
            grid.is_hole(0, 5).unwrap_err(),
            GameError::OutOfBounds { row: 0, col: 5 }
        );
        assert!(!grid.can_place(0, 5));
        assert!(!grid.can_place(7, 0));
        assert_eq!(grid.card_at(1, 2).unwrap(), Some(red(0)));
    }

    #[test]
    fn test_serde_round_trip_keeps_cells() {
        let mut grid = Grid::from_rows(&["CX", "CC"]).unwrap();
        grid.place_card(1, 1, red(3)).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(back, grid);
        assert_eq!(back.occupied_count(), 1);
        assert_eq!(back.card_cell_count(), 3);
    }

    #[test]
    fn test_deserialize_rejects_invalid_layouts() {
        let even = r#"{"rows":2,"cols":2,"holes":[false,false,false,false],
            "cells":[null,null,null,null],"card_cells":4,"occupied":0}"#;
        let err = serde_json::from_str::<Grid>(even).unwrap_err();
        assert!(err.to_string().contains("odd number of card cells"));

        let short_mask = r#"{"rows":1,"cols":3,"holes":[false],"cells":[null,null,null]}"#;
        assert!(serde_json::from_str::<Grid>(short_mask).is_err());

        let short_cells = r#"{"rows":1,"cols":3,"holes":[false,false,false],"cells":[null]}"#;
        let err = serde_json::from_str::<Grid>(short_cells).unwrap_err();
        assert!(err.to_string().contains("grid has 1 cells, expected 3"));

        let card_in_hole = r#"{"rows":2,"cols":2,"holes":[false,true,false,false],
            "cells":[null,{"card":0,"owner":"Red"},null,null]}"#;
        let err = serde_json::from_str::<Grid>(card_in_hole).unwrap_err();
        assert!(err.to_string().contains("is a hole"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut grid = Grid::open(1, 1).unwrap();
        let snapshot = grid.clone();
        grid.place_card(0, 0, red(0)).unwrap();

        assert!(grid.is_full());
        assert!(!snapshot.is_full());
    }
}
