use super::cell::{Card, Cell, Idx};
use super::error::{EngineError, Result};

/// Line is an ordered view over one row or one column of the board. Position 0 is the left or
/// top edge. Shifting and merging only ever go through this view, so both axes share one
/// algorithm and no cell is copied out of the board.
pub(crate) trait Line {
    fn len(&self) -> usize;

    fn cell(&self, pos: usize) -> &Cell;

    fn cell_mut(&mut self, pos: usize) -> &mut Cell;

    /// Exchange the value and occupied state of two positions. Cell identity stays put.
    fn swap_state(&mut self, a: usize, b: usize) {
        let state_a = self.cell(a).state();
        let state_b = self.cell(b).state();
        self.cell_mut(a).set_state(state_b);
        self.cell_mut(b).set_state(state_a);
    }
}

impl Line for [Cell] {
    fn len(&self) -> usize {
        <[Cell]>::len(self)
    }

    fn cell(&self, pos: usize) -> &Cell {
        &self[pos]
    }

    fn cell_mut(&mut self, pos: usize) -> &mut Cell {
        &mut self[pos]
    }
}

/// Column maps line positions to `(pos, col)` on the borrowed grid.
pub(crate) struct Column<'a> {
    rows: &'a mut [Vec<Cell>],
    col: usize,
}

impl<'a> Line for Column<'a> {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, pos: usize) -> &Cell {
        &self.rows[pos][self.col]
    }

    fn cell_mut(&mut self, pos: usize) -> &mut Cell {
        &mut self.rows[pos][self.col]
    }
}

/// Board owns the grid of cells for one game session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Board {
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// An empty `size` x `size` board.
    pub(crate) fn new(size: usize) -> Self {
        let cells = (0..size)
            .map(|row| (0..size).map(|col| Cell::new(Idx(row, col))).collect())
            .collect();
        Self { cells }
    }

    /// Build a board from raw tile values, row by row. Zero values are empty cells.
    pub(crate) fn from_values(values: &[Vec<Card>]) -> Self {
        let cells = values
            .iter()
            .enumerate()
            .map(|(row, vs)| {
                vs.iter()
                    .enumerate()
                    .map(|(col, v)| {
                        let mut cell = Cell::new(Idx(row, col));
                        cell.set(*v);
                        cell
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    pub(crate) fn rows(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cols(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }

    pub(crate) fn get_mut(&mut self, idx: &Idx) -> Option<&mut Cell> {
        self.cells
            .get_mut(idx.row())
            .and_then(|row| row.get_mut(idx.col()))
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [Cell]> {
        self.cells.get_mut(row).map(|r| r.as_mut_slice())
    }

    pub(crate) fn column_mut(&mut self, col: usize) -> Result<Column<'_>> {
        if self.cells.is_empty() {
            return Err(EngineError::NoGrid);
        }
        let width = self.cols();
        if col >= width {
            return Err(EngineError::ColumnOutOfBounds { col, width });
        }
        Ok(Column {
            rows: self.cells.as_mut_slice(),
            col,
        })
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    /// Adjacent pairs of cells along every row and then every column.
    pub(crate) fn adjacent_pairs(&self) -> impl Iterator<Item = (&Cell, &Cell)> {
        let horizontal = self
            .cells
            .iter()
            .flat_map(|row| row.windows(2).map(|w| (&w[0], &w[1])));
        let vertical = self
            .cells
            .windows(2)
            .flat_map(|rows| rows[0].iter().zip(rows[1].iter()));
        horizontal.chain(vertical)
    }

    /// Tile values row by row, with zero for unoccupied cells.
    pub(crate) fn values(&self) -> Vec<Vec<Card>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| if c.occupied() { c.value() } else { 0 })
                    .collect()
            })
            .collect()
    }

    /// Overwrite every cell from a `values()` snapshot of the same shape, dropping animations.
    pub(crate) fn restore(&mut self, values: &[Vec<Card>]) {
        for (row, vs) in self.cells.iter_mut().zip(values) {
            for (cell, v) in row.iter_mut().zip(vs) {
                cell.reset();
                cell.set(*v);
            }
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line = row
                .iter()
                .map(|c| format!("{:>5}", c.to_string()))
                .collect::<Vec<_>>()
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    pub(crate) fn get(&self, idx: &Idx) -> Option<&Cell> {
        self.cells.get(idx.row()).and_then(|row| row.get(idx.col()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn grid() -> Board {
        Board::from_values(&[
            vec![0, 2, 0, 4],
            vec![8, 16, 0, 0],
            vec![0, 32, 0, 0],
            vec![0, 64, 0, 128],
        ])
    }

    #[test]
    fn new_board_is_empty_and_square() {
        let board = Board::new(5);
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 5);
        assert!(board.iter().all(|c| !c.occupied() && c.value() == 0));
        assert_eq!(board.get(&Idx(4, 3)).map(|c| c.idx()), Some(Idx(4, 3)));
    }

    #[test]
    fn column_view_maps_positions_to_rows() {
        let mut board = grid();
        let column = board.column_mut(1).expect("column 1 exists");
        let values: Vec<Card> = (0..column.len()).map(|p| column.cell(p).value()).collect();
        assert_eq!(values, vec![2, 16, 32, 64]);
        assert_eq!(column.cell(2).idx(), Idx(2, 1));
    }

    #[test]
    fn column_view_writes_through() {
        let mut board = grid();
        {
            let mut column = board.column_mut(3).expect("column 3 exists");
            column.swap_state(0, 1);
        }
        assert_eq!(board.get(&Idx(0, 3)).map(|c| c.occupied()), Some(false));
        assert_eq!(board.get(&Idx(1, 3)).map(|c| c.value()), Some(4));
    }

    #[test]
    fn column_out_of_bounds() {
        let mut board = grid();
        assert_eq!(
            board.column_mut(7).err(),
            Some(EngineError::ColumnOutOfBounds { col: 7, width: 4 })
        );
        let mut empty = Board::new(0);
        assert_eq!(empty.column_mut(0).err(), Some(EngineError::NoGrid));
    }

    #[test]
    fn swap_state_keeps_identity() {
        let mut board = grid();
        let row = board.row_mut(0).expect("row 0 exists");
        row.swap_state(0, 1);
        assert_eq!(row[0].idx(), Idx(0, 0));
        assert_eq!(row[0].value(), 2);
        assert!(!row[1].occupied());
    }

    #[test]
    fn adjacent_pairs_cover_rows_and_columns() {
        let board = Board::new(4);
        // 3 pairs per row and per column
        assert_eq!(board.adjacent_pairs().count(), 24);
    }

    #[test]
    fn restore_roundtrips_values() {
        let mut board = grid();
        let snapshot = board.values();
        board.iter_mut().for_each(|c| c.reset());
        assert_ne!(board.values(), snapshot);
        board.restore(&snapshot);
        assert_eq!(board, grid());
    }
}
