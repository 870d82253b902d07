//! Board representation: colors, coordinates, and the square grid of cells.
//!
//! The grid is stored row-major in a flat vector, `y * size + x`. Row 0 is
//! the bottom of the board when rendered.

use std::fmt;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::GoError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into the per-color counter arrays: black 0, white 1.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

/// A point on the board, 0-indexed from the bottom-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbors that lie on a board of the given size.
    /// Order: left, right, down, up. Corners yield 2, edges 3.
    pub fn adjacent(self, size: usize) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        let max = size.saturating_sub(1);
        [
            (x > 0).then(|| Coord::new(x - 1, y)),
            (x < max).then(|| Coord::new(x + 1, y)),
            (y > 0).then(|| Coord::new(x, y - 1)),
            (y < max).then(|| Coord::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Empty board of the given size.
    ///
    /// # Errors
    /// `GoError::Init` if `size` is outside 3..=19.
    pub fn new(size: usize) -> Result<Self, GoError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GoError::Init);
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Board from explicit rows, `grid[y][x]`.
    ///
    /// # Errors
    /// `GoError::Init` if the grid is not square or its size is outside 3..=19.
    pub fn from_grid(grid: &[Vec<Option<Color>>]) -> Result<Self, GoError> {
        let size = grid.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
            || grid.iter().any(|row| row.len() != size)
        {
            return Err(GoError::Init);
        }
        Ok(Self {
            size,
            cells: grid.iter().flatten().copied().collect(),
        })
    }

    /// Board dimension. Fails if the stored size is out of range.
    pub fn get_size(&self) -> Result<usize, GoError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size)
            || self.cells.len() != self.size * self.size
        {
            return Err(GoError::Unknown);
        }
        Ok(self.size)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn within_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    #[inline]
    fn idx(&self, coord: Coord) -> usize {
        coord.y * self.size + coord.x
    }

    /// Contents of a cell; `None` for empty or off-board points.
    pub fn get(&self, coord: Coord) -> Option<Color> {
        if !self.within_bounds(coord) {
            return None;
        }
        self.cells[self.idx(coord)]
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Option<Color>) {
        let i = self.idx(coord);
        self.cells[i] = cell;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Owned copy of the grid as rows, `grid[y][x]`.
    pub fn grid(&self) -> Vec<Vec<Option<Color>>> {
        self.cells.chunks(self.size).map(<[_]>::to_vec).collect()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let ch = match self.get(Coord::new(x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_all_sizes() {
        for size in (3..=19).step_by(2) {
            let board = Board::new(size).unwrap();
            assert_eq!(board.get_size(), Ok(size));
            assert!(board.is_empty());
        }
    }

    #[test]
    fn test_even_size_is_valid_board() {
        assert_eq!(Board::new(4).unwrap().size(), 4);
    }

    #[test]
    fn test_size_out_of_range() {
        assert_eq!(Board::new(2), Err(GoError::Init));
        assert_eq!(Board::new(20), Err(GoError::Init));
    }

    #[test]
    fn test_from_grid_not_square() {
        let grid = vec![vec![None; 3], vec![None; 3], vec![None; 2]];
        assert_eq!(Board::from_grid(&grid), Err(GoError::Init));

        let grid = vec![vec![None; 4]; 3];
        assert_eq!(Board::from_grid(&grid), Err(GoError::Init));
    }

    #[test]
    fn test_from_grid_roundtrip() {
        let grid = vec![
            vec![Some(Color::Black), None, None],
            vec![None, Some(Color::White), None],
            vec![None, None, None],
        ];
        let board = Board::from_grid(&grid).unwrap();
        assert_eq!(board.get(Coord::new(0, 0)), Some(Color::Black));
        assert_eq!(board.get(Coord::new(1, 1)), Some(Color::White));
        assert_eq!(board.grid(), grid);
    }

    #[test]
    fn test_within_bounds() {
        let board = Board::new(5).unwrap();
        assert!(board.within_bounds(Coord::new(4, 4)));
        assert!(!board.within_bounds(Coord::new(5, 0)));
        assert!(!board.within_bounds(Coord::new(0, 5)));
    }

    #[test]
    fn test_adjacent_counts() {
        assert_eq!(Coord::new(0, 0).adjacent(5).count(), 2);
        assert_eq!(Coord::new(2, 0).adjacent(5).count(), 3);
        assert_eq!(Coord::new(2, 2).adjacent(5).count(), 4);
        assert_eq!(Coord::new(4, 4).adjacent(5).count(), 2);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3).unwrap();
        board.set(Coord::new(0, 0), Some(Color::Black));
        board.set(Coord::new(2, 2), Some(Color::White));
        assert_eq!(board.to_string(), ". . O \n. . . \nX . . \n");
    }
}
