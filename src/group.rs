//! Connected groups ("strings") of stones and empty territory regions.
//!
//! A group is grown from a seed by breadth-first flood fill. Gameplay groups
//! collect same-colored stones plus the empty points around them (liberties);
//! territory groups collect connected empty points and remember which colors
//! touch their border.
//!
//! Groups are built fresh for every capture or scoring check and then dropped.

use crate::board::{Board, Color, Coord};
use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::GoError;

/// Which colors border a territory region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Border {
    /// Bordered by both colors, or by none at all.
    #[default]
    Neutral,
    /// Bordered exclusively by one color.
    Owned(Color),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    size: usize,
    members: Vec<Coord>,
    liberties: Vec<Coord>,
    /// Membership flags indexed `y * size + x`, mirroring `members`/`liberties`.
    is_member: Vec<bool>,
    is_liberty: Vec<bool>,
    border: Border,
}

impl Group {
    /// Empty group for a board of the given size.
    ///
    /// # Errors
    /// `GoError::Init` if `size` is outside 3..=19.
    pub fn new(size: usize) -> Result<Self, GoError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GoError::Init);
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            members: Vec::new(),
            liberties: Vec::new(),
            is_member: vec![false; size * size],
            is_liberty: vec![false; size * size],
            border: Border::Neutral,
        }
    }

    /// Group containing a single seed coordinate.
    pub fn with_member(size: usize, seed: Coord) -> Result<Self, GoError> {
        let mut group = Self::new(size)?;
        if !group.append_member(seed) {
            return Err(GoError::Init);
        }
        Ok(group)
    }

    /// Group seeded at a point of `board`. A board always has a valid size,
    /// so this cannot fail; an off-board seed yields an empty group.
    pub fn on_board(board: &Board, seed: Coord) -> Self {
        let mut group = Self::empty(board.size());
        group.append_member(seed);
        group
    }

    #[inline]
    fn idx(&self, coord: Coord) -> usize {
        coord.y * self.size + coord.x
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn touches_members(&self, coord: Coord) -> bool {
        coord
            .adjacent(self.size)
            .any(|n| self.is_member[self.idx(n)])
    }

    /// Add a member. Returns false if the coordinate is already a member or a
    /// liberty, or if it is not adjacent to an existing member. The first
    /// member needs no neighbor.
    pub fn append_member(&mut self, coord: Coord) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        let i = self.idx(coord);
        if self.is_liberty[i] || self.is_member[i] {
            return false;
        }
        if !self.members.is_empty() && !self.touches_members(coord) {
            return false;
        }
        self.is_member[i] = true;
        self.members.push(coord);
        true
    }

    /// Add a liberty. Returns false if the group has no members yet, the
    /// coordinate is a member or already a liberty, or it does not touch a member.
    pub fn append_liberty(&mut self, coord: Coord) -> bool {
        if self.members.is_empty() || !self.in_bounds(coord) {
            return false;
        }
        let i = self.idx(coord);
        if self.is_member[i] || self.is_liberty[i] || !self.touches_members(coord) {
            return false;
        }
        self.is_liberty[i] = true;
        self.liberties.push(coord);
        true
    }

    pub fn members(&self) -> &[Coord] {
        &self.members
    }

    pub fn liberties(&self) -> &[Coord] {
        &self.liberties
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.is_member[self.idx(coord)]
    }

    /// Grow a string of `color` stones from the current members until it is
    /// maximal, collecting every adjacent empty point as a liberty.
    #[must_use]
    pub fn expand_string(mut self, board: &Board, color: Color) -> Self {
        let mut queue = self.members.clone();
        let mut head = 0;

        while head < queue.len() {
            let pt = queue[head];
            head += 1;

            for n in pt.adjacent(self.size) {
                match board.get(n) {
                    None => {
                        // Duplicates are rejected by append_liberty.
                        self.append_liberty(n);
                    }
                    Some(c) if c == color => {
                        if self.append_member(n) {
                            queue.push(n);
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        self
    }

    /// Grow a region of empty points from the current members and classify its
    /// border: owned by a color if every bordering stone is that color,
    /// neutral if both colors (or none) touch it.
    #[must_use]
    pub fn expand_territory(mut self, board: &Board) -> Self {
        let mut queue = self.members.clone();
        let mut head = 0;
        let mut first_border: Option<Color> = None;
        let mut neutral = false;

        while head < queue.len() {
            let pt = queue[head];
            head += 1;

            for n in pt.adjacent(self.size) {
                match board.get(n) {
                    None => {
                        if self.append_member(n) {
                            queue.push(n);
                        }
                    }
                    Some(c) if !neutral => match first_border {
                        None => first_border = Some(c),
                        Some(first) if first != c => neutral = true,
                        Some(_) => {}
                    },
                    Some(_) => {}
                }
            }
        }

        self.border = match (neutral, first_border) {
            (false, Some(color)) => Border::Owned(color),
            _ => Border::Neutral,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
        let mut grid = vec![vec![None; size]; size];
        for &(x, y) in black {
            grid[y][x] = Some(Color::Black);
        }
        for &(x, y) in white {
            grid[y][x] = Some(Color::White);
        }
        Board::from_grid(&grid).unwrap()
    }

    #[test]
    fn test_append_member_rejects_duplicates_and_gaps() {
        let mut group = Group::new(5).unwrap();
        assert!(group.append_member(Coord::new(1, 1)));
        assert!(!group.append_member(Coord::new(1, 1)));
        assert!(!group.append_member(Coord::new(3, 3)), "not adjacent");
        assert!(group.append_member(Coord::new(1, 2)));
        assert_eq!(group.member_count(), 2);
    }

    #[test]
    fn test_member_and_liberty_are_exclusive() {
        let mut group = Group::new(5).unwrap();
        assert!(
            !group.append_liberty(Coord::new(0, 0)),
            "needs a member first"
        );
        assert!(group.append_member(Coord::new(1, 1)));
        assert!(group.append_liberty(Coord::new(1, 0)));
        assert!(!group.append_liberty(Coord::new(1, 0)));
        assert!(!group.append_member(Coord::new(1, 0)));
        assert!(!group.append_liberty(Coord::new(1, 1)));
    }

    #[test]
    fn test_expand_string_counts_liberties() {
        let board = board_with(5, &[(1, 1), (2, 1), (2, 2)], &[(3, 1)]);
        let group = Group::with_member(5, Coord::new(1, 1))
            .unwrap()
            .expand_string(&board, Color::Black);
        assert_eq!(group.member_count(), 3);
        // (1,2) touches two members but counts once.
        assert_eq!(group.liberty_count(), 6);
        let mut liberties = group.liberties().to_vec();
        liberties.sort_by_key(|c| (c.y, c.x));
        let expected =
            [(1, 0), (2, 0), (0, 1), (1, 2), (3, 2), (2, 3)].map(|(x, y)| Coord::new(x, y));
        assert_eq!(liberties, expected);
        assert!(group.contains(Coord::new(2, 2)));
        assert!(!group.contains(Coord::new(3, 1)));
    }

    #[test]
    fn test_expand_string_no_liberties() {
        let board = board_with(3, &[(0, 0)], &[(1, 0), (0, 1)]);
        let group = Group::with_member(3, Coord::new(0, 0))
            .unwrap()
            .expand_string(&board, Color::Black);
        assert_eq!(group.liberty_count(), 0);
    }

    #[test]
    fn test_territory_single_owner() {
        let board = board_with(3, &[(0, 1), (1, 1), (2, 1)], &[]);
        let group = Group::with_member(3, Coord::new(0, 0))
            .unwrap()
            .expand_territory(&board);
        assert_eq!(group.member_count(), 3);
        assert_eq!(group.border(), Border::Owned(Color::Black));
    }

    #[test]
    fn test_territory_neutral() {
        let board = board_with(3, &[(0, 1)], &[(2, 1)]);
        let group = Group::with_member(3, Coord::new(1, 1))
            .unwrap()
            .expand_territory(&board);
        assert_eq!(group.member_count(), 7);
        assert_eq!(group.border(), Border::Neutral);
    }

    #[test]
    fn test_on_board_seed() {
        let board = Board::new(3).unwrap();
        let group = Group::on_board(&board, Coord::new(2, 2));
        assert_eq!(group.members(), &[Coord::new(2, 2)]);
        assert_eq!(group, Group::with_member(3, Coord::new(2, 2)).unwrap());
        assert_eq!(Group::on_board(&board, Coord::new(3, 0)).member_count(), 0);
    }

    #[test]
    fn test_territory_blank_board_is_neutral() {
        let board = Board::new(3).unwrap();
        let group = Group::with_member(3, Coord::new(0, 0))
            .unwrap()
            .expand_territory(&board);
        assert_eq!(group.member_count(), 9);
        assert_eq!(group.border(), Border::Neutral);
    }
}
