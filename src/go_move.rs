//! Candidate moves and capture resolution.
//!
//! A `Move` starts as a copy of the board before the move plus the point to
//! play. `check_move` places the stone, removes captured enemy strings, and
//! detects suicide, leaving the board after the move in place.

use crate::board::{Board, Color, Coord};
use crate::error::GoError;
use crate::group::Group;

/// Outcome of resolving a move on its board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveCheck {
    /// Pass moves never touch the board.
    Pass,
    /// Target point already holds a stone (the move was already resolved, or
    /// the point was occupied to begin with).
    Occupied,
    /// Placed string has no liberties after captures; it was taken back off.
    Suicide,
    /// Legal placement; the liberties of the resulting string.
    Placed { liberties: usize },
}

impl MoveCheck {
    /// True for passes and legal placements.
    pub fn is_legal(self) -> bool {
        matches!(self, MoveCheck::Pass | MoveCheck::Placed { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    board: Board,
    /// `None` for a pass.
    piece: Option<Coord>,
    prisoners_captured: usize,
}

impl Move {
    /// Pass move; carries the current board unchanged.
    pub fn pass(board: &Board) -> Self {
        Self {
            board: board.clone(),
            piece: None,
            prisoners_captured: 0,
        }
    }

    /// Placement at `piece` on a copy of `board`.
    ///
    /// # Errors
    /// `GoError::Init` if `piece` is off the board.
    pub fn new(board: &Board, piece: Coord) -> Result<Self, GoError> {
        if !board.within_bounds(piece) {
            return Err(GoError::Init);
        }
        Ok(Self {
            board: board.clone(),
            piece: Some(piece),
            prisoners_captured: 0,
        })
    }

    /// Board after the move once `check_move` has run; before that, the board before it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<Coord> {
        self.piece
    }

    pub fn prisoners_captured(&self) -> usize {
        self.prisoners_captured
    }

    pub fn is_pass(&self) -> bool {
        self.piece.is_none()
    }

    /// Remove every member of `group` from the board. All members must hold
    /// `color`; otherwise nothing is removed and `GoError::Unknown` is returned.
    fn remove_string(&mut self, group: &Group, color: Color) -> Result<(), GoError> {
        if group
            .members()
            .iter()
            .any(|&c| self.board.get(c) != Some(color))
        {
            return Err(GoError::Unknown);
        }
        for &c in group.members() {
            self.board.set(c, None);
        }
        Ok(())
    }

    /// Place a `color` stone and resolve captures and suicide.
    ///
    /// Captured enemy strings are removed and counted in
    /// `prisoners_captured`. A suicidal string is removed again and reported
    /// as `MoveCheck::Suicide`.
    ///
    /// # Errors
    /// `GoError::Unknown` if a string built from this board cannot be removed from it.
    pub fn check_move(&mut self, color: Color) -> Result<MoveCheck, GoError> {
        let Some(piece) = self.piece else {
            return Ok(MoveCheck::Pass);
        };
        if self.board.get(piece).is_some() {
            return Ok(MoveCheck::Occupied);
        }
        let size = self.board.get_size()?;
        self.board.set(piece, Some(color));

        let mut own = Group::with_member(size, piece)?;
        let mut enemies = Vec::with_capacity(4);
        for n in piece.adjacent(size) {
            match self.board.get(n) {
                None => {
                    own.append_liberty(n);
                }
                Some(c) if c == color => {
                    own.append_member(n);
                }
                Some(_) => enemies.push(n),
            }
        }

        let enemy = color.opponent();
        for pt in enemies {
            // Already removed as part of an earlier string.
            if self.board.get(pt).is_none() {
                continue;
            }
            let string = Group::with_member(size, pt)?.expand_string(&self.board, enemy);
            if string.liberty_count() == 0 {
                self.remove_string(&string, enemy)?;
                self.prisoners_captured += string.member_count();
            }
        }

        // Captures may have opened new liberties.
        let own = own.expand_string(&self.board, color);
        if own.liberty_count() == 0 {
            self.remove_string(&own, color)?;
            return Ok(MoveCheck::Suicide);
        }

        Ok(MoveCheck::Placed {
            liberties: own.liberty_count(),
        })
    }
}
