//! Game state: current board, move history, counters, and the legal-move cache.
//!
//! Legal moves exclude suicide and any move whose resulting board already
//! appears anywhere in the history (a positional superko over the whole game).
//! Passing is always legal; it costs the passer a prisoner handed to the
//! opponent.
//!
//! Scoring is territory scoring without seki: each empty region bordered by a
//! single color counts for that color, then prisoners are added.

use log::debug;

use crate::board::{Board, Color, Coord};
use crate::error::GoError;
use crate::go_move::Move;
use crate::group::{Border, Group};

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    move_list: Vec<Move>,
    move_history: Vec<Move>,
    /// Color the cached `move_list` was generated for; `None` when stale.
    move_list_color: Option<Color>,
    /// Indexed by `Color::index()`.
    prisoner_count: [usize; 2],
    pieces_placed: [usize; 2],
}

impl PartialEq for Game {
    /// Compares position and history; the move cache is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.move_history == other.move_history
            && self.prisoner_count == other.prisoner_count
            && self.pieces_placed == other.pieces_placed
    }
}

impl Game {
    /// New game on an empty board.
    ///
    /// # Errors
    /// `GoError::Init` if `size` is outside 3..=19.
    pub fn new(size: usize) -> Result<Self, GoError> {
        Ok(Self::from_board(Board::new(size)?))
    }

    /// New game starting from an arbitrary position, with zeroed counters.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            move_list: Vec::new(),
            move_history: Vec::new(),
            move_list_color: None,
            prisoner_count: [0; 2],
            pieces_placed: [0; 2],
        }
    }

    pub fn get_size(&self) -> Result<usize, GoError> {
        self.board.get_size()
    }

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    /// Overwrite the position without any rule checks. For seeding test positions.
    ///
    /// # Errors
    /// `GoError::Init` if the new board has a different size.
    pub fn set_board(&mut self, board: Board) -> Result<(), GoError> {
        if board.size() != self.board.size() {
            return Err(GoError::Init);
        }
        self.board = board;
        self.move_list_color = None;
        Ok(())
    }

    /// Moves from the last `generate_moves` call.
    pub fn get_move_list(&self) -> &[Move] {
        &self.move_list
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Prisoners taken, `[black, white]`.
    pub fn get_prisoner_count(&self) -> [usize; 2] {
        self.prisoner_count
    }

    /// Stones placed (passes included), `[black, white]`.
    pub fn get_pieces_placed(&self) -> [usize; 2] {
        self.pieces_placed
    }

    /// True if the board a move produces has occurred before in this game.
    pub fn check_move_history(&self, mv: &Move) -> bool {
        self.move_history.iter().any(|past| past.board() == mv.board())
    }

    /// Both players passed in succession.
    pub fn is_over(&self) -> bool {
        matches!(
            self.move_history.as_slice(),
            [.., a, b] if a.is_pass() && b.is_pass()
        )
    }

    /// Build the legal-move list for `color`, reusing the cached list when
    /// nothing changed since it was built for the same color. Returns whether
    /// any move exists, which is always true since passing is legal.
    ///
    /// # Errors
    /// `GoError::Unknown` if capture resolution hits an inconsistent board.
    pub fn generate_moves(&mut self, color: Color) -> Result<bool, GoError> {
        if self.move_list_color == Some(color) {
            return Ok(!self.move_list.is_empty());
        }

        debug!("generating moves for {color:?}");
        self.move_list.clear();

        for coord in self.board.coords() {
            if self.board.get(coord).is_some() {
                continue;
            }
            let mut candidate = Move::new(&self.board, coord)?;
            if !candidate.check_move(color)?.is_legal() {
                continue;
            }
            if self.check_move_history(&candidate) {
                continue;
            }
            self.move_list.push(candidate);
        }

        self.move_list.push(Move::pass(&self.board));
        self.move_list_color = Some(color);

        Ok(!self.move_list.is_empty())
    }

    /// Legal move for `color` at `piece` (or a pass for `None`), if there is one.
    pub fn find_move(
        &mut self,
        piece: Option<Coord>,
        color: Color,
    ) -> Result<Option<Move>, GoError> {
        self.generate_moves(color)?;
        Ok(self
            .move_list
            .iter()
            .find(|mv| mv.piece() == piece)
            .cloned())
    }

    /// Apply a move for `color`.
    ///
    /// Placements are checked against a freshly generated legal-move list, so
    /// moves computed against an older position are rejected. A pass is always
    /// accepted: it leaves the board alone, gives the opponent one prisoner
    /// and counts as a piece placed for the passer.
    ///
    /// # Errors
    /// `GoError::BadMove` if the move is not legal here. The game is unchanged.
    pub fn make_move(&mut self, mv: &Move, color: Color) -> Result<(), GoError> {
        if mv.is_pass() {
            self.move_history.push(Move::pass(&self.board));
            self.prisoner_count[color.opponent().index()] += 1;
            self.pieces_placed[color.index()] += 1;
            self.move_list_color = None;
            return Ok(());
        }

        self.generate_moves(color)?;
        if !self.move_list.contains(mv) {
            debug!("rejected move {:?} for {color:?}", mv.piece());
            return Err(GoError::BadMove);
        }

        self.board = mv.board().clone();
        self.move_history.push(mv.clone());
        self.prisoner_count[color.index()] += mv.prisoners_captured();
        self.pieces_placed[color.index()] += 1;
        self.move_list_color = None;
        Ok(())
    }

    /// Territory plus prisoners, `[black, white]`.
    pub fn calculate_scores(&self) -> [usize; 2] {
        let size = self.board.size();
        let mut scored = vec![false; size * size];
        let mut scores = [0usize; 2];

        for coord in self.board.coords() {
            if scored[coord.y * size + coord.x] || self.board.get(coord).is_some() {
                continue;
            }
            let territory = Group::on_board(&self.board, coord).expand_territory(&self.board);
            if let Border::Owned(color) = territory.border() {
                scores[color.index()] += territory.member_count();
            }
            for c in territory.members() {
                scored[c.y * size + c.x] = true;
            }
        }

        scores[0] += self.prisoner_count[0];
        scores[1] += self.prisoner_count[1];
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, x: usize, y: usize, color: Color) {
        let mv = game
            .find_move(Some(Coord::new(x, y)), color)
            .unwrap()
            .unwrap_or_else(|| panic!("({x}, {y}) should be legal for {color:?}"));
        game.make_move(&mv, color).unwrap();
    }

    #[test]
    fn test_empty_board_move_counts() {
        let mut game = Game::new(5).unwrap();
        assert!(game.generate_moves(Color::Black).unwrap());
        assert_eq!(game.get_move_list().len(), 26);

        let mut game = Game::new(3).unwrap();
        game.generate_moves(Color::White).unwrap();
        assert_eq!(game.get_move_list().len(), 10);
        assert!(game.get_move_list().last().unwrap().is_pass());
    }

    #[test]
    fn test_move_list_cache_follows_color() {
        let mut game = Game::new(3).unwrap();
        game.generate_moves(Color::Black).unwrap();
        let black_moves = game.get_move_list().to_vec();
        game.generate_moves(Color::Black).unwrap();
        assert_eq!(game.get_move_list(), black_moves.as_slice());

        game.generate_moves(Color::White).unwrap();
        assert_ne!(game.get_move_list(), black_moves.as_slice());
    }

    #[test]
    fn test_stale_move_rejected() {
        let mut game = Game::new(3).unwrap();
        let stale = game
            .find_move(Some(Coord::new(0, 0)), Color::Black)
            .unwrap()
            .unwrap();
        play(&mut game, 2, 2, Color::Black);
        let before = game.clone();
        assert_eq!(game.make_move(&stale, Color::Black), Err(GoError::BadMove));
        assert_eq!(game, before);
    }

    #[test]
    fn test_is_over_after_two_passes() {
        let mut game = Game::new(3).unwrap();
        let pass = Move::pass(game.get_board());
        game.make_move(&pass, Color::Black).unwrap();
        assert!(!game.is_over());
        game.make_move(&pass, Color::White).unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn test_set_board_size_mismatch() {
        let mut game = Game::new(3).unwrap();
        assert_eq!(game.set_board(Board::new(5).unwrap()), Err(GoError::Init));
    }

    #[test]
    fn test_scores_split_board() {
        let b = Some(Color::Black);
        let w = Some(Color::White);
        let grid = vec![vec![w, w, None], vec![b, b, b], vec![None, None, None]];
        let game = Game::from_board(Board::from_grid(&grid).unwrap());
        // (2,0) touches white and black; the top row is black's.
        assert_eq!(game.calculate_scores(), [3, 0]);
    }
}
