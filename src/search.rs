//! Depth-limited alpha-beta search over the network evaluator.
//!
//! Every branch owns its own copy of the game, so siblings never see each
//! other's moves. At the root each candidate move runs as its own rayon task
//! with private copies of the game and the network.

use log::{debug, info};
use rayon::prelude::*;

use crate::board::Color;
use crate::error::{Error, GoError};
use crate::game::Game;
use crate::go_move::Move;
use crate::network::GoNetwork;

/// Alpha-beta value of `game` with `move_color` to play, seen from
/// `player_color`. Leaves (depth exhausted or no legal move) are scored by
/// `network`.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta(
    network: &mut GoNetwork,
    game: &mut Game,
    depth: i32,
    mut alpha: f64,
    mut beta: f64,
    move_color: Color,
    maximizing: bool,
    player_color: Color,
) -> Result<f64, Error> {
    let has_moves = game.generate_moves(move_color)?;
    if depth <= 0 || !has_moves {
        return Ok(network.evaluate(game, player_color)?);
    }

    let moves = game.get_move_list().to_vec();
    for mv in &moves {
        let mut child = game.clone();
        child.make_move(mv, move_color)?;
        let value = alpha_beta(
            network,
            &mut child,
            depth - 1,
            alpha,
            beta,
            move_color.opponent(),
            !maximizing,
            player_color,
        )?;

        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }

    Ok(if maximizing { alpha } else { beta })
}

/// Value of playing `mv` for `color`, searched `depth` plies further.
fn score_root_move(
    network: &GoNetwork,
    game: &Game,
    mv: &Move,
    color: Color,
    depth: i32,
) -> Result<f64, Error> {
    let mut network = network.clone();
    let mut game = game.clone();
    game.make_move(mv, color)?;
    alpha_beta(
        &mut network,
        &mut game,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        color.opponent(),
        false,
        color,
    )
}

/// Best move for `color` and its value.
///
/// Root moves are scored in parallel; the highest value wins and ties go to
/// the move generated first, so the result does not depend on scheduling.
///
/// # Errors
/// Any error raised while scoring a root move.
pub fn best_move(
    network: &GoNetwork,
    game: &Game,
    color: Color,
    depth: i32,
) -> Result<(Move, f64), Error> {
    let mut root = game.clone();
    root.generate_moves(color)?;
    let moves = root.get_move_list().to_vec();
    debug!("searching {} root moves for {color:?} at depth {depth}", moves.len());

    let scored: Vec<f64> = moves
        .par_iter()
        .map(|mv| score_root_move(network, &root, mv, color, depth))
        .collect::<Result<_, _>>()?;

    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in scored.iter().enumerate() {
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((i, value));
        }
    }
    let (index, value) = best.ok_or(GoError::Unknown)?;
    let chosen = moves[index].clone();

    info!(
        "best move for {color:?}: {} (value {value:.4})",
        chosen
            .piece()
            .map_or_else(|| "pass".to_string(), |c| format!("({}, {})", c.x, c.y))
    );
    Ok((chosen, value))
}
