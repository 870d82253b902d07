//! Go Text Protocol (GTP) front end.
//!
//! Lets the engine be driven by GTP controllers and GUIs such as Sabaki or
//! GoGui. Moves for the engine come from `search::best_move` over the loaded
//! evaluator.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - odd sizes 3 to 19; replaces the evaluator if the size changes
//! - `clear_board`
//! - `play <color> <vertex>`
//! - `genmove <color>`
//! - `showboard`
//! - `final_score`
//!
//! Vertices use GTP notation: columns `A`..`T` without `I`, rows from 1 at
//! the bottom.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::board::{Color, Coord};
use crate::constants::DEFAULT_DEPTH;
use crate::error::{Error, GoError};
use crate::game::Game;
use crate::go_move::Move;
use crate::network::{GoNetwork, board_segments};
use crate::search::best_move;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// Column letters; `I` is skipped by convention.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRST";

/// Parse a GTP color argument.
fn parse_color(arg: &str) -> Option<Color> {
    match arg.to_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// Parse a vertex like `C4`. `Ok(None)` is a pass.
fn parse_vertex(arg: &str, size: usize) -> Result<Option<Coord>, String> {
    let upper = arg.to_uppercase();
    if upper == "PASS" {
        return Ok(None);
    }
    let mut chars = upper.chars();
    let letter = chars.next().ok_or("empty vertex")?;
    let x = COLUMNS
        .iter()
        .position(|&c| char::from(c) == letter)
        .ok_or_else(|| format!("invalid vertex: {arg}"))?;
    let row: usize = chars
        .as_str()
        .parse()
        .map_err(|_| format!("invalid vertex: {arg}"))?;
    if x >= size || row == 0 || row > size {
        return Err(format!("vertex off the board: {arg}"));
    }
    Ok(Some(Coord::new(x, row - 1)))
}

/// Format a coordinate as a GTP vertex.
fn format_vertex(piece: Option<Coord>) -> String {
    match piece {
        Some(c) => format!("{}{}", char::from(COLUMNS[c.x]), c.y + 1),
        None => "pass".to_string(),
    }
}

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    network: GoNetwork,
    /// Plies searched below each candidate move.
    depth: i32,
    rng: fastrand::Rng,
}

impl GtpEngine {
    /// Engine playing with `network` on an empty board of the network's size.
    pub fn new(network: GoNetwork, depth: i32, rng: fastrand::Rng) -> Result<Self, GoError> {
        Ok(Self {
            game: Game::new(network.board_size())?,
            network,
            depth,
            rng,
        })
    }

    /// Engine with a randomly initialized evaluator.
    pub fn with_random_network(
        board_size: usize,
        uniform: bool,
        mut rng: fastrand::Rng,
    ) -> Result<Self, Error> {
        let mut network = GoNetwork::new(board_size, uniform)?;
        network.initialize_random(&mut rng);
        Ok(Self::new(network, DEFAULT_DEPTH, rng)?)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if board_segments(size).is_ok() => self.resize(size),
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => match Game::new(self.network.board_size()) {
                Ok(game) => {
                    self.game = game;
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                let piece = match parse_vertex(args[1], self.network.board_size()) {
                    Ok(piece) => piece,
                    Err(e) => return (false, e),
                };
                self.play(piece, color)
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                self.genmove(color)
            }

            "showboard" => (true, format!("\n{}", self.game.get_board())),

            "final_score" => {
                let [black, white] = self.game.calculate_scores();
                let result = match black.cmp(&white) {
                    std::cmp::Ordering::Greater => format!("B+{}", black - white),
                    std::cmp::Ordering::Less => format!("W+{}", white - black),
                    std::cmp::Ordering::Equal => "0".to_string(),
                };
                (true, result)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Switch to a new board size, keeping the evaluator if it already fits.
    fn resize(&mut self, size: usize) -> (bool, String) {
        if size != self.network.board_size() {
            let uniform = self.network.is_uniform();
            match GoNetwork::new(size, uniform) {
                Ok(mut network) => {
                    network.initialize_random(&mut self.rng);
                    info!("board resized to {size}x{size}; using a fresh random network");
                    self.network = network;
                }
                Err(e) => return (false, e.to_string()),
            }
        }
        match Game::new(size) {
            Ok(game) => {
                self.game = game;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn play(&mut self, piece: Option<Coord>, color: Color) -> (bool, String) {
        let mv = match piece {
            None => Some(Move::pass(self.game.get_board())),
            Some(_) => match self.game.find_move(piece, color) {
                Ok(mv) => mv,
                Err(e) => return (false, e.to_string()),
            },
        };
        let Some(mv) = mv else {
            debug!("illegal move {} for {color:?}", format_vertex(piece));
            return (false, "illegal move".to_string());
        };
        match self.game.make_move(&mv, color) {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }

    fn genmove(&mut self, color: Color) -> (bool, String) {
        let mv = match best_move(&self.network, &self.game, color, self.depth) {
            Ok((mv, _)) => mv,
            Err(e) => return (false, e.to_string()),
        };
        match self.game.make_move(&mv, color) {
            Ok(()) => (true, format_vertex(mv.piece())),
            Err(e) => (false, e.to_string()),
        }
    }
}
