//! Scalable-Go: a Go engine driven by a board-size-scalable neural evaluator.
//!
//! The rules engine handles captures, suicide, a whole-game repetition rule,
//! and territory scoring on any square board from 3x3 to 19x19. Positions are
//! valued by a hierarchical network that looks at every square window of
//! every odd size, and moves are chosen by a shallow alpha-beta search whose
//! root moves run in parallel.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, segment sizes, and engine defaults
//! - [`error`] - Error kinds for rules, evaluator, and search
//! - [`board`] - Colors, coordinates, and the board grid
//! - [`group`] - Strings of stones and territory regions
//! - [`go_move`] - Candidate moves and capture resolution
//! - [`game`] - Game state, move generation, and scoring
//! - [`neural_net`] - Fully connected feed-forward network
//! - [`network`] - Hierarchical position evaluator
//! - [`search`] - Alpha-beta search
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use scalable_go::board::Color;
//! use scalable_go::game::Game;
//! use scalable_go::network::GoNetwork;
//! use scalable_go::search::best_move;
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut network = GoNetwork::new(5, true).unwrap();
//! network.initialize_random(&mut rng);
//!
//! let mut game = Game::new(5).unwrap();
//! let (mv, value) = best_move(&network, &game, Color::Black, 0).unwrap();
//! game.make_move(&mv, Color::Black).unwrap();
//! println!("value {value:.3}\n{}", game.get_board());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod go_move;
pub mod group;
pub mod gtp;
pub mod network;
pub mod neural_net;
pub mod search;
