//! Constants for board limits, network segmentation, and engine defaults.
//!
//! Board size is chosen at runtime, so unlike a fixed-size engine nothing here
//! depends on a compile-time `N`. Every size the engine accepts lies in
//! `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`; the evaluator additionally requires the
//! size to be one of the odd segment sizes below.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board (3x3).
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board (19x19).
pub const MAX_BOARD_SIZE: usize = 19;

// =============================================================================
// Network Segmentation
// =============================================================================

/// Smallest segment (sub-board) fed to a first-layer network.
pub const SEGMENT_MIN: usize = 3;

/// Largest segment size.
pub const SEGMENT_MAX: usize = 19;

/// Step between consecutive segment sizes (3, 5, 7, ...).
pub const SEGMENT_DIVISION: usize = 2;

/// Number of game counters appended to the second-layer input
/// (pieces placed, own prisoners, opponent prisoners).
pub const COUNTER_INPUTS: usize = 3;

// =============================================================================
// Search and Play
// =============================================================================

/// Default alpha-beta depth below each root move.
pub const DEFAULT_DEPTH: i32 = 1;

/// Default mutation radius for weight perturbation.
pub const DEFAULT_MUTATION_RADIUS: f64 = 0.01;

/// Maximum plies in an engine-vs-engine game before it is cut off.
/// Three times the largest board area, same bound a playout would use.
pub const MAX_GAME_LEN: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE * 3;
