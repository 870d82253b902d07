//! Hierarchical position evaluator.
//!
//! The board is cut into every square window of every odd size from 3 up to
//! the board size (dense, overlapping tiling). Each window goes through a
//! small first-layer network; the first-layer outputs plus three normalized
//! game counters go through one second-layer network whose single output is
//! the position value, roughly in (-1, 1).
//!
//! In non-uniform mode every window position owns its own first-layer
//! network. In uniform mode all windows of one size share a network, which is
//! what lets a network trained on a small board carry over to a larger one.

use std::io::{BufRead, Write};

use log::{info, warn};

use crate::board::{Color, Coord};
use crate::constants::{
    COUNTER_INPUTS, MAX_BOARD_SIZE, MIN_BOARD_SIZE, SEGMENT_DIVISION, SEGMENT_MAX, SEGMENT_MIN,
};
use crate::error::NetworkError;
use crate::game::Game;
use crate::neural_net::NeuralNet;

/// Segment sizes for a board: 3, 5, ..., `board_size`.
///
/// # Errors
/// `NetworkError::Segment` unless `board_size` is itself one of those sizes.
pub fn board_segments(board_size: usize) -> Result<Vec<usize>, NetworkError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
        return Err(NetworkError::Segment(board_size));
    }
    let segments: Vec<usize> = (SEGMENT_MIN..=SEGMENT_MAX.min(board_size))
        .step_by(SEGMENT_DIVISION)
        .collect();
    if segments.last() != Some(&board_size) {
        return Err(NetworkError::Segment(board_size));
    }
    Ok(segments)
}

/// Number of window positions of `segment` size on a `board_size` board.
#[inline]
fn window_count(board_size: usize, segment: usize) -> usize {
    let per_axis = board_size - segment + 1;
    per_axis * per_axis
}

/// Cut the board into windows from `color`'s point of view: 1 for own
/// stones, -1 for enemy stones, 0 for empty points.
///
/// Windows are ordered by size, then by origin row, then origin column; each
/// window is flattened row by row.
pub fn network_translation(game: &Game, color: Color) -> Result<Vec<Vec<f64>>, NetworkError> {
    let board = game.get_board();
    let board_size = board.size();
    let segments = board_segments(board_size)?;

    let mut output = Vec::new();
    for segment in segments {
        for y_start in 0..=board_size - segment {
            for x_start in 0..=board_size - segment {
                let mut window = Vec::with_capacity(segment * segment);
                for y in 0..segment {
                    for x in 0..segment {
                        let value = match board.get(Coord::new(x_start + x, y_start + y)) {
                            Some(c) if c == color => 1.0,
                            Some(_) => -1.0,
                            None => 0.0,
                        };
                        window.push(value);
                    }
                }
                output.push(window);
            }
        }
    }
    Ok(output)
}

/// Layer widths of a first-layer network for windows of `segment` size.
fn segment_topology(segment: usize) -> [usize; 4] {
    let input = segment * segment;
    let hidden = input * 4 / 3;
    [input, hidden, hidden / 4, 1]
}

/// Layer widths of the second-layer network.
fn combiner_topology(inputs: usize) -> [usize; 3] {
    [inputs, inputs * 2 / 3, 1]
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoNetwork {
    board_size: usize,
    uniform: bool,
    /// First-layer network used by each window, in translation order.
    window_net: Vec<usize>,
    layer1: Vec<NeuralNet>,
    layer2: NeuralNet,
}

impl GoNetwork {
    /// Zero-weight evaluator for a board of `board_size`.
    ///
    /// # Errors
    /// - `NetworkError::Init` if `board_size` is outside 3..=19
    /// - `NetworkError::Segment` if it is not an odd segment size
    pub fn new(board_size: usize, uniform: bool) -> Result<Self, NetworkError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(NetworkError::Init);
        }
        let segments = board_segments(board_size)?;

        let mut layer1 = Vec::new();
        let mut window_net = Vec::new();
        for &segment in &segments {
            let topology = segment_topology(segment);
            let windows = window_count(board_size, segment);
            if uniform {
                window_net.extend(std::iter::repeat_n(layer1.len(), windows));
                layer1.push(NeuralNet::new(&topology)?);
            } else {
                for _ in 0..windows {
                    window_net.push(layer1.len());
                    layer1.push(NeuralNet::new(&topology)?);
                }
            }
        }

        let layer2 = NeuralNet::new(&combiner_topology(window_net.len() + COUNTER_INPUTS))?;

        Ok(Self {
            board_size,
            uniform,
            window_net,
            layer1,
            layer2,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn layer1(&self) -> &[NeuralNet] {
        &self.layer1
    }

    pub fn layer2(&self) -> &NeuralNet {
        &self.layer2
    }

    /// Number of windows (segments) `feed_forward` expects.
    pub fn segment_count(&self) -> usize {
        self.window_net.len()
    }

    /// Segment size handled by a first-layer network.
    fn net_segment(net: &NeuralNet) -> usize {
        net.input_width().isqrt()
    }

    pub fn initialize_random(&mut self, rng: &mut fastrand::Rng) {
        for net in &mut self.layer1 {
            net.initialize_random(rng);
        }
        self.layer2.initialize_random(rng);
    }

    pub fn mutate(&mut self, radius: f64, rng: &mut fastrand::Rng) {
        for net in &mut self.layer1 {
            net.mutate(radius, rng);
        }
        self.layer2.mutate(radius, rng);
    }

    /// Run the evaluator on a translated board plus game counters.
    ///
    /// Counters are divided by half the number of board points (rounded down).
    ///
    /// # Errors
    /// `NetworkError::FeedForward` if the number or sizes of segments do not
    /// match this network. No network is run in that case.
    pub fn feed_forward(
        &mut self,
        segments: &[Vec<f64>],
        pieces_placed: usize,
        prisoners: usize,
        opponent_prisoners: usize,
    ) -> Result<f64, NetworkError> {
        if segments.len() != self.window_net.len()
            || segments
                .iter()
                .zip(&self.window_net)
                .any(|(segment, &net)| segment.len() != self.layer1[net].input_width())
        {
            return Err(NetworkError::FeedForward);
        }

        let mut inputs = Vec::with_capacity(segments.len() + COUNTER_INPUTS);
        for (segment, &net) in segments.iter().zip(&self.window_net) {
            inputs.push(self.layer1[net].feed_forward(segment)?);
        }

        let scale = (self.board_size * self.board_size / 2) as f64;
        inputs.push(pieces_placed as f64 / scale);
        inputs.push(prisoners as f64 / scale);
        inputs.push(opponent_prisoners as f64 / scale);

        self.layer2.feed_forward(&inputs)
    }

    /// Output of the last `feed_forward`.
    pub fn get_output(&self) -> f64 {
        self.layer2.output()[0]
    }

    /// Value of `game` from `color`'s point of view.
    pub fn evaluate(&mut self, game: &Game, color: Color) -> Result<f64, NetworkError> {
        if game.get_board().size() != self.board_size {
            return Err(NetworkError::FeedForward);
        }
        let segments = network_translation(game, color)?;
        let placed = game.get_pieces_placed();
        let prisoners = game.get_prisoner_count();
        self.feed_forward(
            &segments,
            placed[color.index()],
            prisoners[color.index()],
            prisoners[color.opponent().index()],
        )
    }

    /// Seed this network from a trained network for a board two sizes smaller.
    ///
    /// Every segment size the smaller board already has is carried over. In
    /// uniform mode that is a straight copy per size. Otherwise each window
    /// here takes a copy of a randomly chosen smaller-board network of the
    /// same size, since window positions do not line up between boards. The
    /// new largest segment network and the second layer are randomized.
    ///
    /// # Errors
    /// `NetworkError::Scale` if `smaller` is not exactly two sizes smaller or
    /// the uniform settings differ.
    pub fn scale_network(
        &mut self,
        smaller: &GoNetwork,
        rng: &mut fastrand::Rng,
    ) -> Result<(), NetworkError> {
        if smaller.board_size + 2 != self.board_size || smaller.uniform != self.uniform {
            return Err(NetworkError::Scale);
        }
        info!(
            "scaling {0}x{0} network to {1}x{1}",
            smaller.board_size, self.board_size
        );

        let mut layer1 = self.layer1.clone();
        for net in &mut layer1 {
            let segment = Self::net_segment(net);
            let pool: Vec<&NeuralNet> = smaller
                .layer1
                .iter()
                .filter(|n| Self::net_segment(n) == segment)
                .collect();
            if pool.is_empty() {
                net.initialize_random(rng);
            } else {
                *net = pool[rng.usize(..pool.len())].clone();
            }
        }

        self.layer1 = layer1;
        self.layer2.initialize_random(rng);
        Ok(())
    }

    /// Write every first-layer network in order, then the second layer.
    pub fn export_weights<W: Write>(&self, out: &mut W) -> Result<(), NetworkError> {
        for net in &self.layer1 {
            net.export_weights(out)?;
        }
        self.layer2.export_weights(out)
    }

    /// Read weights written by `export_weights`. Either every network is
    /// replaced or, on error, none is.
    pub fn import_weights<R: BufRead>(&mut self, input: &mut R) -> Result<(), NetworkError> {
        let mut layer1 = self.layer1.clone();
        let mut layer2 = self.layer2.clone();
        let result = layer1
            .iter_mut()
            .chain(std::iter::once(&mut layer2))
            .try_for_each(|net| net.import_weights(input));
        if let Err(e) = result {
            warn!("weight import failed for {0}x{0} network: {e}", self.board_size);
            return Err(e);
        }
        self.layer1 = layer1;
        self.layer2 = layer2;
        Ok(())
    }
}
