//! Fully connected feed-forward network with a bias neuron on every
//! non-output layer.
//!
//! Activation is the softsign `x / (1 + |x|)`, applied to every neuron past
//! the input layer. Weights are stored per layer as rows of
//! `weights[layer][to][from]`, where `from` includes the bias as its last entry.
//!
//! ## Weight format
//!
//! Three lines per network:
//!
//! ```text
//! 4
//! 9,12,3,1,
//! 4607182418800017408,-4616189618054758400,...,
//! ```
//!
//! The layer count, the layer widths (bias excluded), then every weight as
//! the bit pattern of its `f64` read as an `i64`, layer by layer and row by
//! row. Storing bit patterns keeps the round-trip exact.

use std::io::{BufRead, Write};

use crate::error::NetworkError;

/// Softsign squashing function.
#[inline]
fn activate(x: f64) -> f64 {
    x / (1.0 + x.abs())
}

#[derive(Clone, Debug)]
pub struct NeuralNet {
    /// Neurons per layer, bias excluded.
    layer_widths: Vec<usize>,
    /// Activations from the last feed forward. Non-output layers carry a
    /// trailing bias neuron fixed at 1.0.
    neurons: Vec<Vec<f64>>,
    weights: Vec<Vec<Vec<f64>>>,
}

impl PartialEq for NeuralNet {
    /// Two networks are equal when their topology and weights match;
    /// activations left over from earlier inputs are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.layer_widths == other.layer_widths && self.weights == other.weights
    }
}

impl NeuralNet {
    /// Network with the given layer widths and all weights zero.
    ///
    /// # Errors
    /// `NetworkError::Init` for fewer than two layers or an empty layer.
    pub fn new(layer_widths: &[usize]) -> Result<Self, NetworkError> {
        if layer_widths.len() < 2 || layer_widths.contains(&0) {
            return Err(NetworkError::Init);
        }
        let last = layer_widths.len() - 1;

        let neurons = layer_widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                if i == last {
                    vec![0.0; width]
                } else {
                    let mut layer = vec![0.0; width + 1];
                    layer[width] = 1.0;
                    layer
                }
            })
            .collect();

        let weights = layer_widths
            .windows(2)
            .map(|pair| vec![vec![0.0; pair[0] + 1]; pair[1]])
            .collect();

        Ok(Self {
            layer_widths: layer_widths.to_vec(),
            neurons,
            weights,
        })
    }

    pub fn layer_widths(&self) -> &[usize] {
        &self.layer_widths
    }

    pub fn input_width(&self) -> usize {
        self.layer_widths[0]
    }

    pub fn weights(&self) -> &[Vec<Vec<f64>>] {
        &self.weights
    }

    fn weights_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.weights.iter_mut().flatten().flatten()
    }

    /// Set every weight independently and uniformly in [-1, 1].
    pub fn initialize_random(&mut self, rng: &mut fastrand::Rng) {
        for w in self.weights_mut() {
            *w = rng.f64() * 2.0 - 1.0;
        }
    }

    /// Add independent uniform noise in [-radius, radius] to every weight.
    pub fn mutate(&mut self, radius: f64, rng: &mut fastrand::Rng) {
        for w in self.weights_mut() {
            *w += (rng.f64() * 2.0 - 1.0) * radius;
        }
    }

    /// Propagate `input` through the network and return the first output neuron.
    ///
    /// # Errors
    /// `NetworkError::FeedForward` if `input` does not match the input layer width.
    /// Nothing is touched in that case.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<f64, NetworkError> {
        if input.len() != self.layer_widths[0] {
            return Err(NetworkError::FeedForward);
        }
        self.neurons[0][..input.len()].copy_from_slice(input);

        for layer in 1..self.layer_widths.len() {
            let (done, rest) = self.neurons.split_at_mut(layer);
            let previous = &done[layer - 1];
            let current = &mut rest[0];
            for (j, row) in self.weights[layer - 1].iter().enumerate() {
                let sum: f64 = previous.iter().zip(row).map(|(n, w)| n * w).sum();
                current[j] = activate(sum);
            }
        }

        Ok(self.output()[0])
    }

    /// Output layer activations from the last feed forward.
    pub fn output(&self) -> &[f64] {
        &self.neurons[self.neurons.len() - 1]
    }

    /// Write this network in the three-line weight format.
    pub fn export_weights<W: Write>(&self, out: &mut W) -> Result<(), NetworkError> {
        writeln!(out, "{}", self.layer_widths.len())?;
        for width in &self.layer_widths {
            write!(out, "{width},")?;
        }
        writeln!(out)?;
        for w in self.weights.iter().flatten().flatten() {
            write!(out, "{},", w.to_bits() as i64)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Read weights written by `export_weights`. The stream must describe the
    /// same topology. On error the current weights are kept.
    ///
    /// # Errors
    /// - `NetworkError::LayerCount` if the layer count differs
    /// - `NetworkError::NeuronCount` if the layer widths differ
    /// - `NetworkError::Malformed` if a line is missing, unparsable, or short
    pub fn import_weights<R: BufRead>(&mut self, input: &mut R) -> Result<(), NetworkError> {
        let line = read_line(input)?;
        let layer_count: usize = line.trim().parse().map_err(|_| NetworkError::Malformed)?;
        if layer_count != self.layer_widths.len() {
            return Err(NetworkError::LayerCount {
                expected: self.layer_widths.len(),
                found: layer_count,
            });
        }

        let line = read_line(input)?;
        let widths = parse_fields::<usize>(&line)?;
        if widths.len() != layer_count {
            return Err(NetworkError::Malformed);
        }
        if widths != self.layer_widths {
            return Err(NetworkError::NeuronCount {
                expected: self.layer_widths.clone(),
                found: widths,
            });
        }

        let line = read_line(input)?;
        let mut values = line
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty());
        let mut imported = self.weights.clone();
        for w in imported.iter_mut().flatten().flatten() {
            let field = values.next().ok_or(NetworkError::Malformed)?;
            let bits: i64 = field.parse().map_err(|_| NetworkError::Malformed)?;
            *w = f64::from_bits(bits as u64);
        }

        self.weights = imported;
        Ok(())
    }
}

/// Next line of the stream; running out of input is a malformed stream.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, NetworkError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(NetworkError::Malformed);
    }
    Ok(line)
}

/// Comma separated values, ignoring a trailing comma.
fn parse_fields<T: std::str::FromStr>(line: &str) -> Result<Vec<T>, NetworkError> {
    line.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| field.parse().map_err(|_| NetworkError::Malformed))
        .collect()
}
