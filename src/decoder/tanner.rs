//! Tanner graph.
//!
//! The Tanner graph of a parity check matrix `H` has a variable node for each
//! column, a check node for each row and an edge for each nonzero entry of
//! `H`. The graph is stored in flat arrays:
//!
//! - edges are stored in `H` row order, so that the edges of each check node
//!   form a contiguous range;
//! - the edges of each variable node are given by a contiguous range of a
//!   list of edge indices.

use super::Error;
use crate::sparse::SparseMatrix;

/// Tanner graph edge.
///
/// An edge holds the last messages exchanged by its variable node and its
/// check node.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Edge {
    /// Message from the variable node to the check node.
    pub q: f32,
    /// Message from the check node to the variable node.
    pub r: f32,
    /// Index of the check node.
    pub check: usize,
    /// Index of the variable node.
    pub variable: usize,
}

/// Tanner graph with per-edge message storage.
#[derive(Debug, Clone, PartialEq)]
pub struct TannerGraph {
    edges: Vec<Edge>,
    // M + 1 entries; check c owns edges[check_offsets[c]..check_offsets[c + 1]]
    check_offsets: Vec<usize>,
    // N + 1 entries into variable_edges
    variable_offsets: Vec<usize>,
    variable_edges: Vec<usize>,
    channel: Vec<f32>,
}

fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, T::default());
    Ok(v)
}

impl TannerGraph {
    /// Builds the Tanner graph of a parity check matrix.
    ///
    /// All the messages and channel values are initialized to zero.
    pub fn new(h: &SparseMatrix) -> Result<TannerGraph, Error> {
        let num_edges = h.num_ones();
        let mut edges = Vec::new();
        edges.try_reserve_exact(num_edges)?;
        let mut check_offsets = Vec::new();
        check_offsets.try_reserve_exact(h.num_rows() + 1)?;
        check_offsets.push(0);
        for (check, variable) in h.iter_all() {
            if check + 1 >= check_offsets.len() {
                // start of this check, and of any empty checks before it
                check_offsets.resize(check + 1, edges.len());
            }
            edges.push(Edge {
                check,
                variable,
                ..Edge::default()
            });
        }
        check_offsets.resize(h.num_rows() + 1, edges.len());

        // edges of each variable, in increasing edge order
        let mut variable_offsets = zeroed(h.num_cols() + 1)?;
        for edge in &edges {
            variable_offsets[edge.variable + 1] += 1;
        }
        for v in 0..h.num_cols() {
            variable_offsets[v + 1] += variable_offsets[v];
        }
        let mut variable_edges = zeroed(num_edges)?;
        let mut fill = zeroed::<usize>(h.num_cols())?;
        for (j, edge) in edges.iter().enumerate() {
            let v = edge.variable;
            variable_edges[variable_offsets[v] + fill[v]] = j;
            fill[v] += 1;
        }

        let channel = zeroed(h.num_cols())?;
        tracing::debug!(
            checks = h.num_rows(),
            variables = h.num_cols(),
            edges = num_edges,
            "built Tanner graph"
        );
        Ok(TannerGraph {
            edges,
            check_offsets,
            variable_offsets,
            variable_edges,
            channel,
        })
    }

    /// Returns the number of check nodes.
    pub fn num_checks(&self) -> usize {
        self.check_offsets.len() - 1
    }

    /// Returns the number of variable nodes.
    pub fn num_variables(&self) -> usize {
        self.channel.len()
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges of a check node.
    pub fn check_edges(&self, check: usize) -> &[Edge] {
        &self.edges[self.check_offsets[check]..self.check_offsets[check + 1]]
    }

    /// Returns the indices of the edges of a variable node.
    pub fn variable_edges(&self, variable: usize) -> &[usize] {
        &self.variable_edges[self.variable_offsets[variable]..self.variable_offsets[variable + 1]]
    }

    /// Returns the edge with index `edge`.
    pub fn edge(&self, edge: usize) -> &Edge {
        &self.edges[edge]
    }

    /// Returns the channel value of a variable node.
    pub fn channel(&self, variable: usize) -> f32 {
        self.channel[variable]
    }

    /// Loads new channel values and resets the messages.
    ///
    /// Every variable to check message is set to the channel value of its
    /// variable node, and every check to variable message is set to zero.
    ///
    /// # Panics
    ///
    /// Panics if the length of `channel` is not the number of variable nodes.
    pub fn reset(&mut self, channel: &[f32]) {
        assert_eq!(channel.len(), self.channel.len());
        self.channel.copy_from_slice(channel);
        for edge in self.edges.iter_mut() {
            edge.q = channel[edge.variable];
            edge.r = 0.0;
        }
    }

    /// Returns an iterator over the edges of each check node, in order.
    pub fn check_nodes_mut(&mut self) -> impl Iterator<Item = &mut [Edge]> + '_ {
        let mut rest = &mut self.edges[..];
        self.check_offsets.windows(2).map(move |w| {
            let (edges, tail) = std::mem::take(&mut rest).split_at_mut(w[1] - w[0]);
            rest = tail;
            edges
        })
    }

    /// Updates the variable to check messages.
    ///
    /// Each message is the channel value plus the check to variable messages
    /// arriving through the other edges of the variable node.
    pub fn update_variables(&mut self) {
        for (v, &ci) in self.channel.iter().enumerate() {
            let range = self.variable_offsets[v]..self.variable_offsets[v + 1];
            let edges = &self.variable_edges[range];
            for &j in edges {
                let q = ci + edges
                    .iter()
                    .filter(|&&k| k != j)
                    .map(|&k| self.edges[k].r)
                    .sum::<f32>();
                self.edges[j].q = q;
            }
        }
    }

    /// Computes the hard decision of each variable node.
    ///
    /// The bit is 1 if the channel value plus all the arriving check to
    /// variable messages is negative.
    ///
    /// # Panics
    ///
    /// Panics if the length of `bits` is not the number of variable nodes.
    pub fn hard_decision(&self, bits: &mut [u8]) {
        assert_eq!(bits.len(), self.channel.len());
        for (v, bit) in bits.iter_mut().enumerate() {
            let total = self.channel[v]
                + self
                    .variable_edges(v)
                    .iter()
                    .map(|&j| self.edges[j].r)
                    .sum::<f32>();
            *bit = u8::from(total < 0.0);
        }
    }

    /// Returns `true` if `bits` satisfies every check node.
    pub fn syndrome_is_zero(&self, bits: &[u8]) -> bool {
        (0..self.num_checks()).all(|c| {
            self.check_edges(c)
                .iter()
                .fold(0, |acc, e| acc ^ bits[e.variable])
                == 0
        })
    }
}
