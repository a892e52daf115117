//! # IEEE 802.11 LDPC
//!
//! `ldpc_80211` implements the quasi-cyclic LDPC codes of IEEE 802.11
//! (rates 1/2, 2/3, 3/4 and 5/6 with codeword lengths of 648, 1296 and 1944
//! bits). It contains the following parts:
//!
//! - The [base matrices](codes::ieee80211) of the twelve codes and their
//!   expansion into sparse parity check matrices.
//! - An [encoder](encoder) based on the approximate lower triangular form of
//!   the parity check matrix, which uses the [`table`] of submatrices.
//! - Belief propagation [decoders](decoder) using either the sum-product or
//!   the min-sum check node update.
//! - A [BER simulation](simulation) over an AWGN channel.
//!
//! It can be used as a Rust library, through a C API, or as a CLI tool. See
//! [`cli`] for documentation about the usage of the CLI tool.

#![warn(missing_docs)]

pub mod bits;
pub mod cli;
pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod gf2;
pub mod rand;
pub mod simulation;
pub mod sparse;
pub mod table;

mod c_api;
