//! Simulation.
//!
//! This module contains channel models and utilities to simulate the BER of
//! the codes over an AWGN channel.

pub mod ber;
pub mod channel;
