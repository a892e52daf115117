//! alist CLI subcommand
//!
//! This subcommand prints the alist of the parity check matrix of an IEEE
//! 802.11 LDPC code to `stdout`. See [`crate::codes::ieee80211`] for more
//! information about the codes.
//!
//! # Examples
//! The r=1/2, n=648 parity check matrix can be generated with
//! ```shell
//! $ ldpc-80211 alist --rate 1/2 --length 648
//! ```

use crate::cli::{CodeArgs, Run};
use clap::Parser;
use std::error::Error;

/// alist CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Generates the alist of IEEE 802.11 LDPC codes")]
pub struct Args {
    #[command(flatten)]
    code: CodeArgs,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        print!("{}", self.code.code().h().alist());
        Ok(())
    }
}
