//! `ldpc-80211` CLI application
//!
//! The CLI application is organized in several subcommands. The
//! supported subcommands can be seen by running `ldpc-80211`.
//! See the modules below for examples and more information about
//! how to use each subcommand.
//!
//! Log messages are written to `stderr`. Their verbosity is controlled with
//! the `RUST_LOG` environment variable, which defaults to `warn`.

use crate::codes::ieee80211::{BlockLength, IEEE80211Code, Rate};
use clap::Parser;
use std::error::Error;

pub mod alist;
pub mod ber;
pub mod decode;
pub mod encode;

/// Trait to run a CLI subcommand
pub trait Run {
    /// Run the CLI subcommand
    fn run(&self) -> Result<(), Box<dyn Error>>;
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(author, version, name = "ldpc-80211", about = "IEEE 802.11 LDPC toolbox")]
pub enum Args {
    /// alist subcommand
    Alist(alist::Args),
    /// ber subcommand
    BER(ber::Args),
    /// decode subcommand
    Decode(decode::Args),
    /// encode subcommand
    Encode(encode::Args),
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        match self {
            Args::Alist(x) => x.run(),
            Args::BER(x) => x.run(),
            Args::Decode(x) => x.run(),
            Args::Encode(x) => x.run(),
        }
    }
}

/// Code selection arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct CodeArgs {
    /// Code rate (1/2, 2/3, 3/4 or 5/6)
    #[arg(short, long)]
    pub rate: Rate,
    /// Codeword length (648, 1296 or 1944)
    #[arg(short, long)]
    pub length: BlockLength,
}

impl CodeArgs {
    /// Returns the selected code.
    pub fn code(&self) -> IEEE80211Code {
        IEEE80211Code::new(self.rate, self.length)
    }
}
