//! Encode CLI subcommand.
//!
//! This command can be used to encode using an IEEE 802.11 LDPC code. The
//! input file holds messages as unpacked bits (one byte per bit), each
//! message having the number of message bits of the code. The output file
//! receives the codewords as unpacked bits.
//!
//! # Examples
//! ```shell
//! $ ldpc-80211 encode --rate 3/4 --length 1944 messages.u8 codewords.u8
//! ```

use crate::{
    cli::{CodeArgs, Run},
    encoder::Encoder,
};
use clap::Parser;
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::PathBuf,
};

/// Encode CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Performs LDPC encoding")]
pub struct Args {
    #[command(flatten)]
    code: CodeArgs,
    /// input file (messages as unpacked bits)
    pub input: PathBuf,
    /// output file (codewords as unpacked bits)
    pub output: PathBuf,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let encoder = Encoder::new(self.code.code().code())?;
        let mut input = BufReader::new(File::open(&self.input)?);
        let mut output = BufWriter::new(File::create(&self.output)?);
        let mut message = vec![0; encoder.code().message_bits()];
        let mut num_frames = 0;
        loop {
            match input.read_exact(&mut message[..]) {
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                ret => ret?,
            };
            output.write_all(&encoder.encode_bits(&message)?)?;
            num_frames += 1;
        }
        output.flush()?;
        tracing::info!(num_frames, "encoding finished");
        Ok(())
    }
}
