//! Decode CLI subcommand.
//!
//! This command can be used to decode using an IEEE 802.11 LDPC code. The
//! input file holds frames of `n` received samples as little-endian `f32`,
//! where a bit 0 is transmitted as `+1.0` and a bit 1 as `-1.0`. The output
//! file receives the decoded message bits as unpacked bits. For the frames
//! that cannot be decoded, the hard decision of the received samples is
//! written instead.
//!
//! # Examples
//! ```shell
//! $ ldpc-80211 decode --rate 1/2 --length 1296 --decoder MinSum \
//!       received.f32 messages.u8
//! ```

use crate::{
    cli::{CodeArgs, Run},
    decoder::factory::DecoderImplementation,
};
use clap::Parser;
use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::PathBuf,
};

/// Decode CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Performs LDPC decoding")]
pub struct Args {
    #[command(flatten)]
    code: CodeArgs,
    /// Decoder implementation
    #[arg(long, default_value = "SumProduct")]
    decoder: DecoderImplementation,
    /// Maximum number of iterations
    #[arg(long, default_value = "100")]
    max_iter: usize,
    /// input file (received samples as f32)
    pub input: PathBuf,
    /// output file (messages as unpacked bits)
    pub output: PathBuf,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let code = self.code.code().code();
        let mut decoder = self.decoder.build_decoder(code)?;
        let mut input = BufReader::new(File::open(&self.input)?);
        let mut output = BufWriter::new(File::create(&self.output)?);
        let k = code.message_bits();
        let mut frame = vec![0; 4 * code.n()];
        let mut received = vec![0.0; code.n()];
        let mut num_frames = 0;
        let mut failures = 0;
        loop {
            match input.read_exact(&mut frame[..]) {
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                ret => ret?,
            };
            for (x, bytes) in received.iter_mut().zip(frame.chunks_exact(4)) {
                *x = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
            match decoder.decode(&received, self.max_iter) {
                Some(decoded) => output.write_all(&decoded.codeword[..k])?,
                None => {
                    failures += 1;
                    let hard = received[..k]
                        .iter()
                        .map(|&x| u8::from(x < 0.0))
                        .collect::<Vec<_>>();
                    output.write_all(&hard)?;
                }
            }
            num_frames += 1;
        }
        output.flush()?;
        eprintln!("decoded {num_frames} frames, {failures} failed");
        Ok(())
    }
}
