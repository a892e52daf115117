//! BER test CLI subcommand.
//!
//! This subcommand can be used to perform a BER test of an IEEE 802.11 LDPC
//! code over an AWGN channel with BPSK modulation. The channel noise is given
//! as its standard deviation, with the BPSK symbols having unit amplitude.
//!
//! # Examples
//!
//! The r=1/2, n=648 code can be simulated with
//! ```shell
//! $ ldpc-80211 ber --rate 1/2 --length 648 --min-sigma 0.6 --max-sigma 0.9 \
//!       --step-sigma 0.05 --decoder MinSum
//! ```

use crate::{
    cli::{CodeArgs, Run},
    decoder::factory::DecoderImplementation,
    simulation::ber::{BerTest, BerTestParameters, Report, Reporter, Statistics},
};
use clap::Parser;
use console::Term;
use std::{
    error::Error,
    fs::File,
    io::Write,
    sync::mpsc::{self, Receiver},
    time::Duration,
};

/// BER test CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Performs a BER simulation")]
pub struct Args {
    #[command(flatten)]
    code: CodeArgs,
    /// Output file for simulation results
    #[arg(long)]
    output_file: Option<String>,
    /// Decoder implementation
    #[arg(long, default_value = "SumProduct")]
    decoder: DecoderImplementation,
    /// Minimum noise standard deviation
    #[arg(long)]
    min_sigma: f32,
    /// Maximum noise standard deviation
    #[arg(long)]
    max_sigma: f32,
    /// Noise standard deviation step
    #[arg(long)]
    step_sigma: f32,
    /// Maximum number of iterations
    #[arg(long, default_value = "100")]
    max_iter: usize,
    /// Number of frame errors to collect
    #[arg(long, default_value = "100")]
    frame_errors: u64,
    /// Maximum number of frames to simulate at each noise level
    #[arg(long, default_value = "1000000")]
    max_frames: u64,
    /// Seed for the random number generator
    #[arg(long, default_value = "0")]
    seed: u64,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        if !(self.step_sigma > 0.0) || self.max_sigma < self.min_sigma || self.min_sigma < 0.0 {
            return Err("invalid noise standard deviation range".into());
        }
        if self.frame_errors == 0 || self.max_frames == 0 {
            return Err("--frame-errors and --max-frames must be positive".into());
        }
        let mut output_file = if let Some(f) = &self.output_file {
            Some(File::create(f)?)
        } else {
            None
        };
        let num_sigmas = ((self.max_sigma - self.min_sigma) / self.step_sigma).floor() as usize + 1;
        let sigmas = (0..num_sigmas)
            .map(|k| self.min_sigma + k as f32 * self.step_sigma)
            .collect::<Vec<_>>();
        let (report_tx, report_rx) = mpsc::channel();
        let reporter = Reporter {
            tx: report_tx,
            interval: Duration::from_millis(500),
        };
        let test = BerTest::new(BerTestParameters {
            code: self.code.code().code(),
            decoder_implementation: self.decoder,
            noise_sigmas: &sigmas,
            max_frame_errors: self.frame_errors,
            max_frames: self.max_frames,
            max_iterations: self.max_iter,
            reporter: Some(reporter),
            seed: self.seed,
        })?;
        self.write_details(std::io::stdout(), &test)?;
        if let Some(f) = &mut output_file {
            self.write_details(&*f, &test)?;
        }
        let mut progress = Progress::new(report_rx, output_file);
        let progress = std::thread::spawn(move || progress.run());
        test.run()?;
        match progress.join() {
            Ok(ret) => ret.map_err(|e| -> Box<dyn Error> { e }),
            Err(_) => Err("progress thread panicked".into()),
        }
    }
}

impl Args {
    fn write_details<W: Write>(&self, mut f: W, test: &BerTest) -> std::io::Result<()> {
        writeln!(f, "BER TEST PARAMETERS")?;
        writeln!(f, "-------------------")?;
        writeln!(f, "Simulation:")?;
        writeln!(f, " - Minimum sigma: {:.3}", self.min_sigma)?;
        writeln!(f, " - Maximum sigma: {:.3}", self.max_sigma)?;
        writeln!(f, " - Sigma step: {:.3}", self.step_sigma)?;
        writeln!(f, " - Number of frame errors: {}", self.frame_errors)?;
        writeln!(f, " - Maximum number of frames: {}", self.max_frames)?;
        writeln!(f, " - Seed: {}", self.seed)?;
        writeln!(f, "LDPC code:")?;
        writeln!(f, " - Code: {}", self.code.code())?;
        writeln!(f, " - Information bits (k): {}", test.k())?;
        writeln!(f, " - Codeword size (N): {}", test.n())?;
        writeln!(f, " - Code rate: {:.3}", test.rate())?;
        writeln!(f, "LDPC decoder:")?;
        writeln!(f, " - Implementation: {}", self.decoder)?;
        writeln!(f, " - Maximum iterations: {}", self.max_iter)?;
        writeln!(f)?;
        Ok(())
    }
}

#[derive(Debug)]
struct Progress {
    rx: Receiver<Report>,
    term: Term,
    output_file: Option<File>,
}

impl Progress {
    fn new(rx: Receiver<Report>, output_file: Option<File>) -> Progress {
        Progress {
            rx,
            term: Term::stdout(),
            output_file,
        }
    }

    fn run(&mut self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
        ctrlc::set_handler({
            let term = self.term.clone();
            move || {
                let _ = term.write_line("");
                let _ = term.show_cursor();
                std::process::exit(0);
            }
        })?;

        let ret = self.work();
        self.term.write_line("")?;
        self.term.show_cursor()?;
        ret
    }

    fn work(&mut self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
        self.term.set_title("ldpc-80211 ber");
        self.term.hide_cursor()?;
        self.term.write_line(Self::format_header())?;
        if let Some(f) = &mut self.output_file {
            writeln!(f, "{}", Self::format_header())?;
        }
        let mut last_stats: Option<Statistics> = None;
        loop {
            // a closed channel means that the BER test stopped on an error
            let Ok(report) = self.rx.recv() else {
                return Ok(());
            };
            let Report::Statistics(stats) = report else {
                // BER test has finished
                if let (Some(f), Some(s)) = (&mut self.output_file, &last_stats) {
                    writeln!(f, "{}", Self::format_progress(s))?;
                }
                return Ok(());
            };
            match &last_stats {
                Some(s) if s.noise_sigma == stats.noise_sigma => {
                    self.term.move_cursor_up(1)?;
                    self.term.clear_line()?;
                }
                Some(s) => {
                    if let Some(f) = &mut self.output_file {
                        writeln!(f, "{}", Self::format_progress(s))?;
                    }
                }
                None => (),
            };
            self.term.write_line(&Self::format_progress(&stats))?;
            last_stats = Some(stats);
        }
    }

    fn format_header() -> &'static str {
        "  Sigma |   Frames | Bit errs | Frame er | False de |     BER |     FER | Avg iter | Throughp | Elapsed\n\
         --------|----------|----------|----------|----------|---------|---------|----------|----------|----------"
    }

    fn format_progress(stats: &Statistics) -> String {
        format!(
            "{:7.3} | {:8} | {:8} | {:8} | {:8} | {:7.2e} | {:7.2e} | {:8.1} | {:8.3} | {}",
            stats.noise_sigma,
            stats.num_frames,
            stats.bit_errors,
            stats.frame_errors,
            stats.false_decodes,
            stats.ber,
            stats.fer,
            stats.average_iterations,
            stats.throughput_mbps,
            humantime::format_duration(Duration::from_secs(stats.elapsed.as_secs()))
        )
    }
}
