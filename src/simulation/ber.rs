//! BER simulation
//!
//! This module contains utilities for BER simulation over an AWGN channel
//! with BPSK modulation.

use super::channel::{bits_to_signal, AwgnChannel};
use crate::{
    codes::Code,
    decoder::factory::{DecoderImplementation, LdpcDecoder},
    encoder::Encoder,
    rand::{random_bits, Rng, SeedableRng},
};
use std::{
    sync::mpsc::Sender,
    time::{Duration, Instant},
};

/// BER test.
///
/// This struct is used to configure and run a BER test.
#[derive(Debug)]
pub struct BerTest {
    code: &'static Code,
    encoder: Encoder,
    decoder: Box<dyn LdpcDecoder>,
    noise_sigmas: Vec<f32>,
    statistics: Vec<Statistics>,
    max_iterations: usize,
    max_frame_errors: u64,
    max_frames: u64,
    reporter: Option<Reporter>,
    last_reported: Instant,
    rng: Rng,
}

/// BER test parameters.
///
/// This struct contains all the parameters needed to create a BER test.
#[derive(Debug)]
pub struct BerTestParameters<'a> {
    /// Code to simulate.
    pub code: &'static Code,
    /// Decoder implementation.
    pub decoder_implementation: DecoderImplementation,
    /// Channel noise standard deviations to simulate.
    pub noise_sigmas: &'a [f32],
    /// Number of frame errors at which each noise level ends.
    pub max_frame_errors: u64,
    /// Maximum number of frames simulated for each noise level.
    pub max_frames: u64,
    /// Maximum number of decoder iterations.
    pub max_iterations: usize,
    /// Optional progress reporter.
    pub reporter: Option<Reporter>,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// Progress reporter.
///
/// A reporter is used to send periodic updates of the statistics of a BER
/// test.
#[derive(Debug, Clone)]
pub struct Reporter {
    /// Sender element of the channel used to send the reports.
    pub tx: Sender<Report>,
    /// Minimum interval between consecutive reports.
    pub interval: Duration,
}

/// BER test progress report.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Current statistics of the noise level being simulated.
    Statistics(Statistics),
    /// The BER test has finished.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
struct CurrentStatistics {
    num_frames: u64,
    bit_errors: u64,
    frame_errors: u64,
    false_decodes: u64,
    total_iterations: u64,
    start: Instant,
}

/// BER test statistics.
///
/// This structure contains the statistics for a single noise level in a BER
/// test.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Noise standard deviation.
    pub noise_sigma: f32,
    /// Number of frames tested.
    pub num_frames: u64,
    /// Number of bit errors in the message bits.
    pub bit_errors: u64,
    /// Number of frame errors.
    ///
    /// A frame is in error if decoding failed or if the decoded message is
    /// different from the transmitted message.
    pub frame_errors: u64,
    /// Number of frames falsely decoded.
    ///
    /// These are frames for which the decoder converged to a valid codeword,
    /// but the codeword is different to the transmitted codeword.
    pub false_decodes: u64,
    /// Bit error rate.
    pub ber: f64,
    /// Frame error rate.
    pub fer: f64,
    /// Average number of iterations, counting failed frames as the maximum.
    pub average_iterations: f64,
    /// Elapsed time for this test case.
    pub elapsed: Duration,
    /// Throughput in Mbps (referred to information bits).
    pub throughput_mbps: f64,
}

impl BerTest {
    /// Creates a new BER test.
    ///
    /// This function only defines the BER test. To run it it is necessary to
    /// call the [`BerTest::run`] method.
    ///
    /// # Errors
    ///
    /// Fails if `max_frames` or `max_frame_errors` is zero, since no frames
    /// would be simulated.
    pub fn new(parameters: BerTestParameters<'_>) -> Result<BerTest, Box<dyn std::error::Error>> {
        if parameters.max_frames == 0 || parameters.max_frame_errors == 0 {
            return Err("the frame limits must be positive".into());
        }
        let code = parameters.code;
        Ok(BerTest {
            code,
            encoder: Encoder::new(code)?,
            decoder: parameters.decoder_implementation.build_decoder(code)?,
            noise_sigmas: parameters.noise_sigmas.to_owned(),
            statistics: Vec::with_capacity(parameters.noise_sigmas.len()),
            max_iterations: parameters.max_iterations,
            max_frame_errors: parameters.max_frame_errors,
            max_frames: parameters.max_frames,
            reporter: parameters.reporter,
            last_reported: Instant::now(),
            rng: Rng::seed_from_u64(parameters.seed),
        })
    }

    /// Returns the number of message bits per frame.
    pub fn k(&self) -> usize {
        self.code.message_bits()
    }

    /// Returns the codeword length.
    pub fn n(&self) -> usize {
        self.code.n()
    }

    /// Returns the code rate.
    pub fn rate(&self) -> f64 {
        self.code.rate()
    }

    /// Runs the BER test.
    ///
    /// This function runs the BER test until completion. It returns a list of
    /// statistics for each noise level, or an error.
    pub fn run(mut self) -> Result<Vec<Statistics>, Box<dyn std::error::Error>> {
        let k = self.k();
        for noise_sigma in std::mem::take(&mut self.noise_sigmas) {
            let channel = AwgnChannel::new(noise_sigma);
            // the decoders expect LLRs scaled for unit noise variance
            let scale = if noise_sigma > 0.0 {
                noise_sigma.powi(-2)
            } else {
                1.0
            };
            let mut current = CurrentStatistics::new();
            while current.frame_errors < self.max_frame_errors && current.num_frames < self.max_frames
            {
                let message = random_bits(&mut self.rng, k);
                let codeword = self.encoder.encode_bits(&message)?;
                let mut signal = bits_to_signal(&codeword);
                channel.add_noise(&mut self.rng, &mut signal);
                for x in signal.iter_mut() {
                    *x *= scale;
                }
                let (decoded, iterations, success) =
                    match self.decoder.decode(&signal, self.max_iterations) {
                        Some(output) => (output.codeword, output.iterations, true),
                        None => (
                            signal[..k].iter().map(|&x| u8::from(x < 0.0)).collect(),
                            self.max_iterations,
                            false,
                        ),
                    };
                // Count only bit errors in the systematic part of the codeword
                let bit_errors = message
                    .iter()
                    .zip(decoded.iter())
                    .filter(|(&a, &b)| a != b)
                    .count() as u64;
                current.bit_errors += bit_errors;
                if !success || bit_errors > 0 {
                    current.frame_errors += 1;
                    if success {
                        current.false_decodes += 1;
                    }
                }
                current.num_frames += 1;
                current.total_iterations += iterations as u64;
                self.report(&current, noise_sigma)?;
            }
            let stats = Statistics::from_current(&current, noise_sigma, k);
            if let Some(reporter) = &self.reporter {
                reporter.tx.send(Report::Statistics(stats.clone()))?;
            }
            self.statistics.push(stats);
        }
        if let Some(reporter) = &self.reporter {
            reporter.tx.send(Report::Finished)?;
        }
        Ok(self.statistics)
    }

    // Periodic report, rate limited by the reporter interval
    fn report(
        &mut self,
        current: &CurrentStatistics,
        noise_sigma: f32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some(reporter) = &self.reporter else {
            return Ok(());
        };
        let now = Instant::now();
        if now - self.last_reported >= reporter.interval {
            let stats = Statistics::from_current(current, noise_sigma, self.code.message_bits());
            reporter.tx.send(Report::Statistics(stats))?;
            self.last_reported = now;
        }
        Ok(())
    }
}

impl CurrentStatistics {
    fn new() -> CurrentStatistics {
        CurrentStatistics {
            num_frames: 0,
            bit_errors: 0,
            frame_errors: 0,
            false_decodes: 0,
            total_iterations: 0,
            start: Instant::now(),
        }
    }
}

impl Default for CurrentStatistics {
    fn default() -> CurrentStatistics {
        CurrentStatistics::new()
    }
}

impl Statistics {
    fn from_current(stats: &CurrentStatistics, noise_sigma: f32, k: usize) -> Statistics {
        let elapsed = Instant::now() - stats.start;
        let frames = stats.num_frames as f64;
        Statistics {
            noise_sigma,
            num_frames: stats.num_frames,
            bit_errors: stats.bit_errors,
            frame_errors: stats.frame_errors,
            false_decodes: stats.false_decodes,
            ber: stats.bit_errors as f64 / (k as f64 * frames),
            fer: stats.frame_errors as f64 / frames,
            average_iterations: stats.total_iterations as f64 / frames,
            elapsed,
            throughput_mbps: 1e-6 * (k as f64 * frames) / elapsed.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::ieee80211::{BlockLength, IEEE80211Code, Rate};
    use std::sync::mpsc;

    fn parameters(sigmas: &[f32], reporter: Option<Reporter>) -> BerTestParameters<'_> {
        BerTestParameters {
            code: IEEE80211Code::new(Rate::R1_2, BlockLength::N648).code(),
            decoder_implementation: DecoderImplementation::MinSum,
            noise_sigmas: sigmas,
            max_frame_errors: 5,
            max_frames: 20,
            max_iterations: 20,
            reporter,
            seed: 42,
        }
    }

    #[test]
    fn low_noise() {
        let stats = BerTest::new(parameters(&[0.0, 0.3], None))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(stats.len(), 2);
        for s in &stats {
            assert_eq!(s.num_frames, 20);
            assert_eq!(s.frame_errors, 0);
            assert_eq!(s.ber, 0.0);
        }
        assert_eq!(stats[0].average_iterations, 1.0);
    }

    #[test]
    fn high_noise() {
        let stats = BerTest::new(parameters(&[2.0], None))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(stats[0].frame_errors, 5);
        assert!(stats[0].num_frames <= 20);
        assert!(stats[0].ber > 0.0);
    }

    #[test]
    fn zero_frame_limits() {
        let mut params = parameters(&[0.5], None);
        params.max_frames = 0;
        assert!(BerTest::new(params).is_err());
        let mut params = parameters(&[0.5], None);
        params.max_frame_errors = 0;
        assert!(BerTest::new(params).is_err());
    }

    #[test]
    fn reports() {
        let (tx, rx) = mpsc::channel();
        let reporter = Reporter {
            tx,
            interval: Duration::from_secs(3600),
        };
        let stats = BerTest::new(parameters(&[0.1, 0.2], Some(reporter)))
            .unwrap()
            .run()
            .unwrap();
        let reports = rx.iter().collect::<Vec<_>>();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0], Report::Statistics(stats[0].clone()));
        assert_eq!(reports[2], Report::Finished);
    }
}
