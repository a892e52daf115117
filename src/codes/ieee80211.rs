//! IEEE 802.11 LDPC codes.
//!
//! This module contains the twelve quasi-cyclic LDPC codes used by the HT and
//! VHT PHYs: rates 1/2, 2/3, 3/4 and 5/6 for codeword lengths of 648, 1296 and
//! 1944 bits. Every base matrix has 24 block columns, so the expansion factor
//! is `z = n / 24`.
//!
//! ## References
//! \[1\] IEEE Std 802.11-2016, Annex F (HT LDPC matrix definitions).

use super::Code;
use crate::sparse::SparseMatrix;
use enum_iterator::Sequence;

/// IEEE 802.11 code definition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IEEE80211Code {
    rate: Rate,
    length: BlockLength,
}

/// IEEE 802.11 code rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Sequence)]
pub enum Rate {
    /// Rate 1/2.
    R1_2,
    /// Rate 2/3.
    R2_3,
    /// Rate 3/4.
    R3_4,
    /// Rate 5/6.
    R5_6,
}

/// IEEE 802.11 codeword length `n`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Sequence)]
pub enum BlockLength {
    /// n = 648
    N648,
    /// n = 1296
    N1296,
    /// n = 1944
    N1944,
}

impl IEEE80211Code {
    /// Creates an IEEE 802.11 code definition.
    pub fn new(rate: Rate, length: BlockLength) -> IEEE80211Code {
        IEEE80211Code { rate, length }
    }

    /// Returns the code rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Returns the codeword length.
    pub fn length(&self) -> BlockLength {
        self.length
    }

    /// Returns the descriptor of the code.
    pub fn code(&self) -> &'static Code {
        match (self.rate, self.length) {
            (Rate::R1_2, BlockLength::N648) => &CODE_R12_648,
            (Rate::R1_2, BlockLength::N1296) => &CODE_R12_1296,
            (Rate::R1_2, BlockLength::N1944) => &CODE_R12_1944,
            (Rate::R2_3, BlockLength::N648) => &CODE_R23_648,
            (Rate::R2_3, BlockLength::N1296) => &CODE_R23_1296,
            (Rate::R2_3, BlockLength::N1944) => &CODE_R23_1944,
            (Rate::R3_4, BlockLength::N648) => &CODE_R34_648,
            (Rate::R3_4, BlockLength::N1296) => &CODE_R34_1296,
            (Rate::R3_4, BlockLength::N1944) => &CODE_R34_1944,
            (Rate::R5_6, BlockLength::N648) => &CODE_R56_648,
            (Rate::R5_6, BlockLength::N1296) => &CODE_R56_1296,
            (Rate::R5_6, BlockLength::N1944) => &CODE_R56_1944,
        }
    }

    /// Constructs the parity check matrix for the code.
    pub fn h(&self) -> SparseMatrix {
        self.code().h()
    }
}

impl std::fmt::Display for IEEE80211Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IEEE 802.11 r={} n={}", self.rate, self.length)
    }
}

impl BlockLength {
    /// Returns the codeword length in bits.
    pub fn n(&self) -> usize {
        match self {
            BlockLength::N648 => 648,
            BlockLength::N1296 => 1296,
            BlockLength::N1944 => 1944,
        }
    }

    /// Returns the expansion factor.
    pub fn z(&self) -> usize {
        self.n() / BASE_COLUMNS
    }
}

impl Rate {
    // base matrix rows
    const fn mb(&self) -> usize {
        match self {
            Rate::R1_2 => 12,
            Rate::R2_3 => 8,
            Rate::R3_4 => 6,
            Rate::R5_6 => 4,
        }
    }
}

impl std::str::FromStr for Rate {
    type Err = String;

    fn from_str(s: &str) -> Result<Rate, String> {
        Ok(match s {
            "1/2" => Rate::R1_2,
            "2/3" => Rate::R2_3,
            "3/4" => Rate::R3_4,
            "5/6" => Rate::R5_6,
            _ => Err(format!("invalid code rate {s}"))?,
        })
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Rate::R1_2 => "1/2",
                Rate::R2_3 => "2/3",
                Rate::R3_4 => "3/4",
                Rate::R5_6 => "5/6",
            }
        )
    }
}

impl std::str::FromStr for BlockLength {
    type Err = String;

    fn from_str(s: &str) -> Result<BlockLength, String> {
        Ok(match s {
            "648" => BlockLength::N648,
            "1296" => BlockLength::N1296,
            "1944" => BlockLength::N1944,
            _ => Err(format!("invalid codeword length {s}"))?,
        })
    }
}

impl std::fmt::Display for BlockLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.n())
    }
}

const BASE_COLUMNS: usize = 24;

macro_rules! code {
    ($name:ident, $hb:ident, $rate:ident, $z:expr) => {
        static $name: Code = Code::new($z, Rate::$rate.mb(), BASE_COLUMNS, &$hb);
    };
}

code!(CODE_R12_648, HB_R12_648, R1_2, 27);
code!(CODE_R12_1296, HB_R12_1296, R1_2, 54);
code!(CODE_R12_1944, HB_R12_1944, R1_2, 81);
code!(CODE_R23_648, HB_R23_648, R2_3, 27);
code!(CODE_R23_1296, HB_R23_1296, R2_3, 54);
code!(CODE_R23_1944, HB_R23_1944, R2_3, 81);
code!(CODE_R34_648, HB_R34_648, R3_4, 27);
code!(CODE_R34_1296, HB_R34_1296, R3_4, 54);
code!(CODE_R34_1944, HB_R34_1944, R3_4, 81);
code!(CODE_R56_648, HB_R56_648, R5_6, 27);
code!(CODE_R56_1296, HB_R56_1296, R5_6, 54);
code!(CODE_R56_1944, HB_R56_1944, R5_6, 81);

// Tables F-1 to F-3 in [1]. Entries are cyclic shifts, -1 is an empty block.

#[rustfmt::skip]
static HB_R12_648: [i16; 288] = [
     0, -1, -1, -1,  0,  0, -1, -1,  0, -1, -1,  0,  1,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    22,  0, -1, -1, 17, -1,  0,  0, 12, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     6, -1,  0, -1, 10, -1, -1, -1, 24, -1,  0, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1,
     2, -1, -1,  0, 20, -1, -1, -1, 25,  0, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1,
    23, -1, -1, -1,  3, -1, -1, -1,  0, -1,  9, 11, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1,
    24, -1, 23,  1, 17, -1,  3, -1, 10, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    25, -1, -1, -1,  8, -1, -1, -1,  7, 18, -1, -1,  0, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1,
    13, 24, -1, -1,  0, -1,  8, -1,  6, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1,
     7, 20, -1, 16, 22, 10, -1, -1, 23, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1,
    11, -1, -1, -1, 19, -1, -1, -1, 13, -1,  3, 17, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1,
    25, -1,  8, -1, 23, 18, -1, 14,  9, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,
     3, -1, -1, -1, 16, -1, -1,  2, 25,  5, -1, -1,  1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R12_1296: [i16; 288] = [
    40, -1, -1, -1, 22, -1, 49, 23, 43, -1, -1, -1,  1,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    50,  1, -1, -1, 48, 35, -1, -1, 13, -1, 30, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    39, 50, -1, -1,  4, -1,  2, -1, -1, -1, -1, 49, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1,
    33, -1, -1, 38, 37, -1, -1,  4,  1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1,
    45, -1, -1, -1,  0, 22, -1, -1, 20, 42, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1,
    51, -1, -1, 48, 35, -1, -1, -1, 44, -1, 18, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    47, 11, -1, -1, -1, 17, -1, -1, 51, -1, -1, -1,  0, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1,
     5, -1, 25, -1,  6, -1, 45, -1, 13, 40, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1,
    33, -1, -1, 34, 24, -1, -1, -1, 23, -1, -1, 46, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1,
     1, -1, 27, -1,  1, -1, -1, -1, 38, -1, 44, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1,
    -1, 18, -1, -1, 23, -1, -1,  8,  0, 35, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,
    49, -1, 17, -1, 30, -1, -1, -1, 34, -1, -1, 19,  1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R12_1944: [i16; 288] = [
    57, -1, -1, -1, 50, -1, 11, -1, 50, -1, 79, -1,  1,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
     3, -1, 28, -1,  0, -1, -1, -1, 55,  7, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    30, -1, -1, -1, 24, 37, -1, -1, 56, 14, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1,
    62, 53, -1, -1, 53, -1, -1,  3, 35, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1, -1,
    40, -1, -1, 20, 66, -1, -1, 22, 28, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1,
     0, -1, -1, -1,  8, -1, 42, -1, 50, -1, -1,  8, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    69, 79, 79, -1, -1, -1, 56, -1, 52, -1, -1, -1,  0, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1,
    65, -1, -1, -1, 38, 57, -1, -1, 72, -1, 27, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1,
    64, -1, -1, -1, 14, 52, -1, -1, 30, -1, -1, 32, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1,
    -1, 45, -1, 70,  0, -1, -1, -1, 77,  9, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1,
     2, 56, -1, 57, 35, -1, -1, -1, -1, -1, 12, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,
    24, -1, 61, -1, 60, -1, -1, 27, 51, -1, -1, 16,  1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R23_648: [i16; 192] = [
    25, 26, 14, -1, 20, -1,  2, -1,  4, -1, -1,  8, -1, 16, -1, 18,  1,  0, -1, -1, -1, -1, -1, -1,
    10,  9, 15, 11, -1,  0, -1,  1, -1, -1, 18, -1,  8, -1, 10, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    16,  2, 20, 26, 21, -1,  6, -1,  1, 26, -1,  7, -1, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1,
    10, 13,  5,  0, -1,  3, -1,  7, -1, -1, 26, -1, -1, 13, -1, 16, -1, -1, -1,  0,  0, -1, -1, -1,
    23, 14, 24, -1, 12, -1, 19, -1, 17, -1, -1, -1, 20, -1, 21, -1,  0, -1, -1, -1,  0,  0, -1, -1,
     6, 22,  9, 20, -1, 25, -1, 17, -1,  8, -1, 14, -1, 18, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1,
    14, 23, 21, 11, 20, -1, 24, -1, 18, -1, 19, -1, -1, -1, -1, 22, -1, -1, -1, -1, -1, -1,  0,  0,
    17, 11, 11, 20, -1, 21, -1, 26, -1,  3, -1, -1, 18, -1, 26, -1,  1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R23_1296: [i16; 192] = [
    39, 31, 22, 43, -1, 40,  4, -1, 11, -1, -1, 50, -1, -1, -1,  6,  1,  0, -1, -1, -1, -1, -1, -1,
    25, 52, 41,  2,  6, -1, 14, -1, 34, -1, -1, -1, 24, -1, 37, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    43, 31, 29,  0, 21, -1, 28, -1, -1,  2, -1, -1,  7, -1, 17, -1, -1, -1,  0,  0, -1, -1, -1, -1,
    20, 33, 48, -1,  4, 13, -1, 26, -1, -1, 22, -1, -1, 46, 42, -1, -1, -1, -1,  0,  0, -1, -1, -1,
    45,  7, 18, 51, 12, 25, -1, -1, -1, 50, -1, -1,  5, -1, -1, -1,  0, -1, -1, -1,  0,  0, -1, -1,
    35, 40, 32, 16,  5, -1, -1, 18, -1, -1, 43, 51, -1, 32, -1, -1, -1, -1, -1, -1, -1,  0,  0, -1,
     9, 24, 13, 22, 28, -1, -1, 37, -1, -1, 25, -1, -1, 52, -1, 13, -1, -1, -1, -1, -1, -1,  0,  0,
    32, 22,  4, 21, 16, -1, -1, -1, 27, 28, -1, 38, -1, -1, -1,  8,  1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R23_1944: [i16; 192] = [
    61, 75,  4, 63, 56, -1, -1, -1, -1, -1, -1,  8, -1,  2, 17, 25,  1,  0, -1, -1, -1, -1, -1, -1,
    56, 74, 77, 20, -1, -1, -1, 64, 24,  4, 67, -1,  7, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1,
    28, 21, 68, 10,  7, 14, 65, -1, -1, -1, 23, -1, -1, -1, 75, -1, -1, -1,  0,  0, -1, -1, -1, -1,
    48, 38, 43, 78, 76, -1, -1, -1, -1,  5, 36, -1, 15, 72, -1, -1, -1, -1, -1,  0,  0, -1, -1, -1,
    40,  2, 53, 25, -1, 52, 62, -1, 20, -1, -1, 44, -1, -1, -1, -1,  0, -1, -1, -1,  0,  0, -1, -1,
    69, 23, 64, 10, 22, -1, 21, -1, -1, -1, -1, -1, 68, 23, 29, -1, -1, -1, -1, -1, -1,  0,  0, -1,
    12,  0, 68, 20, 55, 61, -1, 40, -1, -1, -1, 52, -1, -1, -1, 44, -1, -1, -1, -1, -1, -1,  0,  0,
    58,  8, 34, 64, 78, -1, -1, 11, 78, 24, -1, -1, -1, -1, -1, 58,  1, -1, -1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R34_648: [i16; 144] = [
    16, 17, 22, 24,  9,  3, 14, -1,  4,  2,  7, -1, 26, -1,  2, -1, 21, -1,  1,  0, -1, -1, -1, -1,
    25, 12, 12,  3,  3, 26,  6, 21, -1, 15, 22, -1, 15, -1,  4, -1, -1, 16, -1,  0,  0, -1, -1, -1,
    25, 18, 26, 16, 22, 23,  9, -1,  0, -1,  4, -1,  4, -1,  8, 23, 11, -1, -1, -1,  0,  0, -1, -1,
     9,  7,  0,  1, 17, -1, -1,  7,  3, -1,  3, 23, -1, 16, -1, -1, 21, -1,  0, -1, -1,  0,  0, -1,
    24,  5, 26,  7,  1, -1, -1, 15, 24, 15, -1,  8, -1, 13, -1, 13, -1, 11, -1, -1, -1, -1,  0,  0,
     2,  2, 19, 14, 24,  1, 15, 19, -1, 21, -1,  2, -1, 24, -1,  3, -1,  2,  1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R34_1296: [i16; 144] = [
    39, 40, 51, 41,  3, 29,  8, 36, -1, 14, -1,  6, -1, 33, -1, 11, -1,  4,  1,  0, -1, -1, -1, -1,
    48, 21, 47,  9, 48, 35, 51, -1, 38, -1, 28, -1, 34, -1, 50, -1, 50, -1, -1,  0,  0, -1, -1, -1,
    30, 39, 28, 42, 50, 39,  5, 17, -1,  6, -1, 18, -1, 20, -1, 15, -1, 40, -1, -1,  0,  0, -1, -1,
    29,  0,  1, 43, 36, 30, 47, -1, 49, -1, 47, -1,  3, -1, 35, -1, 34, -1,  0, -1, -1,  0,  0, -1,
     1, 32, 11, 23, 10, 44, 12,  7, -1, 48, -1,  4, -1,  9, -1, 17, -1, 16, -1, -1, -1, -1,  0,  0,
    13,  7, 15, 47, 23, 16, 47, -1, 43, -1, 29, -1, 52, -1,  2, -1, 53, -1,  1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R34_1944: [i16; 144] = [
    48, 29, 28, 39,  9, 61, -1, -1, -1, 63, 45, 80, -1, -1, -1, 37, 32, 22,  1,  0, -1, -1, -1, -1,
     4, 49, 42, 48, 11, 30, -1, -1, -1, 49, 17, 41, 37, 15, -1, 54, -1, -1, -1,  0,  0, -1, -1, -1,
    35, 76, 78, 51, 37, 35, 21, -1, 17, 64, -1, -1, -1, 59,  7, -1, -1, 32, -1, -1,  0,  0, -1, -1,
     9, 65, 44,  9, 54, 56, 73, 34, 42, -1, -1, -1, 35, -1, -1, -1, 46, 39,  0, -1, -1,  0,  0, -1,
     3, 62,  7, 80, 68, 26, -1, 80, 55, -1, 36, -1, 26, -1,  9, -1, 72, -1, -1, -1, -1, -1,  0,  0,
    26, 75, 33, 21, 69, 59,  3, 38, -1, -1, -1, 35, -1, 62, 36, 26, -1, -1,  1, -1, -1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R56_648: [i16; 96] = [
    17, 13,  8, 21,  9,  3, 18, 12, 10,  0,  4, 15, 19,  2,  5, 10, 26, 19, 13, 13,  1,  0, -1, -1,
     3, 12, 11, 14, 11, 25,  5, 18,  0,  9,  2, 26, 26, 10, 24,  7, 14, 20,  4,  2, -1,  0,  0, -1,
    22, 16,  4,  3, 10, 21, 12,  5, 21, 14, 19,  5, -1,  8,  5, 18, 11,  5,  5, 15,  0, -1,  0,  0,
     7,  7, 14, 14,  4, 16, 16, 24, 24, 10,  1,  7, 15,  6, 10, 26,  8, 18, 21, 14,  1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R56_1296: [i16; 96] = [
    48, 29, 37, 52,  2, 16,  6, 14, 53, 31, 34,  5, 18, 42, 53, 31, 45, -1, 46, 52,  1,  0, -1, -1,
    17,  4, 30,  7, 43, 11, 24,  6, 14, 21,  6, 39, 17, 40, 47,  7, 15, 41, 19, -1, -1,  0,  0, -1,
     7,  2, 51, 31, 46, 23, 16, 11, 53, 40, 10,  7, 46, 53, 33, 35, -1, 25, 35, 38,  0, -1,  0,  0,
    19, 48, 41,  1, 10,  7, 36, 47,  5, 29, 52, 52, 31, 10, 26,  6,  3,  2, -1, 51,  1, -1, -1,  0,
];

#[rustfmt::skip]
static HB_R56_1944: [i16; 96] = [
    13, 48, 80, 66,  4, 74,  7, 30, 76, 52, 37, 60, -1, 49, 73, 31, 74, 73, 23, -1,  1,  0, -1, -1,
    69, 63, 74, 56, 64, 77, 57, 65,  6, 16, 51, -1, 64, -1, 68,  9, 48, 62, 54, 27, -1,  0,  0, -1,
    51, 15,  0, 80, 24, 25, 42, 54, 44, 71, 71,  9, 67, 35, -1, 58, -1, 29, -1, 53,  0, -1,  0,  0,
    16, 29, 36, 41, 44, 56, 59, 37, 50, 24, -1, 65,  4, 65, 52, -1,  4, -1, 73, 52,  1, -1, -1,  0,
];

#[cfg(test)]
mod test {
    use super::*;
    use enum_iterator::all;

    fn all_codes() -> impl Iterator<Item = IEEE80211Code> {
        all::<Rate>()
            .flat_map(|rate| all::<BlockLength>().map(move |n| IEEE80211Code::new(rate, n)))
    }

    #[test]
    fn dimensions() {
        for c in all_codes() {
            let code = c.code();
            assert_eq!(code.n(), c.length().n());
            assert_eq!(code.z(), c.length().z());
            assert_eq!(code.nb(), 24);
            let h = c.h();
            assert_eq!(h.num_rows(), code.m());
            assert_eq!(h.num_cols(), code.n());
        }
        let code = IEEE80211Code::new(Rate::R1_2, BlockLength::N648).code();
        assert_eq!(code.z(), 27);
        assert_eq!(code.m(), 324);
        assert_eq!(code.message_bits(), 324);
        let code = IEEE80211Code::new(Rate::R5_6, BlockLength::N1944).code();
        assert_eq!(code.z(), 81);
        assert_eq!(code.message_bits(), 1620);
    }

    #[test]
    fn shifts_in_range() {
        for c in all_codes() {
            let code = c.code();
            let z = i16::try_from(code.z()).unwrap();
            assert!(code.hb().iter().all(|&x| x == -1 || (0..z).contains(&x)));
        }
    }

    // The first parity block column has three nonzero blocks (first, some
    // middle row, last) with equal shifts at the ends, and the second parity
    // part is a dual-diagonal staircase of identity blocks.
    #[test]
    fn parity_structure() {
        for c in all_codes() {
            let code = c.code();
            let (mb, nb, kb) = (code.mb(), code.nb(), code.kb());
            let hb = code.hb();
            let cell = |row: usize, col: usize| hb[row * nb + col];
            let p1 = (0..mb).map(|row| cell(row, kb)).collect::<Vec<_>>();
            assert_eq!(p1.iter().filter(|&&x| x >= 0).count(), 3, "{c}");
            assert_eq!(p1[0], p1[mb - 1], "{c}");
            assert!(p1[0] >= 0, "{c}");
            for row in 0..mb {
                for j in 0..mb - 1 {
                    let expected = if row == j || row == j + 1 { 0 } else { -1 };
                    assert_eq!(cell(row, kb + 1 + j), expected, "{c}");
                }
            }
        }
    }

    #[test]
    fn parse() {
        assert_eq!("3/4".parse::<Rate>().unwrap(), Rate::R3_4);
        assert_eq!("1296".parse::<BlockLength>().unwrap(), BlockLength::N1296);
        assert!("4/5".parse::<Rate>().is_err());
        assert!("1000".parse::<BlockLength>().is_err());
        for rate in all::<Rate>() {
            assert_eq!(rate.to_string().parse::<Rate>().unwrap(), rate);
        }
    }
}
