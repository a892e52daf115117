//! Bit packing.
//!
//! Conversions between packed bytes and unpacked bits, where each unpacked
//! bit is stored in its own `u8` as 0 or 1.

/// Unpacks bytes into bits, MSB first.
///
/// # Examples
/// ```
/// # use ldpc_80211::bits::bytes_to_bits_be;
/// assert_eq!(bytes_to_bits_be(&[0xA1]), [1, 0, 1, 0, 0, 0, 0, 1]);
/// ```
pub fn bytes_to_bits_be(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&b| (0..8).rev().map(move |j| (b >> j) & 1))
        .collect()
}

/// Packs bits into bytes, MSB first.
///
/// A trailing group of fewer than 8 bits fills the most significant bits of
/// the last byte.
///
/// # Examples
/// ```
/// # use ldpc_80211::bits::bits_to_bytes_be;
/// assert_eq!(bits_to_bytes_be(&[1, 0, 1, 0, 0, 0, 0, 1, 1, 1]), [0xA1, 0xC0]);
/// ```
pub fn bits_to_bytes_be(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (j, &b)| acc | ((b & 1) << (7 - j)))
        })
        .collect()
}

/// Unpacks bytes into bits, LSB first.
pub fn bytes_to_bits_le(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&b| (0..8).map(move |j| (b >> j) & 1))
        .collect()
}

/// Packs bits into bytes, LSB first.
///
/// A trailing group of fewer than 8 bits fills the least significant bits of
/// the last byte.
pub fn bits_to_bytes_le(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (j, &b)| acc | ((b & 1) << j))
        })
        .collect()
}
