//! C API.
//!
//! Encoders and decoders are exposed to C as opaque pointers. Codes are
//! selected by their rate and codeword length given as strings, such as
//! `"1/2"` and `"648"`. Constructors return a null pointer on failure, and
//! destructors accept a null pointer.

use crate::codes::ieee80211::{BlockLength, IEEE80211Code, Rate};
use libc::size_t;
use std::{
    error::Error,
    ffi::{c_char, CStr},
};

mod decoder;
mod encoder;

unsafe fn c_to_string(s: *const c_char) -> Option<String> {
    if s.is_null() {
        return None;
    }
    Some(String::from_utf8_lossy(CStr::from_ptr(s).to_bytes()).to_string())
}

#[allow(clippy::useless_conversion)]
fn size_t_to_usize(n: size_t) -> Option<usize> {
    usize::try_from(n).ok()
}

unsafe fn code_from_c(
    rate: *const c_char,
    length: *const c_char,
) -> Result<IEEE80211Code, Box<dyn Error>> {
    let rate: Rate = c_to_string(rate).ok_or("null rate")?.parse()?;
    let length: BlockLength = c_to_string(length).ok_or("null length")?.parse()?;
    Ok(IEEE80211Code::new(rate, length))
}
