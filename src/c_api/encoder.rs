use super::{code_from_c, size_t_to_usize};
use crate::encoder::Encoder;
use libc::size_t;
use std::ffi::{c_char, c_void};

// Writes the codeword as unpacked bits. Returns false if the message does not
// fit or the output has the wrong length.
fn encode(encoder: &Encoder, output: &mut [u8], input: &[u8]) -> bool {
    match encoder.encode_bits(input) {
        Ok(codeword) if codeword.len() == output.len() => {
            output.copy_from_slice(&codeword);
            true
        }
        Ok(_) => {
            tracing::warn!(len = output.len(), "wrong output length");
            false
        }
        Err(_) => false,
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_encoder_ctor(
    rate: *const c_char,
    length: *const c_char,
) -> *mut c_void {
    let encoder = code_from_c(rate, length).and_then(|code| Ok(Encoder::new(code.code())?));
    match encoder {
        Ok(encoder) => Box::into_raw(Box::new(encoder)) as *mut c_void,
        Err(e) => {
            tracing::warn!("could not build encoder: {e}");
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_encoder_dtor(encoder: *mut c_void) {
    if !encoder.is_null() {
        drop(Box::from_raw(encoder as *mut Encoder));
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_encoder_encode(
    encoder: *mut c_void,
    output: *mut u8,
    output_len: size_t,
    input: *const u8,
    input_len: size_t,
) -> i32 {
    let (Some(output_len), Some(input_len)) =
        (size_t_to_usize(output_len), size_t_to_usize(input_len))
    else {
        return -1;
    };
    if encoder.is_null() || output.is_null() || (input.is_null() && input_len > 0) {
        return -1;
    }
    let output = std::slice::from_raw_parts_mut(output, output_len);
    let input = if input_len > 0 {
        std::slice::from_raw_parts(input, input_len)
    } else {
        &[]
    };
    let encoder = &*(encoder as *const Encoder);
    if encode(encoder, output, input) {
        0
    } else {
        -1
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::ieee80211::{BlockLength, IEEE80211Code, Rate};
    use std::ffi::CString;

    #[test]
    fn encode_via_c_api() {
        let rate = CString::new("3/4").unwrap();
        let length = CString::new("1944").unwrap();
        let code = IEEE80211Code::new(Rate::R3_4, BlockLength::N1944).code();
        unsafe {
            let encoder = ldpc80211_encoder_ctor(rate.as_ptr(), length.as_ptr());
            assert!(!encoder.is_null());
            let message = vec![1; code.message_bits()];
            let mut output = vec![0; code.n()];
            let ret = ldpc80211_encoder_encode(
                encoder,
                output.as_mut_ptr(),
                output.len(),
                message.as_ptr(),
                message.len(),
            );
            assert_eq!(ret, 0);
            assert!(code.h().syndrome_is_zero(&output));
            // output too short
            let ret =
                ldpc80211_encoder_encode(encoder, output.as_mut_ptr(), 10, message.as_ptr(), 0);
            assert_eq!(ret, -1);
            ldpc80211_encoder_dtor(encoder);
        }
    }

    #[test]
    fn invalid_code() {
        let rate = CString::new("4/5").unwrap();
        let length = CString::new("648").unwrap();
        unsafe {
            assert!(ldpc80211_encoder_ctor(rate.as_ptr(), length.as_ptr()).is_null());
            assert!(ldpc80211_encoder_ctor(std::ptr::null(), length.as_ptr()).is_null());
            ldpc80211_encoder_dtor(std::ptr::null_mut());
        }
    }
}
