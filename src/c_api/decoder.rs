use super::{c_to_string, code_from_c, size_t_to_usize};
use crate::decoder::factory::{DecoderImplementation, LdpcDecoder};
use libc::size_t;
use std::{
    error::Error,
    ffi::{c_char, c_void},
};

#[derive(Debug)]
struct Decoder {
    decoder: Box<dyn LdpcDecoder>,
}

impl Decoder {
    unsafe fn new(
        rate: *const c_char,
        length: *const c_char,
        implementation: *const c_char,
    ) -> Result<Decoder, Box<dyn Error>> {
        let code = code_from_c(rate, length)?;
        let implementation: DecoderImplementation = c_to_string(implementation)
            .ok_or("null decoder implementation")?
            .parse()?;
        let decoder = implementation.build_decoder(code.code())?;
        Ok(Decoder { decoder })
    }

    // Returns the number of iterations, or -1 if decoding fails. On failure
    // the output holds the hard decision of the input.
    fn decode_f32(&mut self, output: &mut [u8], input: &[f32], max_iterations: u32) -> i32 {
        let n = self.decoder.code().n();
        if input.len() != n || output.len() > n {
            return -1;
        }
        let Ok(max_iterations) = usize::try_from(max_iterations) else {
            return -1;
        };
        match self.decoder.decode(input, max_iterations) {
            Some(decoded) => {
                output.copy_from_slice(&decoded.codeword[..output.len()]);
                i32::try_from(decoded.iterations).unwrap_or(i32::MAX)
            }
            None => {
                for (y, &x) in output.iter_mut().zip(input.iter()) {
                    *y = u8::from(x < 0.0);
                }
                -1
            }
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_decoder_ctor(
    rate: *const c_char,
    length: *const c_char,
    implementation: *const c_char,
) -> *mut c_void {
    match Decoder::new(rate, length, implementation) {
        Ok(decoder) => Box::into_raw(Box::new(decoder)) as *mut c_void,
        Err(e) => {
            tracing::warn!("could not build decoder: {e}");
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_decoder_dtor(decoder: *mut c_void) {
    if !decoder.is_null() {
        drop(Box::from_raw(decoder as *mut Decoder));
    }
}

#[no_mangle]
unsafe extern "C" fn ldpc80211_decoder_decode_f32(
    decoder: *mut c_void,
    output: *mut u8,
    output_len: size_t,
    input: *const f32,
    input_len: size_t,
    max_iterations: u32,
) -> i32 {
    let (Some(output_len), Some(input_len)) =
        (size_t_to_usize(output_len), size_t_to_usize(input_len))
    else {
        return -1;
    };
    if decoder.is_null() || output.is_null() || input.is_null() {
        return -1;
    }
    let output = std::slice::from_raw_parts_mut(output, output_len);
    let input = std::slice::from_raw_parts(input, input_len);
    let decoder = &mut *(decoder as *mut Decoder);
    decoder.decode_f32(output, input, max_iterations)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        codes::ieee80211::{BlockLength, IEEE80211Code, Rate},
        encoder::Encoder,
        simulation::channel::bits_to_signal,
    };
    use std::ffi::CString;

    #[test]
    fn decode_via_c_api() {
        let code = IEEE80211Code::new(Rate::R2_3, BlockLength::N1296).code();
        let message = (0..code.message_bits())
            .map(|j| u8::from(j % 3 == 0))
            .collect::<Vec<_>>();
        let codeword = Encoder::new(code).unwrap().encode_bits(&message).unwrap();
        let mut signal = bits_to_signal(&codeword);
        signal[5] = -signal[5];
        let rate = CString::new("2/3").unwrap();
        let length = CString::new("1296").unwrap();
        let implementation = CString::new("SumProduct").unwrap();
        unsafe {
            let decoder =
                ldpc80211_decoder_ctor(rate.as_ptr(), length.as_ptr(), implementation.as_ptr());
            assert!(!decoder.is_null());
            let mut output = vec![0; code.message_bits()];
            let ret = ldpc80211_decoder_decode_f32(
                decoder,
                output.as_mut_ptr(),
                output.len(),
                signal.as_ptr(),
                signal.len(),
                50,
            );
            assert!(ret >= 1);
            assert_eq!(output, message);
            // zero iterations always fails
            let ret = ldpc80211_decoder_decode_f32(
                decoder,
                output.as_mut_ptr(),
                output.len(),
                signal.as_ptr(),
                signal.len(),
                0,
            );
            assert_eq!(ret, -1);
            assert_eq!(output[5], 1 - message[5]);
            ldpc80211_decoder_dtor(decoder);
        }
    }

    #[test]
    fn invalid_implementation() {
        let rate = CString::new("1/2").unwrap();
        let length = CString::new("648").unwrap();
        let implementation = CString::new("Phif64").unwrap();
        unsafe {
            let decoder =
                ldpc80211_decoder_ctor(rate.as_ptr(), length.as_ptr(), implementation.as_ptr());
            assert!(decoder.is_null());
            ldpc80211_decoder_dtor(decoder);
        }
    }
}
