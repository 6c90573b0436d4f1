//! Raw FFI Rust bindings to nvJPEG.
//!
//! Only the encoder half of the API is declared here.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

mod bindings;

pub use bindings::*;

impl nvjpegImage_t {
    /// An image with every channel pointer null and every pitch zero.
    #[inline]
    pub const fn new() -> Self {
        nvjpegImage_t {
            channel: [std::ptr::null_mut(); NVJPEG_MAX_COMPONENT as usize],
            pitch: [0; NVJPEG_MAX_COMPONENT as usize],
        }
    }
}

impl Default for nvjpegImage_t {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
