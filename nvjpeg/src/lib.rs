//! GPU JPEG encoding of raw 32 bit pixel buffers through nvJPEG.
//!
//! Two bitstreams are produced:
//!
//! * `jpeg`: the pixels are converted to packed RGB on the device and compressed in one pass.
//! * `jpega`: the pixels are split into R, G, B and A planes. The color planes are compressed
//!   first, then the alpha plane is compressed as a grayscale JPEG and appended.
//!   [`EncodedImage::alpha_offset`] records where the second stream starts.
//!
//! ```no_run
//! # fn main() -> nvjpeg_enc::Result<()> {
//! use nvjpeg_enc::{Encoder, EncoderConfig, Encoding, ImageRef, PixelFormat};
//!
//! let pixels = vec![0u8; 640 * 480 * 4];
//! let image = ImageRef::packed(&pixels, 640, 480, PixelFormat::Bgrx)?;
//!
//! let config = EncoderConfig::from_env();
//! let options = config.default_options();
//! let mut encoder = Encoder::new(config)?;
//! let jpeg = encoder.encode(Encoding::Jpeg, &image, &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! The GPU encoder needs the `cuda` feature. Without it, [`Encoder::new`] fails with
//! [`EncodeError::Unavailable`] and only the host side of the crate is usable.

pub mod bitstream;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod image;
pub mod options;

#[cfg(feature = "cuda")]
pub mod kernels;
#[cfg(feature = "cuda")]
pub mod nvjpeg;

#[cfg_attr(not(feature = "cuda"), path = "encoder_stub.rs")]
mod encoder;

use serde::Serialize;

pub use bitstream::{append_alpha, is_jpeg, split_jpega, EncodedImage};
pub use config::EncoderConfig;
pub use encoder::Encoder;
pub use error::{EncodeError, NVJpegError, Result, ToNVJpegResult};
pub use format::{encodings, input_formats, Encoding, PixelFormat};
pub use image::ImageRef;
pub use options::{EncodeOptions, Subsampling};

/// Release of libnvjpeg as reported by `nvjpegGetProperty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryVersion {
    pub major: i32,
    pub minor: i32,
    pub patch: i32,
}

impl std::fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Running totals of an [`Encoder`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderStats {
    pub frames: u64,
    /// Host pixel bytes uploaded.
    pub bytes_in: u64,
    /// Compressed bytes returned, alpha streams included.
    pub bytes_out: u64,
}

/// Snapshot returned by [`Encoder::info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncoderInfo {
    /// `None` when the library version could not be queried.
    pub version: Option<LibraryVersion>,
    pub device_index: usize,
    pub encodings: Vec<Encoding>,
    pub stats: EncoderStats,
}

/// Version of the nvJPEG library this process is linked against.
#[cfg(feature = "cuda")]
#[inline]
pub fn library_version() -> Result<LibraryVersion> {
    nvjpeg::library_version()
}

#[cfg(not(feature = "cuda"))]
#[inline]
pub fn library_version() -> Result<LibraryVersion> {
    Err(EncodeError::Unavailable("built without the `cuda` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        let version = LibraryVersion {
            major: 12,
            minor: 3,
            patch: 1,
        };
        assert_eq!(version.to_string(), "12.3.1");
    }

    #[test]
    fn test_info_serializes() {
        let info = EncoderInfo {
            version: None,
            device_index: 0,
            encodings: encodings().to_vec(),
            stats: EncoderStats {
                frames: 2,
                bytes_in: 100,
                bytes_out: 10,
            },
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["encodings"], serde_json::json!(["jpeg", "jpega"]));
        assert_eq!(json["stats"]["frames"], 2);
        assert!(json["version"].is_null());
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn test_library_version_needs_cuda() {
        assert!(matches!(library_version(), Err(EncodeError::Unavailable(_))));
    }
}
