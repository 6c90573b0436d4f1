use nvjpeg_sys::nvjpegStatus_t;

use crate::format::{Encoding, PixelFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NVJpegError {
    NotInitialized,
    InvalidParameter,
    BadJpeg,
    JpegNotSupported,
    AllocatorFailure,
    ExecutionFailed,
    ArchMismatch,
    InternalError,
    ImplementationNotSupported,
    IncompleteBitstream,
    Unknown(u32),
}

impl NVJpegError {
    pub fn as_str(&self) -> &'static str {
        // uses error text messages from: https://docs.nvidia.com/cuda/nvjpeg/index.html#nvjpeg-type-declarations
        match self {
            NVJpegError::NotInitialized => "The library handle was not initialized. A call to nvjpegCreate() is required to initialize the handle.",
            NVJpegError::InvalidParameter => "Wrong parameter was passed. For example, a null pointer as input data, or an image index not in the allowed range.",
            NVJpegError::BadJpeg => "Cannot parse the JPEG stream. Check that the encoded JPEG stream and its size parameters are correct.",
            NVJpegError::JpegNotSupported => "Attempting to decode a JPEG stream that is not supported by the nvJPEG library.",
            NVJpegError::AllocatorFailure => "The user-provided allocator functions, for either memory allocation or for releasing the memory, returned a non-zero code.",
            NVJpegError::ExecutionFailed => "Error during the execution of the device tasks.",
            NVJpegError::ArchMismatch => "The device capabilities are not enough for the set of input parameters provided (input parameters such as backend, encoded stream parameters, output format).",
            NVJpegError::InternalError => "Error during the execution of the device tasks.",
            NVJpegError::ImplementationNotSupported => "Not supported.",
            NVJpegError::IncompleteBitstream => "Bitstream input data incomplete.",
            NVJpegError::Unknown(_) => "Unknown nvJPEG status code.",
        }
    }

    #[inline]
    pub fn code(&self) -> u32 {
        match self {
            NVJpegError::NotInitialized => 1,
            NVJpegError::InvalidParameter => 2,
            NVJpegError::BadJpeg => 3,
            NVJpegError::JpegNotSupported => 4,
            NVJpegError::AllocatorFailure => 5,
            NVJpegError::ExecutionFailed => 6,
            NVJpegError::ArchMismatch => 7,
            NVJpegError::InternalError => 8,
            NVJpegError::ImplementationNotSupported => 9,
            NVJpegError::IncompleteBitstream => 10,
            NVJpegError::Unknown(code) => *code,
        }
    }
}

impl From<nvjpegStatus_t> for NVJpegError {
    fn from(value: nvjpegStatus_t) -> Self {
        match value {
            1 => NVJpegError::NotInitialized,
            2 => NVJpegError::InvalidParameter,
            3 => NVJpegError::BadJpeg,
            4 => NVJpegError::JpegNotSupported,
            5 => NVJpegError::AllocatorFailure,
            6 => NVJpegError::ExecutionFailed,
            7 => NVJpegError::ArchMismatch,
            8 => NVJpegError::InternalError,
            9 => NVJpegError::ImplementationNotSupported,
            10 => NVJpegError::IncompleteBitstream,
            code => NVJpegError::Unknown(code),
        }
    }
}

pub trait ToNVJpegResult {
    fn to_result(self) -> Result<(), NVJpegError>;

    /// Like [`to_result`](ToNVJpegResult::to_result), tagging a failure with the nvJPEG
    /// call that produced it.
    #[inline]
    fn check(self, call: &'static str) -> Result<(), EncodeError>
    where
        Self: Sized,
    {
        self.to_result()
            .map_err(|source| EncodeError::Nvjpeg { call, source })
    }
}

impl ToNVJpegResult for nvjpegStatus_t {
    #[inline]
    fn to_result(self) -> Result<(), NVJpegError> {
        match self {
            0 => Ok(()),
            _ => Err(NVJpegError::from(self)),
        }
    }
}

impl std::fmt::Display for NVJpegError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.as_str(), self.code())
    }
}

impl std::error::Error for NVJpegError {}

/// Everything that can go wrong while encoding a frame.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{call} failed: {source}")]
    Nvjpeg {
        call: &'static str,
        #[source]
        source: NVJpegError,
    },

    #[error("CUDA error: {0}")]
    Cuda(String),

    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),

    #[error("unsupported pixel format {0:?}")]
    UnsupportedPixelFormat(String),

    #[error("pixel format {format} cannot be encoded as {encoding}")]
    FormatMismatch {
        encoding: Encoding,
        format: PixelFormat,
    },

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("stride {stride} is too small for a row of {width} pixels")]
    InvalidStride { width: u32, stride: u32 },

    #[error("pixel buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("cannot scale {width}x{height} to {scaled_width}x{scaled_height}")]
    InvalidScaling {
        width: u32,
        height: u32,
        scaled_width: u32,
        scaled_height: u32,
    },

    #[error("alpha offset {offset} is outside of a {len} byte jpega stream")]
    InvalidAlphaOffset { offset: usize, len: usize },

    #[error("nvJPEG encoder unavailable: {0}")]
    Unavailable(&'static str),
}

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;
