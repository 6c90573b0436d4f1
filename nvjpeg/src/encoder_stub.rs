//! Encoder used when the crate is built without the `cuda` feature.

use crate::{
    bitstream::EncodedImage,
    config::EncoderConfig,
    error::{EncodeError, Result},
    format::Encoding,
    image::ImageRef,
    options::EncodeOptions,
    EncoderInfo,
};

const UNAVAILABLE: &str = "built without the `cuda` feature";

/// Stand-in for the GPU encoder. It can never be constructed.
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(_config: EncoderConfig) -> Result<Self> {
        Err(EncodeError::Unavailable(UNAVAILABLE))
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn info(&self) -> EncoderInfo {
        EncoderInfo {
            version: None,
            device_index: self.config.device_index,
            encodings: Encoding::ALL.to_vec(),
            stats: Default::default(),
        }
    }

    pub fn encode(
        &mut self,
        _encoding: Encoding,
        _image: &ImageRef,
        _options: &EncodeOptions,
    ) -> Result<EncodedImage> {
        Err(EncodeError::Unavailable(UNAVAILABLE))
    }
}
