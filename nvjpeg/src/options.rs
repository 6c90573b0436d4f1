use nvjpeg_sys::{
    nvjpegChromaSubsampling_t, nvjpegChromaSubsampling_t_NVJPEG_CSS_420,
    nvjpegChromaSubsampling_t_NVJPEG_CSS_422, nvjpegChromaSubsampling_t_NVJPEG_CSS_444,
    nvjpegChromaSubsampling_t_NVJPEG_CSS_GRAY,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{EncodeError, Result},
    image::ImageRef,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsampling {
    #[serde(rename = "444")]
    Css444,
    #[serde(rename = "422")]
    Css422,
    #[serde(rename = "420")]
    Css420,
    #[serde(rename = "gray")]
    Gray,
}

impl Subsampling {
    /// Lower qualities trade chroma resolution for size.
    pub fn for_quality(quality: u8) -> Self {
        match quality {
            0..=59 => Subsampling::Css420,
            60..=79 => Subsampling::Css422,
            _ => Subsampling::Css444,
        }
    }

    #[inline]
    pub fn to_nvjpeg(self) -> nvjpegChromaSubsampling_t {
        match self {
            Subsampling::Css444 => nvjpegChromaSubsampling_t_NVJPEG_CSS_444,
            Subsampling::Css422 => nvjpegChromaSubsampling_t_NVJPEG_CSS_422,
            Subsampling::Css420 => nvjpegChromaSubsampling_t_NVJPEG_CSS_420,
            Subsampling::Gray => nvjpegChromaSubsampling_t_NVJPEG_CSS_GRAY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subsampling::Css444 => "444",
            Subsampling::Css422 => "422",
            Subsampling::Css420 => "420",
            Subsampling::Gray => "gray",
        }
    }
}

impl std::fmt::Display for Subsampling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_QUALITY: u8 = 50;
pub const DEFAULT_SPEED: u8 = 50;

/// Per-frame knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// 1 (smallest) to 100 (best), out of range values are clamped.
    pub quality: u8,
    /// 0 (slowest, smallest output) to 100 (fastest).
    pub speed: u8,
    pub scaled_width: Option<u32>,
    pub scaled_height: Option<u32>,
    /// Overrides [`Subsampling::for_quality`].
    pub subsampling: Option<Subsampling>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            quality: DEFAULT_QUALITY,
            speed: DEFAULT_SPEED,
            scaled_width: None,
            scaled_height: None,
            subsampling: None,
        }
    }
}

impl EncodeOptions {
    #[inline]
    pub fn quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }

    #[inline]
    pub fn subsampling(&self) -> Subsampling {
        self.subsampling
            .unwrap_or_else(|| Subsampling::for_quality(self.quality()))
    }

    /// Optimized Huffman tables need an extra pass over the coefficients.
    #[inline]
    pub fn optimized_huffman(&self) -> bool {
        self.speed < 50
    }

    /// Output size for `image`. Only downscaling is supported.
    pub fn output_size(&self, image: &ImageRef) -> Result<(u32, u32)> {
        let (width, height) = (image.width(), image.height());
        let scaled_width = self.scaled_width.unwrap_or(width);
        let scaled_height = self.scaled_height.unwrap_or(height);

        if scaled_width == 0
            || scaled_height == 0
            || scaled_width > width
            || scaled_height > height
        {
            return Err(EncodeError::InvalidScaling {
                width,
                height,
                scaled_width,
                scaled_height,
            });
        }
        Ok((scaled_width, scaled_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    #[test]
    fn test_subsampling_thresholds() {
        assert_eq!(Subsampling::for_quality(1), Subsampling::Css420);
        assert_eq!(Subsampling::for_quality(59), Subsampling::Css420);
        assert_eq!(Subsampling::for_quality(60), Subsampling::Css422);
        assert_eq!(Subsampling::for_quality(79), Subsampling::Css422);
        assert_eq!(Subsampling::for_quality(80), Subsampling::Css444);
        assert_eq!(Subsampling::for_quality(100), Subsampling::Css444);
    }

    #[test]
    fn test_quality_is_clamped() {
        let mut options = EncodeOptions {
            quality: 0,
            ..Default::default()
        };
        assert_eq!(options.quality(), 1);
        options.quality = 250;
        assert_eq!(options.quality(), 100);
        assert_eq!(options.subsampling(), Subsampling::Css444);
    }

    #[test]
    fn test_override_wins() {
        let options = EncodeOptions {
            quality: 95,
            subsampling: Some(Subsampling::Css420),
            ..Default::default()
        };
        assert_eq!(options.subsampling(), Subsampling::Css420);
    }

    #[test]
    fn test_speed_selects_huffman() {
        let mut options = EncodeOptions::default();
        assert!(!options.optimized_huffman());
        options.speed = 10;
        assert!(options.optimized_huffman());
    }

    #[test]
    fn test_output_size() {
        let pixels = vec![0u8; 8 * 6 * 4];
        let image = ImageRef::packed(&pixels, 8, 6, PixelFormat::Bgrx).unwrap();

        assert_eq!(EncodeOptions::default().output_size(&image).unwrap(), (8, 6));

        let options = EncodeOptions {
            scaled_width: Some(4),
            scaled_height: Some(3),
            ..Default::default()
        };
        assert_eq!(options.output_size(&image).unwrap(), (4, 3));

        let upscale = EncodeOptions {
            scaled_width: Some(16),
            ..Default::default()
        };
        assert!(matches!(
            upscale.output_size(&image),
            Err(EncodeError::InvalidScaling { scaled_width: 16, scaled_height: 6, .. })
        ));

        let zero = EncodeOptions {
            scaled_height: Some(0),
            ..Default::default()
        };
        assert!(zero.output_size(&image).is_err());
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: EncodeOptions =
            serde_json::from_str(r#"{"quality": 90, "subsampling": "420"}"#).unwrap();
        assert_eq!(options.quality, 90);
        assert_eq!(options.speed, DEFAULT_SPEED);
        assert_eq!(options.subsampling, Some(Subsampling::Css420));
        assert_eq!(options.scaled_width, None);
    }
}
