use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Bitstream flavours produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Plain baseline JPEG, alpha is dropped.
    Jpeg,
    /// A JPEG followed by a grayscale JPEG holding the alpha channel.
    Jpega,
}

impl Encoding {
    pub const ALL: [Encoding; 2] = [Encoding::Jpeg, Encoding::Jpega];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Jpeg => "jpeg",
            Encoding::Jpega => "jpega",
        }
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        matches!(self, Encoding::Jpega)
    }

    pub fn input_formats(&self) -> &'static [PixelFormat] {
        match self {
            Encoding::Jpeg => &PixelFormat::ALL,
            Encoding::Jpega => &PixelFormat::WITH_ALPHA,
        }
    }

    #[inline]
    pub fn accepts(&self, format: PixelFormat) -> bool {
        self.input_formats().contains(&format)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpeg" => Ok(Encoding::Jpeg),
            "jpega" => Ok(Encoding::Jpega),
            other => Err(EncodeError::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Byte positions of each channel inside a 4 byte pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsets {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    /// Alpha, or the padding byte for the `X` formats.
    pub a: usize,
}

/// Memory order of the 32 bit pixels handed to the encoder.
///
/// Names list the bytes in memory order, so `BGRX` stores blue at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PixelFormat {
    Bgrx,
    Rgbx,
    Xbgr,
    Xrgb,
    Bgra,
    Rgba,
    Abgr,
    Argb,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 8] = [
        PixelFormat::Bgrx,
        PixelFormat::Rgbx,
        PixelFormat::Xbgr,
        PixelFormat::Xrgb,
        PixelFormat::Bgra,
        PixelFormat::Rgba,
        PixelFormat::Abgr,
        PixelFormat::Argb,
    ];

    pub const WITH_ALPHA: [PixelFormat; 4] = [
        PixelFormat::Bgra,
        PixelFormat::Rgba,
        PixelFormat::Abgr,
        PixelFormat::Argb,
    ];

    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn as_str(&self) -> &'static str {
        match self {
            PixelFormat::Bgrx => "BGRX",
            PixelFormat::Rgbx => "RGBX",
            PixelFormat::Xbgr => "XBGR",
            PixelFormat::Xrgb => "XRGB",
            PixelFormat::Bgra => "BGRA",
            PixelFormat::Rgba => "RGBA",
            PixelFormat::Abgr => "ABGR",
            PixelFormat::Argb => "ARGB",
        }
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        Self::WITH_ALPHA.contains(self)
    }

    pub fn channel_offsets(&self) -> ChannelOffsets {
        let (r, g, b, a) = match self {
            PixelFormat::Bgrx | PixelFormat::Bgra => (2, 1, 0, 3),
            PixelFormat::Rgbx | PixelFormat::Rgba => (0, 1, 2, 3),
            PixelFormat::Xbgr | PixelFormat::Abgr => (3, 2, 1, 0),
            PixelFormat::Xrgb | PixelFormat::Argb => (1, 2, 3, 0),
        };
        ChannelOffsets { r, g, b, a }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| EncodeError::UnsupportedPixelFormat(s.to_string()))
    }
}

/// Every encoding this crate can produce.
#[inline]
pub fn encodings() -> &'static [Encoding] {
    &Encoding::ALL
}

/// Pixel formats accepted for `encoding`.
#[inline]
pub fn input_formats(encoding: Encoding) -> &'static [PixelFormat] {
    encoding.input_formats()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encodings() {
        assert_eq!("jpeg".parse::<Encoding>().unwrap(), Encoding::Jpeg);
        assert_eq!("jpega".parse::<Encoding>().unwrap(), Encoding::Jpega);
        assert!(matches!(
            "webp".parse::<Encoding>(),
            Err(EncodeError::UnsupportedEncoding(name)) if name == "webp"
        ));
    }

    #[test]
    fn test_parse_pixel_formats() {
        for format in PixelFormat::ALL {
            assert_eq!(format.as_str().parse::<PixelFormat>().unwrap(), format);
        }
        assert!("YUV420P".parse::<PixelFormat>().is_err());
        assert!("bgrx".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn test_jpega_requires_alpha() {
        for format in PixelFormat::ALL {
            assert!(Encoding::Jpeg.accepts(format));
            assert_eq!(Encoding::Jpega.accepts(format), format.has_alpha());
        }
        assert_eq!(input_formats(Encoding::Jpega).len(), 4);
        assert_eq!(encodings(), &[Encoding::Jpeg, Encoding::Jpega]);
    }

    #[test]
    fn test_channel_offsets_follow_names() {
        for format in PixelFormat::ALL {
            let name = format.as_str().as_bytes();
            let offsets = format.channel_offsets();
            assert_eq!(name[offsets.r], b'R');
            assert_eq!(name[offsets.g], b'G');
            assert_eq!(name[offsets.b], b'B');
            assert!(matches!(name[offsets.a], b'A' | b'X'));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Encoding::Jpega).unwrap(), "\"jpega\"");
        assert_eq!(serde_json::to_string(&PixelFormat::Bgrx).unwrap(), "\"BGRX\"");
        let format: PixelFormat = serde_json::from_str("\"ARGB\"").unwrap();
        assert_eq!(format, PixelFormat::Argb);
    }
}
