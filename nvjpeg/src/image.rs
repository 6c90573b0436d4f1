use crate::{
    error::{EncodeError, Result},
    format::PixelFormat,
};

/// Largest width or height a JPEG frame header can describe.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// A borrowed, validated host pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
}

impl<'a> ImageRef<'a> {
    /// `stride` is the distance in bytes between the starts of two rows.
    pub fn new(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        stride: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let row_bytes = width as usize * PixelFormat::BYTES_PER_PIXEL;
        if (stride as usize) < row_bytes {
            return Err(EncodeError::InvalidStride { width, stride });
        }

        let needed = stride as usize * (height as usize - 1) + row_bytes;
        if pixels.len() < needed {
            return Err(EncodeError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }

        Ok(ImageRef {
            pixels: &pixels[..needed],
            width,
            height,
            stride,
            format,
        })
    }

    /// Tightly packed rows, `stride == width * 4`.
    #[inline]
    pub fn packed(pixels: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let stride = width
            .checked_mul(PixelFormat::BYTES_PER_PIXEL as u32)
            .ok_or(EncodeError::InvalidDimensions { width, height })?;
        Self::new(pixels, width, height, stride, format)
    }

    /// The bytes the conversion kernel reads. Trailing padding after the last row is cut off.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.pixels
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The 4 bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride as usize + x as usize * PixelFormat::BYTES_PER_PIXEL;
        &self.pixels[start..start + PixelFormat::BYTES_PER_PIXEL]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_dimensions() {
        let pixels = [0u8; 16];
        assert!(matches!(
            ImageRef::new(&pixels, 0, 1, 4, PixelFormat::Bgrx),
            Err(EncodeError::InvalidDimensions { width: 0, height: 1 })
        ));
        assert!(matches!(
            ImageRef::new(&pixels, 1, 0, 4, PixelFormat::Bgrx),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            ImageRef::new(&pixels, MAX_DIMENSION + 1, 1, u32::MAX, PixelFormat::Bgrx),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_short_stride() {
        let pixels = [0u8; 64];
        assert!(matches!(
            ImageRef::new(&pixels, 4, 2, 12, PixelFormat::Rgba),
            Err(EncodeError::InvalidStride { width: 4, stride: 12 })
        ));
    }

    #[test]
    fn test_last_row_needs_no_padding() {
        // 3x2 pixels with a 16 byte stride, the final row stops after 12 bytes
        let pixels = vec![7u8; 16 + 12];
        let image = ImageRef::new(&pixels, 3, 2, 16, PixelFormat::Bgrx).unwrap();
        assert_eq!(image.bytes().len(), 28);

        let err = ImageRef::new(&pixels[..27], 3, 2, 16, PixelFormat::Bgrx).unwrap_err();
        assert!(matches!(err, EncodeError::BufferTooSmall { needed: 28, actual: 27 }));
    }

    #[test]
    fn test_bytes_trims_trailing_data() {
        let pixels = vec![0u8; 100];
        let image = ImageRef::packed(&pixels, 2, 2, PixelFormat::Rgbx).unwrap();
        assert_eq!(image.stride(), 8);
        assert_eq!(image.bytes().len(), 16);
    }

    #[test]
    fn test_pixel_uses_stride() {
        let mut pixels = vec![0u8; 2 * 12];
        pixels[12 + 4..12 + 8].copy_from_slice(&[1, 2, 3, 4]);
        let image = ImageRef::new(&pixels, 2, 2, 12, PixelFormat::Bgra).unwrap();
        assert_eq!(image.pixel(1, 1), &[1, 2, 3, 4]);
        assert_eq!(image.pixel(0, 0), &[0, 0, 0, 0]);
    }
}
