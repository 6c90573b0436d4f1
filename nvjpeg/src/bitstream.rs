use crate::{
    error::{EncodeError, Result},
    format::Encoding,
    options::Subsampling,
};

const SOI: [u8; 2] = [0xFF, 0xD8];
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Checks for a start-of-image marker at the front and an end-of-image marker at the back.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 4 && data.starts_with(&SOI) && data.ends_with(&EOI)
}

/// Concatenates the color and alpha streams, returning the offset of the alpha stream.
pub fn append_alpha(mut color: Vec<u8>, alpha: &[u8]) -> (Vec<u8>, usize) {
    let offset = color.len();
    color.extend_from_slice(alpha);
    (color, offset)
}

/// Splits a jpega stream at `alpha_offset`.
pub fn split_jpega(data: &[u8], alpha_offset: usize) -> Result<(&[u8], &[u8])> {
    if alpha_offset == 0 || alpha_offset >= data.len() {
        return Err(EncodeError::InvalidAlphaOffset {
            offset: alpha_offset,
            len: data.len(),
        });
    }
    Ok(data.split_at(alpha_offset))
}

/// A compressed frame copied back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    /// Sampling of the color stream; the alpha stream is always grayscale.
    pub subsampling: Subsampling,
    pub data: Vec<u8>,
    /// Start of the alpha stream inside `data`, `jpega` only.
    pub alpha_offset: Option<usize>,
}

impl EncodedImage {
    /// The color JPEG, which is all of `data` for plain `jpeg`.
    pub fn color_stream(&self) -> Result<&[u8]> {
        match self.alpha_offset {
            Some(offset) => split_jpega(&self.data, offset).map(|(color, _)| color),
            None => Ok(&self.data),
        }
    }

    /// The grayscale alpha JPEG, `None` for plain `jpeg`.
    pub fn alpha_stream(&self) -> Result<Option<&[u8]>> {
        self.alpha_offset
            .map(|offset| split_jpega(&self.data, offset).map(|(_, alpha)| alpha))
            .transpose()
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> u8 {
        if self.encoding.has_alpha() {
            32
        } else {
            24
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jpeg(body: &[u8]) -> Vec<u8> {
        let mut data = SOI.to_vec();
        data.extend_from_slice(body);
        data.extend_from_slice(&EOI);
        data
    }

    #[test]
    fn test_is_jpeg() {
        assert!(is_jpeg(&fake_jpeg(&[1, 2, 3])));
        assert!(is_jpeg(&fake_jpeg(&[])));
        assert!(!is_jpeg(&[0xFF, 0xD8, 0xD9]));
        assert!(!is_jpeg(&[0x89, b'P', b'N', b'G', 0xFF, 0xD9]));
        assert!(!is_jpeg(&[]));
    }

    #[test]
    fn test_append_then_split() {
        let color = fake_jpeg(&[1; 10]);
        let alpha = fake_jpeg(&[2; 5]);
        let (data, offset) = append_alpha(color.clone(), &alpha);
        assert_eq!(offset, color.len());

        let (c, a) = split_jpega(&data, offset).unwrap();
        assert_eq!(c, &color[..]);
        assert_eq!(a, &alpha[..]);
        assert!(is_jpeg(c) && is_jpeg(a));
    }

    #[test]
    fn test_split_rejects_bad_offsets() {
        let data = fake_jpeg(&[0; 4]);
        assert!(matches!(
            split_jpega(&data, 0),
            Err(EncodeError::InvalidAlphaOffset { offset: 0, len: 8 })
        ));
        assert!(split_jpega(&data, data.len()).is_err());
        assert!(split_jpega(&data, data.len() + 1).is_err());
    }

    #[test]
    fn test_encoded_image_streams() {
        let color = fake_jpeg(&[3; 6]);
        let alpha = fake_jpeg(&[4; 2]);
        let (data, offset) = append_alpha(color.clone(), &alpha);
        let image = EncodedImage {
            encoding: Encoding::Jpega,
            width: 2,
            height: 2,
            quality: 50,
            subsampling: Subsampling::Css420,
            data,
            alpha_offset: Some(offset),
        };
        assert_eq!(image.color_stream().unwrap(), &color[..]);
        assert_eq!(image.alpha_stream().unwrap(), Some(&alpha[..]));
        assert_eq!(image.bits_per_pixel(), 32);

        let plain = EncodedImage {
            encoding: Encoding::Jpeg,
            alpha_offset: None,
            data: color.clone(),
            ..image
        };
        assert_eq!(plain.color_stream().unwrap(), &color[..]);
        assert_eq!(plain.alpha_stream().unwrap(), None);
        assert_eq!(plain.bits_per_pixel(), 24);
        assert_eq!(plain.len(), color.len());
    }

    #[test]
    fn test_streams_reject_offset_past_end() {
        let image = EncodedImage {
            encoding: Encoding::Jpega,
            width: 1,
            height: 1,
            quality: 50,
            subsampling: Subsampling::Css420,
            data: fake_jpeg(&[]),
            alpha_offset: Some(10),
        };
        assert!(matches!(
            image.alpha_stream(),
            Err(EncodeError::InvalidAlphaOffset { offset: 10, len: 4 })
        ));
        assert!(matches!(
            image.color_stream(),
            Err(EncodeError::InvalidAlphaOffset { offset: 10, len: 4 })
        ));

        let empty_color = EncodedImage {
            alpha_offset: Some(0),
            ..image
        };
        assert!(empty_color.alpha_stream().is_err());
    }
}
