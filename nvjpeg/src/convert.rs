//! Host reference for the conversion kernels.
//!
//! The GPU kernels in `kernels` must produce exactly these bytes. Scaling is
//! nearest-neighbour: output pixel `x` samples source column `x * src_w / dst_w`.

use crate::image::ImageRef;

#[inline]
pub fn source_coord(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    (dst as u64 * src_len as u64 / dst_len as u64) as u32
}

/// Packed `RGBRGB...` with a pitch of `dst_width * 3`.
pub fn to_rgbi(image: &ImageRef, dst_width: u32, dst_height: u32) -> Vec<u8> {
    let offsets = image.format().channel_offsets();
    let mut out = Vec::with_capacity(dst_width as usize * dst_height as usize * 3);

    for y in 0..dst_height {
        let sy = source_coord(y, dst_height, image.height());
        for x in 0..dst_width {
            let sx = source_coord(x, dst_width, image.width());
            let pixel = image.pixel(sx, sy);
            out.extend_from_slice(&[pixel[offsets.r], pixel[offsets.g], pixel[offsets.b]]);
        }
    }
    out
}

/// Separate R, G, B and A planes, each with a pitch of `dst_width`.
pub fn to_planar(image: &ImageRef, dst_width: u32, dst_height: u32) -> [Vec<u8>; 4] {
    let offsets = image.format().channel_offsets();
    let plane_len = dst_width as usize * dst_height as usize;
    let mut planes: [Vec<u8>; 4] = std::array::from_fn(|_| Vec::with_capacity(plane_len));

    for y in 0..dst_height {
        let sy = source_coord(y, dst_height, image.height());
        for x in 0..dst_width {
            let sx = source_coord(x, dst_width, image.width());
            let pixel = image.pixel(sx, sy);
            for (plane, offset) in planes
                .iter_mut()
                .zip([offsets.r, offsets.g, offsets.b, offsets.a])
            {
                plane.push(pixel[offset]);
            }
        }
    }
    planes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    // 2x2 BGRA image, each pixel tagged with its index in every channel byte
    fn bgra_2x2() -> Vec<u8> {
        vec![
            10, 11, 12, 13, 20, 21, 22, 23, //
            30, 31, 32, 33, 40, 41, 42, 43,
        ]
    }

    #[test]
    fn test_rgbi_reorders_channels() {
        let pixels = bgra_2x2();
        let image = ImageRef::packed(&pixels, 2, 2, PixelFormat::Bgra).unwrap();
        assert_eq!(
            to_rgbi(&image, 2, 2),
            vec![12, 11, 10, 22, 21, 20, 32, 31, 30, 42, 41, 40]
        );
    }

    #[test]
    fn test_planar_splits_channels() {
        let pixels = bgra_2x2();
        let image = ImageRef::packed(&pixels, 2, 2, PixelFormat::Bgra).unwrap();
        let [r, g, b, a] = to_planar(&image, 2, 2);
        assert_eq!(r, vec![12, 22, 32, 42]);
        assert_eq!(g, vec![11, 21, 31, 41]);
        assert_eq!(b, vec![10, 20, 30, 40]);
        assert_eq!(a, vec![13, 23, 33, 43]);
    }

    #[test]
    fn test_argb_alpha_comes_first() {
        let pixels = [255, 1, 2, 3];
        let image = ImageRef::packed(&pixels, 1, 1, PixelFormat::Argb).unwrap();
        let [r, g, b, a] = to_planar(&image, 1, 1);
        assert_eq!((r[0], g[0], b[0], a[0]), (1, 2, 3, 255));
    }

    #[test]
    fn test_downscale_samples_nearest() {
        // 4x1 RGBX row, halving the width keeps columns 0 and 2
        let pixels = [
            1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0,
        ];
        let image = ImageRef::packed(&pixels, 4, 1, PixelFormat::Rgbx).unwrap();
        assert_eq!(to_rgbi(&image, 2, 1), vec![1, 0, 0, 3, 0, 0]);
    }

    #[test]
    fn test_respects_stride() {
        // 1x2 XRGB with 8 byte rows, the padding bytes must never be sampled
        let pixels = [0, 9, 8, 7, 0xEE, 0xEE, 0xEE, 0xEE, 0, 6, 5, 4];
        let image = ImageRef::new(&pixels, 1, 2, 8, PixelFormat::Xrgb).unwrap();
        assert_eq!(to_rgbi(&image, 1, 2), vec![9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_source_coord_stays_in_bounds() {
        for dst_len in 1..40 {
            for dst in 0..dst_len {
                assert!(source_coord(dst, dst_len, 37) < 37);
            }
        }
        assert_eq!(source_coord(0, 1, 1920), 0);
    }
}
