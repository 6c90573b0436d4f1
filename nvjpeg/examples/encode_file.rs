use std::path::PathBuf;

use nvjpeg_enc::{Encoder, EncoderConfig, Encoding, ImageRef, PixelFormat};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "cat_798x532.ppm".into()),
    );
    let raw_data = std::fs::read(&path)?;
    let rgba = image::load_from_memory(&raw_data)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let image = ImageRef::packed(rgba.as_raw(), width, height, PixelFormat::Rgba)?;
    let encoding = if has_transparency(rgba.as_raw()) {
        Encoding::Jpega
    } else {
        Encoding::Jpeg
    };

    let config = EncoderConfig::from_env();
    let options = config.default_options();
    let mut encoder = Encoder::new(config)?;
    let encoded = encoder.encode(encoding, &image, &options)?;

    let out = path.with_extension(encoding.as_str());
    std::fs::write(&out, &encoded.data)?;
    println!(
        "{}x{} -> {} ({} bytes, q={}, {}, alpha offset {:?})",
        width,
        height,
        out.display(),
        encoded.len(),
        encoded.quality,
        encoded.subsampling,
        encoded.alpha_offset
    );
    println!("{:?}", encoder.info());

    Ok(())
}

fn has_transparency(rgba: &[u8]) -> bool {
    rgba.chunks_exact(4).any(|pixel| pixel[3] != u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_ppm_is_accepted() {
        let ppm = b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06";
        let rgba = image::load_from_memory(ppm).unwrap().to_rgba8();
        assert_eq!(rgba.as_raw(), &[1, 2, 3, 255, 4, 5, 6, 255]);
        assert!(!has_transparency(rgba.as_raw()));

        let image = ImageRef::packed(rgba.as_raw(), 2, 1, PixelFormat::Rgba).unwrap();
        assert_eq!(image.bytes().len(), 8);
    }

    #[test]
    fn test_transparency() {
        assert!(has_transparency(&[0, 0, 0, 255, 0, 0, 0, 128]));
    }
}
