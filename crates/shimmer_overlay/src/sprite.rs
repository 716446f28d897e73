//! Embedded sprite assets
//!
//! The spinner's source sprite ships inside the binary and is decoded fresh
//! on every map; nothing is cached across unmap/map cycles.

use shimmer_core::PixelBuffer;

use crate::error::SpriteError;

/// The spinner's source sprite, PNG-encoded.
pub static SPINNER_SPRITE_PNG: &[u8] = include_bytes!("../assets/spinner.png");

/// Decode a PNG into a premultiplied ARGB surface.
pub fn decode_argb(png: &[u8]) -> Result<PixelBuffer, SpriteError> {
    let decoded = image::load_from_memory_with_format(png, image::ImageFormat::Png)?.into_rgba8();
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(SpriteError::Degenerate);
    }

    let mut surface = PixelBuffer::new(width, height);
    for (x, y, pixel) in decoded.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let pm = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        surface.put_pixel(x, y, [pm(b), pm(g), pm(r), a]);
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_sprite_decodes() {
        let sprite = decode_argb(SPINNER_SPRITE_PNG).unwrap();
        assert!(sprite.width() > 0);
        assert!(sprite.height() > 0);
    }

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(matches!(
            decode_argb(b"not a png"),
            Err(SpriteError::Decode(_))
        ));
    }

    #[test]
    fn test_premultiplication() {
        // 1x1 PNG, red at 50% alpha
        let png = one_pixel_png([200, 100, 40, 128]);
        let sprite = decode_argb(&png).unwrap();
        // Byte order B, G, R, A with channels scaled by alpha
        assert_eq!(sprite.get_pixel(0, 0), [20, 50, 100, 128]);
    }

    fn one_pixel_png(rgba: [u8; 4]) -> Vec<u8> {
        use image::{ImageBuffer, Rgba};
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_pixel(1, 1, Rgba(rgba));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }
}
