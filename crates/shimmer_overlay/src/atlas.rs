//! Rotation-frame atlas generation
//!
//! The spinner draws from a texture atlas holding its sprite pre-rotated at
//! every integer degree. Frames are packed into a fixed 19×19 grid: 361
//! cells, of which 360 are used — the last cell of the last row stays
//! undefined.

use shimmer_core::PixelBuffer;

/// Cells per atlas row and column.
pub const ATLAS_GRID: u32 = 19;

/// Number of rotation frames actually baked.
pub const ATLAS_FRAMES: u32 = 360;

/// Build the rotation atlas for `sprite`.
///
/// The result is `19·w × 19·h` pixels; frame `i` — the sprite rotated by
/// `i` degrees about its own center — lands in cell `(i mod 19, i div 19)`.
/// Sampling is bilinear over the premultiplied source.
pub fn build_rotation_atlas(sprite: &PixelBuffer) -> PixelBuffer {
    let width = sprite.width();
    let height = sprite.height();
    let mut atlas = PixelBuffer::new(width * ATLAS_GRID, height * ATLAS_GRID);

    let center_x = width as f32 * 0.5;
    let center_y = height as f32 * 0.5;

    for frame in 0..ATLAS_FRAMES {
        let cell_x = (frame % ATLAS_GRID) * width;
        let cell_y = (frame / ATLAS_GRID) * height;
        let (sin, cos) = (frame as f32).to_radians().sin_cos();

        for y in 0..height {
            for x in 0..width {
                // Map the destination pixel back onto the unrotated sprite
                let dx = x as f32 + 0.5 - center_x;
                let dy = y as f32 + 0.5 - center_y;
                let src_x = cos * dx + sin * dy + center_x;
                let src_y = -sin * dx + cos * dy + center_y;
                atlas.put_pixel(cell_x + x, cell_y + y, sprite.sample_bilinear(src_x, src_y));
            }
        }
    }
    atlas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked_sprite() -> PixelBuffer {
        // 4x4, fully opaque gray, one white marker right of center
        let mut sprite = PixelBuffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                sprite.put_pixel(x, y, [64, 64, 64, 255]);
            }
        }
        sprite.put_pixel(3, 1, [255, 255, 255, 255]);
        sprite
    }

    #[test]
    fn test_atlas_dimensions() {
        let atlas = build_rotation_atlas(&marked_sprite());
        assert_eq!(atlas.width(), 4 * 19);
        assert_eq!(atlas.height(), 4 * 19);
    }

    #[test]
    fn test_frame_zero_is_the_sprite() {
        let sprite = marked_sprite();
        let atlas = build_rotation_atlas(&sprite);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(atlas.get_pixel(x, y), sprite.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_frame_placement_in_grid() {
        let atlas = build_rotation_atlas(&marked_sprite());
        // Frame 20 occupies cell (1, 1): its center pixels are opaque
        assert_eq!(atlas.get_pixel(4 + 2, 4 + 2)[3], 255);
        // The unused final cell (18, 18) stays transparent
        assert_eq!(atlas.get_pixel(18 * 4 + 2, 18 * 4 + 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_quarter_turn_moves_marker() {
        let atlas = build_rotation_atlas(&marked_sprite());
        // Frame 90 is cell (90 mod 19, 90 div 19) = (14, 4)
        let (cell_x, cell_y) = (14 * 4, 4 * 4);
        // The marker at (3, 1) — offset (1.5, -0.5) from center — rotates a
        // quarter turn to offset (0.5, 1.5): pixel (2, 3)
        let rotated = atlas.get_pixel(cell_x + 2, cell_y + 3);
        assert!(rotated[0] > 200, "marker not found: {rotated:?}");
        // Its original position now holds plain gray
        let original = atlas.get_pixel(cell_x + 3, cell_y + 1);
        assert!(original[0] < 100, "marker did not move: {original:?}");
    }
}
