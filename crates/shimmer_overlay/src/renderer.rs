//! Renderer collaborator interfaces
//!
//! Overlays never talk to a GPU API directly; they go through these narrow
//! traits, implemented by the compositor's renderer (see `shimmer_gpu` for a
//! wgpu-backed one). Texture creation, upload, and destruction are
//! synchronous and complete before the call returns.

use shimmer_core::{Color, PixelFormat, Rect};
use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a renderer-owned texture.
    pub struct TextureId;
}

/// Owns GPU textures on behalf of overlays.
pub trait TextureStore {
    /// Upload a pixel buffer as a new texture.
    ///
    /// Returns `None` when the upload fails; there is no deferred or
    /// asynchronous path.
    fn upload_texture(
        &mut self,
        pixels: &[u8],
        format: PixelFormat,
        stride: usize,
        width: u32,
        height: u32,
    ) -> Option<TextureId>;

    /// Release a texture. The handle is dead afterwards.
    fn destroy_texture(&mut self, texture: TextureId);
}

/// A render pass overlays draw into.
pub trait RenderPass {
    /// Draw the `src` region of `texture` into the `dst` rectangle.
    fn blit_texture(&mut self, texture: TextureId, src: Rect, dst: Rect);

    /// Fill `dst` with a premultiplied color.
    fn fill_rect(&mut self, dst: Rect, color: Color);
}
