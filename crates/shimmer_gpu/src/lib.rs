//! Shimmer GPU Renderer
//!
//! A wgpu implementation of the renderer collaborators overlays draw
//! through: a texture store for atlas uploads and a recorded quad pass that
//! turns blits and fills into a single textured-quad render pass with
//! premultiplied-alpha blending.

pub mod renderer;
pub mod shaders;
pub mod texture;

pub use renderer::{GpuRenderer, QuadPass};
pub use texture::GpuTexture;
