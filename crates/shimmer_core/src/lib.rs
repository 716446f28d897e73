//! Shimmer Core
//!
//! Foundational types for the shimmer overlay subsystem:
//!
//! - **Geometry**: integer rectangles in compositor layout coordinates
//! - **Pixel surfaces**: CPU-side premultiplied ARGB buffers
//! - **Outputs**: per-output damage accumulation and redraw requests
//!
//! Everything here is single-threaded by design; the compositor main loop
//! owns all of it.

pub mod geometry;
pub mod output;
pub mod pixels;

pub use geometry::{Color, Rect};
pub use output::{Output, OutputId, OutputLayout, PendingDamage};
pub use pixels::{PixelBuffer, PixelFormat};
