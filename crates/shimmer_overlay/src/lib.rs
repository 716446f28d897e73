//! Shimmer Overlay Effects
//!
//! Compositor-drawn overlays that can be mapped and unmapped independently
//! of any client surface, with their GPU resources alive exactly while they
//! are visible.
//!
//! # Features
//!
//! - **Overlay capability**: bounding box + map/unmap/render/is-mapped
//!   lifecycle, with damage submitted through an
//!   [`OutputLayout`](shimmer_core::OutputLayout)
//! - **Renderer collaborators**: narrow [`TextureStore`] and [`RenderPass`]
//!   traits the surrounding compositor implements
//! - **Spinner**: an indeterminate-progress spinner that bakes a 19×19
//!   rotation-frame atlas from one embedded sprite on map and loops a timed
//!   rotation animation
//! - **ColorRect**: a solid-color rectangle overlay
//!
//! All of it runs on the compositor main-loop thread; texture creation and
//! destruction are synchronous.

pub mod atlas;
pub mod color_rect;
pub mod error;
pub mod overlay;
pub mod renderer;
pub mod spinner;
pub mod sprite;

pub use color_rect::{ColorRect, ColorRectAnimator};
pub use error::SpriteError;
pub use overlay::Overlay;
pub use renderer::{RenderPass, TextureId, TextureStore};
pub use spinner::{Spinner, SpinnerAnimator, SpinnerConfig};
