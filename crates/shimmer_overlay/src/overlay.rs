//! The overlay capability

use shimmer_core::{OutputLayout, Rect};

use crate::renderer::{RenderPass, TextureStore};

/// A renderable overlay effect drawn by the compositor itself.
///
/// Overlays are constructed detached and become visible through [`map`];
/// [`unmap`] hides them again and releases whatever GPU resources the map
/// created. Between the two, [`render`] may run any number of times — once
/// per repaint of each output showing the overlay — and must be repeatable
/// with no accumulating side effects.
///
/// [`map`]: Overlay::map
/// [`unmap`]: Overlay::unmap
/// [`render`]: Overlay::render
pub trait Overlay {
    /// The minimal box in layout coordinates containing the overlay.
    fn bounding_box(&self) -> Rect;

    /// Whether the overlay is currently mapped.
    fn is_mapped(&self) -> bool;

    /// Make the overlay renderable: acquire resources, damage its box, and
    /// start any animation. A failed map leaves the overlay unmapped.
    fn map(&mut self, textures: &mut dyn TextureStore, layout: &mut OutputLayout);

    /// Hide the overlay: damage its last box, release resources, stop
    /// animation. A no-op when already unmapped.
    fn unmap(&mut self, textures: &mut dyn TextureStore, layout: &mut OutputLayout);

    /// Draw the overlay. Must be a strict no-op while unmapped and must not
    /// mutate overlay state.
    fn render(&self, pass: &mut dyn RenderPass);
}
