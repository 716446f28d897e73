//! Outputs and damage accumulation
//!
//! Each output accumulates damage in its own scaled coordinate space and
//! raises a single redraw request when it goes from clean to damaged. The
//! embedding compositor owns the [`OutputLayout`]; overlays only feed
//! layout-coordinate rectangles into [`OutputLayout::damage_rect`].

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Rect;

new_key_type! {
    /// Stable identifier of an output within an [`OutputLayout`].
    pub struct OutputId;
}

/// Damage accumulated for one output, in output-local scaled coordinates.
///
/// Boxes already contained in accumulated damage are dropped, so repeated
/// damage of an unchanged bounding box cannot grow the set or re-trigger
/// redraw scheduling.
#[derive(Debug, Default)]
pub struct PendingDamage {
    regions: Vec<Rect>,
}

impl PendingDamage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Accumulate `rect`.
    ///
    /// Returns `true` exactly when the accumulator transitions from empty to
    /// non-empty.
    pub fn add(&mut self, rect: Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        if self.regions.iter().any(|r| r.contains_rect(&rect)) {
            return false;
        }
        let was_empty = self.regions.is_empty();
        self.regions.push(rect);
        was_empty
    }

    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Drain all accumulated damage.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.regions)
    }
}

/// One compositor output: a named region of the layout with a scale factor,
/// pending damage, and a redraw-request flag polled by the embedder.
#[derive(Debug)]
pub struct Output {
    name: String,
    geometry: Rect,
    scale: f32,
    damage: PendingDamage,
    redraw_requested: bool,
}

impl Output {
    pub fn new(name: impl Into<String>, geometry: Rect, scale: f32) -> Self {
        Self {
            name: name.into(),
            geometry,
            scale,
            damage: PendingDamage::new(),
            redraw_requested: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output's position and size in layout coordinates.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Accumulate damage in output-local scaled coordinates.
    ///
    /// Returns `true` exactly when the accumulator went empty → non-empty.
    pub fn add_damage(&mut self, local: Rect) -> bool {
        self.damage.add(local)
    }

    pub fn damage(&self) -> &PendingDamage {
        &self.damage
    }

    /// Drain accumulated damage, typically once the output has painted.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        self.damage.take()
    }

    /// Ask the embedder to schedule a repaint of this output.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Clear and return the redraw-request flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

/// The collection of outputs known to the compositor.
#[derive(Debug, Default)]
pub struct OutputLayout {
    outputs: SlotMap<OutputId, Output>,
}

impl OutputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_output(&mut self, output: Output) -> OutputId {
        tracing::debug!(
            "Adding output '{}' at {:?} scale {}",
            output.name(),
            output.geometry(),
            output.scale()
        );
        self.outputs.insert(output)
    }

    pub fn remove_output(&mut self, id: OutputId) -> Option<Output> {
        let output = self.outputs.remove(id);
        if let Some(output) = &output {
            tracing::debug!("Removed output '{}'", output.name());
        }
        output
    }

    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(id)
    }

    pub fn get_mut(&mut self, id: OutputId) -> Option<&mut Output> {
        self.outputs.get_mut(id)
    }

    pub fn outputs(&self) -> impl Iterator<Item = (OutputId, &Output)> {
        self.outputs.iter()
    }

    pub fn outputs_mut(&mut self) -> impl Iterator<Item = (OutputId, &mut Output)> {
        self.outputs.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Damage a layout-coordinate rectangle on every output it touches.
    ///
    /// Outputs the rectangle does not intersect are skipped. On intersecting
    /// outputs the rectangle is translated into the output's local space,
    /// scaled by the output scale, and accumulated; an output whose damage
    /// went empty → non-empty gets exactly one redraw request.
    pub fn damage_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        for (_, output) in self.outputs.iter_mut() {
            let geometry = output.geometry();
            if !rect.intersects(&geometry) {
                continue;
            }
            let local = rect.translate(-geometry.x, -geometry.y).scale(output.scale());
            if output.add_damage(local) {
                output.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_output_layout() -> (OutputLayout, OutputId, OutputId) {
        let mut layout = OutputLayout::new();
        let left = layout.add_output(Output::new("left", Rect::new(0, 0, 800, 600), 1.0));
        let right = layout.add_output(Output::new("right", Rect::new(800, 0, 800, 600), 2.0));
        (layout, left, right)
    }

    #[test]
    fn test_damage_skips_non_intersecting_output() {
        let (mut layout, left, right) = two_output_layout();
        layout.damage_rect(Rect::new(10, 10, 50, 50));

        assert!(!layout.get(left).unwrap().damage().is_empty());
        assert!(layout.get(right).unwrap().damage().is_empty());
        assert!(layout.get_mut(left).unwrap().take_redraw_request());
        assert!(!layout.get_mut(right).unwrap().take_redraw_request());
    }

    #[test]
    fn test_damage_translates_and_scales() {
        let (mut layout, _, right) = two_output_layout();
        layout.damage_rect(Rect::new(850, 100, 40, 20));

        let out = layout.get(right).unwrap();
        // Translated by the output origin (800, 0), then scaled by 2
        assert_eq!(out.damage().regions(), &[Rect::new(100, 200, 80, 40)]);
    }

    #[test]
    fn test_rect_spanning_both_outputs() {
        let (mut layout, left, right) = two_output_layout();
        layout.damage_rect(Rect::new(780, 10, 40, 40));

        assert!(!layout.get(left).unwrap().damage().is_empty());
        assert!(!layout.get(right).unwrap().damage().is_empty());
    }

    #[test]
    fn test_redraw_requested_only_on_first_damage() {
        let (mut layout, left, _) = two_output_layout();
        layout.damage_rect(Rect::new(10, 10, 50, 50));
        layout.damage_rect(Rect::new(200, 200, 50, 50));

        let out = layout.get_mut(left).unwrap();
        assert_eq!(out.damage().regions().len(), 2);
        // One request despite two damage additions
        assert!(out.take_redraw_request());
        assert!(!out.take_redraw_request());
    }

    #[test]
    fn test_contained_damage_is_dropped() {
        let mut damage = PendingDamage::new();
        assert!(damage.add(Rect::new(0, 0, 100, 100)));
        assert!(!damage.add(Rect::new(10, 10, 20, 20)));
        assert_eq!(damage.regions().len(), 1);
    }

    #[test]
    fn test_take_damage_drains() {
        let (mut layout, left, _) = two_output_layout();
        layout.damage_rect(Rect::new(10, 10, 50, 50));

        let out = layout.get_mut(left).unwrap();
        assert_eq!(out.take_damage().len(), 1);
        assert!(out.damage().is_empty());
    }

    #[test]
    fn test_empty_rect_damages_nothing() {
        let (mut layout, left, right) = two_output_layout();
        layout.damage_rect(Rect::new(10, 10, 0, 0));
        assert!(layout.get(left).unwrap().damage().is_empty());
        assert!(layout.get(right).unwrap().damage().is_empty());
    }
}
