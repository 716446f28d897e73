//! A solid-color rectangle overlay
//!
//! The simplest overlay: no GPU resources of its own, just a box and a
//! color. Useful as a dim layer or placeholder surface, and as an animation
//! target for fades and slides.

use shimmer_animation::Animatable;
use shimmer_core::{Color, OutputLayout, Rect};

use crate::overlay::Overlay;
use crate::renderer::{RenderPass, TextureStore};

/// A colored rectangle drawn by the compositor.
///
/// Created unmapped; map it to have it drawn. Setters follow the
/// damage-apply-damage pattern and short-circuit when nothing changes.
#[derive(Debug)]
pub struct ColorRect {
    mapped: bool,
    rect: Rect,
    color: Color,
}

impl ColorRect {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            mapped: false,
            rect,
            color,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.color.a
    }

    fn damage(&self, layout: &mut OutputLayout) {
        if self.mapped {
            layout.damage_rect(self.rect);
        }
    }

    /// Move and/or resize the rectangle.
    pub fn set_rect(&mut self, rect: Rect, layout: &mut OutputLayout) {
        if rect == self.rect {
            return;
        }
        self.damage(layout);
        self.rect = rect;
        self.damage(layout);
    }

    /// Change the color. Appearance-only, so the box is damaged once.
    pub fn set_color(&mut self, color: Color, layout: &mut OutputLayout) {
        if color == self.color {
            return;
        }
        self.color = color;
        self.damage(layout);
    }

    /// Change only the opacity.
    pub fn set_alpha(&mut self, alpha: f32, layout: &mut OutputLayout) {
        if (self.color.a - alpha).abs() <= f32::EPSILON {
            return;
        }
        self.color.a = alpha;
        self.damage(layout);
    }

    /// Borrow the rectangle as an [`Animatable`] whose property writes
    /// damage `layout`.
    pub fn animator<'a>(&'a mut self, layout: &'a mut OutputLayout) -> ColorRectAnimator<'a> {
        ColorRectAnimator { rect: self, layout }
    }
}

impl Overlay for ColorRect {
    fn bounding_box(&self) -> Rect {
        self.rect
    }

    fn is_mapped(&self) -> bool {
        self.mapped
    }

    fn map(&mut self, _textures: &mut dyn TextureStore, layout: &mut OutputLayout) {
        self.mapped = true;
        self.damage(layout);
    }

    fn unmap(&mut self, _textures: &mut dyn TextureStore, layout: &mut OutputLayout) {
        self.damage(layout);
        self.mapped = false;
    }

    fn render(&self, pass: &mut dyn RenderPass) {
        if !self.mapped {
            return;
        }
        pass.fill_rect(self.rect, self.color.premultiplied());
    }
}

/// A damage-scoped [`Animatable`] view of a [`ColorRect`].
///
/// Exposes `x`, `y`, `width`, `height`, and `alpha`. Alpha writes are
/// clamped into `[0, 1]`, since easing curves may overshoot the eased range.
pub struct ColorRectAnimator<'a> {
    rect: &'a mut ColorRect,
    layout: &'a mut OutputLayout,
}

impl Animatable for ColorRectAnimator<'_> {
    fn set_property(&mut self, name: &str, value: f32) {
        match name {
            "x" => {
                let rect = Rect {
                    x: value as i32,
                    ..self.rect.rect
                };
                self.rect.set_rect(rect, self.layout);
            }
            "y" => {
                let rect = Rect {
                    y: value as i32,
                    ..self.rect.rect
                };
                self.rect.set_rect(rect, self.layout);
            }
            "width" => {
                let rect = Rect {
                    width: value as i32,
                    ..self.rect.rect
                };
                self.rect.set_rect(rect, self.layout);
            }
            "height" => {
                let rect = Rect {
                    height: value as i32,
                    ..self.rect.rect
                };
                self.rect.set_rect(rect, self.layout);
            }
            "alpha" => {
                let alpha = value.clamp(0.0, 1.0);
                self.rect.set_alpha(alpha, self.layout);
            }
            _ => panic!("'{name}' is not a property of ColorRect"),
        }
    }

    fn get_property(&self, name: &str) -> f32 {
        match name {
            "x" => self.rect.rect.x as f32,
            "y" => self.rect.rect.y as f32,
            "width" => self.rect.rect.width as f32,
            "height" => self.rect.rect.height as f32,
            "alpha" => self.rect.color.a,
            _ => panic!("'{name}' is not a property of ColorRect"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with_output() -> OutputLayout {
        let mut layout = OutputLayout::new();
        layout.add_output(shimmer_core::Output::new(
            "out",
            Rect::new(0, 0, 1000, 1000),
            1.0,
        ));
        layout
    }

    fn first_output_damage(layout: &OutputLayout) -> Vec<Rect> {
        layout
            .outputs()
            .next()
            .map(|(_, o)| o.damage().regions().to_vec())
            .unwrap()
    }

    #[test]
    fn test_unmapped_setters_produce_no_damage() {
        let mut layout = layout_with_output();
        let mut rect = ColorRect::new(Rect::new(0, 0, 10, 10), Color::new(1.0, 0.0, 0.0, 1.0));
        rect.set_rect(Rect::new(5, 5, 10, 10), &mut layout);
        assert!(first_output_damage(&layout).is_empty());
    }

    #[test]
    fn test_move_damages_old_and_new_boxes() {
        let mut layout = layout_with_output();
        let mut rect = ColorRect::new(Rect::new(0, 0, 10, 10), Color::new(1.0, 0.0, 0.0, 1.0));

        let mut store = NoopStore;
        rect.map(&mut store, &mut layout);
        let id = layout.outputs().next().unwrap().0;
        layout.get_mut(id).unwrap().take_damage();

        rect.set_rect(Rect::new(50, 50, 10, 10), &mut layout);
        let damage = first_output_damage(&layout);
        assert_eq!(damage, vec![Rect::new(0, 0, 10, 10), Rect::new(50, 50, 10, 10)]);
    }

    #[test]
    fn test_no_change_short_circuits() {
        let mut layout = layout_with_output();
        let mut rect = ColorRect::new(Rect::new(0, 0, 10, 10), Color::new(1.0, 0.0, 0.0, 0.5));

        let mut store = NoopStore;
        rect.map(&mut store, &mut layout);
        let id = layout.outputs().next().unwrap().0;
        layout.get_mut(id).unwrap().take_damage();

        rect.set_rect(Rect::new(0, 0, 10, 10), &mut layout);
        rect.set_alpha(0.5, &mut layout);
        rect.set_color(Color::new(1.0, 0.0, 0.0, 0.5), &mut layout);
        assert!(first_output_damage(&layout).is_empty());
    }

    #[test]
    fn test_alpha_animation_clamps_overshoot() {
        let mut layout = layout_with_output();
        let mut rect = ColorRect::new(Rect::new(0, 0, 10, 10), Color::new(1.0, 1.0, 1.0, 0.0));

        rect.animator(&mut layout).set_property("alpha", 1.3);
        assert_eq!(rect.alpha(), 1.0);
        rect.animator(&mut layout).set_property("alpha", -0.2);
        assert_eq!(rect.alpha(), 0.0);
    }

    struct NoopStore;

    impl TextureStore for NoopStore {
        fn upload_texture(
            &mut self,
            _pixels: &[u8],
            _format: shimmer_core::PixelFormat,
            _stride: usize,
            _width: u32,
            _height: u32,
        ) -> Option<crate::renderer::TextureId> {
            None
        }

        fn destroy_texture(&mut self, _texture: crate::renderer::TextureId) {}
    }
}
