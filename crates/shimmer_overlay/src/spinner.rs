//! An animated spinner overlay
//!
//! Represents indeterminate progress. On map the embedded sprite is decoded
//! and baked into a rotation atlas (one frame per integer degree) that lives
//! as a single GPU texture for exactly as long as the spinner stays mapped.
//! A looping timed animation drives the `rotation` property; every rotation
//! or position change damages the spinner's bounding box on all affected
//! outputs.

use shimmer_animation::{Animatable, Easing, PropertyEaser, Tick, TimedAnimation};
use shimmer_core::{OutputLayout, Rect};

use crate::atlas::{self, ATLAS_GRID};
use crate::overlay::Overlay;
use crate::renderer::{RenderPass, TextureId, TextureStore};
use crate::sprite;

/// Tunables for a [`Spinner`].
#[derive(Clone, Copy, Debug)]
pub struct SpinnerConfig {
    /// Duration of one full rotation cycle in milliseconds.
    pub duration_ms: u32,
    /// Easing applied across each cycle.
    pub easing: Easing,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            easing: Easing::EaseInOutBack,
        }
    }
}

#[derive(Debug)]
struct SpinnerState {
    cx: i32,
    cy: i32,
    width: i32,
    height: i32,
    rotation: f32,
    texture: Option<TextureId>,
}

impl SpinnerState {
    fn bounding_box(&self) -> Rect {
        Rect {
            x: (self.cx as f32 - self.width as f32 * 0.5) as i32,
            y: (self.cy as f32 - self.height as f32 * 0.5) as i32,
            width: self.width,
            height: self.height,
        }
    }

    /// Damage the current bounding box, unless there is nothing on screen.
    fn damage(&self, layout: &mut OutputLayout) {
        if self.texture.is_none() {
            return;
        }
        layout.damage_rect(self.bounding_box());
    }
}

/// Fold a raw rotation value into `[0, 360)`.
///
/// The easing curve may overshoot the eased 0–359 degree range in either
/// direction; negative values reflect off zero, values past the top step
/// back by 359.
fn fold_rotation(mut rotation: f32) -> f32 {
    while rotation < 0.0 || rotation >= 360.0 {
        if rotation < 0.0 {
            rotation = 360.0 - rotation;
        } else {
            rotation -= 359.0;
        }
    }
    rotation
}

/// An animated spinner, rendered by the compositor as an overlay.
///
/// Constructed detached: unmapped, no texture, animation idle. [`map`]
/// builds and uploads the rotation atlas and starts the animation; [`unmap`]
/// releases the texture and resets the animation. The sprite is re-decoded
/// on every map.
///
/// [`map`]: Overlay::map
/// [`unmap`]: Overlay::unmap
#[derive(Debug)]
pub struct Spinner {
    state: SpinnerState,
    animation: TimedAnimation,
}

impl Spinner {
    /// Create a spinner centered at `(cx, cy)` in layout coordinates.
    pub fn new(cx: i32, cy: i32) -> Self {
        Self::with_config(cx, cy, SpinnerConfig::default())
    }

    pub fn with_config(cx: i32, cy: i32, config: SpinnerConfig) -> Self {
        let mut easer = PropertyEaser::new(config.easing);
        easer.add_property("rotation", 0.0, 359.0);
        Self {
            state: SpinnerState {
                cx,
                cy,
                width: 0,
                height: 0,
                rotation: 0.0,
                texture: None,
            },
            animation: TimedAnimation::new(config.duration_ms, easer),
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.state.cx, self.state.cy)
    }

    /// Current rotation in degrees, always within `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.state.rotation
    }

    /// Sprite size in layout coordinates; zero until the first successful
    /// map.
    pub fn size(&self) -> (i32, i32) {
        (self.state.width, self.state.height)
    }

    /// Move the spinner's center, damaging the old and new boxes.
    pub fn set_center(&mut self, cx: i32, cy: i32, layout: &mut OutputLayout) {
        let mut animator = self.animator(layout);
        animator.set_property("cx", cx as f32);
        animator.set_property("cy", cy as f32);
    }

    /// Set the rotation directly. The value is folded into `[0, 360)`.
    pub fn set_rotation(&mut self, rotation: f32, layout: &mut OutputLayout) {
        self.animator(layout).set_property("rotation", rotation);
    }

    /// Borrow the spinner as an [`Animatable`] whose property writes damage
    /// `layout`.
    pub fn animator<'a>(&'a mut self, layout: &'a mut OutputLayout) -> SpinnerAnimator<'a> {
        SpinnerAnimator {
            state: &mut self.state,
            layout,
        }
    }

    /// Feed elapsed time to the rotation animation.
    ///
    /// The spinner loops indefinitely: when a cycle completes the animation
    /// restarts and the unconsumed part of `dt_ms` carries into the new
    /// cycle, so no tick time is dropped at the boundary.
    pub fn tick(&mut self, dt_ms: f32, layout: &mut OutputLayout) {
        let Spinner { state, animation } = self;
        let mut target = SpinnerAnimator { state, layout };

        let mut result = animation.tick(dt_ms, &mut target);
        while let Tick::Completed { remaining_ms } = result {
            animation.play();
            result = animation.tick(remaining_ms, &mut target);
        }
    }
}

impl Overlay for Spinner {
    fn bounding_box(&self) -> Rect {
        self.state.bounding_box()
    }

    fn is_mapped(&self) -> bool {
        self.state.texture.is_some()
    }

    fn map(&mut self, textures: &mut dyn TextureStore, layout: &mut OutputLayout) {
        if self.state.texture.is_some() {
            return;
        }

        let sprite = match sprite::decode_argb(sprite::SPINNER_SPRITE_PNG) {
            Ok(sprite) => sprite,
            Err(err) => {
                tracing::warn!("Spinner sprite unusable, staying unmapped: {err}");
                return;
            }
        };
        self.state.width = sprite.width() as i32;
        self.state.height = sprite.height() as i32;

        let atlas = atlas::build_rotation_atlas(&sprite);
        let Some(texture) = textures.upload_texture(
            atlas.data(),
            atlas.format(),
            atlas.stride(),
            atlas.width(),
            atlas.height(),
        ) else {
            tracing::warn!("Rotation atlas upload failed, staying unmapped");
            return;
        };

        tracing::debug!(
            "Mapped spinner at ({}, {}) with {}x{} atlas",
            self.state.cx,
            self.state.cy,
            atlas.width(),
            atlas.height()
        );
        self.state.texture = Some(texture);
        self.state.damage(layout);
        self.animation.play();
    }

    fn unmap(&mut self, textures: &mut dyn TextureStore, layout: &mut OutputLayout) {
        // Damage uses the last-known box while the texture is still present
        self.state.damage(layout);
        if let Some(texture) = self.state.texture.take() {
            textures.destroy_texture(texture);
        }
        self.animation.reset();
    }

    fn render(&self, pass: &mut dyn RenderPass) {
        let Some(texture) = self.state.texture else {
            return;
        };

        let column = (self.state.rotation.floor() as i32) % ATLAS_GRID as i32;
        let row = (self.state.rotation / ATLAS_GRID as f32).floor() as i32;
        let src = Rect {
            x: column * self.state.width,
            y: row * self.state.height,
            width: self.state.width,
            height: self.state.height,
        };
        pass.blit_texture(texture, src, self.bounding_box());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // Texture handles are renderer-owned; without the store there is no
        // way to release one here.
        if let Some(texture) = self.state.texture {
            tracing::warn!("Spinner dropped while mapped; texture {texture:?} not released");
        }
    }
}

/// A damage-scoped [`Animatable`] view of a [`Spinner`].
///
/// Every property write damages the pre-mutation bounding box, applies the
/// value, and damages the post-mutation box. Writes while unmapped apply the
/// value but produce no damage.
pub struct SpinnerAnimator<'a> {
    state: &'a mut SpinnerState,
    layout: &'a mut OutputLayout,
}

impl Animatable for SpinnerAnimator<'_> {
    fn set_property(&mut self, name: &str, value: f32) {
        match name {
            "cx" => {
                self.state.damage(self.layout);
                self.state.cx = value as i32;
                self.state.damage(self.layout);
            }
            "cy" => {
                self.state.damage(self.layout);
                self.state.cy = value as i32;
                self.state.damage(self.layout);
            }
            "rotation" => {
                self.state.damage(self.layout);
                self.state.rotation = fold_rotation(value);
                self.state.damage(self.layout);
            }
            _ => panic!("'{name}' is not a property of Spinner"),
        }
    }

    fn get_property(&self, name: &str) -> f32 {
        match name {
            "cx" => self.state.cx as f32,
            "cy" => self.state.cy as f32,
            "rotation" => self.state.rotation,
            _ => panic!("'{name}' is not a property of Spinner"),
        }
    }
}
