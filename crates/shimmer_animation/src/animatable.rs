//! The animatable capability
//!
//! Anything exposing named numeric properties that an animation can drive.
//! Implementations declare their property set up front; the names double as
//! the wire between a [`PropertyEaser`](crate::easer::PropertyEaser) and its
//! target.

/// An object whose named numeric properties an animation can read and write.
///
/// Referencing a name the implementor never declared is a programmer error,
/// not a runtime condition: implementations must panic immediately, naming
/// the offending property.
///
/// Property setters may have side effects (damage submission, redraw
/// scheduling); those effects fire on every write, including writes driven
/// by an animation tick.
pub trait Animatable {
    /// Set the property `name` to `value`.
    fn set_property(&mut self, name: &str, value: f32);

    /// Read the current value of the property `name`.
    fn get_property(&self, name: &str) -> f32;
}
