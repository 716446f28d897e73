//! Shimmer Animation System
//!
//! Easing curves, named-property easing, and wall-clock timed animations.
//!
//! # Features
//!
//! - **Easing**: pure curve evaluation, including overshooting "back" curves
//! - **Animatable**: a capability trait for objects with named numeric
//!   properties
//! - **PropertyEaser**: drives several properties of one target through
//!   eased start→end trajectories
//! - **TimedAnimation**: advances a `PropertyEaser` over a fixed duration,
//!   reporting completion as an explicit [`Tick`](timed::Tick) value so
//!   looping stays caller-visible
//!
//! The subsystem is externally clocked: callers feed `tick(dt)` at whatever
//! cadence their frame source provides.

pub mod animatable;
pub mod easer;
pub mod easing;
pub mod timed;

pub use animatable::Animatable;
pub use easer::{lerp, PropertyEaser};
pub use easing::Easing;
pub use timed::{AnimationState, Tick, TimedAnimation};
