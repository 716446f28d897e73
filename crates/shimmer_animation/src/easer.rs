//! Property easing
//!
//! A [`PropertyEaser`] maps normalized progress onto one or more named
//! properties of an [`Animatable`] target. Each property gets its own
//! start/end interval; all share one easing curve.
//!
//! Evaluation is pure. With an overshooting curve the computed values can
//! leave the `[start, end]` interval; they are handed to the target
//! unclamped, and the target's setter owns folding them into whatever domain
//! the property has.

use smallvec::SmallVec;

use crate::animatable::Animatable;
use crate::easing::Easing;

/// Linear interpolation between `a` and `b` at rate `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[derive(Clone, Copy, Debug)]
struct EasedProperty {
    name: &'static str,
    start: f32,
    end: f32,
}

/// Eases named properties of a target object.
///
/// ```
/// use shimmer_animation::{Easing, PropertyEaser};
///
/// let mut easer = PropertyEaser::new(Easing::Linear);
/// easer.add_property("alpha", 0.0, 1.0);
/// easer.add_property("y", 100.0, 50.0);
///
/// let values: Vec<_> = easer.evaluate(0.5).into_iter().collect();
/// assert_eq!(values, vec![("alpha", 0.5), ("y", 75.0)]);
/// ```
#[derive(Clone, Debug)]
pub struct PropertyEaser {
    easing: Easing,
    props: SmallVec<[EasedProperty; 2]>,
}

impl PropertyEaser {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            props: SmallVec::new(),
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Register a property to ease from `start` to `end`.
    ///
    /// Names are unique within one easer; re-adding a name replaces its
    /// interval.
    pub fn add_property(&mut self, name: &'static str, start: f32, end: f32) {
        if let Some(existing) = self.props.iter_mut().find(|p| p.name == name) {
            tracing::trace!("Replacing eased range of '{}'", name);
            existing.start = start;
            existing.end = end;
            return;
        }
        self.props.push(EasedProperty { name, start, end });
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Evaluate every registered property at progress `t`, in registration
    /// order. Pure; no target involved.
    pub fn evaluate(&self, t: f32) -> SmallVec<[(&'static str, f32); 2]> {
        let eased = self.easing.apply(t);
        self.props
            .iter()
            .map(|p| (p.name, lerp(p.start, p.end, eased)))
            .collect()
    }

    /// Evaluate at progress `t` and write each value through the target's
    /// property setter. Setter side effects happen here.
    pub fn apply_to(&self, target: &mut dyn Animatable, t: f32) {
        let eased = self.easing.apply(t);
        for p in &self.props {
            target.set_property(p.name, lerp(p.start, p.end, eased));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: f32,
        b: f32,
    }

    impl Animatable for Pair {
        fn set_property(&mut self, name: &str, value: f32) {
            match name {
                "a" => self.a = value,
                "b" => self.b = value,
                _ => panic!("'{name}' is not a property of Pair"),
            }
        }

        fn get_property(&self, name: &str) -> f32 {
            match name {
                "a" => self.a,
                "b" => self.b,
                _ => panic!("'{name}' is not a property of Pair"),
            }
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(-1.0, 1.0, 0.5), 0.0);
        assert_eq!(lerp(10.0, 100.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 100.0, 1.0), 100.0);
    }

    #[test]
    fn test_linear_apply_to() {
        let mut easer = PropertyEaser::new(Easing::Linear);
        easer.add_property("a", -1.0, 1.0);
        easer.add_property("b", 10.0, 100.0);

        let mut pair = Pair { a: 0.0, b: 0.0 };
        easer.apply_to(&mut pair, 0.5);

        assert_eq!(pair.a, 0.0);
        assert_eq!(pair.b, 55.0);
    }

    #[test]
    fn test_duplicate_name_replaces_range() {
        let mut easer = PropertyEaser::new(Easing::Linear);
        easer.add_property("a", 0.0, 1.0);
        easer.add_property("a", 5.0, 9.0);

        assert_eq!(easer.len(), 1);
        assert_eq!(easer.evaluate(0.5)[0], ("a", 7.0));
    }

    #[test]
    fn test_overshoot_passes_through_unclamped() {
        let mut easer = PropertyEaser::new(Easing::EaseInOutBack);
        easer.add_property("a", 0.0, 100.0);

        // ease-in-out-back dips below zero early in the trajectory
        let (_, value) = easer.evaluate(0.2)[0];
        assert!(value < 0.0);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut easer = PropertyEaser::new(Easing::EaseOutCubic);
        easer.add_property("a", 0.0, 1.0);
        assert_eq!(easer.evaluate(0.3), easer.evaluate(0.3));
    }
}
