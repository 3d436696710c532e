/// Double precision `glam` types used for all scene geometry.
///
/// Chart coordinates arrive as decimal text and are compared bit-for-bit
/// during layout, so the whole pipeline stays in `f64`.
///
/// ```
/// use flyplot_core::math::{DMat4, DVec3};
///
/// let t = DMat4::from_translation(DVec3::new(0.0, 0.0, 500.0));
/// assert_eq!(t.transform_point3(DVec3::ZERO), DVec3::new(0.0, 0.0, 500.0));
/// ```
pub mod fast {
    pub use glam::*;
}

pub use fast::*;

/// Sign of `value` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f64::signum`], zero (of either sign) maps to `0.0`.
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Round `value` away from zero to a multiple of `step`, keeping its sign.
///
/// `step` must be positive.
///
/// ```
/// use flyplot_core::math::ceil_to_step;
///
/// assert_eq!(ceil_to_step(-450.0, 100.0), -500.0);
/// assert_eq!(ceil_to_step(120.0, 100.0), 200.0);
/// assert_eq!(ceil_to_step(0.0, 100.0), 0.0);
/// ```
#[inline]
pub fn ceil_to_step(value: f64, step: f64) -> f64 {
    sign(value) * (value.abs() / step).ceil() * step
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    // `+ 0.0` turns a negative zero into a positive one.
    (value * factor).round() / factor + 0.0
}

/// A closed `[min, max]` interval that grows as values are folded in.
///
/// Starts out empty; an empty extent reports `(0, 0)` through
/// [`Extent::or_zero`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    /// The extent containing nothing.
    pub const EMPTY: Extent = Extent {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// An extent covering `[min, max]`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether nothing has been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Widen to contain `value`.
    pub fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Widen to contain `[center - radius, center + radius]`.
    pub fn include_span(&mut self, center: f64, radius: f64) {
        self.include(center - radius);
        self.include(center + radius);
    }

    /// Widen to contain another extent.
    pub fn merge(&mut self, other: &Extent) {
        if !other.is_empty() {
            self.include(other.min);
            self.include(other.max);
        }
    }

    /// Whether `value` lies inside the extent.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// `max - min`, or zero when empty.
    pub fn span(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max - self.min }
    }

    /// The bounds as a tuple, `(0, 0)` for an empty extent.
    pub fn or_zero(&self) -> (f64, f64) {
        if self.is_empty() { (0.0, 0.0) } else { (self.min, self.max) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
    }

    #[test]
    fn test_ceil_to_step() {
        assert_eq!(ceil_to_step(15.0, 100.0), 100.0);
        assert_eq!(ceil_to_step(-5.0, 100.0), -100.0);
        assert_eq!(ceil_to_step(1000.0, 100.0), 1000.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.001, 2).to_string(), "0");
    }

    #[test]
    fn test_extent() {
        let mut e = Extent::EMPTY;
        assert!(e.is_empty());
        assert_eq!(e.or_zero(), (0.0, 0.0));

        e.include(4.0);
        e.include(1.0);
        assert_eq!(e.or_zero(), (1.0, 4.0));

        e.include_span(5.0, 10.0);
        assert_eq!(e, Extent::new(-5.0, 15.0));
        assert!(e.contains(0.0));
    }
}
