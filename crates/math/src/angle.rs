use std::ops;

/// Zero cost wrapper type for an `f32` heading in radians.
///
/// This type exists since coordinates are also `f32`'s.
/// It should enforce type safety to prevent coordinates from accidentally being
/// used as angles.
///
/// A heading of zero points along the positive x axis, angles grow
/// counterclockwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Angle(f32);

impl Angle {
    /// Angles with a difference below this value (in radians) are considered equal
    pub const MAX_ERROR: f32 = 0.001;

    #[inline]
    #[must_use]
    pub const fn from_radians(radians: f32) -> Self {
        Self(radians)
    }

    #[inline]
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees.to_radians())
    }

    #[inline]
    #[must_use]
    pub const fn as_radians(&self) -> f32 {
        self.0
    }

    /// Fold the angle into `[0, 2pi)`
    #[must_use]
    pub fn normalized(&self) -> Self {
        let radians = self.0.rem_euclid(std::f32::consts::TAU);
        Self(radians)
    }

    #[inline]
    #[must_use]
    pub fn diff(&self, other: &Self) -> Self {
        let mut difference_in_radians = (self.0 - other.0).abs();

        if std::f32::consts::PI < difference_in_radians {
            difference_in_radians = std::f32::consts::TAU - difference_in_radians;
        }

        Self(difference_in_radians)
    }

    #[inline]
    #[must_use]
    pub fn sin(&self) -> f32 {
        self.0.sin()
    }

    #[inline]
    #[must_use]
    pub fn cos(&self) -> f32 {
        self.0.cos()
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.diff(other).0 < Self::MAX_ERROR
    }
}

impl ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn diff_wraps_around_full_circle() {
        let a = Angle::from_radians(0.1);
        let b = Angle::from_radians(TAU - 0.1);
        assert!(a.diff(&b).as_radians() < 0.21);
    }

    #[test]
    fn normalized_folds_negative_angles() {
        let angle = Angle::from_radians(-FRAC_PI_2).normalized();
        assert_eq!(angle, Angle::from_radians(3.0 * FRAC_PI_2));
    }

    #[test]
    fn angles_compare_with_tolerance() {
        assert_eq!(Angle::from_radians(PI), Angle::from_radians(PI + 0.0005));
        assert_ne!(Angle::from_radians(PI), Angle::from_radians(PI + 0.01));
    }
}
