use std::ops;

use crate::Angle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2D<T = f32> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn map<F, U>(self, f: F) -> Vec2D<U>
    where
        F: Fn(T) -> U,
    {
        Vec2D {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl Vec2D<f32> {
    /// Map a point in turtle space to its raster cell.
    ///
    /// Turtle space has its origin at the center of the raster with the
    /// y axis growing upwards, raster indices start at the top left
    /// corner with rows growing downwards.
    #[must_use]
    pub fn to_raster(&self, raster_width: usize, raster_height: usize) -> Vec2D<i32> {
        Vec2D {
            x: raster_width as i32 / 2 + self.x.round() as i32,
            y: raster_height as i32 / 2 - self.y.round() as i32,
        }
    }

    /// The point reached by walking `distance` units along `heading`.
    ///
    /// Components of the step smaller than `0.0001` are treated as zero,
    /// so walking along an axis-aligned heading never drifts off the axis
    /// due to floating point noise.
    #[must_use]
    pub fn offset_along(&self, heading: Angle, distance: f32) -> Self {
        let mut delta_x = distance * heading.cos();
        if delta_x.abs() < 0.0001 {
            delta_x = 0.0;
        }

        let mut delta_y = distance * heading.sin();
        if delta_y.abs() < 0.0001 {
            delta_y = 0.0;
        }

        Self {
            x: self.x + delta_x,
            y: self.y + delta_y,
        }
    }
}

impl<T> ops::Add for Vec2D<T>
where
    T: ops::Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> ops::Sub for Vec2D<T>
where
    T: ops::Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
