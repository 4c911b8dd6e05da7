use super::Vec2D;

use std::{cmp, ops};

/// An axis-aligned rectangle.
///
/// `bottom_right` is exclusive: a rectangle over the pixel cells
/// `x..x + width` stores `bottom_right.x = x + width`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rectangle<T = i32> {
    top_left: Vec2D<T>,
    bottom_right: Vec2D<T>,
}

impl<T> Rectangle<T> {
    pub fn from_corners(top_left: Vec2D<T>, bottom_right: Vec2D<T>) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }
}

impl<T> Rectangle<T>
where
    T: Copy,
{
    pub const fn top_left(&self) -> Vec2D<T> {
        self.top_left
    }

    pub const fn bottom_right(&self) -> Vec2D<T> {
        self.bottom_right
    }
}

impl<T> Rectangle<T>
where
    T: ops::Add<Output = T> + ops::Sub<Output = T> + Copy,
{
    pub fn from_position_and_size(top_left: Vec2D<T>, width: T, height: T) -> Self {
        let bottom_right = Vec2D {
            x: top_left.x + width,
            y: top_left.y + height,
        };

        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn width(&self) -> T {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> T {
        self.bottom_right.y - self.top_left.y
    }
}

impl<T> PartialEq for Rectangle<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.top_left == other.top_left && self.bottom_right == other.bottom_right
    }
}

impl<T> Rectangle<T>
where
    T: Ord + Copy,
{
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec2D<T>) -> bool {
        (self.top_left.x..self.bottom_right.x).contains(&point.x)
            && (self.top_left.y..self.bottom_right.y).contains(&point.y)
    }

    #[inline]
    pub fn grow_to_contain(&mut self, other: Self) {
        self.top_left.x = cmp::min(self.top_left.x, other.top_left.x);
        self.top_left.y = cmp::min(self.top_left.y, other.top_left.y);
        self.bottom_right.x = cmp::max(self.bottom_right.x, other.bottom_right.x);
        self.bottom_right.y = cmp::max(self.bottom_right.y, other.bottom_right.y);
    }

    pub fn grow_to_contain_point(&mut self, point: Vec2D<T>) {
        self.top_left.x = cmp::min(self.top_left.x, point.x);
        self.top_left.y = cmp::min(self.top_left.y, point.y);
        self.bottom_right.x = cmp::max(self.bottom_right.x, point.x);
        self.bottom_right.y = cmp::max(self.bottom_right.y, point.y);
    }

    /// The overlapping region of the two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let top_left = Vec2D {
            x: cmp::max(self.top_left.x, other.top_left.x),
            y: cmp::max(self.top_left.y, other.top_left.y),
        };
        let bottom_right = Vec2D {
            x: cmp::min(self.bottom_right.x, other.bottom_right.x),
            y: cmp::min(self.bottom_right.y, other.bottom_right.y),
        };

        if bottom_right.x <= top_left.x || bottom_right.y <= top_left.y {
            return None;
        }

        Some(Self {
            top_left,
            bottom_right,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rectangles() {
        let a = Rectangle::from_position_and_size(Vec2D::new(0, 0), 10, 10);
        let b = Rectangle::from_position_and_size(Vec2D::new(5, 5), 10, 10);

        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap.top_left(), Vec2D::new(5, 5));
        assert_eq!(overlap.bottom_right(), Vec2D::new(10, 10));
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let a = Rectangle::from_position_and_size(Vec2D::new(0, 0), 10, 10);
        let b = Rectangle::from_position_and_size(Vec2D::new(10, 0), 10, 10);

        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn grow_to_contain_unions_extents() {
        let mut a = Rectangle::from_position_and_size(Vec2D::new(2, 3), 4, 4);
        a.grow_to_contain(Rectangle::from_position_and_size(Vec2D::new(0, 5), 3, 8));

        assert_eq!(a.top_left(), Vec2D::new(0, 3));
        assert_eq!(a.bottom_right(), Vec2D::new(6, 13));
    }
}
