//! Line and circle primitives for small pixel buffers.
//!
//! The strict entry points refuse to paint anything if the primitive
//! would touch a pixel outside the target buffer. Sprite painters rely
//! on this to surface sizing mistakes instead of silently producing a
//! clipped image.

use std::fmt;

use math::{Rectangle, Vec2D};

use crate::{Argb, PixelBuffer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A primitive would touch a pixel outside the target buffer
    OutOfBounds {
        position: Vec2D<i32>,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                position,
                width,
                height,
            } => {
                write!(
                    f,
                    "position ({}, {}) is outside the {width}x{height} pixel buffer",
                    position.x, position.y
                )
            },
        }
    }
}

impl std::error::Error for Error {}

fn ensure_inside(target: &PixelBuffer, position: Vec2D<i32>) -> Result<(), Error> {
    if target.contains(position.x, position.y) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            position,
            width: target.width(),
            height: target.height(),
        })
    }
}

/// Paint a one pixel wide line between the two endpoints.
///
/// Fails without painting anything if either endpoint lies outside the
/// buffer. Every painted pixel stays within the bounding box of the
/// endpoints, so validating those is enough.
///
/// Returns the bounding box of the painted pixels.
pub fn draw_line(
    target: &mut PixelBuffer,
    from: Vec2D<i32>,
    to: Vec2D<i32>,
    color: Argb,
) -> Result<Rectangle<i32>, Error> {
    ensure_inside(target, from)?;
    ensure_inside(target, to)?;

    line_pixels(from, to, |x, y| target.set(x as usize, y as usize, color));

    let mut bounds = Rectangle::from_position_and_size(from, 1, 1);
    bounds.grow_to_contain(Rectangle::from_position_and_size(to, 1, 1));
    Ok(bounds)
}

/// Like [`draw_line`], except pixels outside the buffer are skipped
/// instead of failing the whole primitive.
///
/// Returns the part of the line's bounding box that overlaps the
/// buffer, or `None` if the line misses it entirely.
pub fn draw_line_clipped(
    target: &mut PixelBuffer,
    from: Vec2D<i32>,
    to: Vec2D<i32>,
    color: Argb,
) -> Option<Rectangle<i32>> {
    let mut bounds = Rectangle::from_position_and_size(from, 1, 1);
    bounds.grow_to_contain(Rectangle::from_position_and_size(to, 1, 1));
    let visible = bounds.intersection(&target.rect())?;

    line_pixels(from, to, |x, y| target.set_clipped(x, y, color));

    Some(visible)
}

/// Walk the pixels of a line using the axis with the larger extent to
/// drive a bresenham stepper.
///
/// The walk always starts from the endpoint with the smaller driving
/// coordinate, so swapping the endpoints yields the exact same set of
/// pixels. Erasing a line by redrawing it in the background color
/// depends on this.
fn line_pixels<F>(from: Vec2D<i32>, to: Vec2D<i32>, mut put: F)
where
    F: FnMut(i32, i32),
{
    let Vec2D { x: x0, y: y0 } = from;
    let Vec2D { x: x1, y: y1 } = to;

    if x0 == x1 {
        for y in y0.min(y1)..=y0.max(y1) {
            put(x0, y);
        }
    } else if y0 == y1 {
        for x in x0.min(x1)..=x0.max(x1) {
            put(x, y0);
        }
    } else {
        let slope = (y1 - y0) as f32 / (x1 - x0) as f32;
        if slope.abs() > 1.0 {
            if y0 < y1 {
                fill_y_unit_line(x0, y0, x1, y1, &mut put);
            } else {
                fill_y_unit_line(x1, y1, x0, y0, &mut put);
            }
        } else if x0 < x1 {
            fill_x_unit_line(x0, y0, x1, y1, &mut put);
        } else {
            fill_x_unit_line(x1, y1, x0, y0, &mut put);
        }
    }
}

// Steps x in unit increments, expects x0 < x1
fn fill_x_unit_line<F>(mut x0: i32, y0: i32, x1: i32, y1: i32, put: &mut F)
where
    F: FnMut(i32, i32),
{
    let delta_x = x1 - x0;
    let mut delta_y = y1 - y0;
    let negative_slope = delta_y < 0;
    if negative_slope {
        delta_y = -delta_y;
    }

    let mut decision = 2 * delta_y - delta_x;
    let increment_east = 2 * delta_y;
    let increment_north_east = 2 * (delta_y - delta_x);

    let mut y = y0;
    put(x0, y0);
    while x0 < x1 {
        x0 += 1;
        if decision <= 0 {
            decision += increment_east;
        } else {
            decision += increment_north_east;
            y += 1;
        }

        if negative_slope {
            put(x0, y0 - (y - y0));
        } else {
            put(x0, y);
        }
    }
}

// Steps y in unit increments, expects y0 < y1
fn fill_y_unit_line<F>(x0: i32, mut y0: i32, x1: i32, y1: i32, put: &mut F)
where
    F: FnMut(i32, i32),
{
    let mut delta_x = x1 - x0;
    let negative_slope = delta_x < 0;
    if negative_slope {
        delta_x = -delta_x;
    }
    let delta_y = y1 - y0;

    let mut decision = 2 * delta_x - delta_y;
    let increment_east = 2 * delta_x;
    let increment_north_east = 2 * (delta_x - delta_y);

    let mut x = x0;
    put(x0, y0);
    while y0 < y1 {
        y0 += 1;
        if decision <= 0 {
            decision += increment_east;
        } else {
            decision += increment_north_east;
            x += 1;
        }

        if negative_slope {
            put(x0 - (x - x0), y0);
        } else {
            put(x, y0);
        }
    }
}

/// Paint the circumference of a circle using the midpoint algorithm,
/// mirroring each computed offset into all eight octants.
///
/// Fails without painting anything if any part of the circle's
/// bounding square lies outside the buffer.
pub fn draw_circle(
    target: &mut PixelBuffer,
    center: Vec2D<i32>,
    radius: i32,
    color: Argb,
) -> Result<Rectangle<i32>, Error> {
    ensure_inside(target, Vec2D::new(center.x - radius, center.y - radius))?;
    ensure_inside(target, Vec2D::new(center.x + radius, center.y + radius))?;

    let mut delta_x = 0;
    let mut delta_y = radius;
    let mut midpoint_value = 5.0 / 4.0 - radius as f32;

    circle_pixels(target, center, delta_x, delta_y, color);
    while delta_y > delta_x {
        if midpoint_value < 0.0 {
            midpoint_value += 2.0 * delta_x as f32 + 3.0;
            delta_x += 1;
        } else {
            midpoint_value += 2.0 * (delta_x - delta_y) as f32 + 5.0;
            delta_x += 1;
            delta_y -= 1;
        }
        circle_pixels(target, center, delta_x, delta_y, color);
    }

    Ok(Rectangle::from_position_and_size(
        Vec2D::new(center.x - radius, center.y - radius),
        2 * radius + 1,
        2 * radius + 1,
    ))
}

fn circle_pixels(
    target: &mut PixelBuffer,
    center: Vec2D<i32>,
    delta_x: i32,
    delta_y: i32,
    color: Argb,
) {
    let Vec2D { x, y } = center;
    target.set((x + delta_x) as usize, (y + delta_y) as usize, color);
    target.set((x + delta_y) as usize, (y + delta_x) as usize, color);
    target.set((x + delta_y) as usize, (y - delta_x) as usize, color);
    target.set((x + delta_x) as usize, (y - delta_y) as usize, color);
    target.set((x - delta_x) as usize, (y - delta_y) as usize, color);
    target.set((x - delta_y) as usize, (y - delta_x) as usize, color);
    target.set((x - delta_y) as usize, (y + delta_x) as usize, color);
    target.set((x - delta_x) as usize, (y + delta_y) as usize, color);
}
