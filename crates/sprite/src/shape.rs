//! The built-in sprite shapes.
//!
//! Every painter draws its outline onto a square buffer whose side is
//! large enough to rotate the shape without clipping its corners. The
//! shapes face east, a heading of zero, with the sprite's height
//! running along the x axis and its width along the y axis. The image
//! pipeline rotates them to other headings afterwards.

use math::Vec2D;
use raster::{rasterizer, Argb, PixelBuffer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Arrow,
    Ball,
    Box,
    Cross,
    Diamond,
    Triangle,
    Turtle,
}

impl Shape {
    /// `(width, height)` used when the caller does not ask for a size.
    #[must_use]
    pub const fn default_size(&self) -> (u32, u32) {
        match self {
            Self::Diamond => (20, 32),
            Self::Turtle => (25, 30),
            _ => (30, 30),
        }
    }

    /// The smallest `(width, height)` the painter can draw legibly.
    #[must_use]
    pub const fn minimum_size(&self) -> (u32, u32) {
        match self {
            Self::Arrow => (10, 10),
            Self::Box => (2, 2),
            Self::Cross => (9, 9),
            Self::Turtle => (25, 30),
            _ => (6, 6),
        }
    }

    /// Whether changing the heading can change the shape's image.
    /// A rotated ball looks like a ball.
    #[must_use]
    pub const fn rotates(&self) -> bool {
        !matches!(self, Self::Ball)
    }

    pub(crate) fn paint(
        &self,
        side: usize,
        width: u32,
        height: u32,
        target: &mut PixelBuffer,
    ) -> Result<(), rasterizer::Error> {
        match self {
            Self::Arrow => paint_arrow(side, width, height, target),
            Self::Ball => paint_ball(side, height, target),
            Self::Box => paint_box(side, width, height, target),
            Self::Cross => paint_cross(side, width, height, target),
            Self::Diamond => paint_diamond(side, width, height, target),
            Self::Triangle => paint_triangle(side, width, height, target),
            Self::Turtle => paint_turtle(side, target),
        }
    }
}

fn line(
    target: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
) -> Result<(), rasterizer::Error> {
    rasterizer::draw_line(target, Vec2D::new(x0, y0), Vec2D::new(x1, y1), Argb::BLACK)?;
    Ok(())
}

fn paint_box(
    side: usize,
    width: u32,
    height: u32,
    target: &mut PixelBuffer,
) -> Result<(), rasterizer::Error> {
    let center = side as f32 / 2.0;
    let x1 = (center - height as f32 / 2.0).round() as i32;
    let y1 = (center - width as f32 / 2.0).round() as i32;
    let x2 = x1 + height as i32 - 1;
    let y2 = y1 + width as i32 - 1;

    line(target, x1, y1, x1, y2)?;
    line(target, x1, y1, x2, y1)?;
    line(target, x2, y1, x2, y2)?;
    line(target, x1, y2, x2, y2)?;
    Ok(())
}

fn paint_ball(side: usize, height: u32, target: &mut PixelBuffer) -> Result<(), rasterizer::Error> {
    let center = side as i32 / 2;
    let radius = height as i32 / 2;
    rasterizer::draw_circle(target, Vec2D::new(center, center), radius, Argb::BLACK)?;
    Ok(())
}

// An isosceles triangle with its apex to the east
fn paint_triangle(
    side: usize,
    width: u32,
    height: u32,
    target: &mut PixelBuffer,
) -> Result<(), rasterizer::Error> {
    let center = side as f32 / 2.0;
    let x1 = (center - height as f32 / 2.0).round() as i32;
    let x2 = x1 + height as i32 - 1;
    let bottom_y = (center - width as f32 / 2.0).round() as i32;
    let top_y = bottom_y + width as i32 - 1;
    let center_y = center.round() as i32;

    line(target, x1, bottom_y, x1, top_y)?;
    line(target, x1, top_y, x2, center_y)?;
    line(target, x1, bottom_y, x2, center_y)?;
    Ok(())
}

fn paint_diamond(
    side: usize,
    width: u32,
    height: u32,
    target: &mut PixelBuffer,
) -> Result<(), rasterizer::Error> {
    let center = side as f32 / 2.0;
    let left_x = center - height as f32 / 2.0;
    let right_x = left_x as i32 + height as i32 - 1;
    let bottom_y = center - width as f32 / 2.0;
    let top_y = bottom_y as i32 + width as i32 - 1;

    let center_i = center.round() as i32;
    line(target, left_x.round() as i32, center_i, center_i, top_y)?;
    line(
        target,
        left_x.round() as i32,
        center_i,
        center_i,
        bottom_y.round() as i32,
    )?;
    line(target, center_i, bottom_y.round() as i32, right_x, center_i)?;
    line(target, center_i, top_y, right_x, center_i)?;
    Ok(())
}

/// The arrow's shaft is half the height for squat arrows and two
/// thirds of it for tall ones, the head making up the rest. The
/// shaft is a third of the width.
fn paint_arrow(
    side: usize,
    width: u32,
    height: u32,
    target: &mut PixelBuffer,
) -> Result<(), rasterizer::Error> {
    let center = side as f32 / 2.0;
    let half_shaft_width = width as f32 / 6.0;
    let left = (center - width as f32 / 2.0).round() as i32;
    let right = left + width as i32;
    let bottom = (center - height as f32 / 2.0).round() as i32;
    let top = bottom + height as i32;

    let mut x1 = center.round() as i32;
    if height > width {
        x1 += (height as f32 / 8.0).round() as i32;
    }
    let y1 = (center + half_shaft_width).round() as i32;
    let y2 = (center - half_shaft_width).round() as i32;
    let center_i = center.round() as i32;

    line(target, x1, y1, x1, right)?; // right base of arrowhead
    line(target, x1, right, top, center_i)?; // right side of arrowhead
    line(target, x1, y2, x1, left)?; // left base of arrowhead
    line(target, x1, left, top, center_i)?; // left side of arrowhead
    line(target, x1, y1, bottom, y1)?; // right side of shaft
    line(target, bottom, y1, bottom, y2)?; // base of shaft
    line(target, x1, y2, bottom, y2)?; // left side of shaft
    Ok(())
}

fn paint_cross(
    side: usize,
    width: u32,
    height: u32,
    target: &mut PixelBuffer,
) -> Result<(), rasterizer::Error> {
    let center = side as f32 / 2.0;
    let half_height = height as f32 / 2.0;
    let half_width = width as f32 / 2.0;
    let gap = (if width < height { width / 8 } else { height / 8 }) as f32;
    let half_gap = gap / 2.0;

    // Endpoints are one-based point coordinates, rounded down to pixel
    // indices right before painting
    let mut draw = |x1: f32, y1: f32, x2: f32, y2: f32| {
        line(
            target,
            x1.round() as i32 - 1,
            y1.round() as i32 - 1,
            x2.round() as i32 - 1,
            y2.round() as i32 - 1,
        )
    };

    // right side of cross
    draw(center - half_gap, center + half_gap, center - half_gap, center + half_width)?;
    draw(center - half_gap, center + half_width, center + half_gap, center + half_width)?;
    draw(center + half_gap, center + half_gap, center + half_gap, center + half_width)?;
    // top of cross
    draw(center + half_gap, center + half_gap, center + half_height, center + half_gap)?;
    draw(center + half_height, center - half_gap, center + half_height, center + half_gap)?;
    draw(center + half_gap, center - half_gap, center + half_height, center - half_gap)?;
    // left side of cross
    draw(center + half_gap, center - half_gap, center + half_gap, center - half_width)?;
    draw(center - half_gap, center - half_width, center + half_gap, center - half_width)?;
    draw(center - half_gap, center - half_gap, center - half_gap, center - half_width)?;
    // bottom of cross
    draw(center - half_gap, center - half_gap, center - half_height, center - half_gap)?;
    draw(center - half_height, center - half_gap, center - half_height, center + half_gap)?;
    draw(center - half_height, center + half_gap, center - half_gap, center + half_gap)?;
    Ok(())
}

// A stylized turtle seen from above, fixed at 25x30 pixels
fn paint_turtle(side: usize, target: &mut PixelBuffer) -> Result<(), rasterizer::Error> {
    let (width, height) = Shape::Turtle.default_size();
    let xb = (side as i32 - height as i32) / 2;
    let yb = (side as i32 - width as i32) / 2;

    // head
    line(target, xb + 29, yb + 12, xb + 26, yb + 15)?;
    line(target, xb + 29, yb + 12, xb + 26, yb + 9)?;
    line(target, xb + 26, yb + 15, xb + 22, yb + 14)?;
    line(target, xb + 26, yb + 9, xb + 22, yb + 10)?;
    // body
    line(target, xb + 22, yb + 13, xb + 19, yb + 18)?;
    line(target, xb + 16, yb + 21, xb + 10, yb + 20)?;
    line(target, xb + 5, yb + 18, xb + 4, yb + 13)?;
    line(target, xb + 22, yb + 11, xb + 19, yb + 6)?;
    line(target, xb + 16, yb + 3, xb + 10, yb + 4)?;
    line(target, xb + 5, yb + 6, xb + 4, yb + 11)?;
    // tail
    line(target, xb, yb + 12, xb + 4, yb + 13)?;
    line(target, xb, yb + 12, xb + 4, yb + 11)?;
    // left front leg
    line(target, xb + 20, yb + 24, xb + 19, yb + 19)?;
    line(target, xb + 19, yb + 24, xb + 17, yb + 22)?;
    // right front leg
    line(target, xb + 20, yb, xb + 19, yb + 5)?;
    line(target, xb + 19, yb, xb + 17, yb + 2)?;
    // left rear leg
    line(target, xb + 5, yb + 22, xb + 9, yb + 20)?;
    line(target, xb + 4, yb + 22, xb + 6, yb + 19)?;
    // right rear leg
    line(target, xb + 5, yb + 2, xb + 9, yb + 4)?;
    line(target, xb + 4, yb + 2, xb + 6, yb + 5)?;
    Ok(())
}
