//! The drawing operations a producer can queue against a canvas.
//!
//! Operations are applied to the shared raster by the compositor, which
//! runs on a different thread than the producer that created them. All
//! coordinates inside an operation are turtle space positions and get
//! mapped to raster cells at application time. Unlike sprite painting,
//! raster application clips: drawing off the edge of the canvas is an
//! everyday event, not a bug.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use math::{Angle, Rectangle, Vec2D};
use raster::{font, rasterizer, Argb, PixelBuffer};

use crate::flood;

/// Line headings within a small angular tolerance of an axis are
/// snapped onto it, an eighth of a degree in radians.
pub const LINE_SNAP_TOLERANCE: f32 = PI / (180.0 * 8.0);

const THREE_QTR_CIRCLE: f32 = TAU - FRAC_PI_2;

/// A pen stroke between two turtle space points.
///
/// Construction normalizes the stroke so that a line and its reverse
/// produce the same pixels: the leftmost endpoint always comes first
/// and near-axis headings are snapped exactly onto the axis. Erasing a
/// line by redrawing it in the background color relies on this.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOp {
    from: Vec2D<f32>,
    to: Vec2D<f32>,
    heading: Angle,
    color: Argb,
    pen_width: u32,
}

impl LineOp {
    /// `heading` is the direction from `from` towards `to`.
    #[must_use]
    pub fn new(
        from: Vec2D<f32>,
        to: Vec2D<f32>,
        heading: Angle,
        color: Argb,
        pen_width: u32,
    ) -> Self {
        let (from, to, mut heading) = if from.x <= to.x {
            (from, to, heading.as_radians())
        } else {
            (to, from, heading.as_radians() - PI)
        };

        if heading < 0.0 {
            heading += TAU;
        }
        if heading < LINE_SNAP_TOLERANCE {
            heading = 0.0;
        } else if heading > TAU - LINE_SNAP_TOLERANCE {
            heading = 0.0;
        } else if (heading - FRAC_PI_2).abs() < LINE_SNAP_TOLERANCE {
            heading = FRAC_PI_2;
        } else if (heading - THREE_QTR_CIRCLE).abs() < LINE_SNAP_TOLERANCE {
            heading = THREE_QTR_CIRCLE;
        }

        Self {
            from,
            to,
            heading: Angle::from_radians(heading),
            color,
            pen_width: pen_width.max(1),
        }
    }

    fn apply(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        let width = raster.width();
        let height = raster.height();

        if self.pen_width == 1 {
            let from = self.from.to_raster(width, height);
            let to = self.to.to_raster(width, height);
            return rasterizer::draw_line_clipped(raster, from, to, self.color);
        }

        let heading = self.heading.as_radians();
        if heading == 0.0 || heading == PI {
            return self.apply_horizontal(raster);
        }
        if heading == FRAC_PI_2 || heading == THREE_QTR_CIRCLE {
            return self.apply_vertical(raster);
        }

        let delta_x = (self.from.x - self.to.x).abs();
        let delta_y = (self.from.y - self.to.y).abs();
        if delta_x < 1.5 && delta_y < 1.5 {
            return self.apply_stub(raster);
        }

        self.apply_quad(raster)
    }

    // An axis-aligned fat line is just a filled rectangle
    fn apply_horizontal(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        let half_width = self.pen_width as f32 / 2.0;
        let top = raster.height() as i32 / 2 - (self.from.y + half_width).round() as i32;

        let from = self.from.to_raster(raster.width(), raster.height());
        let to = self.to.to_raster(raster.width(), raster.height());
        let left = from.x.min(to.x);
        let length = (from.x - to.x).abs();

        fill_rect(
            raster,
            Rectangle::from_position_and_size(
                Vec2D::new(left, top),
                length,
                self.pen_width as i32,
            ),
            self.color,
        )
    }

    fn apply_vertical(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        let half_width = self.pen_width as f32 / 2.0;
        let left = raster.width() as i32 / 2 + (self.from.x - half_width).round() as i32;

        let from = self.from.to_raster(raster.width(), raster.height());
        let to = self.to.to_raster(raster.width(), raster.height());
        let top = from.y.min(to.y);
        let length = (from.y - to.y).abs();

        fill_rect(
            raster,
            Rectangle::from_position_and_size(
                Vec2D::new(left, top),
                self.pen_width as i32,
                length,
            ),
            self.color,
        )
    }

    // A stroke too short for a quad collapses into a single line
    // perpendicular to the heading
    fn apply_stub(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        let half_width = self.pen_width as f32 / 2.0;
        let left_point = self
            .from
            .offset_along(self.heading + Angle::from_radians(FRAC_PI_2), half_width);
        let right_point = left_point.offset_along(
            self.heading - Angle::from_radians(FRAC_PI_2),
            self.pen_width as f32,
        );

        rasterizer::draw_line_clipped(
            raster,
            left_point.to_raster(raster.width(), raster.height()),
            right_point.to_raster(raster.width(), raster.height()),
            self.color,
        )
    }

    fn apply_quad(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        let width = raster.width();
        let height = raster.height();
        let half_width = self.pen_width as f32 / 2.0;

        let from = self.from.to_raster(width, height);
        let to = self.to.to_raster(width, height);

        let left_point = self
            .from
            .offset_along(self.heading + Angle::from_radians(FRAC_PI_2), half_width)
            .to_raster(width, height);
        let right_point = self
            .from
            .offset_along(self.heading - Angle::from_radians(FRAC_PI_2), half_width)
            .to_raster(width, height);

        let left_delta = left_point - from;
        let right_delta = right_point - from;

        let corners = [
            left_point,
            right_point,
            to + right_delta,
            to + left_delta,
        ];
        fill_quad(raster, corners, self.color)
    }
}

/// An operation queued by a producer and applied by the compositor.
#[derive(Clone, Debug)]
pub enum GraphicsOp {
    Line(LineOp),
    /// Paint `text` with its baseline starting at `origin`
    Label {
        origin: Vec2D<f32>,
        text: String,
        color: Argb,
    },
    /// Blit a previously captured block of pixels, skipping the fully
    /// transparent ones
    SetPixels {
        top_left: Vec2D<f32>,
        pixels: PixelBuffer,
    },
    /// Recolor the connected region of same-colored pixels around
    /// `origin`
    Fill { origin: Vec2D<f32>, color: Argb },
}

impl GraphicsOp {
    /// Apply the operation to the raster and return the rectangle of
    /// changed cells, if any.
    pub(crate) fn apply(&self, raster: &mut PixelBuffer) -> Option<Rectangle<i32>> {
        match self {
            Self::Line(line) => line.apply(raster),
            Self::Label {
                origin,
                text,
                color,
            } => {
                let baseline = origin.to_raster(raster.width(), raster.height());
                let top_left = Vec2D::new(baseline.x, baseline.y - font::GLYPH_HEIGHT as i32);
                font::draw_text(raster, top_left, text, *color)
            },
            Self::SetPixels { top_left, pixels } => {
                let at = top_left.to_raster(raster.width(), raster.height());
                raster.blit_opaque(pixels, at)
            },
            Self::Fill { origin, color } => {
                let seed = origin.to_raster(raster.width(), raster.height());
                flood::fill(raster, seed, *color)
            },
        }
    }
}

fn fill_rect(
    raster: &mut PixelBuffer,
    rect: Rectangle<i32>,
    color: Argb,
) -> Option<Rectangle<i32>> {
    let visible = rect.intersection(&raster.rect())?;

    for y in visible.top_left().y..visible.bottom_right().y {
        for x in visible.top_left().x..visible.bottom_right().x {
            raster.set(x as usize, y as usize, color);
        }
    }

    Some(visible)
}

/// Scanline fill of a convex quadrilateral given in winding order.
fn fill_quad(
    raster: &mut PixelBuffer,
    corners: [Vec2D<i32>; 4],
    color: Argb,
) -> Option<Rectangle<i32>> {
    let mut bounds = Rectangle::from_position_and_size(corners[0], 1, 1);
    for corner in &corners[1..] {
        bounds.grow_to_contain_point(*corner);
        bounds.grow_to_contain_point(Vec2D::new(corner.x + 1, corner.y + 1));
    }
    let visible = bounds.intersection(&raster.rect())?;

    for y in visible.top_left().y..visible.bottom_right().y {
        let mut span: Option<(i32, i32)> = None;
        for index in 0..4 {
            let a = corners[index];
            let b = corners[(index + 1) % 4];

            let crossing_x = if a.y == b.y {
                if y != a.y {
                    continue;
                }
                // a horizontal edge contributes both of its endpoints
                let (low, high) = (a.x.min(b.x), a.x.max(b.x));
                span = Some(match span {
                    Some((min_x, max_x)) => (min_x.min(low), max_x.max(high)),
                    None => (low, high),
                });
                continue;
            } else {
                if y < a.y.min(b.y) || y > a.y.max(b.y) {
                    continue;
                }
                let t = (y - a.y) as f32 / (b.y - a.y) as f32;
                (a.x as f32 + t * (b.x - a.x) as f32).round() as i32
            };

            span = Some(match span {
                Some((min_x, max_x)) => (min_x.min(crossing_x), max_x.max(crossing_x)),
                None => (crossing_x, crossing_x),
            });
        }

        if let Some((min_x, max_x)) = span {
            let min_x = min_x.max(visible.top_left().x);
            let max_x = max_x.min(visible.bottom_right().x - 1);
            for x in min_x..=max_x {
                raster.set(x as usize, y as usize, color);
            }
        }
    }

    Some(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster() -> PixelBuffer {
        PixelBuffer::filled(100, 100, Argb::WHITE)
    }

    fn painted(buffer: &PixelBuffer) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if buffer.get(x, y) != Argb::WHITE {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn reversed_lines_paint_identical_pixels() {
        let a = Vec2D::new(-20.0, -10.0);
        let b = Vec2D::new(15.0, 30.0);
        let heading = Angle::from_radians((30.0f32 - -10.0).atan2(15.0 - -20.0));
        let reverse = heading + Angle::from_radians(PI);

        let mut forwards = raster();
        let mut backwards = raster();
        LineOp::new(a, b, heading, Argb::BLACK, 5)
            .apply(&mut forwards)
            .unwrap();
        LineOp::new(b, a, reverse, Argb::BLACK, 5)
            .apply(&mut backwards)
            .unwrap();

        assert_eq!(painted(&forwards), painted(&backwards));
        assert!(!painted(&forwards).is_empty());
    }

    #[test]
    fn near_axis_headings_snap_to_the_axis() {
        // a tenth of a degree off vertical
        let off_vertical = Angle::from_radians(FRAC_PI_2 + 0.1f32.to_radians() / 10.0);
        let op = LineOp::new(
            Vec2D::new(0.0, -20.0),
            Vec2D::new(0.0, 20.0),
            off_vertical,
            Argb::BLACK,
            6,
        );
        assert_eq!(op.heading, Angle::from_radians(FRAC_PI_2));

        let mut target = raster();
        let dirty = op.apply(&mut target).unwrap();
        // a vertical fat line is a pen-width wide filled rectangle
        assert_eq!(dirty.width(), 6);
    }

    #[test]
    fn fat_horizontal_line_is_a_filled_rectangle() {
        let op = LineOp::new(
            Vec2D::new(-10.0, 0.0),
            Vec2D::new(10.0, 0.0),
            Angle::from_radians(0.0),
            Argb::BLACK,
            4,
        );

        let mut target = raster();
        let dirty = op.apply(&mut target).unwrap();
        assert_eq!(dirty.width(), 20);
        assert_eq!(dirty.height(), 4);
        assert_eq!(painted(&target).len(), 80);
    }

    #[test]
    fn lines_clip_at_the_raster_edge() {
        let op = LineOp::new(
            Vec2D::new(0.0, 0.0),
            Vec2D::new(500.0, 0.0),
            Angle::from_radians(0.0),
            Argb::BLACK,
            1,
        );

        let mut target = raster();
        let dirty = op.apply(&mut target).unwrap();
        assert_eq!(dirty.bottom_right().x, 100);
        assert_eq!(target.get(99, 50), Argb::BLACK);
    }

    #[test]
    fn fully_offscreen_ops_report_no_damage() {
        let op = LineOp::new(
            Vec2D::new(500.0, 500.0),
            Vec2D::new(600.0, 500.0),
            Angle::from_radians(0.0),
            Argb::BLACK,
            3,
        );

        let mut target = raster();
        assert!(op.apply(&mut target).is_none());
        assert!(painted(&target).is_empty());
    }

    #[test]
    fn labels_paint_above_their_baseline() {
        let mut target = raster();
        let op = GraphicsOp::Label {
            origin: Vec2D::new(0.0, 0.0),
            text: "HI".to_string(),
            color: Argb::BLACK,
        };

        let dirty = op.apply(&mut target).unwrap();
        assert_eq!(dirty.bottom_right().y, 50);
        assert_eq!(dirty.height(), 7);
        assert!(!painted(&target).is_empty());
    }

    #[test]
    fn set_pixels_honors_source_transparency() {
        let mut target = raster();

        let mut block = PixelBuffer::new(3, 3);
        block.set(1, 1, Argb::BLACK);
        let op = GraphicsOp::SetPixels {
            top_left: Vec2D::new(0.0, 0.0),
            pixels: block,
        };

        op.apply(&mut target).unwrap();
        assert_eq!(painted(&target), vec![(51, 51)]);
    }
}
