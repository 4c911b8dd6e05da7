//! Rotation of square pixel buffers by reverse projection.

use math::Angle;

use crate::{Argb, PixelBuffer};

/// Produce a copy of the square `base` buffer rotated by `heading`.
///
/// Works backwards: for every destination pixel the matching source
/// pixel is found by rotating the destination's position through the
/// negative angle around the buffer center. Destination pixels whose
/// source falls outside the buffer stay transparent, so rotation never
/// invents paint that was not in the source.
///
/// Positions are doubled and offset by one before rotating so that the
/// rotation pivots around the center of the middle pixel instead of a
/// pixel corner, which keeps repeated re-rotations from drifting.
#[must_use]
pub fn project(base: &PixelBuffer, heading: Angle) -> PixelBuffer {
    if heading.as_radians() == 0.0 {
        return base.clone();
    }

    let side = base.width();
    debug_assert_eq!(side, base.height());

    let center = side as i32 / 2;
    let sin = heading.sin();
    let cos = heading.cos();

    let mut rotated = PixelBuffer::new(side, side);
    for row in 0..side {
        let row_prime = 2 * (row as i32 - center) + 1;
        for column in 0..side {
            let column_prime = 2 * (column as i32 - center) + 1;

            let source_x =
                (column_prime as f32 * cos - row_prime as f32 * sin).round_ties_even() as i32;
            let source_x = (source_x - 1) / 2 + center;
            let source_y =
                (column_prime as f32 * sin + row_prime as f32 * cos).round_ties_even() as i32;
            let source_y = (source_y - 1) / 2 + center;

            let pixel = base.get_or(source_x, source_y, Argb::TRANSPARENT);
            if !pixel.is_transparent() {
                rotated.set(column, row, pixel);
            }
        }
    }

    rotated
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::{FRAC_PI_2, PI};

    use math::Vec2D;

    fn opaque_cells(buffer: &PixelBuffer) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if !buffer.get(x, y).is_transparent() {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn zero_heading_is_identity() {
        let mut base = PixelBuffer::new(16, 16);
        base.set(3, 7, Argb::BLACK);
        base.set(12, 2, Argb::WHITE);

        assert_eq!(project(&base, Angle::from_radians(0.0)), base);
    }

    #[test]
    fn rotation_never_creates_paint_from_transparency() {
        let mut base = PixelBuffer::new(21, 21);
        crate::rasterizer::draw_line(
            &mut base,
            Vec2D::new(4, 10),
            Vec2D::new(16, 10),
            Argb::BLACK,
        )
        .unwrap();
        let painted = opaque_cells(&base).len();

        for heading in [0.3, FRAC_PI_2, 2.5, PI] {
            let rotated = project(&base, Angle::from_radians(heading));
            // resampling may drop pixels but must never add more than
            // the source had per destination cell
            assert!(!opaque_cells(&rotated).is_empty());
            assert!(opaque_cells(&rotated).len() <= 2 * painted);
        }
    }

    #[test]
    fn opposite_rotations_round_trip_within_one_cell() {
        let mut base = PixelBuffer::new(30, 30);
        crate::rasterizer::draw_line(
            &mut base,
            Vec2D::new(6, 20),
            Vec2D::new(24, 12),
            Argb::BLACK,
        )
        .unwrap();

        let rotated = project(&base, Angle::from_radians(0.7));
        let round_trip = project(&rotated, Angle::from_radians(-0.7));

        let source = opaque_cells(&base);
        let restored = opaque_cells(&round_trip);
        let near = |cells: &[(usize, usize)], (x, y): (usize, usize)| {
            cells.iter().any(|&(cx, cy)| {
                (cx as i32 - x as i32).abs() <= 1 && (cy as i32 - y as i32).abs() <= 1
            })
        };

        for &cell in &restored {
            assert!(near(&source, cell), "invented paint at {cell:?}");
        }
        for &cell in &source {
            assert!(near(&restored, cell), "lost the paint at {cell:?}");
        }
    }

    #[test]
    fn quarter_turn_moves_east_to_north() {
        let mut base = PixelBuffer::new(20, 20);

        // a dot to the east of the center pixel
        base.set(15, 9, Argb::BLACK);

        // positive angles turn counterclockwise, which in raster
        // coordinates (y growing down) moves the dot up
        let rotated = project(&base, Angle::from_radians(FRAC_PI_2));
        let cells = opaque_cells(&rotated);
        assert_eq!(cells.len(), 1);
        let (x, y) = cells[0];
        assert!(y < 9, "dot should move above the center, ended at ({x}, {y})");
        assert!((x as i32 - 9).abs() <= 1);
    }
}
