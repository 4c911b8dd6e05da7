//! Connected-region operations on pixel buffers.
//!
//! Both operations use the same scanline strategy: extend a span left
//! and right from a seed, then scan the rows above and below the span
//! for further seeds. The pending seeds live on an explicit worklist,
//! so region size is bounded by the buffer and not by stack depth.

use crate::{Argb, PixelBuffer};

/// Flag every pixel of the 4-connected region around the buffer's
/// center that exactly matches the center pixel's value.
///
/// The returned mask is indexed like the buffer's pixel data. Sprite
/// images use it to find the recolorable interior of a shape: the
/// outline pixels differ from the center and fence the region in.
#[must_use]
pub fn interior_mask(buffer: &PixelBuffer) -> Vec<bool> {
    let width = buffer.width();
    let height = buffer.height();
    let mut mask = vec![false; width * height];
    if width == 0 || height == 0 {
        return mask;
    }

    let center_x = (width as f32 / 2.0).round() as usize - 1;
    let center_y = (height as f32 / 2.0).round() as usize - 1;
    let region_value = buffer.get(center_x, center_y);

    let mut worklist = vec![(center_x, center_y)];
    while let Some((x, y)) = worklist.pop() {
        if mask[y * width + x] || buffer.get(x, y) != region_value {
            continue;
        }

        // Extend the span through the seed as far as the region reaches
        let mut left = x;
        while left > 0 && buffer.get(left - 1, y) == region_value && !mask[y * width + left - 1] {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < width
            && buffer.get(right + 1, y) == region_value
            && !mask[y * width + right + 1]
        {
            right += 1;
        }
        for column in left..=right {
            mask[y * width + column] = true;
        }

        for neighbor_y in neighbor_rows(y, height) {
            push_row_seeds(&mut worklist, neighbor_y, left, right, |column| {
                buffer.get(column, neighbor_y) == region_value
                    && !mask[neighbor_y * width + column]
            });
        }
    }

    mask
}

/// Repaint the color components of every flagged pixel, keeping each
/// pixel's alpha. Transparent pixels therefore stay invisible even when
/// the mask flags them.
///
/// # Panics
/// This function panics if the mask's length does not match the buffer.
pub fn paint_masked(buffer: &mut PixelBuffer, mask: &[bool], color: Argb) {
    assert_eq!(mask.len(), buffer.pixels().len());

    for (pixel, &flagged) in buffer.pixels_mut().iter_mut().zip(mask) {
        if flagged {
            *pixel = pixel.with_rgb_of(color);
        }
    }
}

/// Turn every border-connected run of background-colored pixels fully
/// transparent.
///
/// Pixels are matched on their color components only, so it does not
/// matter what alpha the painter left behind. Enclosed areas of the
/// background color survive, which is what makes the interior of a
/// closed shape recolorable afterwards.
pub fn strip_background(buffer: &mut PixelBuffer, background: Argb) {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 {
        return;
    }

    let matches = |buffer: &PixelBuffer, x: usize, y: usize| {
        let pixel = buffer.get(x, y);
        !pixel.is_transparent() && pixel.rgb() == background.rgb()
    };

    let mut worklist = Vec::new();
    for y in 0..height {
        worklist.push((0, y));
        worklist.push((width - 1, y));
    }
    for x in 0..width {
        worklist.push((x, 0));
        worklist.push((x, height - 1));
    }

    while let Some((x, y)) = worklist.pop() {
        if !matches(buffer, x, y) {
            continue;
        }

        let mut left = x;
        while left > 0 && matches(buffer, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < width && matches(buffer, right + 1, y) {
            right += 1;
        }
        for column in left..=right {
            buffer.set(column, y, Argb::TRANSPARENT);
        }

        for neighbor_y in neighbor_rows(y, height) {
            push_row_seeds(&mut worklist, neighbor_y, left, right, |column| {
                matches(buffer, column, neighbor_y)
            });
        }
    }
}

fn neighbor_rows(y: usize, height: usize) -> impl Iterator<Item = usize> {
    let above = (y > 0).then(|| y - 1);
    let below = (y + 1 < height).then_some(y + 1);
    above.into_iter().chain(below)
}

/// Queue one seed per matching run of pixels within `left..=right`.
fn push_row_seeds<F>(
    worklist: &mut Vec<(usize, usize)>,
    y: usize,
    left: usize,
    right: usize,
    matches: F,
) where
    F: Fn(usize) -> bool,
{
    let mut column = left;
    while column <= right {
        if matches(column) {
            worklist.push((column, y));
            while column <= right && matches(column) {
                column += 1;
            }
        } else {
            column += 1;
        }
    }
}
