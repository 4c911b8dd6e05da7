//! Flood fill over the shared raster.
//!
//! Fills commonly touch a small area of a raster that is millions of
//! pixels large, so the fill works on a window grabbed around the seed
//! instead of the whole raster. When the region reaches a window edge
//! the window grows by a fixed increment, and only the rectangle of
//! pixels that actually changed is written back at the end.

use math::{Rectangle, Vec2D};
use raster::{Argb, PixelBuffer};

/// Side length of the window grabbed around the seed.
const INITIAL_GRAB_SIZE: i32 = 600;

/// Amount a window edge moves outwards when the region reaches it.
const EXPAND_GRAB_SIZE: i32 = 200;

struct Window {
    rect: Rectangle<i32>,
    pixels: PixelBuffer,
}

impl Window {
    fn grab(raster: &PixelBuffer, around: Vec2D<i32>) -> Self {
        let half = INITIAL_GRAB_SIZE / 2;
        let rect = Rectangle::from_corners(
            Vec2D::new((around.x - half).max(0), (around.y - half).max(0)),
            Vec2D::new(
                (around.x + half).min(raster.width() as i32),
                (around.y + half).min(raster.height() as i32),
            ),
        );

        Self {
            pixels: raster.copy_rect(rect),
            rect,
        }
    }

    fn get(&self, x: i32, y: i32) -> Argb {
        let local = Vec2D::new(x, y) - self.rect.top_left();
        self.pixels.get(local.x as usize, local.y as usize)
    }

    fn set(&mut self, x: i32, y: i32, pixel: Argb) {
        let local = Vec2D::new(x, y) - self.rect.top_left();
        self.pixels.set(local.x as usize, local.y as usize, pixel);
    }

    /// Grow the window until it contains the given raster cell,
    /// pulling the newly covered pixels from the raster. The cell must
    /// be inside the raster.
    fn ensure(&mut self, raster: &PixelBuffer, x: i32, y: i32) {
        if self.rect.contains_point(Vec2D::new(x, y)) {
            return;
        }

        let mut left = self.rect.top_left().x;
        let mut top = self.rect.top_left().y;
        let mut right = self.rect.bottom_right().x;
        let mut bottom = self.rect.bottom_right().y;
        while x < left {
            left = (left - EXPAND_GRAB_SIZE).max(0);
        }
        while x >= right {
            right = (right + EXPAND_GRAB_SIZE).min(raster.width() as i32);
        }
        while y < top {
            top = (top - EXPAND_GRAB_SIZE).max(0);
        }
        while y >= bottom {
            bottom = (bottom + EXPAND_GRAB_SIZE).min(raster.height() as i32);
        }

        let grown = Rectangle::from_corners(Vec2D::new(left, top), Vec2D::new(right, bottom));
        log::debug!(
            "flood fill window grew from {}x{} to {}x{}",
            self.rect.width(),
            self.rect.height(),
            grown.width(),
            grown.height(),
        );

        // grab the grown area, then lay the current window over it so
        // pixels the fill already painted are not lost
        let mut pixels = raster.copy_rect(grown);
        pixels.paste(&self.pixels, self.rect.top_left() - grown.top_left());

        self.rect = grown;
        self.pixels = pixels;
    }
}

/// Recolor the 4-connected region of same-colored pixels around `seed`.
///
/// Pixels belong to the region if their color components match those of
/// the seed pixel, alpha is ignored. Returns the rectangle of changed
/// cells, or `None` when the seed is off the raster or already has the
/// requested color, in which case the raster is untouched.
pub(crate) fn fill(
    raster: &mut PixelBuffer,
    seed: Vec2D<i32>,
    color: Argb,
) -> Option<Rectangle<i32>> {
    if !raster.contains(seed.x, seed.y) {
        return None;
    }

    let region_rgb = raster.get(seed.x as usize, seed.y as usize).rgb();
    if region_rgb == color.rgb() {
        return None;
    }

    let raster_width = raster.width() as i32;
    let raster_height = raster.height() as i32;
    let mut window = Window::grab(raster, seed);

    let mut modified: Option<Rectangle<i32>> = None;
    let mut note_span = |left: i32, right: i32, y: i32| {
        let span = Rectangle::from_corners(Vec2D::new(left, y), Vec2D::new(right + 1, y + 1));
        match &mut modified {
            Some(bounds) => bounds.grow_to_contain(span),
            None => modified = Some(span),
        }
    };

    let matches = |window: &Window, x: i32, y: i32| window.get(x, y).rgb() == region_rgb;

    let mut worklist = vec![seed];
    while let Some(Vec2D { x, y }) = worklist.pop() {
        window.ensure(raster, x, y);
        if !matches(&window, x, y) {
            continue;
        }

        let mut left = x;
        while left > 0 {
            window.ensure(raster, left - 1, y);
            if !matches(&window, left - 1, y) {
                break;
            }
            left -= 1;
        }
        let mut right = x;
        while right + 1 < raster_width {
            window.ensure(raster, right + 1, y);
            if !matches(&window, right + 1, y) {
                break;
            }
            right += 1;
        }

        for column in left..=right {
            // keep the destination's alpha byte, replace only the color
            let recolored = window.get(column, y).with_rgb_of(color);
            window.set(column, y, recolored);
        }
        note_span(left, right, y);

        for neighbor_y in [y - 1, y + 1] {
            if neighbor_y < 0 || neighbor_y >= raster_height {
                continue;
            }
            window.ensure(raster, left, neighbor_y);
            window.ensure(raster, right, neighbor_y);

            let mut column = left;
            while column <= right {
                if matches(&window, column, neighbor_y) {
                    worklist.push(Vec2D::new(column, neighbor_y));
                    while column <= right && matches(&window, column, neighbor_y) {
                        column += 1;
                    }
                } else {
                    column += 1;
                }
            }
        }
    }

    let modified = modified?;
    let local = Rectangle::from_corners(
        modified.top_left() - window.rect.top_left(),
        modified.bottom_right() - window.rect.top_left(),
    );
    let changed = window.pixels.copy_rect(local);
    raster.paste(&changed, modified.top_left());

    Some(modified)
}
