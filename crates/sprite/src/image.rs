use std::f32::consts::FRAC_PI_2;

use math::{Angle, Rectangle, Vec2D};
use raster::{rasterizer, region, rotate, Argb, PixelBuffer};

use crate::Shape;

/// Largest width a sprite image may have.
pub const MAX_SPRITE_WIDTH: u32 = 400;

/// Largest height a sprite image may have.
pub const MAX_SPRITE_HEIGHT: u32 = 600;

/// A sprite's appearance: the square array of pixels that make up its
/// image, in every heading it has been asked to face.
///
/// The base image faces east (a heading of zero) and is never modified
/// after construction except to recolor the shape's interior. The
/// rendered view is the base rotated to the current heading and is what
/// gets composited onto a canvas.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    base: PixelBuffer,
    view: PixelBuffer,
    /// Flags the base pixels that change when the sprite is recolored.
    /// `None` for images that did not come from a shape painter.
    fill_mask: Option<Vec<bool>>,
    color: Option<Argb>,
    heading: Angle,
    width: u32,
    height: u32,
    rotates: bool,
}

/// The square side needed to rotate a `width` x `height` image to any
/// heading without clipping its corners. Kept even so the image center
/// falls between pixels symmetrically.
fn side_for(width: u32, height: u32) -> usize {
    let diagonal = ((width * width + height * height) as f64).sqrt();
    let mut side = diagonal.ceil() as usize;
    if side % 2 != 0 {
        side += 1;
    }
    side
}

impl SpriteImage {
    /// Build the image of one of the built-in shapes.
    ///
    /// The dimensions are clamped to the shape's minimum and the global
    /// maximum. The outline is painted black, the enclosed interior
    /// filled with `color`, and the view pre-rendered at `heading`.
    pub fn from_shape(
        shape: Shape,
        width: u32,
        height: u32,
        color: Argb,
        heading: Angle,
    ) -> Result<Self, rasterizer::Error> {
        let (minimum_width, minimum_height) = shape.minimum_size();
        let width = width.clamp(minimum_width, MAX_SPRITE_WIDTH);
        let height = height.clamp(minimum_height, MAX_SPRITE_HEIGHT);

        let side = side_for(width, height);
        let mut base = PixelBuffer::filled(side, side, Argb::WHITE);
        shape.paint(side, width, height, &mut base)?;
        region::strip_background(&mut base, Argb::WHITE);

        let fill_mask = region::interior_mask(&base);
        region::paint_masked(&mut base, &fill_mask, color);

        let heading = if shape.rotates() {
            heading
        } else {
            Angle::from_radians(0.0)
        };

        let view = rotate::project(&base, heading);
        Ok(Self {
            base,
            view,
            fill_mask: Some(fill_mask),
            color: Some(color),
            heading,
            width,
            height,
            rotates: shape.rotates(),
        })
    }

    /// Build the image from caller-supplied pixels.
    ///
    /// The source is expected to depict the sprite facing up, the way
    /// image files are authored, and is laid into the base a quarter
    /// turn clockwise so the base faces east like the shape painters
    /// produce. Border-connected white is treated as background and
    /// stripped. The view starts at a north heading, which shows the
    /// source the way it was authored.
    #[must_use]
    pub fn from_pixels(source: &PixelBuffer) -> Self {
        let width = (source.width() as u32).min(MAX_SPRITE_WIDTH);
        let height = (source.height() as u32).min(MAX_SPRITE_HEIGHT);

        let side = side_for(width, height);
        let mut base = PixelBuffer::filled(side, side, Argb::WHITE);

        let left_inset = (side - height as usize) / 2;
        let top_inset = (side - width as usize) / 2;
        for row in 0..height as usize {
            for column in 0..width as usize {
                base.set(
                    left_inset + height as usize - 1 - row,
                    top_inset + column,
                    source.get(column, row),
                );
            }
        }
        region::strip_background(&mut base, Argb::WHITE);

        let heading = Angle::from_radians(FRAC_PI_2);
        let view = rotate::project(&base, heading);
        Self {
            base,
            view,
            fill_mask: None,
            color: None,
            heading,
            width,
            height,
            rotates: true,
        }
    }

    /// Side length of the square pixel array.
    #[must_use]
    pub fn side(&self) -> usize {
        self.base.width()
    }

    #[must_use]
    pub const fn heading(&self) -> Angle {
        self.heading
    }

    #[must_use]
    pub const fn color(&self) -> Option<Argb> {
        self.color
    }

    /// The image rotated to the current heading.
    #[must_use]
    pub const fn view(&self) -> &PixelBuffer {
        &self.view
    }

    /// Repaint the shape's interior.
    ///
    /// Returns whether the image changed. Images without a fill mask
    /// cannot be recolored.
    pub fn set_color(&mut self, new_color: Argb) -> bool {
        let Some(fill_mask) = &self.fill_mask else {
            return false;
        };
        if self.color == Some(new_color) {
            return false;
        }

        region::paint_masked(&mut self.base, fill_mask, new_color);
        self.color = Some(new_color);
        self.view = rotate::project(&self.base, self.heading);
        true
    }

    /// Rotate the image to a new heading.
    ///
    /// Returns whether the image changed. Headings closer than
    /// [`Angle::MAX_ERROR`] to the current one are ignored, as are all
    /// headings for shapes whose image is rotation invariant.
    pub fn set_heading(&mut self, new_heading: Angle) -> bool {
        if !self.rotates {
            return false;
        }
        if self.heading.diff(&new_heading).as_radians() <= Angle::MAX_ERROR {
            return false;
        }

        self.heading = new_heading;
        self.view = rotate::project(&self.base, new_heading);
        true
    }

    /// Width of the painted part of the view at the current heading.
    #[must_use]
    pub fn visible_width(&self) -> usize {
        let side = self.side();
        let opaque_column = |x: usize| (0..side).any(|y| !self.view.get(x, y).is_transparent());

        let Some(first) = (0..side).find(|&x| opaque_column(x)) else {
            return 0;
        };
        let last = (0..side).rfind(|&x| opaque_column(x)).unwrap_or(first);
        last - first + 1
    }

    /// Height of the painted part of the view at the current heading.
    #[must_use]
    pub fn visible_height(&self) -> usize {
        let side = self.side();
        let opaque_row = |y: usize| (0..side).any(|x| !self.view.get(x, y).is_transparent());

        let Some(first) = (0..side).find(|&y| opaque_row(y)) else {
            return 0;
        };
        let last = (0..side).rfind(|&y| opaque_row(y)).unwrap_or(first);
        last - first + 1
    }
}

/// A positioned, optionally hidden sprite on a canvas.
#[derive(Clone, Debug)]
pub struct Sprite {
    image: SpriteImage,
    /// Position of the sprite's center in turtle space.
    position: Vec2D<f32>,
    visible: bool,
}

impl Sprite {
    #[must_use]
    pub fn new(image: SpriteImage) -> Self {
        Self {
            image,
            position: Vec2D::new(0.0, 0.0),
            visible: true,
        }
    }

    #[must_use]
    pub const fn image(&self) -> &SpriteImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut SpriteImage {
        &mut self.image
    }

    #[must_use]
    pub const fn position(&self) -> Vec2D<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2D<f32>) {
        self.position = position;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The square of raster cells the sprite's view covers on a raster
    /// of the given dimensions.
    #[must_use]
    pub fn footprint(&self, raster_width: usize, raster_height: usize) -> Rectangle<i32> {
        let center = self.position.to_raster(raster_width, raster_height);
        let side = self.image.side() as i32;
        let top_left = Vec2D::new(center.x - side / 2, center.y - side / 2);
        Rectangle::from_position_and_size(top_left, side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_is_even_and_fits_the_diagonal() {
        assert_eq!(side_for(30, 30), 44);
        assert_eq!(side_for(3, 4), 6);
        assert_eq!(side_for(400, 600), 722);
    }

    #[test]
    fn dimensions_are_clamped_to_the_shape_minimum() {
        let image = SpriteImage::from_shape(
            Shape::Box,
            0,
            0,
            Argb::from_pen_value(4),
            Angle::from_radians(0.0),
        )
        .unwrap();

        assert_eq!(image.visible_width(), 2);
        assert_eq!(image.visible_height(), 2);
    }

    #[test]
    fn box_view_has_black_outline_and_colored_interior() {
        let red = Argb::from_pen_value(4);
        let image =
            SpriteImage::from_shape(Shape::Box, 30, 30, red, Angle::from_radians(0.0)).unwrap();

        assert_eq!(image.side(), 44);
        assert_eq!(image.visible_width(), 30);
        assert_eq!(image.visible_height(), 30);

        let view = image.view();
        let center = image.side() / 2;
        assert_eq!(view.get(center, center), red);

        // the corner of the buffer was stripped to transparency
        assert!(view.get(0, 0).is_transparent());
    }

    #[test]
    fn recoloring_changes_only_the_interior() {
        let red = Argb::from_pen_value(4);
        let blue = Argb::from_pen_value(1);
        let mut image =
            SpriteImage::from_shape(Shape::Box, 30, 30, red, Angle::from_radians(0.0)).unwrap();

        let before = image.view().clone();
        assert!(image.set_color(blue));
        let after = image.view();

        let mut changed = 0;
        for y in 0..image.side() {
            for x in 0..image.side() {
                let old = before.get(x, y);
                let new = after.get(x, y);
                if old != new {
                    assert_eq!(old, red);
                    assert_eq!(new, blue);
                    changed += 1;
                }
            }
        }
        assert!(changed > 0);

        // recoloring to the current color is a no-op
        assert!(!image.set_color(blue));
    }

    #[test]
    fn ball_ignores_heading_changes() {
        let mut image = SpriteImage::from_shape(
            Shape::Ball,
            30,
            30,
            Argb::from_pen_value(2),
            Angle::from_radians(1.0),
        )
        .unwrap();

        assert!(!image.set_heading(Angle::from_radians(2.0)));
    }

    #[test]
    fn tiny_heading_changes_are_ignored() {
        let mut image = SpriteImage::from_shape(
            Shape::Triangle,
            30,
            30,
            Argb::from_pen_value(2),
            Angle::from_radians(1.0),
        )
        .unwrap();

        assert!(!image.set_heading(Angle::from_radians(1.0005)));
        assert!(image.set_heading(Angle::from_radians(2.0)));
    }

    #[test]
    fn tall_shapes_shrink_their_visible_width_when_rotated_flat() {
        let mut image = SpriteImage::from_shape(
            Shape::Box,
            10,
            40,
            Argb::from_pen_value(3),
            Angle::from_radians(0.0),
        )
        .unwrap();

        // facing east the 40 pixel height runs along the x axis
        assert_eq!(image.visible_width(), 40);
        assert!(image.visible_height() <= 11);

        assert!(image.set_heading(Angle::from_radians(FRAC_PI_2)));
        assert!(image.visible_width() <= 12);
        assert!(image.visible_height() >= 38);
    }

    #[test]
    fn user_images_cannot_be_recolored() {
        let source = PixelBuffer::filled(8, 8, Argb::BLACK);
        let mut image = SpriteImage::from_pixels(&source);

        assert!(!image.set_color(Argb::from_pen_value(4)));
    }

    #[test]
    fn user_images_keep_their_pixels() {
        // an opaque red block with a white frame that must be stripped
        let mut source = PixelBuffer::filled(9, 9, Argb::WHITE);
        for y in 2..7 {
            for x in 2..7 {
                source.set(x, y, Argb::from_pen_value(4));
            }
        }

        let image = SpriteImage::from_pixels(&source);
        assert_eq!(image.visible_width(), 5);
        assert_eq!(image.visible_height(), 5);

        let opaque = image
            .view()
            .pixels()
            .iter()
            .filter(|pixel| !pixel.is_transparent())
            .count();
        assert_eq!(opaque, 25);
    }

    #[test]
    fn footprint_is_centered_on_the_position() {
        let image = SpriteImage::from_shape(
            Shape::Box,
            30,
            30,
            Argb::from_pen_value(1),
            Angle::from_radians(0.0),
        )
        .unwrap();
        let mut sprite = Sprite::new(image);
        sprite.set_position(Vec2D::new(0.0, 0.0));

        let footprint = sprite.footprint(101, 101);
        assert_eq!(footprint.top_left(), Vec2D::new(50 - 22, 50 - 22));
        assert_eq!(footprint.width(), 44);
        assert_eq!(footprint.height(), 44);
    }
}
