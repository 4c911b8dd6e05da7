use std::fmt;

use math::{Rectangle, Vec2D};

use crate::Argb;

/// A rectangular grid of [`Argb`] pixels in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    pixels: Vec<Argb>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The pixel data length is not a multiple of the row width
    MalformedPixels { len: usize, width: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPixels { len, width } => {
                write!(f, "{len} pixels cannot form complete rows of width {width}")
            },
        }
    }
}

impl std::error::Error for Error {}

impl PixelBuffer {
    /// A fully transparent buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Argb::TRANSPARENT)
    }

    #[must_use]
    pub fn filled(width: usize, height: usize, color: Argb) -> Self {
        Self {
            width,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap raw `0xAARRGGBB` pixel data.
    ///
    /// Fails if the data does not form complete rows.
    pub fn from_raw(data: Vec<u32>, width: usize) -> Result<Self, Error> {
        if width == 0 || data.len() % width != 0 {
            return Err(Error::MalformedPixels {
                len: data.len(),
                width,
            });
        }

        let pixels = data.into_iter().map(Argb::from_u32).collect();
        Ok(Self { width, pixels })
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.pixels.len() / self.width
        }
    }

    /// The buffer's extent as a rectangle anchored at the origin.
    #[must_use]
    pub fn rect(&self) -> Rectangle<i32> {
        Rectangle::from_position_and_size(
            Vec2D::new(0, 0),
            self.width as i32,
            self.height() as i32,
        )
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        0 <= x && (x as usize) < self.width && 0 <= y && (y as usize) < self.height()
    }

    fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width);
        debug_assert!(y < self.height());

        y * self.width + x
    }

    /// Read the pixel at the given position.
    ///
    /// # Panics
    /// This function panics if the position is outside the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Argb {
        self.pixels[self.index_of(x, y)]
    }

    /// Set the pixel at the given position.
    ///
    /// # Panics
    /// This function panics if the position is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Argb) {
        let index = self.index_of(x, y);
        self.pixels[index] = pixel;
    }

    #[inline]
    #[must_use]
    pub fn get_or(&self, x: i32, y: i32, default: Argb) -> Argb {
        if self.contains(x, y) {
            self.get(x as usize, y as usize)
        } else {
            default
        }
    }

    /// Set the pixel at the given position, ignoring positions outside
    /// the buffer.
    #[inline]
    pub fn set_clipped(&mut self, x: i32, y: i32, pixel: Argb) {
        if self.contains(x, y) {
            self.set(x as usize, y as usize, pixel);
        }
    }

    pub fn fill(&mut self, color: Argb) {
        self.pixels.fill(color);
    }

    #[must_use]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Argb] {
        &mut self.pixels
    }

    /// Copy out a sub-rectangle.
    ///
    /// # Panics
    /// This function panics if `rect` is not fully inside the buffer.
    #[must_use]
    pub fn copy_rect(&self, rect: Rectangle<i32>) -> Self {
        let top_left = rect.top_left();
        let mut copy = Self::new(rect.width() as usize, rect.height() as usize);
        for row in 0..copy.height() {
            for column in 0..copy.width() {
                let pixel = self.get(
                    top_left.x as usize + column,
                    top_left.y as usize + row,
                );
                copy.set(column, row, pixel);
            }
        }
        copy
    }

    /// Copy `source` into the buffer with its top left corner at `at`,
    /// overwriting destination pixels unconditionally. Parts of `source`
    /// that fall outside the buffer are ignored.
    pub fn paste(&mut self, source: &Self, at: Vec2D<i32>) {
        self.transfer(source, at, |_, incoming| incoming);
    }

    /// Like [`Self::paste`], except fully transparent source pixels leave
    /// the destination untouched.
    ///
    /// Returns the destination rectangle that was written to, if any of
    /// `source` landed inside the buffer.
    pub fn blit_opaque(&mut self, source: &Self, at: Vec2D<i32>) -> Option<Rectangle<i32>> {
        let touched = Rectangle::from_position_and_size(
            at,
            source.width() as i32,
            source.height() as i32,
        )
        .intersection(&self.rect())?;

        self.transfer(source, at, |current, incoming| {
            if incoming.is_transparent() {
                current
            } else {
                incoming
            }
        });

        Some(touched)
    }

    fn transfer<F>(&mut self, source: &Self, at: Vec2D<i32>, combine: F)
    where
        F: Fn(Argb, Argb) -> Argb,
    {
        for row in 0..source.height() {
            let y = at.y + row as i32;
            for column in 0..source.width() {
                let x = at.x + column as i32;
                if !self.contains(x, y) {
                    continue;
                }

                let current = self.get(x as usize, y as usize);
                let incoming = source.get(column, row);
                self.set(x as usize, y as usize, combine(current, incoming));
            }
        }
    }
}
