//! A tiny built-in 5x7 bitmap font for labeling drawings.
//!
//! Each glyph is seven rows of five columns, stored as one byte per row
//! with bit 4 being the leftmost column. Lowercase letters reuse the
//! uppercase glyphs and characters without a glyph advance the cursor
//! without painting anything.

use math::{Rectangle, Vec2D};

use crate::{Argb, PixelBuffer};

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

/// Horizontal distance between the origins of neighboring glyphs.
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT];

#[rustfmt::skip]
fn glyph(character: char) -> Option<&'static Glyph> {
    let glyph: &Glyph = match character.to_ascii_uppercase() {
        ' ' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '0' => &[0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => &[0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => &[0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => &[0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => &[0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => &[0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => &[0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => &[0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => &[0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => &[0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => &[0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => &[0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => &[0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => &[0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => &[0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => &[0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => &[0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => &[0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => &[0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => &[0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => &[0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => &[0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => &[0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => &[0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => &[0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => &[0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => &[0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => &[0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => &[0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => &[0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => &[0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => &[0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => &[0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => &[0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '.' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => &[0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => &[0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => &[0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '!' => &[0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => &[0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '-' => &[0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => &[0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => &[0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '*' => &[0x00, 0x0A, 0x04, 0x1F, 0x04, 0x0A, 0x00],
        '/' => &[0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '(' => &[0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => &[0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '\'' => &[0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => &[0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '_' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '<' => &[0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => &[0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        _ => return None,
    };
    Some(glyph)
}

/// The size of the rectangle `draw_text` would paint into.
#[must_use]
pub fn text_extent(text: &str) -> (usize, usize) {
    let characters = text.chars().count();
    if characters == 0 {
        return (0, 0);
    }

    (characters * GLYPH_ADVANCE - 1, GLYPH_HEIGHT)
}

/// Paint `text` with its top left corner at `origin`, skipping pixels
/// outside the buffer.
///
/// Returns the part of the text's extent that overlaps the buffer, or
/// `None` if nothing of it is visible.
pub fn draw_text(
    target: &mut PixelBuffer,
    origin: Vec2D<i32>,
    text: &str,
    color: Argb,
) -> Option<Rectangle<i32>> {
    let (width, height) = text_extent(text);
    if width == 0 {
        return None;
    }

    let visible = Rectangle::from_position_and_size(origin, width as i32, height as i32)
        .intersection(&target.rect())?;

    let mut cursor_x = origin.x;
    for character in text.chars() {
        if let Some(rows) = glyph(character) {
            for (row_index, row) in rows.iter().enumerate() {
                for column in 0..GLYPH_WIDTH {
                    if row & (0x10 >> column) != 0 {
                        target.set_clipped(
                            cursor_x + column as i32,
                            origin.y + row_index as i32,
                            color,
                        );
                    }
                }
            }
        }
        cursor_x += GLYPH_ADVANCE as i32;
    }

    Some(visible)
}
