//! Sprite images: the shapes a turtle can take and the pixel arrays
//! that render them at arbitrary headings.

mod image;
mod shape;

pub use image::{Sprite, SpriteImage, MAX_SPRITE_HEIGHT, MAX_SPRITE_WIDTH};
pub use shape::Shape;
