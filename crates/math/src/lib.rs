//! Common utilities shared by the raster and canvas libraries

mod angle;
mod rect;
mod vec2d;

pub use angle::Angle;
pub use rect::Rectangle;
pub use vec2d::Vec2D;
