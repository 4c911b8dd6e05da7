//! Pixel buffers and the drawing primitives that operate on them.

mod buffer;
mod color;
pub mod font;
pub mod rasterizer;
pub mod region;
pub mod rotate;

pub use buffer::{Error as BufferError, PixelBuffer};
pub use color::{Argb, PEN_COLORS};
