//! Retained drawing surface shared between producer threads and a
//! presentation host.
//!
//! Producers enqueue [`GraphicsOp`]s into an [`OpQueue`]; the
//! [`Canvas`] compositor drains them onto a pixel raster and presents
//! raster and sprites through a [`CanvasHost`].

mod compositor;
mod flood;
mod op;
mod queue;

pub use compositor::{
    Canvas, CanvasHost, CycleOutcome, DrawOutcome, Error, SpriteId, MAX_SPRITES, RASTER_HEIGHT,
    RASTER_WIDTH,
};
pub use op::{GraphicsOp, LineOp, LINE_SNAP_TOLERANCE};
pub use queue::OpQueue;
