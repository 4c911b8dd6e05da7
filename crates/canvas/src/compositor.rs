//! The canvas compositor.
//!
//! Owns the shared raster of everything drawn so far, the set of
//! sprites floating above it, and the cycle that presents both through
//! a [`CanvasHost`]. A cycle walks four phases in order: present the
//! raster, drain and apply queued operations, repaint the raster under
//! sprites that may have moved, then paint every visible sprite. The
//! host's draws may complete asynchronously, in which case the cycle
//! pauses where it is and the next call resumes the same phase.

use std::fmt;
use std::sync::Arc;

use math::{Rectangle, Vec2D};
use raster::{Argb, PixelBuffer};
use sprite::Sprite;

use crate::{GraphicsOp, OpQueue};

/// Width of the shared raster, enough for a 2000 pixel wide canvas
/// with a center column.
pub const RASTER_WIDTH: usize = 2001;

/// Height of the shared raster.
pub const RASTER_HEIGHT: usize = 1201;

/// Number of sprite slots a canvas has.
pub const MAX_SPRITES: usize = 64;

/// How the host's draw of a buffer turned out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The pixels are on screen
    Complete,
    /// The host will finish the draw asynchronously, retry it next
    /// cycle
    Pending,
    /// The draw will never finish, drop it
    Failed,
}

/// The presentation surface a canvas composites onto.
pub trait CanvasHost {
    /// Present `pixels` with its top left corner at `at`, limited to
    /// the cells inside `clip`. Both are in raster coordinates.
    fn draw_buffer(
        &mut self,
        pixels: &PixelBuffer,
        at: Vec2D<i32>,
        clip: Rectangle<i32>,
    ) -> DrawOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// All sprite slots are taken
    SpriteSlotsExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpriteSlotsExhausted => {
                write!(f, "all {MAX_SPRITES} sprite slots are in use")
            },
        }
    }
}

impl std::error::Error for Error {}

/// Identifies a sprite within its canvas.
pub type SpriteId = usize;

#[derive(Clone, Copy, Debug)]
enum Phase {
    Refresh,
    /// `redraw` holds a dirty rectangle whose presentation is still
    /// outstanding from a paused cycle
    ApplyOps { redraw: Option<Rectangle<i32>> },
    EraseSprites { next: usize },
    DrawSprites { next: usize },
}

/// What a single compositor cycle accomplished.
#[derive(Clone, Copy, Debug)]
pub struct CycleOutcome {
    /// Union of every raster rectangle presented this cycle
    pub dirty: Option<Rectangle<i32>>,
    /// The cycle paused on an asynchronous host draw and should be
    /// rerun once the host is ready
    pub paused: bool,
}

pub struct Canvas {
    width: usize,
    height: usize,
    background: Argb,
    /// Allocated on the first compositor cycle
    raster: Option<PixelBuffer>,
    queue: Arc<OpQueue>,
    sprites: Vec<Option<Sprite>>,
    /// Raster rectangles the sprites were last presented at, kept to
    /// repaint the raster beneath them when they move
    footprints: Vec<Option<Rectangle<i32>>>,
    phase: Phase,
    cycle_dirty: Option<Rectangle<i32>>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(RASTER_WIDTH, RASTER_HEIGHT)
    }

    /// A canvas over a raster of the given dimensions, filled with the
    /// default white background.
    #[must_use]
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: Argb::WHITE,
            raster: None,
            queue: Arc::new(OpQueue::new()),
            sprites: (0..MAX_SPRITES).map(|_| None).collect(),
            footprints: vec![None; MAX_SPRITES],
            phase: Phase::Refresh,
            cycle_dirty: None,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn background(&self) -> Argb {
        self.background
    }

    /// The queue producers enqueue operations into. The handle can be
    /// shared across threads.
    #[must_use]
    pub fn queue(&self) -> Arc<OpQueue> {
        Arc::clone(&self.queue)
    }

    pub fn enqueue(&self, op: GraphicsOp) {
        self.queue.enqueue(op);
    }

    /// Put a sprite into the lowest free slot.
    pub fn add_sprite(&mut self, sprite: Sprite) -> Result<SpriteId, Error> {
        let slot = self
            .sprites
            .iter()
            .position(Option::is_none)
            .ok_or(Error::SpriteSlotsExhausted)?;

        self.sprites[slot] = Some(sprite);
        Ok(slot)
    }

    /// Take a sprite off the canvas. Its last footprint stays recorded
    /// so the next cycle repaints the raster beneath it.
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        self.sprites.get_mut(id)?.take()
    }

    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id)?.as_ref()
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id)?.as_mut()
    }

    /// Throw away all drawing: pending operations are dropped and the
    /// raster reset to the background color.
    pub fn clean(&mut self) {
        self.queue.clear();
        if let Some(raster) = &mut self.raster {
            raster.fill(self.background);
        }
        self.footprints.fill(None);
        self.phase = Phase::Refresh;
        self.cycle_dirty = Some(self.full_rect());
    }

    /// Change the background color, which also cleans the canvas.
    pub fn set_background(&mut self, color: Argb) {
        self.background = color;
        self.clean();
    }

    /// Drain the operation queue and apply everything to the raster,
    /// without presenting anything. Returns the rectangle of changed
    /// cells.
    ///
    /// The compositor calls this as part of a cycle, but it is also
    /// useful on its own when no host is attached.
    pub fn drain_and_apply(&mut self) -> Option<Rectangle<i32>> {
        let ops = self.queue.drain();
        if ops.is_empty() {
            return None;
        }
        log::debug!("applying {} graphics op(s)", ops.len());

        let background = self.background;
        let raster = self
            .raster
            .get_or_insert_with(|| PixelBuffer::filled(self.width, self.height, background));

        let mut dirty: Option<Rectangle<i32>> = None;
        for op in &ops {
            if let Some(changed) = op.apply(raster) {
                match &mut dirty {
                    Some(bounds) => bounds.grow_to_contain(changed),
                    None => dirty = Some(changed),
                }
            }
        }
        // readback waiters must not observe a raster missing drained ops
        self.queue.mark_applied();
        dirty
    }

    /// Run one compositor cycle against the host.
    ///
    /// If a host draw reports [`DrawOutcome::Pending`] the cycle pauses
    /// and the next call picks up at the same phase without re-draining
    /// the queue. A [`DrawOutcome::Failed`] drops that rectangle for
    /// this cycle; the affected area heals on a later cycle's refresh.
    pub fn run_cycle(&mut self, host: &mut dyn CanvasHost) -> CycleOutcome {
        loop {
            match self.phase {
                Phase::Refresh => {
                    let full = self.full_rect();
                    let background = self.background;
                    let raster = self.raster.get_or_insert_with(|| {
                        PixelBuffer::filled(self.width, self.height, background)
                    });

                    match host.draw_buffer(raster, Vec2D::new(0, 0), full) {
                        DrawOutcome::Pending => return self.pause(),
                        DrawOutcome::Failed => {
                            log::warn!("host failed to present the raster, retrying next cycle");
                        },
                        DrawOutcome::Complete => self.note_dirty(full),
                    }
                    self.phase = Phase::ApplyOps { redraw: None };
                },
                Phase::ApplyOps { redraw } => {
                    let changed = match redraw {
                        Some(rect) => Some(rect),
                        None => self.drain_and_apply(),
                    };

                    if let Some(rect) = changed {
                        self.note_dirty(rect);
                        let raster = self.raster.as_ref().expect("raster exists after applying");
                        match host.draw_buffer(raster, Vec2D::new(0, 0), rect) {
                            DrawOutcome::Pending => {
                                self.phase = Phase::ApplyOps { redraw: Some(rect) };
                                return self.pause();
                            },
                            DrawOutcome::Failed => {
                                log::warn!("host dropped a dirty rectangle of applied operations");
                            },
                            DrawOutcome::Complete => {},
                        }
                    }
                    self.phase = Phase::EraseSprites { next: 0 };
                },
                Phase::EraseSprites { next } => {
                    for index in next..MAX_SPRITES {
                        let Some(footprint) = self.footprints[index] else {
                            continue;
                        };
                        let Some(visible) = footprint.intersection(&self.full_rect()) else {
                            self.footprints[index] = None;
                            continue;
                        };

                        let raster = self.raster.as_ref().expect("raster exists after refresh");
                        match host.draw_buffer(raster, Vec2D::new(0, 0), visible) {
                            DrawOutcome::Pending => {
                                self.phase = Phase::EraseSprites { next: index };
                                return self.pause();
                            },
                            DrawOutcome::Failed => {
                                log::warn!("host failed to erase sprite {index}");
                                self.footprints[index] = None;
                            },
                            DrawOutcome::Complete => {
                                self.footprints[index] = None;
                                self.note_dirty(visible);
                            },
                        }
                    }
                    self.phase = Phase::DrawSprites { next: 0 };
                },
                Phase::DrawSprites { next } => {
                    for index in next..MAX_SPRITES {
                        let Some(sprite) = &self.sprites[index] else {
                            continue;
                        };
                        if !sprite.is_visible() {
                            continue;
                        }

                        let footprint = sprite.footprint(self.width, self.height);
                        let Some(visible) = footprint.intersection(&self.full_rect()) else {
                            continue;
                        };

                        match host.draw_buffer(sprite.image().view(), footprint.top_left(), visible)
                        {
                            DrawOutcome::Pending => {
                                self.phase = Phase::DrawSprites { next: index };
                                return self.pause();
                            },
                            DrawOutcome::Failed => {
                                log::warn!("host failed to present sprite {index}");
                            },
                            DrawOutcome::Complete => {
                                self.footprints[index] = Some(footprint);
                                self.note_dirty(visible);
                            },
                        }
                    }

                    self.phase = Phase::Refresh;
                    return CycleOutcome {
                        dirty: self.cycle_dirty.take(),
                        paused: false,
                    };
                },
            }
        }
    }

    /// Copy a rectangle of the finished drawing, `width` x `height`
    /// cells starting at the turtle space point `top_left`.
    ///
    /// Blocks until the operation queue has been drained so the copy
    /// reflects everything enqueued before the call. Cells the drawing
    /// never touched read as the background color and every returned
    /// pixel is fully opaque.
    #[must_use]
    pub fn read_pixels(&self, top_left: Vec2D<f32>, width: usize, height: usize) -> PixelBuffer {
        self.queue.wait_until_empty();

        let origin = top_left.to_raster(self.width, self.height);
        let mut copy = PixelBuffer::new(width, height);
        for row in 0..height {
            for column in 0..width {
                let pixel = match &self.raster {
                    Some(raster) => raster.get_or(
                        origin.x + column as i32,
                        origin.y + row as i32,
                        self.background,
                    ),
                    None => self.background,
                };
                copy.set(column, row, Argb::opaque(pixel.rgb()));
            }
        }
        copy
    }

    fn full_rect(&self) -> Rectangle<i32> {
        Rectangle::from_position_and_size(
            Vec2D::new(0, 0),
            self.width as i32,
            self.height as i32,
        )
    }

    fn note_dirty(&mut self, rect: Rectangle<i32>) {
        match &mut self.cycle_dirty {
            Some(bounds) => bounds.grow_to_contain(rect),
            None => self.cycle_dirty = Some(rect),
        }
    }

    fn pause(&mut self) -> CycleOutcome {
        CycleOutcome {
            dirty: None,
            paused: true,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
