//! Full compositor cycles against an in-memory presentation host.

use canvas::{Canvas, CanvasHost, DrawOutcome, GraphicsOp, LineOp};
use math::{Angle, Rectangle, Vec2D};
use raster::{Argb, PixelBuffer};
use sprite::{Shape, Sprite, SpriteImage};

/// Composes every presented buffer onto a screen, skipping transparent
/// source pixels the way a windowing system composes a sprite overlay.
struct TestHost {
    screen: PixelBuffer,
    /// Outcomes to report for upcoming draws, oldest first. Draws
    /// beyond the script complete normally.
    script: Vec<DrawOutcome>,
}

impl TestHost {
    fn new(width: usize, height: usize) -> Self {
        Self {
            screen: PixelBuffer::new(width, height),
            script: Vec::new(),
        }
    }
}

impl CanvasHost for TestHost {
    fn draw_buffer(
        &mut self,
        pixels: &PixelBuffer,
        at: Vec2D<i32>,
        clip: Rectangle<i32>,
    ) -> DrawOutcome {
        if !self.script.is_empty() {
            let outcome = self.script.remove(0);
            if outcome != DrawOutcome::Complete {
                return outcome;
            }
        }

        for y in clip.top_left().y..clip.bottom_right().y {
            for x in clip.top_left().x..clip.bottom_right().x {
                let source = pixels.get_or(x - at.x, y - at.y, Argb::TRANSPARENT);
                if !source.is_transparent() {
                    self.screen.set_clipped(x, y, source);
                }
            }
        }
        DrawOutcome::Complete
    }
}

#[test]
fn queued_lines_reach_the_host_screen() {
    let mut canvas = Canvas::with_size(101, 101);
    let mut host = TestHost::new(101, 101);

    canvas.enqueue(GraphicsOp::Line(LineOp::new(
        Vec2D::new(0.0, 0.0),
        Vec2D::new(10.0, 0.0),
        Angle::from_radians(0.0),
        Argb::BLACK,
        1,
    )));

    let outcome = canvas.run_cycle(&mut host);
    assert!(!outcome.paused);
    assert!(outcome.dirty.is_some());
    assert!(canvas.queue().is_empty());

    // turtle (0, 0)..(10, 0) lands on raster row 50, columns 50..=60
    assert_eq!(host.screen.get(50, 50), Argb::BLACK);
    assert_eq!(host.screen.get(60, 50), Argb::BLACK);
    assert_eq!(host.screen.get(61, 50), Argb::WHITE);
    assert_eq!(host.screen.get(55, 51), Argb::WHITE);
}

#[test]
fn moving_a_sprite_restores_the_raster_beneath_it() {
    let red = Argb::opaque(0xFF0000);
    let mut canvas = Canvas::with_size(101, 101);
    let mut host = TestHost::new(101, 101);

    let image = SpriteImage::from_shape(Shape::Box, 10, 10, red, Angle::from_radians(0.0))
        .expect("box fits its image");
    let id = canvas.add_sprite(Sprite::new(image)).expect("slot free");

    canvas.run_cycle(&mut host);
    // footprint top left is (42, 42), the box outline starts 3 cells in
    assert_eq!(host.screen.get(45, 45), Argb::BLACK);
    assert_eq!(host.screen.get(50, 50), red);

    canvas
        .sprite_mut(id)
        .expect("sprite exists")
        .set_position(Vec2D::new(20.0, 0.0));
    canvas.run_cycle(&mut host);

    assert_eq!(host.screen.get(50, 50), Argb::WHITE);
    assert_eq!(host.screen.get(45, 45), Argb::WHITE);
    assert_eq!(host.screen.get(65, 45), Argb::BLACK);
    assert_eq!(host.screen.get(70, 50), red);
}

#[test]
fn a_pending_host_pauses_the_cycle_until_it_is_ready() {
    let mut canvas = Canvas::with_size(51, 51);
    let mut host = TestHost::new(51, 51);
    host.script = vec![DrawOutcome::Pending];

    let outcome = canvas.run_cycle(&mut host);
    assert!(outcome.paused);
    assert!(outcome.dirty.is_none());

    let outcome = canvas.run_cycle(&mut host);
    assert!(!outcome.paused);
    assert_eq!(host.screen.get(25, 25), Argb::WHITE);
}

#[test]
fn applied_operations_survive_a_pause_before_their_presentation() {
    let mut canvas = Canvas::with_size(51, 51);
    let mut host = TestHost::new(51, 51);
    // the refresh completes, the dirty rectangle draw does not
    host.script = vec![DrawOutcome::Complete, DrawOutcome::Pending];

    canvas.enqueue(GraphicsOp::Line(LineOp::new(
        Vec2D::new(-5.0, 0.0),
        Vec2D::new(5.0, 0.0),
        Angle::from_radians(0.0),
        Argb::BLACK,
        1,
    )));

    let outcome = canvas.run_cycle(&mut host);
    assert!(outcome.paused);
    assert_eq!(host.screen.get(25, 25), Argb::WHITE);

    // the queue was already drained, resuming must not lose the line
    let outcome = canvas.run_cycle(&mut host);
    assert!(!outcome.paused);
    assert_eq!(host.screen.get(20, 25), Argb::BLACK);
    assert_eq!(host.screen.get(30, 25), Argb::BLACK);
}

#[test]
fn fill_covers_the_blank_raster_and_reads_back_opaque() {
    let red = Argb::opaque(0xFF0000);
    let mut canvas = Canvas::with_size(50, 50);

    canvas.enqueue(GraphicsOp::Fill {
        origin: Vec2D::new(0.0, 0.0),
        color: red,
    });
    let dirty = canvas.drain_and_apply().expect("the fill changed pixels");
    assert_eq!(dirty.width(), 50);
    assert_eq!(dirty.height(), 50);

    let copy = canvas.read_pixels(Vec2D::new(-25.0, 25.0), 10, 10);
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(copy.get(x, y), red);
        }
    }
}

#[test]
fn reading_an_untouched_canvas_yields_the_background() {
    let canvas = Canvas::with_size(50, 50);

    let copy = canvas.read_pixels(Vec2D::new(-5.0, 5.0), 4, 4);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(copy.get(x, y), Argb::WHITE);
        }
    }
}

#[test]
fn reads_past_the_raster_edge_yield_the_background() {
    let blue = Argb::opaque(0x0000FF);
    let mut canvas = Canvas::with_size(20, 20);
    canvas.set_background(blue);

    // two cells in, two cells off the right edge
    let copy = canvas.read_pixels(Vec2D::new(8.0, 9.0), 4, 1);
    for x in 0..4 {
        assert_eq!(copy.get(x, 0), blue);
    }
}

#[test]
fn changing_the_background_discards_queued_work() {
    let blue = Argb::opaque(0x0000FF);
    let mut canvas = Canvas::with_size(51, 51);
    let mut host = TestHost::new(51, 51);

    canvas.enqueue(GraphicsOp::Line(LineOp::new(
        Vec2D::new(-5.0, 0.0),
        Vec2D::new(5.0, 0.0),
        Angle::from_radians(0.0),
        Argb::BLACK,
        1,
    )));
    canvas.set_background(blue);
    assert!(canvas.queue().is_empty());

    canvas.run_cycle(&mut host);
    assert_eq!(host.screen.get(25, 25), blue);
    assert_eq!(host.screen.get(0, 0), blue);
}

#[test]
fn sprite_slots_are_finite() {
    let mut canvas = Canvas::with_size(51, 51);
    let image = SpriteImage::from_shape(
        Shape::Ball,
        6,
        6,
        Argb::BLACK,
        Angle::from_radians(0.0),
    )
    .expect("ball fits its image");

    for _ in 0..canvas::MAX_SPRITES {
        canvas
            .add_sprite(Sprite::new(image.clone()))
            .expect("slot free");
    }
    assert_eq!(
        canvas.add_sprite(Sprite::new(image)),
        Err(canvas::Error::SpriteSlotsExhausted)
    );
}
