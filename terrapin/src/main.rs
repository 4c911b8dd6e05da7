//! Renders a demo turtle drawing to a PPM image.
//!
//! A producer thread enqueues graphics operations while the main
//! thread runs compositor cycles against an in-memory host, then the
//! composed screen is written out as a binary PPM.

use std::f32::consts::FRAC_PI_2;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use canvas::{Canvas, CanvasHost, DrawOutcome, GraphicsOp, LineOp, OpQueue};
use clap::Parser;
use math::{Angle, Rectangle, Vec2D};
use raster::{Argb, PixelBuffer, PEN_COLORS};
use sprite::{Shape, Sprite, SpriteImage};

#[derive(Parser)]
#[command(version, about = "Render a demo turtle drawing to a PPM image")]
struct Arguments {
    /// Path of the image to write
    #[arg(short, long, default_value = "terrapin.ppm")]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,
}

/// Composes presented buffers onto an offscreen screen buffer.
struct BufferHost {
    screen: PixelBuffer,
}

impl CanvasHost for BufferHost {
    fn draw_buffer(
        &mut self,
        pixels: &PixelBuffer,
        at: Vec2D<i32>,
        clip: Rectangle<i32>,
    ) -> DrawOutcome {
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

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arguments = Arguments::parse();

    let mut canvas = Canvas::with_size(arguments.width, arguments.height);
    let mut host = BufferHost {
        screen: PixelBuffer::filled(arguments.width, arguments.height, canvas.background()),
    };

    let image = match SpriteImage::from_shape(
        Shape::Turtle,
        25,
        30,
        Argb::opaque(0x00FF00),
        Angle::from_radians(FRAC_PI_2),
    ) {
        Ok(image) => image,
        Err(error) => {
            log::error!("failed to paint the turtle sprite: {error}");
            return ExitCode::FAILURE;
        },
    };
    let turtle = match canvas.add_sprite(Sprite::new(image)) {
        Ok(id) => id,
        Err(error) => {
            log::error!("failed to place the turtle sprite: {error}");
            return ExitCode::FAILURE;
        },
    };

    let queue = canvas.queue();
    let producer = thread::spawn(move || produce_drawing(&queue));

    let destination = loop {
        canvas.run_cycle(&mut host);
        if producer.is_finished() && canvas.queue().is_empty() {
            break producer.join();
        }
        thread::sleep(Duration::from_millis(2));
    };

    match destination {
        Ok(position) => {
            if let Some(sprite) = canvas.sprite_mut(turtle) {
                sprite.set_position(position);
            }
        },
        Err(_) => {
            log::error!("the producer thread panicked");
            return ExitCode::FAILURE;
        },
    }
    canvas.run_cycle(&mut host);

    if let Err(error) = write_ppm(&host.screen, &arguments.output) {
        log::error!("failed to write {}: {error}", arguments.output.display());
        return ExitCode::FAILURE;
    }
    log::info!("wrote {}", arguments.output.display());
    ExitCode::SUCCESS
}

/// Draws a square spiral, a filled box and a caption. Returns the pen's
/// final position.
fn produce_drawing(queue: &Arc<OpQueue>) -> Vec2D<f32> {
    let mut position = Vec2D::new(0.0, 0.0);
    let mut direction = 0;
    for step in 1..60_u32 {
        let heading = Angle::from_radians(direction as f32 * FRAC_PI_2);
        let length = 4.0 * step as f32;
        let end = position.offset_along(heading, length);
        queue.enqueue(GraphicsOp::Line(LineOp::new(
            position,
            end,
            heading,
            PEN_COLORS[step as usize % PEN_COLORS.len()],
            1 + step / 20,
        )));
        position = end;
        direction = (direction + 1) % 4;
    }

    // an outlined box in the lower left, filled from its center
    let corners: [Vec2D<f32>; 4] = [
        Vec2D::new(-260.0, -260.0),
        Vec2D::new(-180.0, -260.0),
        Vec2D::new(-180.0, -180.0),
        Vec2D::new(-260.0, -180.0),
    ];
    for (index, &corner) in corners.iter().enumerate() {
        let next = corners[(index + 1) % corners.len()];
        let heading = Angle::from_radians((next.y - corner.y).atan2(next.x - corner.x));
        queue.enqueue(GraphicsOp::Line(LineOp::new(
            corner,
            next,
            heading,
            Argb::BLACK,
            1,
        )));
    }
    queue.enqueue(GraphicsOp::Fill {
        origin: Vec2D::new(-220.0, -220.0),
        color: Argb::opaque(0xFFD700),
    });

    queue.enqueue(GraphicsOp::Label {
        origin: Vec2D::new(-24.0, -282.0),
        text: "TERRAPIN".to_string(),
        color: Argb::BLACK,
    });

    // wait for the compositor to catch up before handing the turtle
    // its final position
    queue.wait_until_empty();
    position
}

fn write_ppm(screen: &PixelBuffer, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "P6\n{} {}\n255\n", screen.width(), screen.height())?;
    for pixel in screen.pixels() {
        let rgb = pixel.rgb();
        writer.write_all(&[(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])?;
    }
    writer.flush()
}
