use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use math::Vec2D;
use raster::{rasterizer, Argb, PixelBuffer};

fn criterion_benchmark(c: &mut Criterion) {
    let side = 512_usize;

    c.bench_with_input(
        BenchmarkId::new("line fan", side),
        &side,
        |b, &side| {
            let mut target = PixelBuffer::new(side, side);
            let center = Vec2D::new(side as i32 / 2, side as i32 / 2);
            let edge = side as i32 - 1;

            b.iter(|| {
                // one line into every edge cell, covering all slopes
                for x in 0..side as i32 {
                    let _ = rasterizer::draw_line(
                        &mut target,
                        center,
                        Vec2D::new(x, 0),
                        Argb::BLACK,
                    );
                    let _ = rasterizer::draw_line(
                        &mut target,
                        center,
                        Vec2D::new(x, edge),
                        Argb::BLACK,
                    );
                }
                for y in 0..side as i32 {
                    let _ = rasterizer::draw_line(
                        &mut target,
                        center,
                        Vec2D::new(0, y),
                        Argb::BLACK,
                    );
                    let _ = rasterizer::draw_line(
                        &mut target,
                        center,
                        Vec2D::new(edge, y),
                        Argb::BLACK,
                    );
                }
            });
        },
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
