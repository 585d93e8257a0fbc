//! Performance benchmark for stepping strategies and frame building

use std::time::Instant;

use macroquad::math::{Mat4, Vec3};
use rand::{SeedableRng, rngs::StdRng};
use voxel_automata::domain::{Algorithm, RuleSet, seed, step};
use voxel_automata::{Session, SessionConfig};

fn benchmark_step(size: usize, algorithm: Algorithm, iterations: u32) -> f64 {
    let rules = RuleSet::conway();
    let mut rng = StdRng::seed_from_u64(7);
    let mut grid = seed::soup(size, 0.3, &mut rng);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = step(&grid, &rules, algorithm);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_frame(size: usize, generations: usize, iterations: u32) -> (f64, usize) {
    let config = SessionConfig::default()
        .with_grid_size(size)
        .with_max_generations(generations)
        .with_seed(7);
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("skipping {size}x{generations}: {err}");
            return (0.0, 0);
        }
    };
    while session.tick() {}

    let eye = Vec3::new(size as f32 * 0.7, generations as f32 * 0.5, size as f32 * 0.7);
    let view = Mat4::look_at_rh(eye, Vec3::new(0.0, generations as f32 * 0.5, 0.0), Vec3::Y);
    let projection = Mat4::perspective_rh_gl(75f32.to_radians(), 1.5, 0.1, 1000.0);
    let view_projection = projection * view;

    let mut instances = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        instances = session.build_frame(&view_projection).len();
    }
    (start.elapsed().as_secs_f64() * 1000.0 / iterations as f64, instances)
}

fn main() {
    println!("=== Voxel Automata Performance Benchmark ===\n");

    let sizes = [21, 41, 65, 101, 257, 513, 1025];
    let iterations = 50;

    println!("{:>10} {:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Auto", "Speedup");
    println!("{:-<62}", "");

    for size in sizes {
        let serial_ms = benchmark_step(size, Algorithm::Serial, iterations);
        let parallel_ms = benchmark_step(size, Algorithm::Parallel, iterations);
        let auto_ms = benchmark_step(size, Algorithm::Auto, iterations);

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            auto_ms,
            serial_ms / parallel_ms.max(f64::EPSILON)
        );
    }

    println!("\n=== Frame Building (full history) ===\n");
    println!("{:>14} {:>12} {:>12}", "Size x Layers", "ms/frame", "Instances");
    println!("{:-<40}", "");

    for (size, generations) in [(21, 16), (65, 32), (101, 64), (101, 128)] {
        let (frame_ms, instances) = benchmark_frame(size, generations, iterations);
        println!(
            "{:>14} {:>12.3} {:>12}",
            format!("{}x{}", size, generations),
            frame_ms,
            instances
        );
    }

    let cells = 1025 * 1025;
    let parallel_ms = benchmark_step(1025, Algorithm::Parallel, iterations);
    println!(
        "\nParallel at 1025x1025: {:.3} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        cells as f64 / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
