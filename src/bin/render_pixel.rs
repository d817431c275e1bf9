use tessera::core::camera::Camera;
use tessera::core::integrator::Integrator;
use tessera::core::rng::SampleRng;
use tessera::integrators::recursive::{IntegratorConfig, RecursiveIntegrator};
use tessera::math::constants::{Float, Vector3f};
use tessera::scenes::load_builtin;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <scene> <x> <y> [--width N] [--height N] [--spp N] [--max-depth N] [--seed N] [--preview]", args[0]);
        std::process::exit(1);
    }

    let scene_name = &args[1];
    let x: usize = args[2].parse().unwrap_or(0);
    let y: usize = args[3].parse().unwrap_or(0);

    let mut width: usize = 256;
    let mut height: usize = 256;
    let mut spp: u32 = 64;
    let mut config = IntegratorConfig::default();
    let mut seed: u64 = 0;
    let mut preview = false;

    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(width);
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(height);
            }
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(spp);
            }
            "--max-depth" => {
                i += 1;
                config.max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(config.max_depth);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(seed);
            }
            "--preview" => preview = true,
            _ => {}
        }
        i += 1;
    }

    if x >= width || y >= height || spp == 0 {
        eprintln!("Pixel ({}, {}) out of bounds for size {}x{} or zero spp", x, y, width, height);
        std::process::exit(2);
    }

    let (scene, camera) = match load_builtin(scene_name, width as Float / height as Float) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load scene: {}", e);
            std::process::exit(1);
        }
    };
    let integrator = RecursiveIntegrator::new(config, preview);
    let (u_samples, v_samples) = integrator.first_bounce_samples();
    let mut rng = SampleRng::new(seed);

    let mut accum = Vector3f::zeros();
    for _ in 0..spp {
        let px = (x as Float + rng.next_f32()) / width as Float;
        let py = (y as Float + rng.next_f32()) / height as Float;
        let ray = camera.ray(2.0 * px - 1.0, 2.0 * py - 1.0, &mut rng);
        accum += integrator.radiance(&scene, &ray, 0, u_samples, v_samples, &mut rng);
    }

    let avg = accum / spp as Float;
    println!(
        "pixel ({}, {}) spp={} depth={} -> R {:.6}, G {:.6}, B {:.6}",
        x, y, spp, config.max_depth, avg.x, avg.y, avg.z
    );
}
