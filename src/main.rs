// Copyright 2020 TwoCookingMice

use tessera::integrators::recursive::IntegratorConfig;
use tessera::io::write_image;
use tessera::math::bitmap::Bitmap;
use tessera::math::constants::Float;
use tessera::renderers::tiled::{RenderParams, Renderer, TiledRenderer};
use tessera::scenes::{load_builtin, BUILTIN_SCENES};

use std::env;
use std::sync::Mutex;
use std::time::Duration;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <output.png|output.exr> [--scene NAME] [--width N] [--height N] [--spp N] \
               [--cpus N] [--max-depth N] [--first-bounce N] [--progress-secs S] [--preview]", program);
    eprintln!("Scenes: {}", BUILTIN_SCENES.join(", "));
    std::process::exit(1);
}

fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1].starts_with("--") {
        usage(&args[0]);
    }

    let output_path = args[1].clone();
    let mut scene_name = String::from("cornell");
    let mut params = RenderParams { show_progress: true, ..RenderParams::default() };
    let mut integrator_config = IntegratorConfig::default();
    let mut progress_secs: Float = 1.0;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" => {
                i += 1;
                scene_name = args.get(i).cloned().unwrap_or(scene_name);
            }
            "--width" => {
                i += 1;
                params.width = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(params.width);
            }
            "--height" => {
                i += 1;
                params.height = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(params.height);
            }
            "--spp" => {
                i += 1;
                params.samples_per_pixel = args.get(i).and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(params.samples_per_pixel);
            }
            "--cpus" => {
                i += 1;
                params.max_cpus = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(params.max_cpus);
            }
            "--max-depth" => {
                i += 1;
                integrator_config.max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(integrator_config.max_depth);
            }
            "--first-bounce" => {
                i += 1;
                if let Some(n) = args.get(i).and_then(|v| v.parse::<u32>().ok()) {
                    integrator_config.first_bounce_u_samples = n;
                    integrator_config.first_bounce_v_samples = n;
                }
            }
            "--progress-secs" => {
                i += 1;
                progress_secs = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(progress_secs);
            }
            "--preview" => params.preview = true,
            other => log::warn!("Ignoring unknown argument '{}'.", other),
        }
        i += 1;
    }

    let aspect = params.width.max(1) as Float / params.height.max(1) as Float;
    let (scene, camera) = match load_builtin(&scene_name, aspect) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Rewrite the output on every progress poll so a viewer can watch it refine.
    // A poll that lands while another worker is still writing is skipped.
    let writing = Mutex::new(());
    let publish = |image: &Bitmap| {
        if let Ok(_guard) = writing.try_lock() {
            if let Err(e) = write_image(image, &output_path) {
                log::warn!("Failed to write progress image: {}.", e);
            }
        }
    };

    let renderer = TiledRenderer::new(&scene, &camera, params)
        .with_integrator_config(integrator_config)
        .with_progress_interval(Duration::from_secs_f32(progress_secs.max(0.0)));
    let image = match renderer.render(&publish) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            std::process::exit(2);
        }
    };

    if image.is_empty() {
        log::warn!("Rendered image is {}x{}; nothing written to {}.", image.width(), image.height(), output_path);
        return;
    }
    if let Err(e) = write_image(&image, &output_path) {
        eprintln!("Failed to write {}: {}", output_path, e);
        std::process::exit(3);
    }
    log::info!("Image written to: {}.", output_path);
}
