// Copyright @yucwang 2026

use crate::core::camera::Camera;
use crate::core::integrator::Integrator;
use crate::core::rng::SampleRng;
use crate::core::scene::Scene;
use crate::integrators::recursive::{IntegratorConfig, RecursiveIntegrator};
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, UInt, Vector3f};
use crate::renderers::accumulation::AccumulationBuffer;
use crate::renderers::tiles::{generate_tiles, TileBatch, TileConfig};
use crate::renderers::work_queue::WorkQueue;
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::{Duration, Instant};

pub use super::renderer::{RenderError, RenderParams, Renderer};

pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Multi-threaded progressive renderer. The image is cut into tile batches
/// that a fixed pool of workers pulls from a shared queue, centre tiles
/// first, accumulating every batch into a shared buffer.
pub struct TiledRenderer<'a> {
    scene: &'a dyn Scene,
    camera: &'a dyn Camera,
    params: RenderParams,
    integrator: Box<dyn Integrator + 'a>,
    tile_config: TileConfig,
    progress_interval: Duration,
}

impl<'a> TiledRenderer<'a> {
    pub fn new(scene: &'a dyn Scene, camera: &'a dyn Camera, params: RenderParams) -> Self {
        Self {
            scene,
            camera,
            params,
            integrator: Box::new(RecursiveIntegrator::new(IntegratorConfig::default(), params.preview)),
            tile_config: TileConfig::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_integrator_config(mut self, config: IntegratorConfig) -> Self {
        self.integrator = Box::new(RecursiveIntegrator::new(config, self.params.preview));
        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator + 'a>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_tile_config(mut self, tile_config: TileConfig) -> Self {
        self.tile_config = tile_config;
        self
    }

    /// Minimum time between two progress callbacks.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.params.show_progress {
            return ProgressBar::hidden();
        }
        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tiles ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress
    }

    fn render_pixel(&self, rng: &mut SampleRng, x: usize, y: usize, samples: UInt) -> Vector3f {
        let (u_samples, v_samples) = self.integrator.first_bounce_samples();
        let width = self.params.width as Float;
        let height = self.params.height as Float;

        let mut colour = Vector3f::zeros();
        for _ in 0..samples {
            let px = (x as Float + rng.next_f32()) / width;
            let py = (y as Float + rng.next_f32()) / height;
            let ray = self.camera.ray(2.0 * px - 1.0, 2.0 * py - 1.0, rng);
            colour += self.integrator.radiance(self.scene, &ray, 0, u_samples, v_samples, rng);
        }
        colour
    }

    fn render_batch(&self, batch: &TileBatch, buffer: &AccumulationBuffer) {
        let mut rng = SampleRng::new(batch.seed as u64);
        for y in batch.y_begin..batch.y_end {
            for x in batch.x_begin..batch.x_end {
                let colour = self.render_pixel(&mut rng, x, y, batch.samples);
                buffer.add_samples(x, y, colour, batch.samples);
            }
        }
    }

    fn run_worker(&self,
                  queue: &WorkQueue<TileBatch>,
                  buffer: &AccumulationBuffer,
                  progress_bar: &ProgressBar,
                  progress: &(dyn Fn(&Bitmap) + Sync)) {
        let mut rendered = 0usize;
        while let Some(batch) = queue.pop(|| progress(&buffer.readout())) {
            self.render_batch(&batch, buffer);
            progress_bar.inc(1);
            rendered += 1;
        }
        log::debug!("Worker {:?} done after {} tile batches.", thread::current().id(), rendered);
    }
}

impl<'a> Renderer for TiledRenderer<'a> {
    fn render(&self, progress: &(dyn Fn(&Bitmap) + Sync)) -> Result<Bitmap, RenderError> {
        self.params.validate()?;
        let (u_samples, v_samples) = self.integrator.first_bounce_samples();
        if u_samples == 0 || v_samples == 0 {
            return Err(RenderError::EmptyFirstBounceGrid);
        }

        let RenderParams { width, height, samples_per_pixel, max_cpus, .. } = self.params;
        let batches = generate_tiles(width, height, &self.tile_config, samples_per_pixel)?;
        if batches.is_empty() {
            log::warn!("Nothing to render for a {}x{} image.", width, height);
            return Ok(Bitmap::new(width, height));
        }

        let total = batches.len();
        log::info!("Rendering {}x{} at {} spp: {} tile batches on {} threads, camera {}.",
                   width, height, samples_per_pixel, total, max_cpus, self.camera.describe());

        let buffer = AccumulationBuffer::new(width, height);
        let queue = WorkQueue::new(batches, self.progress_interval);
        let progress_bar = self.progress_bar(total);
        let start = Instant::now();

        let failed: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..max_cpus)
                .map(|_| {
                    let (queue, buffer, progress_bar) = (&queue, &buffer, &progress_bar);
                    scope.spawn(move || self.run_worker(queue, buffer, progress_bar, progress))
                })
                .collect();
            handles
                .into_iter()
                .enumerate()
                .filter_map(|(worker, handle)| handle.join().err().map(|_| worker))
                .collect()
        });
        progress_bar.finish_and_clear();

        if let Some(&worker) = failed.first() {
            log::error!("{} of {} render workers panicked; discarding the image.", failed.len(), max_cpus);
            return Err(RenderError::WorkerPanicked { worker });
        }

        log::info!("Render finished in {:.2?}.", start.elapsed());
        Ok(buffer.readout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::SurfaceIntersection;
    use crate::core::material::Material;
    use crate::core::scene::{Environment, SceneObject, ShapeScene};
    use crate::math::ray::Ray3f;
    use crate::sensors::perspective::PerspectiveCamera;
    use crate::shapes::rectangle::Rectangle;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn camera(aspect: Float) -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::zeros(),
                               Vector3f::new(0.0, 0.0, -1.0),
                               Vector3f::new(0.0, 1.0, 0.0),
                               std::f32::consts::FRAC_PI_2,
                               aspect)
    }

    fn params(width: usize, height: usize, spp: UInt, max_cpus: usize, preview: bool) -> RenderParams {
        RenderParams { width, height, samples_per_pixel: spp, max_cpus, preview, show_progress: false }
    }

    fn wall_scene(material: Material, sky: Vector3f) -> ShapeScene {
        let wall = Rectangle::new(Vector3f::new(-100.0, -100.0, -1.0),
                                  Vector3f::new(200.0, 0.0, 0.0),
                                  Vector3f::new(0.0, 200.0, 0.0));
        ShapeScene::new(Environment::Constant(sky))
            .with_object(SceneObject::new(Box::new(wall), material))
    }

    fn no_progress(_: &Bitmap) {}

    #[test]
    fn test_preview_full_screen_quad() {
        let white = Vector3f::new(1.0, 1.0, 1.0);
        let scene = wall_scene(Material::diffuse(white), Vector3f::zeros());
        let cam = camera(1.0);
        let image = TiledRenderer::new(&scene, &cam, params(2, 2, 1, 2, true))
            .render(&no_progress)
            .expect("render succeeds");
        assert_eq!((image.width(), image.height()), (2, 2));
        for pixel in image.pixels() {
            assert_eq!(*pixel, white);
        }
    }

    #[test]
    fn test_empty_scene_is_environment_colour() {
        let sky = Vector3f::new(0.25, 0.5, 0.75);
        let scene = ShapeScene::new(Environment::Constant(sky));
        let cam = camera(7.0 / 5.0);
        for (spp, preview) in [(1, false), (13, false), (20, true)] {
            let image = TiledRenderer::new(&scene, &cam, params(7, 5, spp, 3, preview))
                .with_tile_config(TileConfig { tile_width: 3, tile_height: 2, samples_per_batch: 4 })
                .render(&no_progress)
                .expect("render succeeds");
            for pixel in image.pixels() {
                assert!((pixel - sky).norm() < 1e-5, "{:?} != {:?}", pixel, sky);
            }
        }
    }

    #[test]
    fn test_zero_sized_image_spawns_nothing() {
        let scene = ShapeScene::new(Environment::default());
        let cam = camera(1.0);
        let calls = AtomicUsize::new(0);
        let progress = |_: &Bitmap| { calls.fetch_add(1, Ordering::Relaxed); };
        for (w, h) in [(0, 4), (4, 0), (0, 0)] {
            let image = TiledRenderer::new(&scene, &cam, params(w, h, 4, 2, false))
                .with_progress_interval(Duration::ZERO)
                .render(&progress)
                .expect("render succeeds");
            assert!(image.is_empty());
            assert_eq!((image.width(), image.height()), (w, h));
        }
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let scene = ShapeScene::new(Environment::default());
        let cam = camera(1.0);

        let no_workers = TiledRenderer::new(&scene, &cam, params(4, 4, 1, 0, false)).render(&no_progress);
        assert!(matches!(no_workers, Err(RenderError::NoWorkers)));

        let bad_tiles = TiledRenderer::new(&scene, &cam, params(4, 4, 1, 1, false))
            .with_tile_config(TileConfig { tile_width: 0, tile_height: 4, samples_per_batch: 1 })
            .render(&no_progress);
        assert!(matches!(bad_tiles, Err(RenderError::Tiles(_))));

        let no_samples = TiledRenderer::new(&scene, &cam, params(4, 4, 0, 1, false)).render(&no_progress);
        assert!(matches!(no_samples, Err(RenderError::Tiles(_))));

        let empty_grid = TiledRenderer::new(&scene, &cam, params(4, 4, 1, 1, false))
            .with_integrator_config(IntegratorConfig { first_bounce_u_samples: 0, ..IntegratorConfig::default() })
            .render(&no_progress);
        assert!(matches!(empty_grid, Err(RenderError::EmptyFirstBounceGrid)));
    }

    #[test]
    fn test_progress_sees_partial_images() {
        let sky = Vector3f::new(1.0, 0.5, 0.25);
        let scene = ShapeScene::new(Environment::Constant(sky));
        let cam = camera(1.0);
        let calls = AtomicUsize::new(0);
        let saw_samples = AtomicBool::new(false);
        let progress = |image: &Bitmap| {
            assert_eq!((image.width(), image.height()), (20, 20));
            for pixel in image.pixels() {
                // Untouched pixels are black, sampled ones already converged.
                let sampled = (pixel - sky).norm() < 1e-5;
                assert!(sampled || *pixel == Vector3f::zeros(), "unexpected progress pixel {:?}", pixel);
                if sampled {
                    saw_samples.store(true, Ordering::Relaxed);
                }
            }
            calls.fetch_add(1, Ordering::Relaxed);
        };
        TiledRenderer::new(&scene, &cam, params(20, 20, 16, 4, false))
            .with_progress_interval(Duration::ZERO)
            .render(&progress)
            .expect("render succeeds");
        // Two tiles per side, two batches per tile, plus one final pop per worker.
        assert_eq!(calls.load(Ordering::Relaxed), 8 + 4);
        // Each worker polls once more after its last batch landed in the buffer.
        assert!(saw_samples.load(Ordering::Relaxed));
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let scene = wall_scene(Material::reflective(Vector3f::new(0.8, 0.6, 0.4), 0.3, 0.2),
                               Vector3f::new(1.0, 0.9, 0.8));
        let cam = camera(1.5);
        let single = TiledRenderer::new(&scene, &cam, params(24, 16, 12, 1, false))
            .render(&no_progress)
            .expect("render succeeds");
        let pooled = TiledRenderer::new(&scene, &cam, params(24, 16, 12, 6, false))
            .render(&no_progress)
            .expect("render succeeds");
        for (a, b) in single.pixels().iter().zip(pooled.pixels()) {
            assert!((a - b).norm() < 1e-4);
        }
    }

    struct BrokenScene;

    impl Scene for BrokenScene {
        fn intersect(&self, _ray: &Ray3f) -> Option<SurfaceIntersection> {
            panic!("intersection failed");
        }

        fn environment(&self, _ray: &Ray3f) -> Vector3f {
            Vector3f::zeros()
        }
    }

    #[test]
    fn test_worker_panic_fails_render() {
        let cam = camera(1.0);
        let result = TiledRenderer::new(&BrokenScene, &cam, params(8, 8, 1, 2, false)).render(&no_progress);
        assert!(matches!(result, Err(RenderError::WorkerPanicked { .. })));
    }
}
