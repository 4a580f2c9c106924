use std::f64::consts::TAU;

use log::{debug, trace};

use crate::{
    camera::{Camera, CameraConfig, CameraError},
    raster::Raster,
    render::render_points,
    sampler::{SphereConfig, SurfaceSampler},
};

/// The configuration for a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub sphere: SphereConfig,
    /// Azimuth added to the sphere after each frame, in radians.
    pub rotation_step: f64,
}

impl SceneConfig {
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_sphere(mut self, sphere: SphereConfig) -> Self {
        self.sphere = sphere;
        self
    }

    pub fn with_rotation_step(mut self, rotation_step: f64) -> Self {
        self.rotation_step = rotation_step;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            sphere: SphereConfig::default(),
            rotation_step: 0.01,
        }
    }
}

/// A rotating sphere of points seen through a camera.
///
/// Each step draws a fresh frame and blends it into a trail raster, so moving points leave a
/// fading glow behind them.
pub struct Scene {
    camera: Camera,
    sampler: SurfaceSampler,
    sphere: SphereConfig,
    rotation: f64,
    rotation_step: f64,
    frame: Raster,
    trail: Raster,
    frame_count: u64,
}

impl Scene {
    /// Creates a scene, failing if the camera cannot be built.
    pub fn new(config: &SceneConfig) -> Result<Self, CameraError> {
        let camera = config.camera.build()?;
        let (width, height) = camera.resolution();

        debug!(
            "scene with {} points on a sphere of radius {} at {:?}",
            config.sphere.count, config.sphere.radius, config.sphere.center
        );

        Ok(Self {
            camera,
            sampler: SurfaceSampler::default(),
            sphere: config.sphere.clone(),
            rotation: 0.0,
            rotation_step: config.rotation_step,
            frame: Raster::new(width as usize, height as usize),
            trail: Raster::new(width as usize, height as usize),
            frame_count: 0,
        })
    }

    /// Renders the next frame and returns the blended image to display.
    pub fn step(&mut self) -> &Raster {
        let points = self.sampler.generate_sphere(&self.sphere, self.rotation);

        self.frame.clear();
        let written = render_points(&self.camera, &points, &mut self.frame);

        // Both rasters are created with the camera's resolution
        self.trail.mix(&self.frame);

        self.rotation += self.rotation_step;
        if self.rotation > TAU {
            self.rotation -= TAU;
        }
        self.frame_count += 1;

        trace!(
            "frame {} drew {written} pixels, rotation now {:.4}",
            self.frame_count, self.rotation
        );
        &self.trail
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The azimuth the next frame will be drawn with.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The last frame, before blending.
    pub fn frame(&self) -> &Raster {
        &self.frame
    }

    /// The blended image.
    pub fn trail(&self) -> &Raster {
        &self.trail
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
