use std::f64::consts::TAU;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Point3, PointCloud};

/// The sphere a sampler covers with points.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereConfig {
    pub center: Point3,
    pub radius: f64,
    pub count: usize,
}

impl SphereConfig {
    pub fn new(center: Point3, radius: f64, count: usize) -> Self {
        Self {
            center,
            radius,
            count,
        }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 500.0, 0.0), 300.0, 2000)
    }
}

/// Generates points uniformly spread over the surface of a sphere.
///
/// The sampler owns its random generator and reseeds it at the start of every call. Two calls
/// with the same arguments therefore return the same points, and changing only the rotation
/// turns the same cloud around the z axis.
#[derive(Debug, Clone)]
pub struct SurfaceSampler {
    seed: u64,
    rng: StdRng,
}

impl SurfaceSampler {
    pub const DEFAULT_SEED: u64 = 42;

    /// Creates a sampler that always restarts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates `count` points on the sphere of radius `radius` around `center`.
    ///
    /// `rotation` is an azimuth offset in radians added to every point.
    ///
    /// The polar angle is drawn through its cosine so the area density is uniform instead of
    /// bunching up at the poles.
    pub fn generate(
        &mut self,
        center: Point3,
        radius: f64,
        count: usize,
        rotation: f64,
    ) -> PointCloud {
        self.rng = StdRng::seed_from_u64(self.seed);

        // All azimuths are drawn before all polar angles
        let phis: Vec<f64> = (0..count)
            .map(|_| self.rng.random_range(0.0..TAU) + rotation)
            .collect();
        let cos_thetas: Vec<f64> = (0..count)
            .map(|_| self.rng.random_range(-1.0..=1.0))
            .collect();

        phis.into_iter()
            .zip(cos_thetas)
            .map(|(phi, cos_theta): (f64, f64)| {
                let theta = cos_theta.acos();
                Point3::new(
                    radius * theta.sin() * phi.cos() + center.x,
                    radius * theta.sin() * phi.sin() + center.y,
                    radius * theta.cos() + center.z,
                )
            })
            .collect()
    }

    /// Generates the points of a sphere configuration.
    pub fn generate_sphere(&mut self, sphere: &SphereConfig, rotation: f64) -> PointCloud {
        self.generate(sphere.center, sphere.radius, sphere.count, rotation)
    }
}

impl Default for SurfaceSampler {
    fn default() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }
}

/// Generates `count` points on a sphere with a sampler seeded with
/// [`SurfaceSampler::DEFAULT_SEED`].
///
/// Every call uses its own generator, so this can be called from several threads at once.
pub fn generate_sphere_points(
    center: Point3,
    radius: f64,
    count: usize,
    rotation: f64,
) -> PointCloud {
    SurfaceSampler::default().generate(center, radius, count, rotation)
}
