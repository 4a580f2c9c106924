use image::{ImageBuffer, Rgb};

pub mod camera;
pub mod raster;
pub mod render;
pub mod sampler;
pub mod scene;

/// A point in world space.
pub type Point3 = nalgebra::Point3<f64>;
/// A direction or offset in world or camera space.
pub type Vector3 = nalgebra::Vector3<f64>;
/// The points produced by one run of a sampler.
pub type PointCloud = Vec<Point3>;

type ColorDepth = u8;
pub type PixelType = Rgb<ColorDepth>;
pub type ImageType = ImageBuffer<PixelType, Vec<ColorDepth>>;
