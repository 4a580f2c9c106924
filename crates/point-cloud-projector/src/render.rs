use log::trace;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    Point3,
    camera::{Camera, ScreenPoint},
    raster::{Raster, depth_intensity},
};

/// Projects every point through the camera and draws it into the raster.
///
/// The brightness of a point depends on its depth. Points are drawn in order, so a later point
/// replaces an earlier one landing on the same pixel. Points behind the camera or outside of the
/// raster are skipped. Returns the number of pixels written.
#[inline]
pub fn render_points(camera: &Camera, points: &[Point3], raster: &mut Raster) -> usize {
    // Parallelize the projection, the order of the points is kept
    let projected: Vec<ScreenPoint> = points
        .par_iter()
        .filter_map(|point| camera.project(point))
        .collect();

    let written = projected
        .into_iter()
        .filter(|screen| raster.plot(screen.x, screen.y, depth_intensity(screen.depth)))
        .count();

    trace!("drew {written} of {} points", points.len());
    written
}
