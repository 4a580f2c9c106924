use thiserror::Error;

use crate::{ImageType, PixelType};

/// Errors raised when combining rasters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("cannot blend a {found:?} raster into a {expected:?} raster")]
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Brightness of a point at the given depth.
///
/// Nearby points are brightest and the value saturates at 255.
pub fn depth_intensity(depth: f64) -> u16 {
    (25500.0 / (depth * 0.25 + 1.0)).min(255.0) as u16
}

/// A grid of pixel intensities stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
}

impl Raster {
    /// Creates a black raster with the given resolution.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The raw intensities, row by row.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Sets every pixel back to black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes a pixel, ignoring coordinates outside of the raster.
    pub fn set(&mut self, x: usize, y: usize, value: u16) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Writes the pixel containing the continuous screen coordinates `(x, y)`.
    ///
    /// Returns false when the coordinates fall outside of the raster.
    pub fn plot(&mut self, x: f64, y: f64, value: u16) -> bool {
        let (px, py) = (x.floor(), y.floor());
        if !(px >= 0.0 && py >= 0.0 && px < self.width as f64 && py < self.height as f64) {
            return false;
        }
        self.set(px as usize, py as usize, value)
    }

    /// Mixes a new frame into this raster, leaving a fading trail of the previous frames.
    ///
    /// Each pixel becomes the floored mean of its current value and the frame's value.
    pub fn blend(&mut self, frame: &Raster) -> Result<(), RasterError> {
        if self.resolution() != frame.resolution() {
            return Err(RasterError::SizeMismatch {
                expected: self.resolution(),
                found: frame.resolution(),
            });
        }

        self.mix(frame);
        Ok(())
    }

    /// Blends without checking the resolutions, for rasters known to share one.
    pub(crate) fn mix(&mut self, frame: &Raster) {
        self.pixels
            .iter_mut()
            .zip(&frame.pixels)
            .for_each(|(old, new)| *old = ((u32::from(*old) + u32::from(*new)) / 2) as u16);
    }

    /// Converts the raster to a grayscale RGB image.
    pub fn to_image(&self) -> ImageType {
        ImageType::from_fn(self.width as u32, self.height as u32, |x, y| {
            let value = self.pixels[y as usize * self.width + x as usize].min(255) as u8;
            PixelType::from([value, value, value])
        })
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
