//! Kernel convolution over packed pixel images.
//!
//! The pass reads from the image's current pixels and writes into a copy,
//! which replaces the image storage once every row is done. Rows of the
//! target region are split across rayon workers; each worker owns whole
//! destination rows, so no locking is needed.
//!
//! Sampling clamps to the target region's edges. Only red, green and blue
//! are convolved; alpha is copied from the source pixel.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::image::{ImageBuffer, Rectangle};
use crate::pixel::{Pixel, Vector4};

/// Square convolution kernel with an odd side, weights row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn new(side: usize, weights: Vec<f32>) -> Result<Self> {
        if side == 0 || side % 2 == 0 {
            return Err(Error::invalid_argument(format!(
                "kernel side must be odd and non-zero, got {}",
                side
            )));
        }
        if weights.len() != side * side {
            return Err(Error::invalid_argument(format!(
                "kernel of side {} needs {} weights, got {}",
                side,
                side * side,
                weights.len()
            )));
        }
        Ok(Self { side, weights })
    }

    /// 1x1 kernel of weight 1
    pub fn identity() -> Self {
        Self {
            side: 1,
            weights: vec![1.0],
        }
    }

    pub fn box_blur(side: usize) -> Result<Self> {
        let w = 1.0 / (side * side).max(1) as f32;
        Self::new(side, vec![w; side * side])
    }

    /// Normalized Gaussian with the given standard deviation in pixels
    pub fn gaussian(side: usize, sigma: f32) -> Result<Self> {
        if !(sigma > 0.0) {
            return Err(Error::invalid_argument(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }

        let r = (side / 2) as f32;
        let denom = 2.0 * sigma * sigma;
        let weights: Vec<f32> = (0..side * side)
            .map(|i| {
                let dy = (i / side.max(1)) as f32 - r;
                let dx = (i % side.max(1)) as f32 - r;
                (-(dx * dx + dy * dy) / denom).exp()
            })
            .collect();
        let sum: f32 = weights.iter().sum();

        Self::new(side, weights.into_iter().map(|w| w / sum).collect())
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    /// Weight at kernel row `fy`, column `fx`
    #[inline]
    pub fn get(&self, fy: usize, fx: usize) -> f32 {
        self.weights[fy * self.side + fx]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Worker pool configuration for a convolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelOptions {
    /// `None` runs on the global rayon pool; `Some(n)` on a dedicated pool
    /// of `n` threads. Ignored without the `rayon` feature.
    pub max_threads: Option<usize>,
}

impl ParallelOptions {
    pub const fn with_max_threads(max_threads: usize) -> Self {
        Self {
            max_threads: Some(max_threads),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvolutionProcessor {
    kernel: Kernel,
    options: ParallelOptions,
}

impl ConvolutionProcessor {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            options: ParallelOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParallelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Convolve the whole image
    pub fn apply<P: Pixel>(&self, image: &mut ImageBuffer<P>) -> Result<()> {
        let bounds = image.bounds();
        self.apply_region(image, bounds)
    }

    /// Convolve the pixels inside `region`, clipped to the image. Pixels
    /// outside it are left as they were. An empty region is a no-op.
    ///
    /// On error the image is untouched.
    pub fn apply_region<P: Pixel>(
        &self,
        image: &mut ImageBuffer<P>,
        region: Rectangle,
    ) -> Result<()> {
        if self.options.max_threads == Some(0) {
            return Err(Error::invalid_argument("max_threads must be at least 1"));
        }

        let region = region.intersect(&image.bounds());
        if region.is_empty() {
            return Ok(());
        }

        debug!(
            ?region,
            kernel = self.kernel.side,
            max_threads = ?self.options.max_threads,
            "convolution pass"
        );

        let width = image.width();
        let source = image.pixels();
        let mut target = source.to_vec();

        let top = region.y as usize;
        let bottom = region.bottom() as usize;
        let rows = &mut target[top * width..bottom * width];

        let convolve = |(i, row): (usize, &mut [P])| {
            self.convolve_row(source, width, &region, top + i, row);
        };

        #[cfg(feature = "rayon")]
        match self.options.max_threads {
            None => rows.par_chunks_exact_mut(width).enumerate().for_each(&convolve),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| Error::ThreadPool(e.to_string()))?;
                pool.install(|| rows.par_chunks_exact_mut(width).enumerate().for_each(&convolve));
            }
        }
        #[cfg(not(feature = "rayon"))]
        rows.chunks_exact_mut(width).enumerate().for_each(&convolve);

        image.swap_pixels(target);
        Ok(())
    }

    fn convolve_row<P: Pixel>(
        &self,
        source: &[P],
        width: usize,
        region: &Rectangle,
        y: usize,
        row: &mut [P],
    ) {
        let radius = self.kernel.radius() as i32;
        let side = self.kernel.side;
        let (left, right) = (region.x, region.right() - 1);
        let (top, bottom) = (region.y, region.bottom() - 1);

        for x in region.x..region.right() {
            let mut acc = Vector4::ZERO;

            for fy in 0..side {
                let sy = (y as i32 + fy as i32 - radius).clamp(top, bottom) as usize;
                let src_row = &source[sy * width..(sy + 1) * width];

                for fx in 0..side {
                    let sx = (x + fx as i32 - radius).clamp(left, right) as usize;
                    let v = src_row[sx].to_vector();
                    let w = self.kernel.get(fy, fx);
                    acc.x += v.x * w;
                    acc.y += v.y * w;
                    acc.z += v.z * w;
                }
            }

            let x = x as usize;
            acc.w = source[y * width + x].to_vector().w;
            row[x] = P::pack_from_vector(acc);
        }
    }
}
