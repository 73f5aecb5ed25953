//! Row-major pixel storage and integer rectangles.

use bytemuck::Pod;

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Axis-aligned rectangle; `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap of two rectangles; empty (zero sized) when they do not meet
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        // i64 so edges near i32::MAX cannot wrap
        let edges = |r: &Rectangle| {
            let (x, y) = (i64::from(r.x), i64::from(r.y));
            (x, y, x + i64::from(r.width), y + i64::from(r.height))
        };
        let (ax, ay, ar, ab) = edges(self);
        let (bx, by, br, bb) = edges(other);

        let (x, y) = (ax.max(bx), ay.max(by));
        let (right, bottom) = (ar.min(br), ab.min(bb));
        if right <= x || bottom <= y {
            return Rectangle::default();
        }

        let clamp = |v: i64| v.min(i64::from(i32::MAX)) as i32;
        Rectangle::new(x as i32, y as i32, clamp(right - x), clamp(bottom - y))
    }
}

/// Owned image of packed pixels, stored row by row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer<P: Pixel> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

impl<P: Pixel> ImageBuffer<P> {
    /// Image filled with `P::default()`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![P::default(); width * height],
        }
    }

    pub fn filled(width: usize, height: usize, pixel: P) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<P>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::invalid_argument(format!(
                "{} pixels given for a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Rectangle {
        let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Rectangle::new(0, 0, clamp(self.width), clamp(self.height))
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&P> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x)
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: P) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = pixel;
        }
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // chunks_exact(0) panics; a zero-width image has no pixels anyway
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Replace the pixel storage wholesale, returning the old buffer.
    ///
    /// # Panics
    /// Panics if `pixels` does not hold exactly `width * height` pixels.
    pub fn swap_pixels(&mut self, pixels: Vec<P>) -> Vec<P> {
        assert_eq!(pixels.len(), self.pixels.len(), "pixel buffer size mismatch");
        std::mem::replace(&mut self.pixels, pixels)
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }
}

impl<P: Pixel + Pod> ImageBuffer<P> {
    /// Raw bytes of the packed pixels
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
