//! Packed Pixel Formats
//!
//! A packed pixel stores one pixel's color in a compact, format-specific bit
//! layout and exposes it to generic algorithms as a [`Vector4`] of
//! normalized `(r, g, b, a)` floats.
//!
//! Generic image code (see [`crate::convolution`]) is written once against
//! the [`Pixel`] trait and monomorphized per format, so there is no dynamic
//! dispatch in the per-pixel loops.
//!
//! # Conversions
//!
//! - `pack_from_vector` clamps each channel to `[0, 1]` and rounds to the
//!   nearest representable step.
//! - `to_vector` expands the stored bits; channels a format does not store
//!   take fixed values defined by that format.
//! - The 8-bit byte exports scale `to_vector()` by 255 and **truncate**.
//!   Consumers written against 8-bit buffers rely on this, so the exports
//!   do not round.

mod rg32;
mod rgba32;

pub use rg32::Rg32;
pub use rgba32::Rgba32;

use std::hash::Hash;
use std::ops::{Add, AddAssign, Div, Mul};

use bytemuck::{Pod, Zeroable};

/// Four-component floating point color `(x, y, z, w)` = `(r, g, b, a)`.
///
/// Components are nominally in `[0, 1]` but are never clamped here.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Clamp every component to `[0, 1]`
    #[inline]
    pub fn saturate(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
            self.w.clamp(0.0, 1.0),
        )
    }
}

impl Add for Vector4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl AddAssign for Vector4 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Div<f32> for Vector4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

/// Access to the raw packed representation of a pixel
pub trait PackedVector {
    /// Integer type holding the packed bits
    type Packed: Copy + Eq + Hash;

    fn packed_value(&self) -> Self::Packed;

    fn from_packed(packed: Self::Packed) -> Self;
}

/// Capability set every packed pixel format implements.
///
/// Equality and hashing come from the packed bits, so two pixels that
/// expand to nearly the same vector but differ in any bit are unequal.
pub trait Pixel: PackedVector + Copy + Default + Eq + Hash + Send + Sync + 'static {
    /// Pack a vector, clamping each channel to `[0, 1]` and rounding to the
    /// nearest step of the channel's bit width.
    fn pack_from_vector(vector: Vector4) -> Self;

    /// Expand the packed value to `(r, g, b, a)`.
    fn to_vector(&self) -> Vector4;

    /// Pack from four 8-bit components (normalized by 255 first).
    #[inline]
    fn pack_from_bytes(x: u8, y: u8, z: u8, w: u8) -> Self {
        Self::pack_from_vector(Vector4::new(x as f32, y as f32, z as f32, w as f32) / 255.0)
    }

    /// `[r, g, b]` bytes, truncated
    #[inline]
    fn to_rgb_bytes(&self) -> [u8; 3] {
        let v = self.to_vector() * 255.0;
        [v.x as u8, v.y as u8, v.z as u8]
    }

    /// `[r, g, b, a]` bytes, truncated
    #[inline]
    fn to_rgba_bytes(&self) -> [u8; 4] {
        let v = self.to_vector() * 255.0;
        [v.x as u8, v.y as u8, v.z as u8, v.w as u8]
    }

    /// `[b, g, r]` bytes, truncated
    #[inline]
    fn to_bgr_bytes(&self) -> [u8; 3] {
        let [r, g, b] = self.to_rgb_bytes();
        [b, g, r]
    }

    /// `[b, g, r, a]` bytes, truncated
    #[inline]
    fn to_bgra_bytes(&self) -> [u8; 4] {
        let [r, g, b, a] = self.to_rgba_bytes();
        [b, g, r, a]
    }

    /// Write `[r, g, b]` into `bytes[start..start + 3]`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `start + 3`.
    #[inline]
    fn write_rgb_bytes(&self, bytes: &mut [u8], start: usize) {
        bytes[start..start + 3].copy_from_slice(&self.to_rgb_bytes());
    }

    /// Write `[r, g, b, a]` into `bytes[start..start + 4]`.
    #[inline]
    fn write_rgba_bytes(&self, bytes: &mut [u8], start: usize) {
        bytes[start..start + 4].copy_from_slice(&self.to_rgba_bytes());
    }

    /// Write `[b, g, r]` into `bytes[start..start + 3]`.
    #[inline]
    fn write_bgr_bytes(&self, bytes: &mut [u8], start: usize) {
        bytes[start..start + 3].copy_from_slice(&self.to_bgr_bytes());
    }

    /// Write `[b, g, r, a]` into `bytes[start..start + 4]`.
    #[inline]
    fn write_bgra_bytes(&self, bytes: &mut [u8], start: usize) {
        bytes[start..start + 4].copy_from_slice(&self.to_bgra_bytes());
    }
}
