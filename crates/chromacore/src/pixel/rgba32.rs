//! Four-channel 8-bit unsigned normalized pixel.

use bytemuck::{Pod, Zeroable};

use super::{PackedVector, Pixel, Vector4};

/// Packed pixel with 8-bit red, green, blue and alpha, stored in that byte
/// order. The packed `u32` holds red in the low byte.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba32 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl PackedVector for Rgba32 {
    type Packed = u32;

    #[inline]
    fn packed_value(&self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    #[inline]
    fn from_packed(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self { r, g, b, a }
    }
}

impl Pixel for Rgba32 {
    #[inline]
    fn pack_from_vector(vector: Vector4) -> Self {
        Self::new(
            to_byte(vector.x),
            to_byte(vector.y),
            to_byte(vector.z),
            to_byte(vector.w),
        )
    }

    #[inline]
    fn to_vector(&self) -> Vector4 {
        Vector4::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32) / 255.0
    }

    #[inline]
    fn pack_from_bytes(x: u8, y: u8, z: u8, w: u8) -> Self {
        Self::new(x, y, z, w)
    }

    // Stored bytes are already the 8-bit values; the default float path
    // could truncate 255/255*255 to 254.
    #[inline]
    fn to_rgb_bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    fn to_rgba_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_value_byte_order() {
        let p = Rgba32::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(p.packed_value(), 0x4433_2211);
        assert_eq!(Rgba32::from_packed(0x4433_2211), p);
        assert_eq!(bytemuck::bytes_of(&p), &[0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_bytes_roundtrip_exactly() {
        for v in 0..=255u8 {
            let p = Rgba32::pack_from_vector(Rgba32::new(v, v, v, v).to_vector());
            assert_eq!(p, Rgba32::new(v, v, v, v), "value {}", v);
            assert_eq!(p.to_bgra_bytes(), [v, v, v, v]);
        }
    }

    #[test]
    fn test_pack_clamps() {
        let p = Rgba32::pack_from_vector(Vector4::new(-1.0, 0.5, 2.0, 1.0));
        assert_eq!(p, Rgba32::new(0, 128, 255, 255));
    }

    #[test]
    fn test_channel_order_exports() {
        let p = Rgba32::new(1, 2, 3, 4);
        assert_eq!(p.to_rgb_bytes(), [1, 2, 3]);
        assert_eq!(p.to_bgr_bytes(), [3, 2, 1]);
        assert_eq!(p.to_bgra_bytes(), [3, 2, 1, 4]);
    }
}
