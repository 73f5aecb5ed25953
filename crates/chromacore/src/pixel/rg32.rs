//! Two-channel 16-bit unsigned normalized pixel.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use super::{PackedVector, Pixel, Vector4};

const MAX: f32 = 65535.0;

/// Packed pixel with two 16-bit unsigned normalized channels.
///
/// Red lives in bits `0..16`, green in bits `16..32`. Expands to
/// `(r, g, 0, 1)`; blue and alpha are not stored.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rg32(u32);

impl Rg32 {
    /// Pack two normalized components, clamping to `[0, 1]`
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self(pack(x, y))
    }

    #[inline]
    pub fn from_vector2(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }

    /// Expand to `[x, y]`, least significant channel first
    #[inline]
    pub fn to_vector2(&self) -> [f32; 2] {
        [
            (self.0 & 0xFFFF) as f32 / MAX,
            ((self.0 >> 16) & 0xFFFF) as f32 / MAX,
        ]
    }
}

#[inline]
fn pack(x: f32, y: f32) -> u32 {
    let x = (x.clamp(0.0, 1.0) * MAX).round() as u32 & 0xFFFF;
    let y = (y.clamp(0.0, 1.0) * MAX).round() as u32 & 0xFFFF;
    x | (y << 16)
}

impl PackedVector for Rg32 {
    type Packed = u32;

    #[inline]
    fn packed_value(&self) -> u32 {
        self.0
    }

    #[inline]
    fn from_packed(packed: u32) -> Self {
        Self(packed)
    }
}

impl Pixel for Rg32 {
    #[inline]
    fn pack_from_vector(vector: Vector4) -> Self {
        Self::new(vector.x, vector.y)
    }

    #[inline]
    fn to_vector(&self) -> Vector4 {
        let [x, y] = self.to_vector2();
        Vector4::new(x, y, 0.0, 1.0)
    }
}

impl fmt::Display for Rg32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y] = self.to_vector2();
        write!(f, "<{}, {}>", x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    const STEP: f32 = 1.0 / 65535.0;

    #[test]
    fn test_pack_layout() {
        assert_eq!(Rg32::new(0.0, 0.0).packed_value(), 0);
        assert_eq!(Rg32::new(1.0, 0.0).packed_value(), 0x0000_FFFF);
        assert_eq!(Rg32::new(0.0, 1.0).packed_value(), 0xFFFF_0000);
        assert_eq!(Rg32::new(1.0, 1.0).packed_value(), 0xFFFF_FFFF);
        assert_eq!(Rg32::new(0.5, 0.5).packed_value(), 0x8000_8000);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Rg32::new(-3.0, 7.5), Rg32::new(0.0, 1.0));
        let p = Rg32::pack_from_vector(Vector4::new(2.0, -1.0, 5.0, -5.0));
        assert_eq!(p.to_vector(), Vector4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_missing_channels_are_constant() {
        let p = Rg32::pack_from_vector(Vector4::new(0.25, 0.75, 0.9, 0.1));
        let v = p.to_vector();
        assert_eq!(v.z, 0.0);
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn test_roundtrip_within_one_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5247_3332);
        for _ in 0..10_000 {
            let v = Vector4::new(rng.r#gen(), rng.r#gen(), 0.0, 1.0);
            let back = Rg32::pack_from_vector(v).to_vector();
            assert!(
                (back.x - v.x).abs() <= STEP && (back.y - v.y).abs() <= STEP,
                "{:?} -> {:?}",
                v,
                back
            );
        }
    }

    #[test]
    fn test_pack_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = Vector4::new(rng.r#gen(), rng.r#gen(), rng.r#gen(), rng.r#gen());
            let once = Rg32::pack_from_vector(v);
            let twice = Rg32::pack_from_vector(once.to_vector());
            assert_eq!(once, twice, "repacking {:?} changed bits", v);
        }
    }

    #[test]
    fn test_pack_from_bytes() {
        let p = Rg32::pack_from_bytes(255, 0, 128, 3);
        assert_eq!(p.packed_value(), 0x0000_FFFF);
        let p = Rg32::pack_from_bytes(0, 255, 0, 0);
        assert_eq!(p.packed_value(), 0xFFFF_0000);
    }

    #[test]
    fn test_byte_export_truncates() {
        // 0x8000 / 65535 * 255 = 127.50..., rounding would give 128
        let p = Rg32::new(0.5, 1.0);
        assert_eq!(p.to_rgb_bytes(), [127, 255, 0]);
        assert_eq!(p.to_rgba_bytes(), [127, 255, 0, 255]);
        assert_eq!(p.to_bgr_bytes(), [0, 255, 127]);
        assert_eq!(p.to_bgra_bytes(), [0, 255, 127, 255]);
    }

    #[test]
    fn test_write_bytes_at_offset() {
        let p = Rg32::new(1.0, 0.0);
        let mut buf = [9u8; 8];
        p.write_rgba_bytes(&mut buf, 2);
        assert_eq!(buf, [9, 9, 255, 0, 0, 255, 9, 9]);
        p.write_bgr_bytes(&mut buf, 0);
        assert_eq!(&buf[..3], &[0, 0, 255]);
    }

    #[test]
    fn test_equality_is_bitwise() {
        let a = Rg32::from_packed(0x0001_0000);
        let b = Rg32::from_packed(0x0001_0001);
        // Differ by one step of red: numerically close, still unequal
        assert!((a.to_vector().x - b.to_vector().x).abs() <= STEP);
        assert_ne!(a, b);

        let set: HashSet<Rg32> = [a, b, Rg32::from_packed(0x0001_0000)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rg32::new(1.0, 0.0).to_string(), "<1, 0>");
    }
}
