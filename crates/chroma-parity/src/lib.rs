//! # chroma-parity
//!
//! Cross-reader parity checks for profiles serialized by chromacore.
//!
//! Profiles built here are written with [`chromacore::IccProfile::to_bytes`]
//! and handed to independent ICC implementations:
//!
//! - **moxcms**: pure Rust CMS
//! - **lcms2**: Little CMS, the industry reference
//!
//! A reader that accepts the bytes and produces the transform implied by
//! the tags is the practical proof that the container layout is right.

use anyhow::{Context, Result, anyhow};
use chromacore::icc::{
    IccHeader, IccProfile, ParametricCurve, TagData, TagSignature, XyzNumber,
    signature_from_ascii,
};
use chromacore::{Companding, SRgbCompanding};

/// sRGB colorants adapted to D50 (Bradford)
pub const SRGB_COLORANTS_D50: [[f64; 3]; 3] = [
    [0.4360747, 0.2225045, 0.0139322],
    [0.3850649, 0.7168786, 0.0971045],
    [0.1430804, 0.0606169, 0.7141733],
];

/// Bradford D65 → D50 adaptation, as stored in sRGB profiles' `chad`
pub const BRADFORD_D65_TO_D50: [[f64; 3]; 3] = [
    [1.0478112, 0.0228866, -0.0501270],
    [0.0295424, 0.9904844, -0.0170491],
    [-0.0092345, 0.0150436, 0.7521316],
];

/// v4 RGB display profile with sRGB primaries and the given TRC shared by
/// all three channels
pub fn rgb_display_profile(description: &str, trc: ParametricCurve) -> IccProfile {
    let [r, g, b] = SRGB_COLORANTS_D50;
    let trc = TagData::parametric(trc);

    let header = IccHeader {
        creator: signature_from_ascii("chro"),
        ..IccHeader::default()
    };

    let colorant = |c: [f64; 3]| TagData::xyz(XyzNumber::new(c[0], c[1], c[2]));

    IccProfile::new(header)
        .with_tag(TagSignature::DESC, TagData::mluc(description))
        .with_tag(TagSignature::COPYRIGHT, TagData::mluc("No copyright, use freely"))
        .with_tag(TagSignature::MEDIA_WHITE, TagData::xyz(XyzNumber::D50))
        .with_tag(
            TagSignature::CHAD,
            TagData::chromatic_adaptation(BRADFORD_D65_TO_D50),
        )
        .with_tag(TagSignature::RED_COLORANT, colorant(r))
        .with_tag(TagSignature::GREEN_COLORANT, colorant(g))
        .with_tag(TagSignature::BLUE_COLORANT, colorant(b))
        .with_tag(TagSignature::RED_TRC, trc.clone())
        .with_tag(TagSignature::GREEN_TRC, trc.clone())
        .with_tag(TagSignature::BLUE_TRC, trc)
}

pub fn srgb_profile_bytes() -> Result<Vec<u8>> {
    rgb_display_profile("chromacore sRGB", ParametricCurve::srgb())
        .to_bytes()
        .context("serializing sRGB profile")
}

pub fn rec709_profile_bytes() -> Result<Vec<u8>> {
    rgb_display_profile("chromacore Rec. 709", ParametricCurve::bt709())
        .to_bytes()
        .context("serializing Rec. 709 profile")
}

pub fn gamma_profile_bytes(gamma: f64) -> Result<Vec<u8>> {
    rgb_display_profile("chromacore gamma", ParametricCurve::gamma(gamma))
        .to_bytes()
        .context("serializing gamma profile")
}

/// Every gray level 0..=255 as RGB8
pub fn gray_ramp() -> Vec<u8> {
    (0..=255u8).flat_map(|v| [v, v, v]).collect()
}

/// Deterministic mix of colors covering the cube
pub fn color_patches() -> Vec<u8> {
    let steps = [0u8, 37, 64, 128, 160, 200, 255];
    let mut out = Vec::with_capacity(steps.len().pow(3) * 3);
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                out.extend_from_slice(&[r, g, b]);
            }
        }
    }
    out
}

/// 8-bit value expected after decoding `v` with `source` and re-encoding
/// as sRGB
pub fn expected_in_srgb(source: &impl Companding, v: u8) -> u8 {
    let linear = source.expand(v as f32 / 255.0);
    (SRgbCompanding.compress(linear).clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Largest per-channel absolute difference
pub fn max_channel_diff(a: &[u8], b: &[u8]) -> u8 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

/// Transform RGB8 pixels from `src_profile` into moxcms' built-in sRGB
pub fn transform_moxcms_to_srgb(src_profile: &[u8], pixels: &[u8]) -> Result<Vec<u8>> {
    use moxcms::{ColorProfile, Layout, TransformExecutor, TransformOptions};

    let src = ColorProfile::new_from_slice(src_profile)
        .map_err(|e| anyhow!("moxcms src profile: {:?}", e))?;
    let dst = ColorProfile::new_srgb();

    let transform = src
        .create_transform_8bit(
            Layout::Rgb,
            &dst,
            Layout::Rgb,
            TransformOptions::default(),
        )
        .map_err(|e| anyhow!("moxcms transform: {:?}", e))?;

    let mut out = vec![0u8; pixels.len()];
    transform
        .transform(pixels, &mut out)
        .map_err(|e| anyhow!("moxcms execute: {:?}", e))?;
    Ok(out)
}

/// Transform RGB8 pixels from `src_profile` into lcms2's built-in sRGB
pub fn transform_lcms2_to_srgb(src_profile: &[u8], pixels: &[u8]) -> Result<Vec<u8>> {
    use lcms2::{Intent, PixelFormat, Profile, Transform};

    let src =
        Profile::new_icc(src_profile).map_err(|e| anyhow!("lcms2 src profile: {}", e))?;
    let dst = Profile::new_srgb();

    let transform = Transform::<[u8; 3], [u8; 3]>::new(
        &src,
        PixelFormat::RGB_8,
        &dst,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .map_err(|e| anyhow!("lcms2 transform: {}", e))?;

    let input: Vec<[u8; 3]> = pixels.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();
    let mut output = vec![[0u8; 3]; input.len()];
    transform.transform_pixels(&input, &mut output);

    Ok(output.into_iter().flatten().collect())
}
