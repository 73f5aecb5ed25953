//! Parity tests against moxcms
//!
//! Profiles serialized by chromacore must load in moxcms and transform the
//! way their tags describe.

use chroma_parity::{
    color_patches, expected_in_srgb, gamma_profile_bytes, gray_ramp, max_channel_diff,
    rec709_profile_bytes, srgb_profile_bytes, transform_moxcms_to_srgb,
};
use chromacore::{GammaCompanding, Rec709Companding};

/// 8-bit rounding differs between moxcms' fixed-point paths and ours
const MAX_DIFF: u8 = 2;

#[test]
fn test_srgb_profile_loads() {
    let bytes = srgb_profile_bytes().expect("serialize");
    moxcms::ColorProfile::new_from_slice(&bytes).expect("moxcms rejected profile");
}

#[test]
fn test_srgb_to_builtin_is_identity() {
    let bytes = srgb_profile_bytes().expect("serialize");

    for input in [gray_ramp(), color_patches()] {
        let output = transform_moxcms_to_srgb(&bytes, &input).expect("moxcms failed");
        let diff = max_channel_diff(&input, &output);
        assert!(diff <= MAX_DIFF, "sRGB → sRGB max diff {}", diff);
    }
}

#[test]
fn test_rec709_gray_ramp() {
    let bytes = rec709_profile_bytes().expect("serialize");
    let input = gray_ramp();
    let output = transform_moxcms_to_srgb(&bytes, &input).expect("moxcms failed");

    for (v, px) in output.chunks_exact(3).enumerate() {
        let expected = expected_in_srgb(&Rec709Companding, v as u8);
        for &c in px {
            assert!(
                c.abs_diff(expected) <= MAX_DIFF,
                "level {}: moxcms {} vs expected {}",
                v,
                c,
                expected
            );
        }
    }
}

#[test]
fn test_gamma_gray_ramp() {
    let bytes = gamma_profile_bytes(2.2).expect("serialize");
    let input = gray_ramp();
    let output = transform_moxcms_to_srgb(&bytes, &input).expect("moxcms failed");

    let companding = GammaCompanding::new(2.2);
    for (v, px) in output.chunks_exact(3).enumerate() {
        let expected = expected_in_srgb(&companding, v as u8);
        assert!(
            px[1].abs_diff(expected) <= MAX_DIFF,
            "level {}: moxcms {} vs expected {}",
            v,
            px[1],
            expected
        );
    }
}

#[test]
fn test_truncated_profile_rejected() {
    let bytes = srgb_profile_bytes().expect("serialize");
    assert!(moxcms::ColorProfile::new_from_slice(&bytes[..bytes.len() / 2]).is_err());
}
