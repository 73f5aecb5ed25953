//! Parity tests against lcms2
//!
//! lcms2 is the strictest reader available; it validates tag types and
//! offsets against the table before building a transform.

use chroma_parity::{
    color_patches, expected_in_srgb, gray_ramp, max_channel_diff, rec709_profile_bytes,
    srgb_profile_bytes, transform_lcms2_to_srgb, transform_moxcms_to_srgb,
};
use chromacore::Rec709Companding;

const MAX_DIFF: u8 = 2;

#[test]
fn test_srgb_profile_loads() {
    let bytes = srgb_profile_bytes().expect("serialize");
    let profile = lcms2::Profile::new_icc(&bytes).expect("lcms2 rejected profile");
    assert!((profile.version() - 4.3).abs() < 1e-9);
}

#[test]
fn test_srgb_to_builtin_is_identity() {
    let bytes = srgb_profile_bytes().expect("serialize");

    for input in [gray_ramp(), color_patches()] {
        let output = transform_lcms2_to_srgb(&bytes, &input).expect("lcms2 failed");
        let diff = max_channel_diff(&input, &output);
        assert!(diff <= MAX_DIFF, "sRGB → sRGB max diff {}", diff);
    }
}

#[test]
fn test_rec709_gray_ramp() {
    let bytes = rec709_profile_bytes().expect("serialize");
    let input = gray_ramp();
    let output = transform_lcms2_to_srgb(&bytes, &input).expect("lcms2 failed");

    for (v, px) in output.chunks_exact(3).enumerate() {
        let expected = expected_in_srgb(&Rec709Companding, v as u8);
        assert!(
            px[0].abs_diff(expected) <= MAX_DIFF,
            "level {}: lcms2 {} vs expected {}",
            v,
            px[0],
            expected
        );
    }
}

/// Both readers must agree on our bytes
#[test]
fn test_lcms2_matches_moxcms() {
    let bytes = rec709_profile_bytes().expect("serialize");
    let input = color_patches();

    let lcms2_output = transform_lcms2_to_srgb(&bytes, &input).expect("lcms2 failed");
    let moxcms_output = transform_moxcms_to_srgb(&bytes, &input).expect("moxcms failed");

    let diff = max_channel_diff(&lcms2_output, &moxcms_output);
    assert!(diff <= MAX_DIFF, "lcms2 vs moxcms max diff {}", diff);
}
