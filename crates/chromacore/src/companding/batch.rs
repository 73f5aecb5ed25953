//! Whole-buffer companding
//!
//! Applies a [`Companding`] strategy to every channel of a buffer, with CPU
//! dispatch through `multiversion` so the per-channel loop is compiled for
//! the best available instruction set.

use multiversion::multiversion;

use super::Companding;

/// Expand every value in `channels` in place (encoded → linear)
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn expand_slice<C>(companding: &C, channels: &mut [f32])
where
    C: Companding,
{
    for channel in channels.iter_mut() {
        *channel = companding.expand(*channel);
    }
}

/// Compress every value in `channels` in place (linear → encoded)
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn compress_slice<C>(companding: &C, channels: &mut [f32])
where
    C: Companding,
{
    for channel in channels.iter_mut() {
        *channel = companding.compress(*channel);
    }
}
