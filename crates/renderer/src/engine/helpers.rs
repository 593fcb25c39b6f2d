// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

use crate::PulseParams;

/// The width of a pulsing highlight on the given frame.
///
/// The frame index wraps at `params.modulus`, then the width rises and falls
/// linearly between `min_thickness` and `min_thickness + range - 1`, one pixel
/// every `frames_per_px` frames.
pub(crate) fn pulse_thickness(frame_index: u64, params: &PulseParams) -> f64 {
    let period = 2.0 * params.range - 2.0;
    if period <= 0.0 {
        return params.min_thickness;
    }
    let frames_per_px = if params.frames_per_px > 0.0 {
        params.frames_per_px
    } else {
        1.0
    };
    let frame = (frame_index % params.modulus.max(1)) as f64;
    let phase = frame / frames_per_px;
    let delta = ((phase % period) - params.range + 1.0).abs();
    params.min_thickness + delta
}
