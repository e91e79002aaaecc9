//! Gaussian Optical Blur
//!
//! ## Algorithm
//!
//! The 2-D Gaussian is separable, so the image is blurred along rows and then
//! along columns with the same 1-D kernel of radius `ceil(4σ)`, capped at the
//! longest image side:
//!
//! ```text
//! w(k) = exp(−k² / 2σ²),  k ∈ [−r, r]
//! ```
//!
//! Each pass scatters every source pixel over its in-bounds neighbours using
//! weights renormalized over the taps that actually land inside the image.
//! Every source pixel therefore distributes exactly its own value, and the
//! image sum is preserved up to floating-point rounding, including at the
//! borders. Away from the borders this is identical to ordinary convolution
//! with a normalized symmetric kernel.
//!
//! ## Skip Rules
//!
//! | Condition | Behaviour |
//! |-----------|-----------|
//! | config absent or `sigma == 0` | stage not built |
//! | unrecognized `type` | image unchanged, warning |
//! | feature `optical-blur` disabled | image unchanged, warning |

use ndarray::{ArrayView1, ArrayViewMut1, Axis, Zip};

use crate::config::BlurConfig;
use crate::reading::{GroundTruthReading, ImageReading};
use crate::types::Resolution;

use super::{ImperfectionStage, StageContext, StageKind};

/// Image-only optics blur
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalBlur {
    mode: BlurMode,
}

#[derive(Debug, Clone, PartialEq)]
enum BlurMode {
    /// Half kernel, index 0 is the centre tap
    Gaussian { weights: Vec<f64> },
    Unrecognized(String),
    Unavailable,
}

impl OpticalBlur {
    /// Build the stage for images of `resolution`, or `None` when blur is
    /// absent or has zero width
    pub fn from_config(config: Option<&BlurConfig>, resolution: Resolution) -> Option<Self> {
        let config = config?;
        if config.sigma == 0.0 {
            return None;
        }

        let mode = if !config.kind.eq_ignore_ascii_case(BlurConfig::GAUSSIAN) {
            BlurMode::Unrecognized(config.kind.clone())
        } else if cfg!(feature = "optical-blur") {
            BlurMode::Gaussian {
                weights: half_kernel(config.sigma, resolution.width.max(resolution.height)),
            }
        } else {
            BlurMode::Unavailable
        };

        Some(Self { mode })
    }

    /// Kernel radius in pixels, zero when the blur is inactive
    pub fn radius(&self) -> usize {
        match &self.mode {
            BlurMode::Gaussian { weights } => weights.len() - 1,
            _ => 0,
        }
    }
}

impl ImperfectionStage for OpticalBlur {
    fn kind(&self) -> StageKind {
        StageKind::OpticalBlur
    }

    fn applies_to(&self, reading: &GroundTruthReading) -> bool {
        reading.as_image().is_some()
    }

    fn apply(&self, reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading {
        match (&self.mode, reading) {
            (BlurMode::Gaussian { weights }, GroundTruthReading::Image(mut image)) => {
                blur_image(&mut image, weights);
                GroundTruthReading::Image(image)
            }
            (BlurMode::Unrecognized(kind), reading) => {
                ctx.warn(
                    StageKind::OpticalBlur,
                    format!("unrecognized blur type `{kind}`, image unchanged"),
                );
                reading
            }
            (BlurMode::Unavailable, reading) => {
                ctx.warn(
                    StageKind::OpticalBlur,
                    "Gaussian filter not available in this build, image unchanged",
                );
                reading
            }
            (_, reading) => reading,
        }
    }
}

/// One-sided kernel, truncated at `ceil(4σ)` and at `max_radius`
///
/// Taps further out than the longest image line never land inside the image,
/// so cutting them off leaves the renormalized scatter unchanged.
fn half_kernel(sigma: f64, max_radius: usize) -> Vec<f64> {
    use crate::constants::sensors::GAUSSIAN_TRUNCATE_SIGMAS;

    let radius = libm::ceil(GAUSSIAN_TRUNCATE_SIGMAS * sigma)
        .max(1.0)
        .min(max_radius.max(1) as f64) as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    (0..=radius)
        .map(|k| {
            let k = k as f64;
            libm::exp(-(k * k) / two_sigma_sq)
        })
        .collect()
}

fn blur_image(image: &mut ImageReading, weights: &[f64]) {
    let pixels = image.pixels_mut();

    // Rows first, then columns
    for axis in [Axis(1), Axis(0)] {
        let source = pixels.clone();
        pixels.fill(0.0);
        Zip::from(source.lanes(axis))
            .and(pixels.lanes_mut(axis))
            .for_each(|src, dst| scatter_line(src, dst, weights));
    }
}

/// Scatter every sample of `src` over its in-bounds neighbours in `dst`
fn scatter_line(src: ArrayView1<'_, f64>, mut dst: ArrayViewMut1<'_, f64>, weights: &[f64]) {
    let radius = weights.len() - 1;
    let last = src.len().saturating_sub(1);

    for (i, &value) in src.iter().enumerate() {
        if value == 0.0 {
            continue;
        }

        let lo = i.saturating_sub(radius);
        let hi = i.saturating_add(radius).min(last);
        let norm: f64 = (lo..=hi).map(|j| weights[j.abs_diff(i)]).sum();

        for j in lo..=hi {
            dst[j] += value * weights[j.abs_diff(i)] / norm;
        }
    }
}
