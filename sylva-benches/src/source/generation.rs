//! Numeric generator helper routines.

use std::f32::consts::PI;

use rand::{Rng, rngs::SmallRng};

use super::{GaussianBlobConfig, SyntheticError};

pub(super) fn validate_blob_config(config: &GaussianBlobConfig) -> Result<(), SyntheticError> {
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.point_count {
        return Err(SyntheticError::ClusterCountExceedsPointCount {
            cluster_count: config.cluster_count,
            point_count: config.point_count,
        });
    }
    for (parameter, value) in [("separation", config.separation), ("spread", config.spread)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter { parameter });
        }
    }
    Ok(())
}

/// Places centroids evenly on a circle in the first two axes; remaining axes
/// receive a small random offset.
#[expect(
    clippy::cast_precision_loss,
    reason = "centroid placement uses index-derived floating-point angles"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "centroid placement uses trigonometric expressions"
)]
pub(super) fn blob_centroids(config: &GaussianBlobConfig, rng: &mut SmallRng) -> Vec<Vec<f32>> {
    (0..config.cluster_count)
        .map(|cluster_index| {
            let angle = (cluster_index as f32 / config.cluster_count as f32) * (2.0 * PI);
            let mut centroid = vec![0.0_f32; config.dimensions];
            if let Some(value) = centroid.get_mut(0) {
                *value = config.separation * angle.cos();
            }
            if let Some(value) = centroid.get_mut(1) {
                *value = config.separation * angle.sin();
            }
            for value in centroid.iter_mut().skip(2) {
                *value = rng.gen_range((-0.2 * config.separation)..(0.2 * config.separation));
            }
            centroid
        })
        .collect()
}

/// Box-Muller draw from the standard normal distribution.
#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
pub(super) fn standard_normal_sample(rng: &mut SmallRng) -> Result<f32, SyntheticError> {
    let u1 = rng.gen_range(0.0_f32..1.0_f32).max(f32::EPSILON);
    let u2 = rng.gen_range(0.0_f32..1.0_f32);
    let sample = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * PI * u2).cos();
    if sample.is_finite() {
        Ok(sample)
    } else {
        Err(SyntheticError::InvalidFloatParameter {
            parameter: "standard_normal_sample",
        })
    }
}
