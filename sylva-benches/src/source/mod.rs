//! Synthetic data sets for benchmarking.

mod generation;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sylva_core::{DataContext, DataSet, DataSetError};

use generation::{blob_centroids, standard_normal_sample, validate_blob_config};

/// Errors that may occur while generating synthetic data.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The configured cluster count exceeded the available points.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Number of points requested.
        point_count: usize,
    },
    /// The requested `point_count * dimensions` overflowed `usize`.
    #[error("point_count * dimensions overflows usize")]
    Overflow,
    /// A floating-point generator parameter was invalid.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
}

/// Uniform random vector configuration.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Configuration for isotropic Gaussian blobs.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// Number of Gaussian clusters.
    pub cluster_count: usize,
    /// Radius of the circle the centroids sit on.
    pub separation: f32,
    /// Standard deviation of every blob.
    pub spread: f32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A synthetic row-major [`DataSet`] of `f32` vectors.
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    data: Vec<f32>,
    point_count: usize,
    dimensions: usize,
    context: DataContext,
}

impl SyntheticSource {
    /// Generates uniform random vectors in `[0.0, 1.0)`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let total = checked_total(config.point_count, config.dimensions)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let data = (0..total)
            .map(|_| rng.gen_range(0.0_f32..1.0_f32))
            .collect();
        Ok(Self::from_parts(
            "synthetic-uniform",
            data,
            config.point_count,
            config.dimensions,
        ))
    }

    /// Generates Gaussian blobs and their round-robin ground-truth labels.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian data generation requires floating-point arithmetic"
    )]
    pub fn generate_gaussian_blobs(
        config: &GaussianBlobConfig,
    ) -> Result<(Self, Vec<usize>), SyntheticError> {
        let total = checked_total(config.point_count, config.dimensions)?;
        validate_blob_config(config)?;

        let centroids = blob_centroids(config, &mut SmallRng::seed_from_u64(config.seed));
        let mut rng = SmallRng::seed_from_u64(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5_u64);
        let mut data = Vec::with_capacity(total);
        let mut labels = Vec::with_capacity(config.point_count);
        for (label, centroid) in (0..config.cluster_count)
            .zip(centroids.iter())
            .cycle()
            .take(config.point_count)
        {
            labels.push(label);
            for value in centroid {
                data.push(value + standard_normal_sample(&mut rng)? * config.spread);
            }
        }

        let source = Self::from_parts(
            "synthetic-gaussian-blobs",
            data,
            config.point_count,
            config.dimensions,
        );
        Ok((source, labels))
    }

    fn from_parts(name: &str, data: Vec<f32>, point_count: usize, dimensions: usize) -> Self {
        Self {
            data,
            point_count,
            dimensions,
            context: DataContext::new(name),
        }
    }

    /// Returns the dimensionality of each vector.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn checked_total(point_count: usize, dimensions: usize) -> Result<usize, SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    point_count
        .checked_mul(dimensions)
        .ok_or(SyntheticError::Overflow)
}

impl DataSet for SyntheticSource {
    type Feature = [f32];
    type Context = DataContext;

    fn len(&self) -> usize {
        self.point_count
    }

    fn name(&self) -> &str {
        self.context.name()
    }

    fn feature(&self, index: usize) -> Result<&[f32], DataSetError> {
        index
            .checked_mul(self.dimensions)
            .and_then(|start| Some(start..start.checked_add(self.dimensions)?))
            .filter(|_| index < self.point_count)
            .and_then(|range| self.data.get(range))
            .ok_or(DataSetError::OutOfBounds { index })
    }

    fn context(&self) -> DataContext {
        self.context.clone()
    }
}
