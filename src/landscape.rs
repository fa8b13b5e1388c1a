//! Sampling of robustness oracles over a grid of window endpoints.
//!
//! A robustness landscape is the value of an oracle at every point of a square grid of `(x, y)`
//! parameters, typically the lower and upper endpoints of a candidate match window. Grid cells are
//! independent, so with the `parallel` feature enabled they are evaluated on a [rayon] thread pool.
//! Values are computed exactly and only converted to floats for rendering.
//!
//! ```rust
//! use robust_tre::landscape::{self, LandscapeConfig};
//! use robust_tre::rational::integer;
//! use robust_tre::timed::Anchor;
//! use robust_tre::ZoneSetBuilder;
//!
//! let mut builder = ZoneSetBuilder::new();
//! builder.add_timed_period(integer(0), integer(10), Anchor::None).unwrap();
//! let zones = builder.build();
//!
//! let config = LandscapeConfig::default()
//!     .with_scope(integer(0), integer(10))
//!     .with_resolution(11);
//! let map = landscape::translation(&config, &zones).unwrap();
//!
//! assert_eq!(map.resolution(), 11);
//! assert!(map.value(2, 5).unwrap().is_positive());
//! ```

use log::debug;
use num_traits::Zero;
use ordered_float::OrderedFloat;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::metrics::Robustness;
use crate::oracle::{OracleError, Scope};
use crate::rational::{self, Rational};
use crate::timed;
use crate::zone_set::ZoneSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandscapeError {
    #[error("Landscape resolution must be at least 2, got {0}")]
    InvalidResolution(usize),

    #[error("Could not create sampling thread pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Grid and worker settings for sampling a landscape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandscapeConfig {
    start: Rational,
    end: Rational,
    resolution: usize,
    threads: usize,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            start: Rational::zero(),
            end: rational::integer(20),
            resolution: 100,
            threads: 0,
        }
    }
}

impl LandscapeConfig {
    /// Set the range covered by both grid axes.
    pub fn with_scope(self, start: Rational, end: Rational) -> Self {
        Self { start, end, ..self }
    }

    /// Set the number of samples along each axis.
    pub fn with_resolution(self, resolution: usize) -> Self {
        Self { resolution, ..self }
    }

    /// Set the number of worker threads. Zero selects the rayon default.
    pub fn with_threads(self, threads: usize) -> Self {
        Self { threads, ..self }
    }

    pub fn start(&self) -> &Rational {
        &self.start
    }

    pub fn end(&self) -> &Rational {
        &self.end
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    fn validate(&self) -> Result<Scope, LandscapeError> {
        if self.resolution < 2 {
            return Err(LandscapeError::InvalidResolution(self.resolution));
        }

        Ok(Scope::new(self.start.clone(), self.end.clone())?)
    }
}

/// Exact oracle values over a square grid.
///
/// The value at `(i, j)` is the oracle evaluated at `x = axis[i]` and `y = axis[j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landscape {
    axis: Vec<Rational>,
    values: Vec<Robustness>,
}

impl Landscape {
    pub fn resolution(&self) -> usize {
        self.axis.len()
    }

    /// Sample coordinates shared by both axes.
    pub fn axis(&self) -> &[Rational] {
        &self.axis
    }

    /// Values in row-major order, one row per `x` sample.
    pub fn values(&self) -> &[Robustness] {
        &self.values
    }

    pub fn value(&self, i: usize, j: usize) -> Option<&Robustness> {
        let n = self.resolution();

        if i < n && j < n {
            self.values.get(i * n + j)
        } else {
            None
        }
    }

    /// Rows of float values for plotting. Infinite robustness maps to infinite floats.
    pub fn to_f64_grid(&self) -> Vec<Vec<f64>> {
        self.values
            .chunks(self.resolution())
            .map(|row| row.iter().map(Robustness::to_f64).collect())
            .collect()
    }

    /// Symmetric colour range `(-m, m)` where `m` is the largest finite magnitude in the grid.
    pub fn color_range(&self) -> (f64, f64) {
        let magnitude = self
            .values
            .iter()
            .filter_map(Robustness::finite)
            .map(|value| OrderedFloat(rational::to_f64(value).abs()))
            .max()
            .map_or(0.0, |OrderedFloat(m)| m);

        (-magnitude, magnitude)
    }
}

#[cfg(feature = "parallel")]
fn evaluate<F>(config: &LandscapeConfig, axis: &[Rational], oracle: &F) -> Result<Vec<Robustness>, LandscapeError>
where
    F: Fn(&Rational, &Rational) -> Result<Robustness, OracleError> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| LandscapeError::ThreadPool(e.to_string()))?;

    debug!("sampling landscape on {} threads", pool.current_num_threads());

    let n = axis.len();
    let values = pool.install(|| {
        (0..n * n)
            .into_par_iter()
            .map(|k| oracle(&axis[k / n], &axis[k % n]))
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(values)
}

#[cfg(not(feature = "parallel"))]
fn evaluate<F>(_config: &LandscapeConfig, axis: &[Rational], oracle: &F) -> Result<Vec<Robustness>, LandscapeError>
where
    F: Fn(&Rational, &Rational) -> Result<Robustness, OracleError> + Sync,
{
    let n = axis.len();
    let values = (0..n * n)
        .map(|k| oracle(&axis[k / n], &axis[k % n]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(values)
}

/// Evaluate `oracle` at every point of the grid described by `config`.
///
/// The first oracle error aborts sampling.
pub fn sample<F>(config: &LandscapeConfig, oracle: F) -> Result<Landscape, LandscapeError>
where
    F: Fn(&Rational, &Rational) -> Result<Robustness, OracleError> + Sync,
{
    let scope = config.validate()?;
    let axis = rational::linspace(scope.start(), scope.end(), config.resolution);

    debug!(
        "sampling {}x{} landscape over [{}, {}]",
        config.resolution,
        config.resolution,
        scope.start(),
        scope.end()
    );

    let values = evaluate(config, &axis, &oracle)?;

    Ok(Landscape { axis, values })
}

/// Translation robustness of every window `[x, y]` on the grid.
pub fn translation(config: &LandscapeConfig, zones: &ZoneSet) -> Result<Landscape, LandscapeError> {
    sample(config, |l, u| timed::translation_robustness(zones, l, u))
}

/// Optimal translation robustness of every window `[x, y]` on the grid, with translations limited
/// to `scope`. Windows longer than the scope are reported as [`Robustness::NegInfinity`].
pub fn optimal_translation(
    config: &LandscapeConfig,
    zones: &ZoneSet,
    scope: &Scope,
) -> Result<Landscape, LandscapeError> {
    sample(config, |l, u| {
        match timed::optimal_translation_robustness(zones, l, u, scope) {
            Ok(optimum) => Ok(optimum.robustness),
            Err(OracleError::InvalidScope { .. }) => Ok(Robustness::NegInfinity),
            Err(error) => Err(error),
        }
    })
}
