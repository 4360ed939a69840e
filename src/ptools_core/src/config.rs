//! Configuration of the exact test engine.
//!
//! The default limits may be overridden from the environment, which is useful when a
//! wrapper script wants to loosen the safety threshold without code changes:
//!
//! - `PTOOLS_SAFETY_THRESHOLD` either an integer number of compositions, or
//!   `unbounded` to stream supports of any size.
//! - `PTOOLS_PARALLEL` set to `0` or `false` to evaluate on the calling thread only.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::{Error, PtoolsResult};
use crate::stats::StatisticKind;

/// Number of compositions which may be enumerated before a run is refused.
pub const DEFAULT_SAFETY_THRESHOLD: u64 = 10_000_000;

/// Relative tolerance used when deciding if a statistic is at least as extreme as the
/// observed one.
///
/// A composition is in the tail when
/// `stat >= observed - DEFAULT_TIE_TOLERANCE * max(1, |observed|)`.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-10;

/// Environment variable overriding the safety threshold.
pub const SAFETY_THRESHOLD_VAR: &str = "PTOOLS_SAFETY_THRESHOLD";

/// Environment variable toggling parallel evaluation.
pub const PARALLEL_VAR: &str = "PTOOLS_PARALLEL";

/// How large of a support set the engine is allowed to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportLimit {
    /// Refuse any support with more compositions than this, before enumeration begins.
    Threshold(u64),

    /// Stream the support regardless of size, this never fails with
    /// [`Error::ResourceExceeded`] but may run for a very long time.
    Unbounded,
}

impl SupportLimit {
    /// Check an analytically computed support size against this limit.
    pub fn check(&self, support_size: Option<u128>) -> PtoolsResult<()> {
        match (self, support_size) {
            (SupportLimit::Unbounded, _) => Ok(()),
            (SupportLimit::Threshold(limit), Some(size)) if size <= *limit as u128 => Ok(()),
            (SupportLimit::Threshold(limit), size) => Err(Error::ResourceExceeded {
                support_size: size,
                threshold: *limit,
            }),
        }
    }
}

impl Default for SupportLimit {
    fn default() -> Self {
        SupportLimit::Threshold(DEFAULT_SAFETY_THRESHOLD)
    }
}

/// Settings for a single exact test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactTestConfig {
    /// Goodness of fit statistic to score compositions with.
    pub statistic: StatisticKind,

    /// Support size budget.
    pub limit: SupportLimit,

    /// Evaluate chunks of the support on the rayon thread pool.
    pub parallel: bool,

    /// Relative tolerance for ties against the observed statistic.
    pub tie_tolerance: f64,
}

impl Default for ExactTestConfig {
    fn default() -> Self {
        ExactTestConfig {
            statistic: StatisticKind::ChiSquare,
            limit: SupportLimit::default(),
            parallel: true,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
        }
    }
}

impl ExactTestConfig {
    /// Default configuration using the specified statistic.
    pub fn new(statistic: StatisticKind) -> Self {
        ExactTestConfig {
            statistic,
            ..Default::default()
        }
    }

    /// Default configuration with overrides read from the environment.
    ///
    /// Unset variables leave the defaults alone, a set variable which cannot be
    /// parsed is an error rather than being ignored.
    pub fn from_env() -> PtoolsResult<Self> {
        let mut config = ExactTestConfig::default();

        if let Ok(value) = env::var(SAFETY_THRESHOLD_VAR) {
            config.limit = parse_limit(&value)?;
        }
        if let Ok(value) = env::var(PARALLEL_VAR) {
            config.parallel = parse_flag(&value)?;
        }
        Ok(config)
    }

    /// Replace the statistic.
    pub fn with_statistic(mut self, statistic: StatisticKind) -> Self {
        self.statistic = statistic;
        self
    }

    /// Replace the support limit.
    pub fn with_limit(mut self, limit: SupportLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the tie tolerance.
    pub fn with_tie_tolerance(mut self, tie_tolerance: f64) -> PtoolsResult<Self> {
        if !tie_tolerance.is_finite() || tie_tolerance < 0.0 {
            return Err(Error::ValueError(format!(
                "Tie tolerance must be a finite non-negative value, got {}.",
                tie_tolerance
            )));
        }
        self.tie_tolerance = tie_tolerance;
        Ok(self)
    }
}

fn parse_limit(value: &str) -> PtoolsResult<SupportLimit> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("unbounded") {
        return Ok(SupportLimit::Unbounded);
    }
    let limit: u64 = value.parse().map_err(|_| {
        Error::ValueError(format!(
            "{} must be an integer or 'unbounded', got '{}'.",
            SAFETY_THRESHOLD_VAR, value
        ))
    })?;
    Ok(SupportLimit::Threshold(limit))
}

fn parse_flag(value: &str) -> PtoolsResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::ValueError(format!(
            "{} must be a boolean flag, got '{}'.",
            PARALLEL_VAR, other
        ))),
    }
}
