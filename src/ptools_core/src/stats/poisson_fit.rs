//! Check how well a Poisson distribution describes a set of counts.
//!
//! The observed mean is taken as the Poisson rate, and the frequency of each integer
//! count is compared with its expected frequency. Over-dispersed crime counts show up
//! as too many zeroes and too many large counts.
use serde::{Deserialize, Serialize};
use statrs::distribution::{Discrete, Poisson};
use std::fmt;

use crate::errors::{Error, PtoolsResult};

/// Largest single count [`check_poisson`] accepts.
///
/// The fit table holds one row for every integer up to the largest count.
pub const MAX_POISSON_COUNT: u64 = 1_000_000;

/// One integer count in a Poisson fit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonFitRow {
    /// The integer count this row describes.
    pub value: u64,

    /// Number of observations equal to `value`.
    pub observed: u64,

    /// Poisson probability of `value`.
    pub pmf: f64,

    /// Expected number of observations equal to `value`.
    pub expected: f64,

    /// `observed - expected`.
    pub residual: f64,

    /// Proportion of observations less than or equal to `value`.
    pub observed_cumulative: f64,

    /// Poisson probability of a count less than or equal to `value`.
    pub expected_cumulative: f64,
}

/// Observed against Poisson expected frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonFit {
    /// Mean count, used as the Poisson rate.
    pub mean: f64,

    /// Sample variance of the counts.
    pub variance: f64,

    /// Number of observations.
    pub n: usize,

    /// One row for every integer from zero to the largest count.
    pub rows: Vec<PoissonFitRow>,
}

impl PoissonFit {
    /// Variance to mean ratio, one for a Poisson process.
    pub fn dispersion(&self) -> f64 {
        self.variance / self.mean
    }

    /// Pearson chi-square over the table rows with non-zero expectation.
    pub fn chi_square(&self) -> f64 {
        self.rows
            .iter()
            .filter(|row| row.expected > 0.0)
            .map(|row| row.residual * row.residual / row.expected)
            .sum()
    }
}

/// Build the Poisson fit table for a set of counts.
///
/// ```
///     use ptools_core::stats::check_poisson;
///     let fit = check_poisson(&[0, 0, 1, 1, 2, 5]).unwrap();
///     assert_eq!(fit.rows.len(), 6);
///     assert_eq!(fit.rows[0].observed, 2);
///     assert!((fit.mean - 1.5).abs() < 1e-12);
/// ```
pub fn check_poisson(counts: &[u64]) -> PtoolsResult<PoissonFit> {
    if counts.is_empty() {
        return Err(Error::ValueError(
            "Poisson fit requires at least one count.".into(),
        ));
    }
    let max = counts.iter().copied().max().unwrap_or(0);
    if max > MAX_POISSON_COUNT {
        return Err(Error::ValueError(format!(
            "Count of {} exceeds the largest supported count of {}.",
            max, MAX_POISSON_COUNT
        )));
    }
    let n = counts.len();
    let mean = counts.iter().map(|c| *c as f64).sum::<f64>() / n as f64;
    let variance = if n > 1 {
        counts
            .iter()
            .map(|c| (*c as f64 - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64
    } else {
        0.0
    };

    // A zero rate is outside of the statrs domain, all of the mass sits at zero.
    let dist = if mean > 0.0 {
        Some(Poisson::new(mean).map_err(|e| Error::ValueError(e.to_string()))?)
    } else {
        None
    };
    let pmf_at = |value: u64| match &dist {
        Some(d) => d.pmf(value),
        None if value == 0 => 1.0,
        None => 0.0,
    };

    let mut freq = vec![0_u64; max as usize + 1];
    counts.iter().for_each(|c| freq[*c as usize] += 1);

    let mut observed_running = 0_u64;
    let mut expected_running = 0.0;
    let rows = freq
        .into_iter()
        .enumerate()
        .map(|(value, observed)| {
            let value = value as u64;
            let pmf = pmf_at(value);
            let expected = pmf * n as f64;
            observed_running += observed;
            expected_running += pmf;
            PoissonFitRow {
                value,
                observed,
                pmf,
                expected,
                residual: observed as f64 - expected,
                observed_cumulative: observed_running as f64 / n as f64,
                expected_cumulative: expected_running,
            }
        })
        .collect();

    Ok(PoissonFit {
        mean,
        variance,
        n,
        rows,
    })
}

impl fmt::Display for PoissonFit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Poisson fit: n = {}, mean = {:.4}, variance = {:.4}",
            self.n, self.mean, self.variance
        )?;
        writeln!(
            f,
            "{:>6} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "Count", "Observed", "Expected", "Resid", "CumObs", "CumExp"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>6} {:>9} {:>9.2} {:>9.2} {:>9.4} {:>9.4}",
                row.value,
                row.observed,
                row.expected,
                row.residual,
                row.observed_cumulative,
                row.expected_cumulative
            )?;
        }
        Ok(())
    }
}
