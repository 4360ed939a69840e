//! Output of the small sample exact test.
use serde::{Deserialize, Serialize};
use std::fmt;

use super::StatisticKind;

/// Result of a single small sample exact test.
///
/// Values are fixed on construction, accessors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallSampleTestResult {
    statistic_kind: StatisticKind,
    statistic: f64,
    p_value: f64,
    asymptotic_p_value: Option<f64>,
    bin_counts: Vec<u64>,
    null_probs: Vec<f64>,
    expected: Vec<f64>,
    total: u64,
    total_permutations: u128,
}

impl SmallSampleTestResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        statistic_kind: StatisticKind,
        statistic: f64,
        p_value: f64,
        asymptotic_p_value: Option<f64>,
        bin_counts: Vec<u64>,
        null_probs: Vec<f64>,
        expected: Vec<f64>,
        total: u64,
        total_permutations: u128,
    ) -> Self {
        SmallSampleTestResult {
            statistic_kind,
            statistic,
            p_value,
            asymptotic_p_value,
            bin_counts,
            null_probs,
            expected,
            total,
            total_permutations,
        }
    }

    /// Statistic used to score compositions.
    pub fn statistic_kind(&self) -> StatisticKind {
        self.statistic_kind
    }

    /// Statistic of the observed counts.
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Exact p-value, the null probability of a composition scoring at least as high
    /// as the observed counts.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Large sample p-value from the chi-square distribution with `k - 1` degrees of
    /// freedom, present for chi-square and G statistics with more than one bin.
    pub fn asymptotic_p_value(&self) -> Option<f64> {
        self.asymptotic_p_value
    }

    /// Observed counts per bin.
    pub fn bin_counts(&self) -> &[u64] {
        &self.bin_counts
    }

    /// Null probability per bin.
    pub fn null_probs(&self) -> &[f64] {
        &self.null_probs
    }

    /// Expected count per bin under the null.
    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    /// Total number of events.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of compositions in the enumerated support.
    pub fn total_permutations(&self) -> u128 {
        self.total_permutations
    }
}

impl fmt::Display for SmallSampleTestResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Small sample exact test ({} statistic)", self.statistic_kind)?;
        writeln!(f, "  Total events:        {}", self.total())?;
        writeln!(f, "  Total permutations:  {}", self.total_permutations)?;
        writeln!(f, "  Statistic:           {:.4}", self.statistic)?;
        writeln!(f, "  Exact p-value:       {:.4}", self.p_value)?;
        match self.asymptotic_p_value {
            Some(p) => writeln!(f, "  Asymptotic p-value:  {:.4}", p)?,
            None => writeln!(f, "  Asymptotic p-value:  n/a")?,
        }
        writeln!(
            f,
            "  {:>5} {:>10} {:>10} {:>10}",
            "Bin", "Observed", "Expected", "Null"
        )?;
        for (idx, ((o, e), p)) in self
            .bin_counts
            .iter()
            .zip(&self.expected)
            .zip(&self.null_probs)
            .enumerate()
        {
            writeln!(f, "  {:>5} {:>10} {:>10.3} {:>10.4}", idx, o, e, p)?;
        }
        Ok(())
    }
}
