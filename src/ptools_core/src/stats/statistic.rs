//! Goodness of fit statistics over binned counts.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Which goodness of fit statistic to score compositions with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticKind {
    /// Pearson chi-square, `sum((O - E)^2 / E)`.
    ChiSquare,

    /// Log likelihood ratio, `2 * sum(O * ln(O / E))`, with `0 * ln(0) = 0`.
    G,

    /// Largest absolute gap between the observed and null cumulative distributions,
    /// taken in bin order.
    KolmogorovSmirnov,
}

impl StatisticKind {
    /// Compute this statistic for observed counts against null probabilities.
    ///
    /// Inputs are assumed valid, see [`crate::stats::run_test`] for the checked entry
    /// point. Returns `NaN` if the counts sum past `u64::MAX`.
    ///
    /// ```
    ///     use ptools_core::stats::StatisticKind;
    ///     let stat = StatisticKind::ChiSquare.compute(&[4, 0], &[0.5, 0.5]);
    ///     assert_eq!(stat, 4.0);
    /// ```
    pub fn compute(&self, observed: &[u64], null_probs: &[f64]) -> f64 {
        let Some(total) = observed.iter().try_fold(0_u64, |acc, c| acc.checked_add(*c)) else {
            return f64::NAN;
        };
        Scorer::new(*self, null_probs, total).score(observed)
    }

    /// Whether the chi-square distribution is a sensible large sample reference for
    /// this statistic.
    pub fn has_asymptotic_reference(&self) -> bool {
        matches!(self, StatisticKind::ChiSquare | StatisticKind::G)
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatisticKind::ChiSquare => write!(f, "Chi-square"),
            StatisticKind::G => write!(f, "G"),
            StatisticKind::KolmogorovSmirnov => write!(f, "Kolmogorov-Smirnov"),
        }
    }
}

impl FromStr for StatisticKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chi" | "chi2" | "chisquare" | "chi-square" => Ok(StatisticKind::ChiSquare),
            "g" | "likelihood" | "log-likelihood" => Ok(StatisticKind::G),
            "ks" | "kolmogorov-smirnov" => Ok(StatisticKind::KolmogorovSmirnov),
            other => Err(Error::ValueError(format!(
                "Unknown statistic '{}', expected one of chi, g, or ks.",
                other
            ))),
        }
    }
}

/// A statistic bound to one set of null probabilities and one total.
///
/// The statistic kind is resolved into a plain function pointer once, so scoring a
/// composition does not branch on the kind.
pub(crate) struct Scorer {
    score_fn: fn(&Scorer, &[u64]) -> f64,

    /// Total count, as a float.
    total: f64,

    /// Expected count per bin, `N * p_i`.
    expected: Box<[f64]>,

    /// Running sum of null probabilities.
    cumulative: Box<[f64]>,
}

impl Scorer {
    pub(crate) fn new(kind: StatisticKind, null_probs: &[f64], total: u64) -> Self {
        let total = total as f64;
        let score_fn: fn(&Scorer, &[u64]) -> f64 = match kind {
            StatisticKind::ChiSquare => Scorer::chi_square,
            StatisticKind::G => Scorer::g,
            StatisticKind::KolmogorovSmirnov => Scorer::kolmogorov_smirnov,
        };
        let cumulative = null_probs
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        Scorer {
            score_fn,
            total,
            expected: null_probs.iter().map(|p| total * p).collect(),
            cumulative,
        }
    }

    /// Expected counts per bin.
    pub(crate) fn expected(&self) -> &[f64] {
        &self.expected
    }

    /// Score one set of counts, which must sum to the bound total.
    ///
    /// A total of zero always scores zero.
    #[inline(always)]
    pub(crate) fn score(&self, counts: &[u64]) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }
        (self.score_fn)(self, counts)
    }

    fn chi_square(&self, counts: &[u64]) -> f64 {
        counts
            .iter()
            .zip(self.expected.iter())
            .map(|(o, e)| {
                let diff = *o as f64 - e;
                diff * diff / e
            })
            .sum()
    }

    fn g(&self, counts: &[u64]) -> f64 {
        2.0 * counts
            .iter()
            .zip(self.expected.iter())
            .filter(|(o, _)| **o > 0)
            .map(|(o, e)| {
                let o = *o as f64;
                o * (o / e).ln()
            })
            .sum::<f64>()
    }

    fn kolmogorov_smirnov(&self, counts: &[u64]) -> f64 {
        let mut running = 0_u64;
        let mut stat: f64 = 0.0;
        for (c, p) in counts.iter().zip(self.cumulative.iter()) {
            running += c;
            stat = stat.max((running as f64 / self.total - p).abs());
        }
        stat
    }
}
