//! Log factorial lookup table for multinomial probabilities.
use statrs::function::factorial::ln_factorial;

/// Largest argument stored in a [`LnFactorials`] table.
///
/// Values past this are evaluated directly through `ln_gamma`, so the table size
/// stays fixed however large the total is.
pub const LN_FACTORIAL_TABLE_LIMIT: u64 = 1 << 16;

/// Precomputed `ln(i!)` for `i` in `0..=max`, with `max` capped at
/// [`LN_FACTORIAL_TABLE_LIMIT`].
///
/// Multinomial probabilities are evaluated in log space, so large totals do not
/// overflow to `inf` before being exponentiated.
#[derive(Debug, Clone)]
pub struct LnFactorials {
    table: Box<[f64]>,
}

impl LnFactorials {
    /// Build the table up to and including `max`, or the table limit if smaller.
    pub fn new(max: u64) -> Self {
        LnFactorials {
            table: (0..=max.min(LN_FACTORIAL_TABLE_LIMIT))
                .map(ln_factorial)
                .collect(),
        }
    }

    /// Largest value the table covers.
    pub fn max(&self) -> u64 {
        (self.table.len() - 1) as u64
    }

    /// `ln(n!)`, falling back to direct evaluation past the end of the table.
    #[inline(always)]
    pub fn get(&self, n: u64) -> f64 {
        match self.table.get(n as usize) {
            Some(v) => *v,
            None => ln_factorial(n),
        }
    }

    /// Log of the multinomial coefficient `N! / prod(c_i!)` where `N = sum(c_i)`.
    ///
    /// Returns `NaN` if the counts sum past `u64::MAX`.
    pub fn ln_multinomial_coefficient(&self, counts: &[u64]) -> f64 {
        let Some(total) = counts.iter().try_fold(0_u64, |acc, c| acc.checked_add(*c)) else {
            return f64::NAN;
        };
        self.get(total) - counts.iter().map(|c| self.get(*c)).sum::<f64>()
    }
}
