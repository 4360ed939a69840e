//! # Compositions
//!
//! Every way of dropping `N` indistinguishable events into `k` labeled bins.
//!
//! Compositions are produced in lexicographic order of the count vector, so for
//! `N = 5, k = 2` the sequence is `[0, 5], [1, 4], [2, 3], [3, 2], [4, 1], [5, 0]`.
//! Generation is iterative, one composition at a time in a single reused buffer, so
//! memory is bounded by `k` regardless of how large the support is.
use tracing::debug;

use crate::errors::{Error, PtoolsResult};

/// Number of compositions of `total` into `bins` non-negative parts.
///
/// This is the stars and bars count `C(total + bins - 1, bins - 1)`, computed exactly.
/// Returns `Ok(None)` if the count does not fit inside a `u128`.
///
/// ```
///     use ptools_core::combinatorics::support_size;
///     assert_eq!(support_size(5, 2).unwrap(), Some(6));
///     assert_eq!(support_size(12, 9).unwrap(), Some(125970));
/// ```
pub fn support_size(total: u64, bins: usize) -> PtoolsResult<Option<u128>> {
    if bins < 1 {
        return Err(Error::InvalidDimension(format!(
            "Compositions require at least one bin, got {}.",
            bins
        )));
    }
    let n = total as u128 + bins as u128 - 1;
    let r = ((bins - 1) as u128).min(total as u128);

    // After step i, count == C(n - r + i, i), which never exceeds the final value.
    // Dividing out gcd(count, i) first keeps the product exact and within that bound,
    // so `None` is only returned when C(n, r) itself does not fit in a u128.
    let mut count: u128 = 1;
    for i in 1..=r {
        let g = gcd(count, i);
        count = match (count / g).checked_mul((n - r + i) / (i / g)) {
            Some(c) => c,
            None => return Ok(None),
        };
    }
    Ok(Some(count))
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Lazy, restartable iterator over compositions.
///
/// The first `prefix` bins may be pinned to fixed values, which splits the support
/// into independent chunks that can be walked separately.
#[derive(Debug, Clone)]
pub struct Compositions {
    /// Current composition, the pinned prefix followed by the free bins.
    current: Vec<u64>,

    /// Index of the first free bin.
    start: usize,

    /// Total shared among the free bins.
    free_total: u64,

    /// Compositions not yet produced, if the count fits.
    remaining: Option<u128>,

    started: bool,
    done: bool,
}

impl Compositions {
    /// All compositions of `total` into `bins` parts.
    pub fn new(total: u64, bins: usize) -> PtoolsResult<Self> {
        Compositions::with_prefix(&[], total, bins)
    }

    /// All compositions of `total` into `bins` parts which begin with `prefix`.
    ///
    /// At least one bin must remain free after the prefix, and the prefix may not
    /// already exceed the total.
    pub fn with_prefix(prefix: &[u64], total: u64, bins: usize) -> PtoolsResult<Self> {
        if bins < 1 {
            return Err(Error::InvalidDimension(format!(
                "Compositions require at least one bin, got {}.",
                bins
            )));
        }
        if prefix.len() >= bins {
            return Err(Error::InvalidDimension(format!(
                "Prefix of length {} leaves no free bins out of {}.",
                prefix.len(),
                bins
            )));
        }
        let pinned = prefix
            .iter()
            .try_fold(0_u64, |acc, c| acc.checked_add(*c))
            .ok_or_else(|| Error::ValueError("Prefix sum overflows u64.".into()))?;
        let free_total = total.checked_sub(pinned).ok_or_else(|| {
            Error::ValueError(format!(
                "Prefix sums to {} which exceeds the total of {}.",
                pinned, total
            ))
        })?;

        let mut current = vec![0; bins];
        current[..prefix.len()].copy_from_slice(prefix);
        current[bins - 1] = free_total;

        let remaining = support_size(free_total, bins - prefix.len())?;
        debug!(total, bins, prefix_len = prefix.len(), ?remaining, "composition walk");

        Ok(Compositions {
            current,
            start: prefix.len(),
            free_total,
            remaining,
            started: false,
            done: false,
        })
    }

    /// Total number of compositions this iterator produces from the start.
    pub fn support_size(&self) -> Option<u128> {
        // Cannot fail, the shape was validated on construction.
        support_size(self.free_total, self.current.len() - self.start)
            .ok()
            .flatten()
    }

    /// Number of bins in each composition.
    pub fn bins(&self) -> usize {
        self.current.len()
    }

    /// Restart the enumeration from the first composition.
    pub fn reset(&mut self) {
        let bins = self.current.len();
        self.current[self.start..].iter_mut().for_each(|c| *c = 0);
        self.current[bins - 1] = self.free_total;
        self.remaining = self.support_size();
        self.started = false;
        self.done = false;
    }

    /// Step to the next composition without allocating.
    ///
    /// The returned slice is only valid until the next call.
    pub fn next_slice(&mut self) -> Option<&[u64]> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        if let Some(rem) = self.remaining.as_mut() {
            *rem = rem.saturating_sub(1);
        }
        Some(&self.current)
    }

    /// Move the current buffer to its lexicographic successor.
    ///
    /// Returns false once the final composition, all mass in the first free bin,
    /// has been passed.
    fn advance(&mut self) -> bool {
        let last = self.current.len() - 1;
        if last == self.start {
            return false;
        }
        if self.current[last] > 0 {
            self.current[last - 1] += 1;
            self.current[last] -= 1;
            return true;
        }
        // All free bins between the rightmost non-zero one and the last are zero.
        match (self.start + 1..last).rev().find(|&j| self.current[j] > 0) {
            Some(j) => {
                let moved = self.current[j];
                self.current[j] = 0;
                self.current[j - 1] += 1;
                self.current[last] = moved - 1;
                true
            }
            None => false,
        }
    }
}

impl Iterator for Compositions {
    type Item = Vec<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_slice().map(|c| c.to_vec())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining.map(usize::try_from) {
            Some(Ok(rem)) => (rem, Some(rem)),
            _ => (usize::MAX, None),
        }
    }
}

/// Collect the full support set into memory.
///
/// The support size is computed analytically first, and if it is larger than the
/// `threshold` nothing is enumerated and [`Error::ResourceExceeded`] is returned.
pub fn materialize_compositions(
    total: u64,
    bins: usize,
    threshold: u64,
) -> PtoolsResult<Vec<Vec<u64>>> {
    let size = support_size(total, bins)?;
    match size {
        Some(s) if s <= threshold as u128 => Ok(Compositions::new(total, bins)?.collect()),
        _ => Err(Error::ResourceExceeded {
            support_size: size,
            threshold,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_support_size() {
        assert_eq!(support_size(0, 1).unwrap(), Some(1));
        assert_eq!(support_size(0, 7).unwrap(), Some(1));
        assert_eq!(support_size(9, 1).unwrap(), Some(1));
        assert_eq!(support_size(30, 9).unwrap(), Some(48903492));
        assert_eq!(support_size(100, 20).unwrap(), Some(4_910_371_215_196_105_953_021));
        assert_eq!(support_size(u64::MAX, 1000).unwrap(), None);
        assert!(matches!(support_size(3, 0), Err(Error::InvalidDimension(_))));
    }

    #[test]
    fn test_support_size_near_u128_limit() {
        // C(130, 65) fits in a u128 even though naive running products overflow.
        assert_eq!(
            support_size(65, 66).unwrap(),
            Some(95_067_625_827_960_698_145_584_333_020_095_113_100)
        );
        // C(132, 66) does not.
        assert_eq!(support_size(66, 67).unwrap(), None);
    }

    #[test]
    fn test_two_bins() {
        let comps = Compositions::new(5, 2).unwrap().collect_vec();
        assert_eq!(
            comps,
            vec![
                vec![0, 5],
                vec![1, 4],
                vec![2, 3],
                vec![3, 2],
                vec![4, 1],
                vec![5, 0]
            ]
        );
    }

    #[test]
    fn test_degenerate_shapes() {
        assert_eq!(Compositions::new(7, 1).unwrap().collect_vec(), vec![vec![7]]);
        assert_eq!(
            Compositions::new(0, 4).unwrap().collect_vec(),
            vec![vec![0, 0, 0, 0]]
        );
        assert!(Compositions::new(1, 0).is_err());
    }

    #[test]
    fn test_support_invariants() {
        for total in 0..8_u64 {
            for bins in 1..6 {
                let comps = Compositions::new(total, bins).unwrap().collect_vec();
                let expected = support_size(total, bins).unwrap().unwrap();
                assert_eq!(comps.len() as u128, expected);
                assert!(comps.iter().all(|c| c.len() == bins));
                assert!(comps.iter().all(|c| c.iter().sum::<u64>() == total));

                // Strictly increasing lexicographic order implies no duplicates.
                assert!(comps.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_size_hint_and_reset() {
        let mut comps = Compositions::new(4, 3).unwrap();
        assert_eq!(comps.size_hint(), (15, Some(15)));
        let _ = comps.next();
        let _ = comps.next();
        assert_eq!(comps.size_hint(), (13, Some(13)));
        let first_pass = comps.by_ref().collect_vec();
        assert_eq!(first_pass.len(), 13);
        assert_eq!(comps.next(), None);

        comps.reset();
        assert_eq!(comps.clone().count(), 15);
        assert_eq!(comps.next(), Some(vec![0, 0, 4]));
    }

    #[test]
    fn test_prefix_chunks_cover_support() {
        let total = 6;
        let bins = 4;
        let chunked = (0..=total)
            .flat_map(|first| Compositions::with_prefix(&[first], total, bins).unwrap())
            .collect_vec();
        let full = Compositions::new(total, bins).unwrap().collect_vec();
        assert_eq!(chunked, full);

        assert!(Compositions::with_prefix(&[7], 6, 3).is_err());
        assert!(Compositions::with_prefix(&[1, 2, 3], 6, 3).is_err());
        assert!(matches!(
            Compositions::with_prefix(&[u64::MAX, 1], 6, 3),
            Err(Error::ValueError(_))
        ));
    }

    #[test]
    fn test_materialize() {
        let comps = materialize_compositions(12, 9, 125970).unwrap();
        assert_eq!(comps.len(), 125970);

        assert_eq!(
            materialize_compositions(12, 9, 125969),
            Err(Error::ResourceExceeded {
                support_size: Some(125970),
                threshold: 125969
            })
        );
        assert!(matches!(
            materialize_compositions(100, 20, 1_000_000),
            Err(Error::ResourceExceeded { .. })
        ));
    }
}
