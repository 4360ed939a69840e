//! # Statistics
//! Exact and approximate goodness of fit checks for count data.
mod poisson_fit;
mod result;
mod statistic;

pub use exact_test::{
    bin_counts_from_observations, run_test, run_test_with_config, run_uniform_test,
    validate_inputs, PROBABILITY_TOLERANCE,
};
pub use poisson_fit::{check_poisson, PoissonFit, PoissonFitRow, MAX_POISSON_COUNT};
pub use result::SmallSampleTestResult;
pub use statistic::StatisticKind;
