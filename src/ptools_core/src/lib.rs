//! # ptools Core
//! Statistical tools for the analysis of crime counts.
//!
//! The center of this crate is the small sample exact test, which compares binned
//! counts against null probabilities by walking every possible composition of the
//! total into the bins, rather than trusting a large sample chi-square approximation.
//! Alongside it live a Poisson fit check for count data, and ranking based accuracy
//! metrics for hot spot forecasts.
//!
//! ```
//!     use ptools_core::prelude::*;
//!
//!     // Leading digits of twelve reported amounts, compared against Benford's law.
//!     let counts = [3, 4, 1, 0, 0, 0, 2, 0, 2];
//!     let benford: Vec<f64> = (1..10).map(|d| (1.0 + 1.0 / d as f64).log10()).collect();
//!     let result = run_test(&counts, &benford, StatisticKind::G, None).unwrap();
//!     assert_eq!(result.total_permutations(), 125970);
//!     assert!(result.p_value() > 0.05);
//! ```
//!

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod combinatorics;
pub mod config;
pub mod errors;
pub mod scoring;
pub mod stats;

/// Common useful imports
pub mod prelude {
    pub use crate::combinatorics::{support_size, Compositions};
    pub use crate::config::{ExactTestConfig, SupportLimit, DEFAULT_SAFETY_THRESHOLD};
    pub use crate::errors::{Error, PtoolsResult};
    pub use crate::scoring::{pai_summary, pai_table};
    pub use crate::stats::{
        check_poisson, run_test, run_test_with_config, run_uniform_test, SmallSampleTestResult,
        StatisticKind,
    };
}
