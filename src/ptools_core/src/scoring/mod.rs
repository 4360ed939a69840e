//! # Scoring
//! Accuracy of hot spot forecasts.
mod pai;

pub use pai::{pai_summary, pai_table, PaiRow, PaiSummary, PaiSummaryRow, PaiTable};
