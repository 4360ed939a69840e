//! # Combinatorics
//! Enumeration of the multinomial support and supporting counting functions.
mod compositions;
mod factorial;

pub use compositions::{materialize_compositions, support_size, Compositions};
pub use factorial::{LnFactorials, LN_FACTORIAL_TABLE_LIMIT};
