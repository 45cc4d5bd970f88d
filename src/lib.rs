//! Physical properties (traits) used by a cost-based query optimizer to decide whether the output
//! of an operator is sorted or partitioned the way its consumer requires.
//!
//! * [`properties`] Collations, partitioning schemes and trait sets.
//! * [`mapping`] Mappings between column ordinals of operators.
//! * [`error`] Error types.

pub mod error;
pub mod mapping;
pub mod properties;
#[cfg(test)]
pub mod testing;
#[cfg(test)]
mod tests;
