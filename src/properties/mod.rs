//! Physical properties (traits) of relational operators.
//!
//! A physical property describes how the output of an operator is organized: how its rows are
//! [sorted](Collation) or how they are [partitioned](Partitioning). During plan search the optimizer
//! checks whether a property provided by an operator [satisfies](RelTrait::satisfies) the property
//! required by its consumer, and [remaps](RelTrait::remap) properties when an operator changes
//! column ordinals.

use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use crate::mapping::TargetMapping;

pub mod collation;
pub mod partitioning;
pub mod physical;

pub use collation::{Collation, Direction, FieldCollation, NullDirection};
pub use partitioning::Partitioning;
pub use physical::{PhysicalTrait, TraitSet};

/// Kind of a physical property.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TraitKind {
    /// Sort order of rows. See [Collation].
    Collation,
    /// Distribution of rows between partitions. See [Partitioning].
    Partitioning,
}

impl Display for TraitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TraitKind::Collation => write!(f, "collation"),
            TraitKind::Partitioning => write!(f, "partitioning"),
        }
    }
}

/// The contract every kind of physical property implements.
///
/// Implementations are immutable values. Both [satisfies](Self::satisfies) and [remap](Self::remap)
/// are pure functions.
pub trait RelTrait: Debug + Display + Clone + Eq + Hash {
    /// Returns the kind of this property.
    fn kind(&self) -> TraitKind;

    /// Returns `true` if an operator that provides this property also provides the `required` property.
    /// Every property satisfies itself.
    fn satisfies(&self, required: &Self) -> bool;

    /// Translates column ordinals referenced by this property through the given mapping.
    fn remap<M>(&self, mapping: &M) -> Self
    where
        M: TargetMapping + ?Sized;
}
