//! Physical properties of an operator. See [TraitSet].

use itertools::Itertools;
use std::fmt::{Display, Formatter};

use crate::error::PropertyError;
use crate::mapping::TargetMapping;
use crate::properties::{Collation, Partitioning, RelTrait, TraitKind};

/// A physical property of one of the supported kinds.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PhysicalTrait {
    Collation(Collation),
    Partitioning(Partitioning),
}

impl PhysicalTrait {
    /// Returns the kind of this property.
    pub fn kind(&self) -> TraitKind {
        match self {
            PhysicalTrait::Collation(c) => c.kind(),
            PhysicalTrait::Partitioning(p) => p.kind(),
        }
    }

    /// Returns `true` if this property satisfies the `required` property.
    /// A property never satisfies a property of another kind.
    pub fn satisfies(&self, required: &PhysicalTrait) -> bool {
        match (self, required) {
            (PhysicalTrait::Collation(this), PhysicalTrait::Collation(other)) => this.satisfies(other),
            (PhysicalTrait::Partitioning(this), PhysicalTrait::Partitioning(other)) => this.satisfies(other),
            _ => false,
        }
    }

    /// Translates column ordinals referenced by this property through the given mapping.
    pub fn remap<M>(&self, mapping: &M) -> PhysicalTrait
    where
        M: TargetMapping + ?Sized,
    {
        match self {
            PhysicalTrait::Collation(c) => PhysicalTrait::Collation(c.remap(mapping)),
            PhysicalTrait::Partitioning(p) => PhysicalTrait::Partitioning(p.remap(mapping)),
        }
    }
}

impl From<Collation> for PhysicalTrait {
    fn from(c: Collation) -> Self {
        PhysicalTrait::Collation(c)
    }
}

impl From<Partitioning> for PhysicalTrait {
    fn from(p: Partitioning) -> Self {
        PhysicalTrait::Partitioning(p)
    }
}

impl Display for PhysicalTrait {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicalTrait::Collation(c) => write!(f, "{}", c),
            PhysicalTrait::Partitioning(p) => write!(f, "{}", p),
        }
    }
}

/// Physical properties provided or required by an operator.
///
/// An operator can be sorted in several ways at once (for example a merge join is sorted
/// both by the left and by the right join columns), so a trait set holds multiple collations.
/// Collations are kept sorted and without duplicates. Collations that provide no ordering
/// (see [Collation::is_top]) are not stored.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct TraitSet {
    collations: Vec<Collation>,
    partitioning: Option<Partitioning>,
}

impl TraitSet {
    /// Returns a trait set that has no properties.
    pub const fn none() -> Self {
        TraitSet {
            collations: Vec::new(),
            partitioning: None,
        }
    }

    /// Creates a trait set with the given collation.
    pub fn new_with_collation(collation: Collation) -> Self {
        TraitSet::none().with_collation(collation)
    }

    /// Creates a trait set with the given partitioning scheme.
    pub fn new_with_partitioning(partitioning: Partitioning) -> Self {
        TraitSet::none().with_partitioning(partitioning)
    }

    /// Creates a trait set from the given properties.
    /// Returns an error if there are several partitioning schemes.
    pub fn from_traits<I>(traits: I) -> Result<Self, PropertyError>
    where
        I: IntoIterator<Item = PhysicalTrait>,
    {
        let mut result = TraitSet::none();
        for t in traits {
            match t {
                PhysicalTrait::Collation(c) => result = result.with_collation(c),
                PhysicalTrait::Partitioning(p) => {
                    if let Some(existing) = result.partitioning.as_ref() {
                        let message = format!("Trait set already has partitioning {}. Got: {}", existing, p);
                        return Err(PropertyError::argument(message));
                    }
                    result.partitioning = Some(p);
                }
            }
        }
        Ok(result)
    }

    /// Returns `true` if this trait set has no properties.
    pub fn is_empty(&self) -> bool {
        self.collations.is_empty() && self.partitioning.is_none()
    }

    /// Returns the collations.
    pub fn collations(&self) -> &[Collation] {
        &self.collations
    }

    /// Returns the partitioning scheme.
    pub fn partitioning(&self) -> Option<&Partitioning> {
        self.partitioning.as_ref()
    }

    /// Returns an iterator over all properties in this trait set. Collations are returned first.
    pub fn traits(&self) -> impl Iterator<Item = PhysicalTrait> + '_ {
        self.collations
            .iter()
            .cloned()
            .map(PhysicalTrait::Collation)
            .chain(self.partitioning.iter().cloned().map(PhysicalTrait::Partitioning))
    }

    /// Returns a new trait set that also has the given collation.
    pub fn with_collation(self, collation: Collation) -> TraitSet {
        let mut collations = self.collations;
        collations.push(collation);
        TraitSet {
            collations: normalize_collations(collations),
            partitioning: self.partitioning,
        }
    }

    /// Returns a new trait set that has no collations.
    pub fn without_collations(self) -> TraitSet {
        TraitSet {
            collations: Vec::new(),
            partitioning: self.partitioning,
        }
    }

    /// Returns a new trait set with the given partitioning scheme.
    pub fn with_partitioning(self, partitioning: Partitioning) -> TraitSet {
        TraitSet {
            collations: self.collations,
            partitioning: Some(partitioning),
        }
    }

    /// Returns a new trait set that has no partitioning scheme.
    pub fn without_partitioning(self) -> TraitSet {
        TraitSet {
            collations: self.collations,
            partitioning: None,
        }
    }

    /// Returns `true` if an operator that provides properties of this trait set also provides
    /// the `required` properties:
    /// - every required collation is satisfied by at least one collation of this trait set.
    /// A required collation without sort keys is always satisfied.
    /// - the required partitioning scheme (if any) is satisfied by the partitioning scheme of this trait set.
    /// When this trait set has no partitioning scheme only [Partitioning::Random] is satisfied.
    pub fn satisfies(&self, required: &TraitSet) -> bool {
        let collations = required
            .collations
            .iter()
            .filter(|required| !required.is_empty())
            .all(|required| self.collations.iter().any(|c| c.satisfies(required)));

        let partitioning = match (self.partitioning.as_ref(), required.partitioning.as_ref()) {
            (_, None) => true,
            (Some(this), Some(other)) => this.satisfies(other),
            (None, Some(other)) => other == &Partitioning::Random,
        };

        let result = collations && partitioning;
        if !result {
            log::debug!("Trait set {} does not satisfy {}", self, required);
        }
        result
    }

    /// Translates column ordinals referenced by properties of this trait set through the given mapping.
    /// Collations that are not affected by the mapping retain their identity.
    pub fn remap<M>(&self, mapping: &M) -> TraitSet
    where
        M: TargetMapping + ?Sized,
    {
        let collations = self.collations.iter().map(|c| c.remap(mapping)).collect();
        TraitSet {
            collations: normalize_collations(collations),
            partitioning: self.partitioning.as_ref().map(|p| p.remap(mapping)),
        }
    }
}

fn normalize_collations(mut collations: Vec<Collation>) -> Vec<Collation> {
    collations.retain(|c| !c.is_top());
    collations.sort();
    collations.dedup();
    collations
}

impl Display for TraitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        if !self.collations.is_empty() {
            write!(f, " collations: {}", self.collations.iter().join(", "))?;
        }
        if let Some(partitioning) = self.partitioning.as_ref() {
            write!(f, " partitioning: {}", partitioning)?;
        }
        write!(f, " }}")
    }
}
