//! Mappings between column ordinals of an input and an output of a relational operator.

use crate::error::PropertyError;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Zero-based position of a column in the output of a relational operator.
pub type Ordinal = usize;

/// Translates column ordinals of one operator into column ordinals of another operator
/// (typically across a projection).
pub trait TargetMapping {
    /// Returns the target of the given source ordinal or `None` if the source column
    /// does not exist in the target.
    fn target(&self, source: Ordinal) -> Option<Ordinal>;
}

impl<F> TargetMapping for F
where
    F: Fn(Ordinal) -> Option<Ordinal>,
{
    fn target(&self, source: Ordinal) -> Option<Ordinal> {
        (self)(source)
    }
}

/// A partial mapping from `[0, source_count)` to `[0, target_count)`.
/// Every source has at most one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    targets: Vec<Option<Ordinal>>,
    target_count: usize,
}

impl Mapping {
    /// Creates a mapping that maps every ordinal in `[0, count)` to itself.
    pub fn identity(count: usize) -> Self {
        Mapping {
            targets: (0..count).map(Some).collect(),
            target_count: count,
        }
    }

    /// Creates a mapping for a projection over an input with `source_count` columns.
    /// The i-th output column of the projection reads the input column `projected[i]`.
    /// When an input column is projected several times it is mapped to its first position.
    pub fn projection(source_count: usize, projected: &[Ordinal]) -> Result<Self, PropertyError> {
        let mut targets = vec![None; source_count];
        for (target, source) in projected.iter().copied().enumerate() {
            match targets.get_mut(source) {
                Some(slot) => {
                    if slot.is_none() {
                        *slot = Some(target);
                    }
                }
                None => {
                    let message =
                        format!("Projected column {} does not exist. Number of input columns: {}", source, source_count);
                    return Err(PropertyError::argument(message));
                }
            }
        }
        Ok(Mapping {
            targets,
            target_count: projected.len(),
        })
    }

    /// Creates a mapping that moves every ordinal in `[0, source_count)` by `offset` positions.
    /// Used when columns of an operator become the right side of a join.
    /// Returns an error if the shifted ordinals do not fit into [Ordinal].
    pub fn offset(source_count: usize, offset: usize) -> Result<Self, PropertyError> {
        let target_count = source_count.checked_add(offset).ok_or_else(|| {
            let message = format!("Offset {} is out of range. Number of sources: {}", offset, source_count);
            PropertyError::argument(message)
        })?;
        Ok(Mapping {
            targets: (0..source_count).map(|s| Some(s + offset)).collect(),
            target_count,
        })
    }

    /// Creates a mapping from the given `(source, target)` pairs.
    /// Sources that do not appear in `pairs` have no target.
    pub fn from_pairs<I>(source_count: usize, target_count: usize, pairs: I) -> Result<Self, PropertyError>
    where
        I: IntoIterator<Item = (Ordinal, Ordinal)>,
    {
        let mut targets = vec![None; source_count];
        for (source, target) in pairs {
            if target >= target_count {
                let message = format!("Target ordinal {} is out of range. Number of targets: {}", target, target_count);
                return Err(PropertyError::argument(message));
            }
            match targets.get_mut(source) {
                Some(Some(existing)) => {
                    let message =
                        format!("Source ordinal {} is already mapped to {}. Got another target: {}", source, existing, target);
                    return Err(PropertyError::argument(message));
                }
                Some(slot) => *slot = Some(target),
                None => {
                    let message = format!("Source ordinal {} is out of range. Number of sources: {}", source, source_count);
                    return Err(PropertyError::argument(message));
                }
            }
        }
        Ok(Mapping { targets, target_count })
    }

    /// Returns a mapping that first applies this mapping and then the `next` mapping.
    pub fn compose(&self, next: &Mapping) -> Result<Self, PropertyError> {
        if self.target_count != next.source_count() {
            let message = format!(
                "Can not compose mappings. Number of targets {} does not match the number of sources {}",
                self.target_count,
                next.source_count()
            );
            return Err(PropertyError::argument(message));
        }
        let targets = self.targets.iter().map(|t| t.and_then(|t| next.target(t))).collect();
        Ok(Mapping {
            targets,
            target_count: next.target_count,
        })
    }

    /// Returns the number of source columns.
    pub fn source_count(&self) -> usize {
        self.targets.len()
    }

    /// Returns the number of target columns.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Returns `true` if this mapping maps every source to itself and
    /// the number of sources is equal to the number of targets.
    pub fn is_identity(&self) -> bool {
        self.source_count() == self.target_count
            && self.targets.iter().enumerate().all(|(s, t)| *t == Some(s))
    }
}

impl TargetMapping for Mapping {
    fn target(&self, source: Ordinal) -> Option<Ordinal> {
        self.targets.get(source).copied().flatten()
    }
}

impl Display for Mapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .targets
            .iter()
            .enumerate()
            .filter_map(|(s, t)| t.map(|t| format!("{}->{}", s, t)))
            .join(", ");
        write!(f, "[{}] size={}:{}", pairs, self.source_count(), self.target_count)
    }
}
