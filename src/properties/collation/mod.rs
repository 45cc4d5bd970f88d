//! Collations. Describe how rows produced by an operator are sorted.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use itertools::Itertools;
use triomphe::Arc;

use crate::error::PropertyError;
use crate::mapping::{Ordinal, TargetMapping};
use crate::properties::{RelTrait, TraitKind};

mod field;

pub use field::{Direction, FieldCollation, NullDirection};

/// Sort order of the rows produced by an operator.
///
/// A collation is either *plain* or *reduced*:
/// - A plain collation consists of a single sequence of sort keys.
/// - A reduced collation is produced when some sort keys of the original collation
/// are functionally determined by the preceding keys and were removed. For example
/// `[deptno, empid]` where `empid` is determined by `deptno` can be reduced to `[deptno]`.
/// A reduced collation keeps both sequences so that it satisfies orderings required
/// against either of them.
///
/// Reduced collations are only created by [Collation::reduced] that returns a plain collation
/// when both sequences are the same. A reduced collation is never equal to a plain one.
///
/// A collation is a cheap to clone handle. Clones share the same instance, see [Collation::ptr_eq].
#[derive(Debug, Clone)]
pub struct Collation {
    inner: Arc<CollationRepr>,
}

#[derive(Debug, Eq, PartialEq, Hash)]
enum CollationRepr {
    Plain(Vec<FieldCollation>),
    Reduced {
        current: Vec<FieldCollation>,
        original: Vec<FieldCollation>,
    },
}

impl Collation {
    /// Creates a plain collation from the given sort keys.
    pub fn new(keys: Vec<FieldCollation>) -> Self {
        Collation {
            inner: Arc::new(CollationRepr::Plain(keys)),
        }
    }

    /// Returns a collation that has no sort keys. It is satisfied by every collation.
    pub fn empty() -> Self {
        Collation::new(Vec::new())
    }

    /// Creates a collation where the given columns are sorted in ascending order.
    pub fn of(ordinals: &[Ordinal]) -> Self {
        Collation::new(ordinals.iter().copied().map(FieldCollation::new).collect())
    }

    /// Creates a collation whose sort keys `current` were obtained from the sort keys `original`
    /// by removing keys determined by other keys.
    ///
    /// Returns a plain collation over `current` when both sequences are equal.
    pub fn reduced(current: Vec<FieldCollation>, original: Vec<FieldCollation>) -> Self {
        let repr = if current == original {
            log::trace!("Collation [{}] is not reduced. Using plain collation", current.iter().join(", "));
            CollationRepr::Plain(current)
        } else {
            CollationRepr::Reduced { current, original }
        };
        Collation { inner: Arc::new(repr) }
    }

    /// Returns the sort keys of this collation.
    pub fn keys(&self) -> &[FieldCollation] {
        match &*self.inner {
            CollationRepr::Plain(keys) => keys,
            CollationRepr::Reduced { current, .. } => current,
        }
    }

    /// Returns the ordinals of the sorted columns in the order of the [sort keys](Self::keys).
    pub fn ordinals(&self) -> Vec<Ordinal> {
        self.keys().iter().map(|k| k.ordinal()).collect()
    }

    /// Returns the sort keys this collation was reduced from.
    /// If this collation is not reduced returns the same keys as [keys](Self::keys).
    pub fn original_keys(&self) -> &[FieldCollation] {
        match &*self.inner {
            CollationRepr::Plain(keys) => keys,
            CollationRepr::Reduced { original, .. } => original,
        }
    }

    /// Returns `true` if this collation was reduced from a longer collation.
    pub fn is_reduced(&self) -> bool {
        matches!(&*self.inner, CollationRepr::Reduced { .. })
    }

    /// Returns `true` if this collation has no sort keys.
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Returns `true` if this collation provides no ordering at all: it has no sort keys
    /// and was not reduced from a non-empty collation.
    pub fn is_top(&self) -> bool {
        self.is_empty() && self.original_keys().is_empty()
    }

    /// Returns `true` if both collations are the same instance.
    pub fn ptr_eq(this: &Collation, other: &Collation) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns `true` if rows sorted according to this collation are also sorted according to
    /// the `required` collation.
    ///
    /// A plain collation satisfies the required collation iff the sort keys of the required collation
    /// are a prefix of its sort keys: `[a, b]` satisfies `[a]` but `[a]` does not satisfy `[a, b]`.
    ///
    /// A reduced collation also satisfies the required collation if the required sort keys are
    /// a prefix of the original sort keys.
    pub fn satisfies(&self, required: &Collation) -> bool {
        if Collation::ptr_eq(self, required) {
            return true;
        }
        let required = required.keys();
        match &*self.inner {
            CollationRepr::Plain(keys) => keys.starts_with(required),
            CollationRepr::Reduced { current, original } => {
                current.starts_with(required) || original.starts_with(required)
            }
        }
    }

    /// Translates ordinals of sort keys through the given mapping.
    /// A sort key whose column has no target removes that key and all the keys that follow it.
    ///
    /// When no sort key has changed this method returns the same instance.
    pub fn remap<M>(&self, mapping: &M) -> Collation
    where
        M: TargetMapping + ?Sized,
    {
        match &*self.inner {
            CollationRepr::Plain(keys) => {
                let new_keys = remap_keys(mapping, keys);
                if &new_keys == keys {
                    self.clone()
                } else {
                    let result = Collation::new(new_keys);
                    log::trace!("Remapped collation {} to {}", self, result);
                    result
                }
            }
            CollationRepr::Reduced { current, original } => {
                let new_current = remap_keys(mapping, current);
                let new_original = remap_keys(mapping, original);
                if &new_current == current && &new_original == original {
                    self.clone()
                } else {
                    let result = Collation::reduced(new_current, new_original);
                    log::trace!("Remapped collation {} to {}", self, result);
                    result
                }
            }
        }
    }

    /// Moves every sorted column by `offset` positions.
    /// Keys that can not be moved are truncated the same way [remap](Self::remap) does.
    pub fn shift(&self, offset: usize) -> Collation {
        self.remap(&|ordinal: Ordinal| ordinal.checked_add(offset))
    }

    /// Returns `true` if the leading sort keys of this collation are exactly the given columns
    /// in any order. Duplicate ordinals are ignored.
    pub fn contains_keys(&self, ordinals: &[Ordinal]) -> bool {
        let ordinals: Vec<_> = ordinals.iter().copied().unique().collect();
        let keys = self.keys();
        if ordinals.len() > keys.len() {
            return false;
        }
        let leading = &keys[..ordinals.len()];
        ordinals.iter().all(|o| leading.iter().any(|k| k.ordinal() == *o))
    }

    /// Removes sort keys determined by the sort keys that precede them.
    ///
    /// `is_determined` is called for every sort key with the keys that have been retained so far and
    /// returns `true` if the values of the key are functionally determined by them.
    /// The result remembers the [original keys](Self::original_keys) of this collation.
    pub fn reduce<F>(&self, mut is_determined: F) -> Collation
    where
        F: FnMut(&[FieldCollation], &FieldCollation) -> bool,
    {
        let keys = self.keys();
        let mut retained = Vec::with_capacity(keys.len());
        for key in keys {
            if !is_determined(&retained, key) {
                retained.push(*key);
            }
        }
        if retained.len() == keys.len() {
            self.clone()
        } else {
            Collation::reduced(retained, self.original_keys().to_vec())
        }
    }
}

fn remap_keys<M>(mapping: &M, keys: &[FieldCollation]) -> Vec<FieldCollation>
where
    M: TargetMapping + ?Sized,
{
    keys.iter()
        .map_while(|key| mapping.target(key.ordinal()).map(|target| key.with_ordinal(target)))
        .collect()
}

impl RelTrait for Collation {
    fn kind(&self) -> TraitKind {
        TraitKind::Collation
    }

    fn satisfies(&self, required: &Self) -> bool {
        Collation::satisfies(self, required)
    }

    fn remap<M>(&self, mapping: &M) -> Self
    where
        M: TargetMapping + ?Sized,
    {
        Collation::remap(self, mapping)
    }
}

impl PartialEq for Collation {
    fn eq(&self, other: &Self) -> bool {
        Collation::ptr_eq(self, other) || *self.inner == *other.inner
    }
}

impl Eq for Collation {}

impl Hash for Collation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.inner).hash(state)
    }
}

impl PartialOrd for Collation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Collation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.keys()
            .cmp(other.keys())
            .then_with(|| self.original_keys().cmp(other.original_keys()))
    }
}

impl Default for Collation {
    fn default() -> Self {
        Collation::empty()
    }
}

impl Display for Collation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &*self.inner {
            CollationRepr::Plain(keys) => write!(f, "[{}]", keys.iter().join(", ")),
            CollationRepr::Reduced { current, original } => {
                write!(f, "[{}] original=[{}]", current.iter().join(", "), original.iter().join(", "))
            }
        }
    }
}

impl FromStr for Collation {
    type Err = PropertyError;

    /// Parses `[<key>, ...]` or `[<key>, ...] original=[<key>, ...]`.
    /// See [FieldCollation] for the format of a sort key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("original=") {
            Some((current, original)) => {
                let current = parse_keys(current)?;
                let original = parse_keys(original)?;
                Ok(Collation::reduced(current, original))
            }
            None => Ok(Collation::new(parse_keys(s)?)),
        }
    }
}

fn parse_keys(s: &str) -> Result<Vec<FieldCollation>, PropertyError> {
    let keys = s
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| PropertyError::parse(s, "Sort keys must be enclosed in []"))?;
    if keys.trim().is_empty() {
        return Ok(Vec::new());
    }
    keys.split(',').map(|key| key.parse()).collect()
}
