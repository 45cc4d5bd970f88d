use crate::error::PropertyError;
use crate::mapping::{Ordinal, TargetMapping};
use crate::properties::{RelTrait, TraitKind};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Partitioning scheme. Describes how rows produced by an operator are distributed between partitions.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum Partitioning {
    /// All rows are in a single partition.
    Singleton,
    /// Rows are spread between several partitions but the scheme is unknown.
    /// As a requirement it is satisfied by every partitioning scheme.
    Random,
    /// Rows are partitioned by the given columns using some scheme.
    Partitioned(Vec<Ordinal>),
    /// Rows are partitioned by ranges of values of the given columns.
    Range(Vec<Ordinal>),
    /// Rows are partitioned by hash values of the given columns.
    Hash(Vec<Ordinal>),
}

impl Partitioning {
    /// Returns `true` if rows partitioned according to this scheme are also partitioned according
    /// to the `required` scheme.
    ///
    /// Rows partitioned by a subset of the required columns are also partitioned by the required columns:
    /// rows that have the same values in the required columns have the same values in the subset
    /// and so they are placed into the same partition. For [range partitioning](Partitioning::Range)
    /// the columns of this scheme must be a prefix of the required columns.
    pub fn satisfies(&self, required: &Partitioning) -> bool {
        use Partitioning::*;
        match (self, required) {
            (_, Random) => true,
            (Singleton, Singleton) => true,
            (Partitioned(this), Partitioned(other))
            | (Hash(this), Partitioned(other))
            | (Range(this), Partitioned(other)) => subset_of(this, other),
            (Hash(this), Hash(other)) => subset_of(this, other),
            (Range(this), Range(other)) => other.starts_with(this),
            _ => false,
        }
    }

    /// Translates the partitioning columns through the given mapping.
    /// If some partitioning column has no target the result is [random](Partitioning::Random) partitioning
    /// because the scheme can not be expressed in terms of the output columns.
    pub fn remap<M>(&self, mapping: &M) -> Partitioning
    where
        M: TargetMapping + ?Sized,
    {
        fn remap_columns<M>(mapping: &M, cols: &[Ordinal]) -> Option<Vec<Ordinal>>
        where
            M: TargetMapping + ?Sized,
        {
            cols.iter().map(|c| mapping.target(*c)).collect()
        }

        let result = match self {
            Partitioning::Singleton => Some(Partitioning::Singleton),
            Partitioning::Random => Some(Partitioning::Random),
            Partitioning::Partitioned(cols) => remap_columns(mapping, cols).map(Partitioning::Partitioned),
            Partitioning::Range(cols) => remap_columns(mapping, cols).map(Partitioning::Range),
            Partitioning::Hash(cols) => remap_columns(mapping, cols).map(Partitioning::Hash),
        };
        result.unwrap_or_else(|| {
            log::trace!("Partitioning {} can not be remapped. Using random partitioning", self);
            Partitioning::Random
        })
    }

    /// Returns this partitioning in its canonical form.
    /// Partitioning is said to be in its canonical form iff:
    /// - The canonical form of [singleton](Partitioning::Singleton) and [random](Partitioning::Random)
    /// partitioning schemes is the same partitioning.
    /// - The canonical form of a [partitioned by columns scheme](Partitioning::Partitioned)
    /// is a partitioning scheme of type [Partitioning::Partitioned]
    /// where its columns are sorted in the ascending order and duplicates are removed.
    /// - The canonical form of a [range partitioning scheme](Partitioning::Range)
    /// is the same partitioning.
    /// - The canonical form of a [hash partitioning scheme](Partitioning::Hash)
    /// is a partitioning scheme of type [Partitioning::Hash]
    /// where its columns are sorted in the ascending order and duplicates are removed.
    pub fn canonical_form(self) -> Partitioning {
        match self {
            Partitioning::Partitioned(mut cols) => {
                cols.sort_unstable();
                cols.dedup();
                Partitioning::Partitioned(cols)
            }
            Partitioning::Hash(mut cols) => {
                cols.sort_unstable();
                cols.dedup();
                Partitioning::Hash(cols)
            }
            _ => self,
        }
    }
}

fn subset_of(this: &[Ordinal], other: &[Ordinal]) -> bool {
    this.iter().all(|c| other.contains(c))
}

impl RelTrait for Partitioning {
    fn kind(&self) -> TraitKind {
        TraitKind::Partitioning
    }

    fn satisfies(&self, required: &Self) -> bool {
        Partitioning::satisfies(self, required)
    }

    fn remap<M>(&self, mapping: &M) -> Self
    where
        M: TargetMapping + ?Sized,
    {
        Partitioning::remap(self, mapping)
    }
}

impl Display for Partitioning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Partitioning::Singleton => write!(f, "single"),
            Partitioning::Random => write!(f, "random"),
            Partitioning::Partitioned(columns) => write!(f, "[{}]", columns.iter().join(", ")),
            Partitioning::Range(columns) => write!(f, "range[{}]", columns.iter().join(", ")),
            Partitioning::Hash(columns) => write!(f, "hash({})", columns.iter().join(", ")),
        }
    }
}

impl FromStr for Partitioning {
    type Err = PropertyError;

    /// Parses the format produced by [Display](Partitioning#impl-Display-for-Partitioning).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let str = s.trim();
        if str == "single" {
            Ok(Partitioning::Singleton)
        } else if str == "random" {
            Ok(Partitioning::Random)
        } else if let Some(cols) = str.strip_prefix("range[").and_then(|c| c.strip_suffix(']')) {
            Ok(Partitioning::Range(parse_columns(s, cols)?))
        } else if let Some(cols) = str.strip_prefix("hash(").and_then(|c| c.strip_suffix(')')) {
            Ok(Partitioning::Hash(parse_columns(s, cols)?))
        } else if let Some(cols) = str.strip_prefix('[').and_then(|c| c.strip_suffix(']')) {
            Ok(Partitioning::Partitioned(parse_columns(s, cols)?))
        } else {
            Err(PropertyError::parse(s, "Unexpected partitioning scheme"))
        }
    }
}

fn parse_columns(input: &str, cols: &str) -> Result<Vec<Ordinal>, PropertyError> {
    if cols.trim().is_empty() {
        return Ok(Vec::new());
    }
    cols.split(',')
        .map(|c| {
            let c = c.trim();
            c.parse::<Ordinal>()
                .map_err(|_| PropertyError::parse(input, format!("Invalid column ordinal '{}'", c)))
        })
        .collect()
}
