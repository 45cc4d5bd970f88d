use crate::error::PropertyError;
use crate::mapping::Ordinal;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Direction in which a column is sorted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Direction {
    /// Ascending order. Duplicate values are allowed.
    Ascending,
    /// Strictly ascending order. Every value is greater than the previous one.
    StrictlyAscending,
    /// Descending order. Duplicate values are allowed.
    Descending,
    /// Strictly descending order. Every value is less than the previous one.
    StrictlyDescending,
    /// Equal values are grouped together but groups follow no particular order.
    Clustered,
}

impl Direction {
    /// Returns `true` if this is one of the descending directions.
    pub fn is_descending(&self) -> bool {
        matches!(self, Direction::Descending | Direction::StrictlyDescending)
    }

    /// Returns the opposite direction. [Clustered](Direction::Clustered) has no opposite and is returned as is.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::StrictlyAscending => Direction::StrictlyDescending,
            Direction::Descending => Direction::Ascending,
            Direction::StrictlyDescending => Direction::StrictlyAscending,
            Direction::Clustered => Direction::Clustered,
        }
    }

    /// Returns the null direction used when it is not specified explicitly.
    pub fn default_null_direction(&self) -> NullDirection {
        match self {
            Direction::Ascending | Direction::StrictlyAscending => NullDirection::Last,
            Direction::Descending | Direction::StrictlyDescending => NullDirection::First,
            Direction::Clustered => NullDirection::Unspecified,
        }
    }

    /// Returns the abbreviation used in the textual form of an ordering.
    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::StrictlyAscending => "SASC",
            Direction::Descending => "DESC",
            Direction::StrictlyDescending => "SDESC",
            Direction::Clustered => "CLU",
        }
    }

    fn from_short_name(s: &str) -> Option<Direction> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Some(Direction::Ascending),
            "SASC" => Some(Direction::StrictlyAscending),
            "DESC" => Some(Direction::Descending),
            "SDESC" => Some(Direction::StrictlyDescending),
            "CLU" => Some(Direction::Clustered),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Position of nulls in a sorted column.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum NullDirection {
    /// Nulls are placed before non-null values.
    First,
    /// Nulls are placed after non-null values.
    Last,
    /// Position of nulls is not specified.
    Unspecified,
}

impl NullDirection {
    /// Returns `true` if nulls are placed before non-null values.
    pub fn nulls_first(&self) -> bool {
        matches!(self, NullDirection::First)
    }

    fn from_name(s: &str) -> Option<NullDirection> {
        match s.to_ascii_uppercase().as_str() {
            "FIRST" => Some(NullDirection::First),
            "LAST" => Some(NullDirection::Last),
            "UNSPECIFIED" => Some(NullDirection::Unspecified),
            _ => None,
        }
    }
}

impl Display for NullDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NullDirection::First => write!(f, "FIRST"),
            NullDirection::Last => write!(f, "LAST"),
            NullDirection::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

/// Specifies how a single column is sorted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FieldCollation {
    ordinal: Ordinal,
    direction: Direction,
    null_direction: NullDirection,
}

impl FieldCollation {
    /// Ascending ordering of the given column.
    pub fn new(ordinal: Ordinal) -> Self {
        FieldCollation::with_direction(ordinal, Direction::Ascending)
    }

    /// Ordering of the given column in the given direction. Uses the default null direction of `direction`.
    pub fn with_direction(ordinal: Ordinal, direction: Direction) -> Self {
        FieldCollation::with_null_direction(ordinal, direction, direction.default_null_direction())
    }

    /// Ordering of the given column with explicit direction and null direction.
    pub fn with_null_direction(ordinal: Ordinal, direction: Direction, null_direction: NullDirection) -> Self {
        FieldCollation {
            ordinal,
            direction,
            null_direction,
        }
    }

    /// Returns the ordinal of the sorted column.
    pub fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the position of nulls.
    pub fn null_direction(&self) -> NullDirection {
        self.null_direction
    }

    /// Returns the same ordering applied to another column.
    pub fn with_ordinal(self, ordinal: Ordinal) -> FieldCollation {
        FieldCollation { ordinal, ..self }
    }

    /// Returns the ordering in the opposite direction.
    /// If nulls use the default position of the current direction they are moved
    /// to the default position of the reversed direction.
    pub fn reverse(self) -> FieldCollation {
        let direction = self.direction.reverse();
        let null_direction = if self.null_direction == self.direction.default_null_direction() {
            direction.default_null_direction()
        } else {
            self.null_direction
        };
        FieldCollation::with_null_direction(self.ordinal, direction, null_direction)
    }
}

impl Display for FieldCollation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let default_nulls = self.null_direction == self.direction.default_null_direction();
        if self.direction == Direction::Ascending && default_nulls {
            return write!(f, "{}", self.ordinal);
        }
        write!(f, "{} {}", self.ordinal, self.direction)?;
        if !default_nulls {
            write!(f, " {}", self.null_direction)?;
        }
        Ok(())
    }
}

impl FromStr for FieldCollation {
    type Err = PropertyError;

    /// Parses `<ordinal> [ASC|SASC|DESC|SDESC|CLU] [FIRST|LAST|UNSPECIFIED]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let ordinal = match parts.next() {
            Some(ordinal) => ordinal
                .parse::<Ordinal>()
                .map_err(|_| PropertyError::parse(s, format!("Invalid column ordinal '{}'", ordinal)))?,
            None => return Err(PropertyError::parse(s, "Column ordinal is not specified")),
        };
        let direction = match parts.next() {
            Some(name) => Direction::from_short_name(name)
                .ok_or_else(|| PropertyError::parse(s, format!("Unexpected sort direction '{}'", name)))?,
            None => Direction::Ascending,
        };
        let null_direction = match parts.next() {
            Some(name) => NullDirection::from_name(name)
                .ok_or_else(|| PropertyError::parse(s, format!("Unexpected null direction '{}'", name)))?,
            None => direction.default_null_direction(),
        };
        if let Some(extra) = parts.next() {
            return Err(PropertyError::parse(s, format!("Unexpected token '{}'", extra)));
        }
        Ok(FieldCollation::with_null_direction(ordinal, direction, null_direction))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascending_by_default() {
        let col = FieldCollation::new(1);

        assert_eq!(col.ordinal(), 1, "ordinal");
        assert_eq!(col.direction(), Direction::Ascending, "direction");
        assert_eq!(col.null_direction(), NullDirection::Last, "nulls");
        assert!(!col.null_direction().nulls_first());

        expect_format(&col, "1");
    }

    #[test]
    fn descending() {
        let col = FieldCollation::with_direction(2, Direction::Descending);

        assert!(col.direction().is_descending(), "desc");
        assert_eq!(col.null_direction(), NullDirection::First, "nulls");

        expect_format(&col, "2 DESC");
    }

    #[test]
    fn explicit_null_direction() {
        let col = FieldCollation::with_null_direction(0, Direction::Descending, NullDirection::Last);
        expect_format(&col, "0 DESC LAST");

        let col = FieldCollation::with_null_direction(0, Direction::Ascending, NullDirection::First);
        expect_format(&col, "0 ASC FIRST");

        let col = FieldCollation::with_direction(3, Direction::Clustered);
        expect_format(&col, "3 CLU");
    }

    #[test]
    fn reverse() {
        let col = FieldCollation::new(1).reverse();
        assert_eq!(col, FieldCollation::with_direction(1, Direction::Descending));

        let col = FieldCollation::with_direction(1, Direction::StrictlyDescending).reverse();
        assert_eq!(col, FieldCollation::with_direction(1, Direction::StrictlyAscending));

        let col = FieldCollation::with_null_direction(1, Direction::Ascending, NullDirection::First).reverse();
        assert_eq!(col, FieldCollation::with_null_direction(1, Direction::Descending, NullDirection::First));

        let col = FieldCollation::with_direction(1, Direction::Clustered);
        assert_eq!(col.reverse(), col, "clustered");
    }

    #[test]
    fn with_ordinal() {
        let col = FieldCollation::with_direction(1, Direction::Descending).with_ordinal(5);
        assert_eq!(col, FieldCollation::with_direction(5, Direction::Descending));
    }

    #[test]
    fn parse() {
        fn expect_parsed(s: &str, expected: FieldCollation) {
            let actual: FieldCollation = s.parse().unwrap();
            assert_eq!(actual, expected, "{}", s);
        }

        expect_parsed("0", FieldCollation::new(0));
        expect_parsed(" 4 desc ", FieldCollation::with_direction(4, Direction::Descending));
        expect_parsed("1 SASC", FieldCollation::with_direction(1, Direction::StrictlyAscending));
        expect_parsed(
            "2 DESC LAST",
            FieldCollation::with_null_direction(2, Direction::Descending, NullDirection::Last),
        );
        expect_parsed(
            "3 CLU unspecified",
            FieldCollation::with_null_direction(3, Direction::Clustered, NullDirection::Unspecified),
        );
    }

    #[test]
    fn parse_errors() {
        fn expect_error(s: &str) {
            let result = s.parse::<FieldCollation>();
            assert!(matches!(result, Err(PropertyError::Parse(_))), "{}: {:?}", s, result);
        }

        expect_error("");
        expect_error("a");
        expect_error("-1");
        expect_error("1 UP");
        expect_error("1 ASC NOWHERE");
        expect_error("1 ASC FIRST LAST");
    }

    fn expect_format(col: &FieldCollation, expected: &str) {
        let actual = format!("{}", col);
        assert_eq!(actual, expected);

        let parsed: FieldCollation = actual.parse().unwrap();
        assert_eq!(&parsed, col, "parse {}", actual);
    }
}
