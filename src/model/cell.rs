use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// A single typed value inside a [`Table`](super::Table).
///
/// `Empty` plays the role of a missing value: it is what unparseable numbers
/// coerce to and what outer concatenation fills gaps with.
#[derive(Debug, Clone, Default)]
pub enum Cell {
    /// Missing value.
    #[default]
    Empty,
    /// Integral number.
    Int(i64),
    /// Real number.
    Float(f64),
    /// Free text.
    Text(String),
}

impl Cell {
    /// Builds a cell from raw text, inferring integers and reals.
    ///
    /// Blank text becomes [`Cell::Empty`].
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Cell::Int(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Cell::Float(value),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Builds a numeric cell from a float, collapsing integral values to `Int`.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Cell::Empty;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Cell::Int(value as i64)
        } else {
            Cell::Float(value)
        }
    }

    /// Coerces the cell to a number. Anything that is not a finite number
    /// becomes [`Cell::Empty`]; this never fails.
    pub fn to_numeric(&self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Int(value) => Cell::Int(*value),
            Cell::Float(value) => Cell::from_f64(*value),
            Cell::Text(text) => {
                let trimmed = text.trim();
                if let Ok(value) = trimmed.parse::<i64>() {
                    Cell::Int(value)
                } else {
                    trimmed
                        .parse::<f64>()
                        .map(Cell::from_f64)
                        .unwrap_or(Cell::Empty)
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a whole year, if it is one.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            Cell::Int(value) => Some(*value),
            Cell::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Int(_) | Cell::Float(_) => 0,
            Cell::Text(_) => 1,
            Cell::Empty => 2,
        }
    }
}

impl Ord for Cell {
    /// Numbers first (Int and Float compare by value), then text, then
    /// missing values.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Int(lhs), Cell::Int(rhs)) => lhs.cmp(rhs),
            (Cell::Text(lhs), Cell::Text(rhs)) => lhs.cmp(rhs),
            (lhs, rhs) if lhs.is_numeric() && rhs.is_numeric() => {
                let lhs = lhs.as_f64().unwrap_or_default();
                let rhs = rhs.as_f64().unwrap_or_default();
                lhs.total_cmp(&rhs)
            }
            (lhs, rhs) => lhs.rank().cmp(&rhs.rank()),
        }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Int(value) => serializer.serialize_i64(*value),
            Cell::Float(value) => serializer.serialize_f64(*value),
            Cell::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}
