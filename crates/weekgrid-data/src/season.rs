//! Season identifiers and their natural order.

use std::{cmp::Ordering, fmt};

/// A season identifier.
///
/// Integer identifiers are stored in canonical form, so `"01"` and `"1"` are
/// the same season. Seasons order numerically when both values are integers,
/// integers before text, and lexically otherwise.
///
/// ```
/// use weekgrid_data::Season;
///
/// let mut seasons: Vec<Season> = ["10", "2", "S1", "1"].into_iter().map(Season::from).collect();
/// seasons.sort();
/// let names: Vec<&str> = seasons.iter().map(Season::as_str).collect();
/// assert_eq!(names, ["1", "2", "10", "S1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season(String);

impl Season {
    /// Creates a season from its identifier, trimming surrounding whitespace.
    ///
    /// Integers are rewritten without sign or leading zeros.
    pub fn new(id: &str) -> Self {
        let id = id.trim();
        match id.parse::<i64>() {
            Ok(number) => Self(number.to_string()),
            Err(_) => Self(id.to_string()),
        }
    }

    /// The season identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<&str> for Season {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
