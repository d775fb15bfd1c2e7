//! Mapping of source headers onto canonical fields.
//!
//! Input files label their columns in the language of whoever produced them.
//! A [`ColumnMapping`] translates those headers to the four [`Field`]s the
//! aggregator needs. Headers that already carry a canonical name are accepted
//! without an entry in the mapping.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::DataError;

/// The canonical fields of a prediction record, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Field {
    Season,
    Week,
    PredictedElim,
    ActualElim,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 4] = [
        Field::Season,
        Field::Week,
        Field::PredictedElim,
        Field::ActualElim,
    ];

    /// The canonical column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Season => "Season",
            Self::Week => "Week",
            Self::PredictedElim => "PredictedElim",
            Self::ActualElim => "ActualElim",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Field {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or("unknown field")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source header → canonical field table.
///
/// Deserializes from a TOML table such as `{ "赛季" = "Season" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    map: IndexMap<String, Field>,
}

impl ColumnMapping {
    /// Creates a mapping from `(source header, field)` pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Field)>,
        S: Into<String>,
    {
        Self {
            map: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the canonical field for a source header.
    pub fn field_for(&self, header: &str) -> Option<Field> {
        self.map
            .get(header)
            .copied()
            .or_else(|| header.parse().ok())
    }

    /// Iterates over the explicit entries of the mapping.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Field)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resolves the position of every field in `headers`.
    ///
    /// When two headers map to the same field the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingColumns`] naming every field that no
    /// header maps to.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ColumnIndices, DataError> {
        let mut found: [Option<usize>; 4] = [None; 4];

        for (position, header) in headers.iter().enumerate() {
            if let Some(field) = self.field_for(header.as_ref()) {
                let slot = &mut found[field.index()];
                if slot.is_none() {
                    *slot = Some(position);
                }
            }
        }

        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| found[field.index()].is_none())
            .collect();

        match found {
            [Some(season), Some(week), Some(predicted), Some(actual)] => Ok(ColumnIndices {
                season,
                week,
                predicted,
                actual,
            }),
            _ => Err(DataError::MissingColumns { missing }),
        }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::new([
            ("赛季", Field::Season),
            ("周数", Field::Week),
            ("预测淘汰", Field::PredictedElim),
            ("实际淘汰", Field::ActualElim),
        ])
    }
}

/// Column positions of each canonical field within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub season: usize,
    pub week: usize,
    pub predicted: usize,
    pub actual: usize,
}
