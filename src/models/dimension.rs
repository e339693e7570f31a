use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::AuctionError;

// ---------------------------------------------------------------------------
// Dimension: Categorical field usable for grouping and filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Brand,
    Color,
    Leather,
    Year,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Brand,
        Dimension::Color,
        Dimension::Leather,
        Dimension::Year,
    ];

    /// Column alias in the projected record query.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Brand => "brand",
            Dimension::Color => "color",
            Dimension::Leather => "leather",
            Dimension::Year => "year",
        }
    }

    /// Column name in the source table.
    pub fn source_column(&self) -> &'static str {
        match self {
            Dimension::Brand => config::COL_BRAND,
            Dimension::Color => config::COL_COLOR,
            Dimension::Leather => config::COL_LEATHER,
            Dimension::Year => config::COL_YEAR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Brand => "Brand",
            Dimension::Color => "Color",
            Dimension::Leather => "Leather",
            Dimension::Year => "Year",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Dimension::Brand => "Brands",
            Dimension::Color => "Colors",
            Dimension::Leather => "Leathers",
            Dimension::Year => "Years",
        }
    }

    /// Leading "select everything" entry for filter lists, e.g. `All Brands`.
    pub fn all_sentinel(&self) -> String {
        format!("All {}", self.plural())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| {
                d.label().eq_ignore_ascii_case(trimmed) || d.plural().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| AuctionError::InvalidArgument(format!("unknown dimension: {:?}", s)))
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
