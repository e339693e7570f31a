//! Filter resolution: turns a loosely-typed `(dimension, value)` request into
//! a typed predicate with an optional display ordering.

use log::warn;
use std::fmt;

use crate::config;
use crate::models::{AuctionRecord, Dimension};
use crate::sql_builder::SqlBuilder;

/// At most one equality constraint over a [`Dimension`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterSpec {
    /// No restriction; the whole dataset.
    #[default]
    All,
    /// Exact match on one dimension.
    Eq { dimension: Dimension, value: String },
}

impl FilterSpec {
    /// Equality filter on `dimension`.
    ///
    /// Year values are canonicalized so `" 2019"` and `"2019"` select the
    /// same records. Years that do not parse are kept as-is and match nothing.
    pub fn eq(dimension: Dimension, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = match dimension {
            Dimension::Year => match value.trim().parse::<i32>() {
                Ok(year) => year.to_string(),
                Err(_) => value,
            },
            _ => value,
        };
        FilterSpec::Eq { dimension, value }
    }

    /// Resolve request parameters into a filter.
    ///
    /// A missing dimension, a "no filter" sentinel, a missing value or an
    /// "All ..." listing entry all mean [`FilterSpec::All`]. Unknown
    /// dimension names also fall back to `All`.
    pub fn resolve(dimension: Option<&str>, value: Option<&str>) -> Self {
        let name = match dimension.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return FilterSpec::All,
        };

        if is_no_filter_sentinel(name) {
            return FilterSpec::All;
        }

        let dimension: Dimension = match name.parse() {
            Ok(d) => d,
            Err(_) => {
                warn!("Unknown filter dimension {:?}; using unfiltered data", name);
                return FilterSpec::All;
            }
        };

        match value.map(str::trim) {
            Some(v) if !v.is_empty() && !is_listing_sentinel(dimension, v) => {
                FilterSpec::eq(dimension, v)
            }
            _ => FilterSpec::All,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterSpec::All)
    }

    /// The filtered dimension, if any.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            FilterSpec::All => None,
            FilterSpec::Eq { dimension, .. } => Some(*dimension),
        }
    }

    /// Display ordering for filtered results. Never used for aggregation.
    pub fn order_key(&self) -> Option<Dimension> {
        self.dimension()
    }

    /// Predicate form of the filter.
    pub fn matches(&self, record: &AuctionRecord) -> bool {
        match self {
            FilterSpec::All => true,
            FilterSpec::Eq { dimension, value } => match dimension {
                Dimension::Year => record.year.map(|y| y.to_string()).as_deref() == Some(value.as_str()),
                _ => record.text_value(*dimension) == Some(value.as_str()),
            },
        }
    }

    /// Push the predicate down to SQL over the projected record columns.
    pub fn apply_predicate(&self, qb: &mut SqlBuilder) {
        if let FilterSpec::Eq { dimension, value } = self {
            match dimension {
                Dimension::Year => qb.where_eq("CAST(year AS VARCHAR)", value),
                _ => qb.where_eq(dimension.column(), value),
            };
        }
    }

    /// Push the predicate and the display ordering down to SQL.
    pub fn apply(&self, qb: &mut SqlBuilder) {
        self.apply_predicate(qb);
        if let Some(key) = self.order_key() {
            let clause = format!("{} ASC", key.column());
            qb.order_by(&[clause.as_str()]);
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::All => f.write_str("all"),
            FilterSpec::Eq { dimension, value } => write!(f, "{} = {:?}", dimension, value),
        }
    }
}

/// Stable display sort by `key` ascending; records without the key go last.
pub fn sort_for_display(records: &mut [AuctionRecord], key: Dimension) {
    match key {
        Dimension::Year => records.sort_by_key(|r| (r.year.is_none(), r.year)),
        _ => records.sort_by(|a, b| {
            let (ka, kb) = (a.text_value(key), b.text_value(key));
            (ka.is_none(), ka).cmp(&(kb.is_none(), kb))
        }),
    }
}

fn is_no_filter_sentinel(name: &str) -> bool {
    config::NO_FILTER_SENTINELS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

fn is_listing_sentinel(dimension: Dimension, value: &str) -> bool {
    is_no_filter_sentinel(value)
        || value.eq_ignore_ascii_case(&dimension.all_sentinel())
        || value.eq_ignore_ascii_case(&format!("All {}", dimension.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(brand: &str, year: Option<i32>) -> AuctionRecord {
        AuctionRecord {
            year,
            ..AuctionRecord::new(brand, 1000.0)
        }
    }

    #[test]
    fn missing_or_sentinel_dimension_is_unfiltered() {
        assert_eq!(FilterSpec::resolve(None, Some("Hermès")), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("All"), Some("x")), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("general stats"), None), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("  "), Some("x")), FilterSpec::All);
    }

    #[test]
    fn missing_or_sentinel_value_is_unfiltered() {
        assert_eq!(FilterSpec::resolve(Some("Brand"), None), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("Brand"), Some("")), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("Brand"), Some("All Brands")), FilterSpec::All);
        assert_eq!(FilterSpec::resolve(Some("Color"), Some("All")), FilterSpec::All);
    }

    #[test]
    fn unknown_dimension_falls_back_to_all() {
        assert!(FilterSpec::resolve(Some("Size"), Some("Large")).is_all());
    }

    #[test]
    fn known_dimension_yields_equality_and_order_key() {
        let spec = FilterSpec::resolve(Some("brand"), Some("Chanel"));
        assert_eq!(spec, FilterSpec::eq(Dimension::Brand, "Chanel"));
        assert_eq!(spec.order_key(), Some(Dimension::Brand));
        assert!(spec.matches(&bag("Chanel", None)));
        assert!(!spec.matches(&bag("Hermès", None)));
        assert_eq!(FilterSpec::All.order_key(), None);
    }

    #[test]
    fn year_values_are_canonicalized() {
        let spec = FilterSpec::resolve(Some("Year"), Some(" 2019 "));
        assert_eq!(spec, FilterSpec::eq(Dimension::Year, "2019"));
        assert!(spec.matches(&bag("Chanel", Some(2019))));
        assert!(!spec.matches(&bag("Chanel", None)));
        assert!(!FilterSpec::eq(Dimension::Year, "soon").matches(&bag("Chanel", Some(2019))));
    }

    #[test]
    fn apply_pushes_predicate_and_ordering() {
        let mut qb = SqlBuilder::new("auctions");
        FilterSpec::eq(Dimension::Year, "2020").apply(&mut qb);
        let (sql, params) = qb.build();
        assert!(sql.contains("WHERE CAST(year AS VARCHAR) = ?"));
        assert!(sql.contains("ORDER BY year ASC"));
        assert_eq!(params, vec!["2020"]);
    }

    #[test]
    fn display_sort_puts_missing_values_last() {
        let mut records = vec![bag("B", None), bag("A", Some(2021)), bag("C", Some(2010))];
        sort_for_display(&mut records, Dimension::Year);
        let years: Vec<_> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Some(2010), Some(2021), None]);
    }
}
