use serde::{Deserialize, Serialize};

use super::dimension::Dimension;

// ---------------------------------------------------------------------------
// AuctionRecord: One sold lot (query result)
// ---------------------------------------------------------------------------

/// A single auction result.
///
/// Optional fields may be missing in partial exports; the pipeline treats
/// them explicitly instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuctionRecord {
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub color: Option<String>,
    pub leather: Option<String>,
    pub year: Option<i32>,
    pub realized_price: f64,
    pub lower_estimate: Option<f64>,
    pub higher_estimate: Option<f64>,
}

impl AuctionRecord {
    /// Record with only the required fields set.
    pub fn new(brand: impl Into<String>, realized_price: f64) -> Self {
        Self {
            brand: brand.into(),
            description: String::new(),
            color: None,
            leather: None,
            year: None,
            realized_price,
            lower_estimate: None,
            higher_estimate: None,
        }
    }

    /// The record's value for `dimension`, rendered as text.
    pub fn dimension_value(&self, dimension: Dimension) -> Option<String> {
        match dimension {
            Dimension::Brand => Some(self.brand.clone()),
            Dimension::Color => self.color.clone(),
            Dimension::Leather => self.leather.clone(),
            Dimension::Year => self.year.map(|y| y.to_string()),
        }
    }

    /// Borrowed text value for the categorical dimensions; `None` for `Year`.
    pub fn text_value(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Brand => Some(self.brand.as_str()),
            Dimension::Color => self.color.as_deref(),
            Dimension::Leather => self.leather.as_deref(),
            Dimension::Year => None,
        }
    }

    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Brand => true,
            Dimension::Color => self.color.is_some(),
            Dimension::Leather => self.leather.is_some(),
            Dimension::Year => self.year.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// TopBag: Projection used by the top-N listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TopBag {
    pub brand: String,
    pub description: String,
    pub leather: Option<String>,
    pub color: Option<String>,
    pub realized_price: f64,
}

impl From<&AuctionRecord> for TopBag {
    fn from(record: &AuctionRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            description: record.description.clone(),
            leather: record.leather.clone(),
            color: record.color.clone(),
            realized_price: record.realized_price,
        }
    }
}
