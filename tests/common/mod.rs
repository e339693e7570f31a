//! Shared test fixtures for the auction integration tests.
//!
//! `setup_sample_db()` opens an in-memory DuckDB database and loads a small
//! `auction_data` table through an NDJSON temp file.

#![allow(dead_code)]

use handbag_auctions::HandbagAuctions;
use std::io::Write;
use tempfile::NamedTempFile;

/// Eight sold lots across five brands.
///
/// Brand averages: Hermès 12000, Chanel 6500, Dior 4000, Gucci 2500,
/// Louis Vuitton 1500. The Chanel Boy Bag has no lower estimate, the Lady
/// Dior no higher estimate, the Gucci no color or leather.
pub fn sample_lots() -> Vec<serde_json::Value> {
    vec![
        lot("Hermès", "Birkin 30", Some("Noir"), Some("Togo"), 2019, 15000.0, Some(12000.0), Some(18000.0)),
        lot("Chanel", "Classic Flap", Some("Noir"), Some("Lambskin"), 2018, 8000.0, Some(6000.0), Some(9000.0)),
        lot("Hermès", "Kelly 28", Some("Gold"), Some("Epsom"), 2020, 12000.0, Some(10000.0), Some(14000.0)),
        lot("Louis Vuitton", "Speedy 30", Some("Brown"), Some("Canvas"), 2018, 1500.0, Some(1000.0), Some(2000.0)),
        lot("Chanel", "Boy Bag", Some("Beige"), Some("Caviar"), 2020, 5000.0, None, Some(6000.0)),
        lot("Dior", "Lady Dior", Some("Noir"), Some("Lambskin"), 2019, 4000.0, Some(3000.0), None),
        lot("Hermès", "Constance 24", Some("Rouge"), Some("Epsom"), 2021, 9000.0, Some(7000.0), Some(11000.0)),
        lot("Gucci", "Jackie 1961", None, None, 2021, 2500.0, Some(2000.0), Some(3000.0)),
    ]
}

#[allow(clippy::too_many_arguments)]
pub fn lot(
    brand: &str,
    description: &str,
    color: Option<&str>,
    leather: Option<&str>,
    year: i32,
    price: f64,
    lower: Option<f64>,
    higher: Option<f64>,
) -> serde_json::Value {
    serde_json::json!({
        "Brand": brand,
        "Description": description,
        "Color": color,
        "Leather": leather,
        "Year": year,
        "Realized Price (USD)": price,
        "Lower Estimate (USD)": lower,
        "Higher Estimate (USD)": higher,
    })
}

/// In-memory database holding [`sample_lots`] in `auction_data`.
pub fn setup_sample_db() -> HandbagAuctions {
    setup_db_with(&sample_lots())
}

/// In-memory database holding `rows` in `auction_data`.
pub fn setup_db_with(rows: &[serde_json::Value]) -> HandbagAuctions {
    let auctions = HandbagAuctions::builder().in_memory().build().unwrap();
    load_rows(&auctions, "auction_data", rows);
    auctions
}

/// Write `rows` as NDJSON to a temp file and register them as `table`.
pub fn load_rows(auctions: &HandbagAuctions, table: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let conn = auctions.connect().unwrap();
    conn.register_table_from_ndjson(table, file.path().to_str().unwrap())
        .unwrap();
    // DuckDB has copied the rows into an in-memory table, so the temp file
    // can go.
}
