use crate::models::{AuctionRecord, TopBag};

/// The `n` highest realized prices, descending.
///
/// Equal prices keep their input order.
pub fn top_n(records: &[AuctionRecord], n: usize) -> Vec<TopBag> {
    let mut ranked: Vec<&AuctionRecord> = records.iter().collect();
    // `sort_by` is stable, which gives the tie-break for free.
    ranked.sort_by(|a, b| b.realized_price.total_cmp(&a.realized_price));
    ranked.into_iter().take(n).map(TopBag::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(brand: &str, description: &str, price: f64) -> AuctionRecord {
        AuctionRecord {
            description: description.to_string(),
            ..AuctionRecord::new(brand, price)
        }
    }

    #[test]
    fn second_hermes_outranks_chanel() {
        let records = vec![
            lot("Hermès", "Birkin 30", 12000.0),
            lot("Chanel", "Classic Flap", 8000.0),
            lot("Hermès", "Kelly 28", 15000.0),
        ];
        let top = top_n(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].brand.as_str(), top[0].realized_price), ("Hermès", 15000.0));
        assert_eq!((top[1].brand.as_str(), top[1].realized_price), ("Hermès", 12000.0));
    }

    #[test]
    fn ties_keep_source_order() {
        let records = vec![
            lot("Dior", "first", 500.0),
            lot("Fendi", "big", 900.0),
            lot("Prada", "second", 500.0),
        ];
        let descriptions: Vec<_> = top_n(&records, 10)
            .into_iter()
            .map(|b| b.description)
            .collect();
        assert_eq!(descriptions, vec!["big", "first", "second"]);
    }

    #[test]
    fn shorter_than_n_and_empty() {
        let records = vec![lot("Dior", "only", 1.0)];
        assert_eq!(top_n(&records, 10).len(), 1);
        assert!(top_n(&[], 10).is_empty());
        assert!(top_n(&records, 0).is_empty());
    }
}
