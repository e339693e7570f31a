//! Async wrapper tests. Run with `--features async`.

#![cfg(feature = "async")]

mod common;

use handbag_auctions::{AsyncHandbagAuctions, Dimension, FilterSpec};

#[tokio::test]
async fn dashboard_runs_on_blocking_pool() {
    let auctions = AsyncHandbagAuctions::from_sync(common::setup_sample_db());

    let dashboard = auctions
        .dashboard(FilterSpec::eq(Dimension::Brand, "Chanel"))
        .await
        .unwrap();
    assert_eq!(dashboard.stats.total_items, 2);
    assert_eq!(dashboard.stats.avg_price, 6500.0);
}

#[tokio::test]
async fn clones_share_the_database() {
    let auctions = AsyncHandbagAuctions::from_sync(common::setup_sample_db());
    let other = auctions.clone();

    let brands = other.filter_options(Dimension::Brand).await.unwrap();
    assert_eq!(brands[0], "All Brands");
    assert_eq!(auctions.top_bags(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn builder_opens_in_memory_database() {
    let auctions = AsyncHandbagAuctions::builder().in_memory().build().await.unwrap();
    let err = auctions.summary_stats(FilterSpec::All).await.unwrap_err();
    assert!(err.is_data_access());
}
