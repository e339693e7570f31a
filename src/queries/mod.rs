//! Query modules for the auction dashboard.
//!
//! [`AuctionQuery`] reads the auction table through a borrowed
//! [`Connection`](crate::connection::Connection); [`DashboardQuery`] runs the
//! full pipeline over any [`RecordSource`](crate::source::RecordSource).

pub mod auctions;
pub mod dashboard;

pub use auctions::AuctionQuery;
pub use dashboard::{Dashboard, DashboardQuery};
