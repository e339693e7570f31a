/// GET /
pub async fn index() -> &'static str {
    "Welcome to the Luxury Handbag Auction Dashboard API"
}
