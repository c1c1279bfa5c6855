use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Target {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: String,
    /// RFC 3339 timestamp taken at creation; targets list newest first.
    pub created_at: String,
}
