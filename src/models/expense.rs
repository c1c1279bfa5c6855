use crate::models::month::YearMonth;
use rust_decimal::Decimal;

/// Suggested expense categories, shown in the add-transaction flow.
/// Free-text categories are also accepted.
pub const CATEGORIES: [&str; 7] = [
    "Makan",
    "Transport",
    "Hiburan",
    "Tagihan",
    "Belanja",
    "Investasi",
    "Lainnya",
];

#[derive(Debug, Clone)]
pub struct ExpenseEntry {
    pub id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
}

impl ExpenseEntry {
    pub fn month(&self) -> Option<YearMonth> {
        YearMonth::parse_date(&self.date)
    }
}
