use crate::models::month::YearMonth;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct IncomeEntry {
    pub id: i64,
    pub amount: Decimal,
    pub source: String,
    /// Stored as an ISO-8601 date string; kept raw so records with
    /// unparseable dates still show up in date-blind totals.
    pub date: String,
}

impl IncomeEntry {
    pub fn month(&self) -> Option<YearMonth> {
        YearMonth::parse_date(&self.date)
    }
}
