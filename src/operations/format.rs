use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Currency formatting for display and the PDF summary: thousands
/// separators, zero decimals, e.g. 1234567.8 -> "1,234,568".
pub fn format_amount(amount: &Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_i128()
        .unwrap_or(0);
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
