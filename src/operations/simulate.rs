use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::models::target::Target;
use crate::operations::summary::total_saved;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Single-period what-if projection: cut average spending by a fixed
/// percentage and estimate months until the target is reached. Averages
/// are per record, not per month; no compounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
    pub reduced_expense: Decimal,
    pub monthly_saving: Decimal,
    pub remaining: Decimal,
    /// `None` means the target is unreachable at zero projected saving.
    pub months_needed: Option<f64>,
}

pub fn project(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    target: &Target,
    reduction_pct: u32,
) -> Result<Projection, String> {
    if reduction_pct > 50 {
        return Err(format!(
            "Reduction must be between 0 and 50 percent, got {}",
            reduction_pct
        ));
    }

    let avg_income = average(incomes.iter().map(|i| i.amount));
    let avg_expense = average(expenses.iter().map(|e| e.amount));

    let reduced_expense =
        avg_expense * (Decimal::from(100 - reduction_pct) / Decimal::ONE_HUNDRED);
    let monthly_saving = (avg_income - reduced_expense).max(Decimal::ZERO);
    let remaining = (target.target_amount - total_saved(incomes, expenses)).max(Decimal::ZERO);

    let months_needed = if monthly_saving > Decimal::ZERO {
        (remaining / monthly_saving).to_f64()
    } else {
        None
    };

    Ok(Projection {
        avg_income,
        avg_expense,
        reduced_expense,
        monthly_saving,
        remaining,
        months_needed,
    })
}

fn average(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;
    for amount in amounts {
        sum += amount;
        count += 1;
    }
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(amount: i64) -> IncomeEntry {
        IncomeEntry {
            id: 0,
            amount: Decimal::from(amount),
            source: "Gaji".to_string(),
            date: "2024-01-10".to_string(),
        }
    }

    fn expense(amount: i64) -> ExpenseEntry {
        ExpenseEntry {
            id: 0,
            amount: Decimal::from(amount),
            category: "Makan".to_string(),
            description: None,
            date: "2024-01-15".to_string(),
        }
    }

    fn target(amount: i64) -> Target {
        Target {
            id: 1,
            name: "Liburan".to_string(),
            target_amount: Decimal::from(amount),
            target_date: "2025-06-01".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_project_basic_formula() {
        // avg income 1000, avg expense 600, 10% cut -> 540 spent,
        // 460 saved per month; 2000 target minus 400 saved = 1600 left.
        let incomes = vec![income(1000)];
        let expenses = vec![expense(600)];

        let projection = project(&incomes, &expenses, &target(2000), 10).unwrap();

        assert_eq!(projection.avg_income, Decimal::from(1000));
        assert_eq!(projection.avg_expense, Decimal::from(600));
        assert_eq!(projection.reduced_expense, Decimal::from(540));
        assert_eq!(projection.monthly_saving, Decimal::from(460));
        assert_eq!(projection.remaining, Decimal::from(1600));
        let months = projection.months_needed.unwrap();
        assert!((months - 1600.0 / 460.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_unreachable_with_no_income() {
        let expenses = vec![expense(100)];

        let projection = project(&[], &expenses, &target(1000), 10).unwrap();

        assert_eq!(projection.avg_income, Decimal::ZERO);
        assert_eq!(projection.monthly_saving, Decimal::ZERO);
        assert_eq!(projection.months_needed, None);
    }

    #[test]
    fn test_project_saving_floored_at_zero() {
        let incomes = vec![income(100)];
        let expenses = vec![expense(500)];

        let projection = project(&incomes, &expenses, &target(1000), 0).unwrap();

        assert_eq!(projection.monthly_saving, Decimal::ZERO);
        assert_eq!(projection.months_needed, None);
    }

    #[test]
    fn test_project_remaining_floored_at_zero() {
        let incomes = vec![income(5000)];

        let projection = project(&incomes, &[], &target(1000), 0).unwrap();

        assert_eq!(projection.remaining, Decimal::ZERO);
        assert_eq!(projection.months_needed, Some(0.0));
    }

    #[test]
    fn test_project_average_over_record_count() {
        let incomes = vec![income(100), income(200), income(300)];

        let projection = project(&incomes, &[], &target(10_000), 0).unwrap();
        assert_eq!(projection.avg_income, Decimal::from(200));
    }

    #[test]
    fn test_project_rejects_reduction_above_50() {
        let result = project(&[], &[], &target(1000), 51);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("between 0 and 50"));
    }
}
