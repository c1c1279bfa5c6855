use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::models::month::YearMonth;
use crate::models::target::Target;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Share of total income a single category may take before the dashboard
/// flags it as over-spending.
pub const OVERSPEND_PCT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub saved: Decimal,
    pub saving_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: YearMonth,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Totals for one month, or for everything when no month is given. The
/// unfiltered sums are date-blind: a record with a broken date still
/// counts toward them, it only drops out of bucketed views.
pub fn monthly_summary(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    month: Option<YearMonth>,
) -> MonthlySummary {
    let income_total: Decimal = incomes
        .iter()
        .filter(|i| month.is_none() || i.month() == month)
        .map(|i| i.amount)
        .sum();
    let expense_total: Decimal = expenses
        .iter()
        .filter(|e| month.is_none() || e.month() == month)
        .map(|e| e.amount)
        .sum();

    let saved = income_total - expense_total;
    let saving_rate = if income_total > Decimal::ZERO {
        (saved / income_total * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    MonthlySummary {
        income_total,
        expense_total,
        saved,
        saving_rate,
    }
}

/// One row per calendar month that has any income or expense activity,
/// sorted chronologically. Records without a parseable date are skipped.
pub fn monthly_series(incomes: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Vec<MonthRow> {
    let mut months: BTreeMap<YearMonth, (Decimal, Decimal)> = BTreeMap::new();

    for income in incomes {
        if let Some(month) = income.month() {
            months.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO)).0 += income.amount;
        }
    }
    for expense in expenses {
        if let Some(month) = expense.month() {
            months.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO)).1 += expense.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthRow {
            month,
            income,
            expense,
        })
        .collect()
}

pub fn category_breakdown(expenses: &[ExpenseEntry]) -> Vec<(String, Decimal)> {
    sum_by_label(expenses.iter().map(|e| (e.category.as_str(), e.amount)))
}

pub fn source_breakdown(incomes: &[IncomeEntry]) -> Vec<(String, Decimal)> {
    sum_by_label(incomes.iter().map(|i| (i.source.as_str(), i.amount)))
}

fn sum_by_label<'a>(items: impl Iterator<Item = (&'a str, Decimal)>) -> Vec<(String, Decimal)> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for (label, amount) in items {
        *totals.entry(label.to_string()).or_insert(Decimal::ZERO) += amount;
    }

    let mut sorted: Vec<(String, Decimal)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Categories taking more than `OVERSPEND_PCT` of total income, with the
/// percentage each takes. Meaningless without income, so empty then.
pub fn overspent_categories(
    breakdown: &[(String, Decimal)],
    income_total: Decimal,
) -> Vec<(String, f64)> {
    if income_total <= Decimal::ZERO {
        return Vec::new();
    }

    breakdown
        .iter()
        .filter_map(|(category, spent)| {
            let pct = (*spent / income_total * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
            (pct > OVERSPEND_PCT).then(|| (category.clone(), pct))
        })
        .collect()
}

/// Progress toward a target, measured against all-time savings. Every
/// target sees the same global saved total; progress is not scoped to
/// the window between creation and deadline.
pub fn target_progress(
    target: &Target,
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
) -> (Decimal, f64) {
    let saved = total_saved(incomes, expenses);
    let percent = if target.target_amount > Decimal::ZERO {
        ((saved / target.target_amount * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0))
        .clamp(0.0, 100.0)
    } else {
        0.0
    };
    (saved, percent)
}

pub fn total_saved(incomes: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Decimal {
    let income_total: Decimal = incomes.iter().map(|i| i.amount).sum();
    let expense_total: Decimal = expenses.iter().map(|e| e.amount).sum();
    income_total - expense_total
}

/// Consecutive trailing months whose saving rate meets the threshold,
/// walking back from the most recent month with activity. Also returns
/// the full chronological (month, rate) sequence for charting.
pub fn saving_streak(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    threshold_rate: f64,
) -> (usize, Vec<(YearMonth, f64)>) {
    let months: BTreeSet<YearMonth> = incomes
        .iter()
        .filter_map(|i| i.month())
        .chain(expenses.iter().filter_map(|e| e.month()))
        .collect();

    let sequence: Vec<(YearMonth, f64)> = months
        .into_iter()
        .map(|month| {
            let rate = monthly_summary(incomes, expenses, Some(month)).saving_rate;
            (month, rate)
        })
        .collect();

    let mut consecutive = 0;
    for (_, rate) in sequence.iter().rev() {
        if *rate >= threshold_rate {
            consecutive += 1;
        } else {
            break;
        }
    }

    (consecutive, sequence)
}
