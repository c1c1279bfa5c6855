use crate::db::{expense_repository, income_repository};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
pub struct NewIncome {
    pub amount: Decimal,
    pub source: String,
    pub date: NaiveDate,
}

#[derive(Debug, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Parse "amount, source, date" into a validated income. Nothing is
/// written on failure.
pub fn parse_income(details: &str) -> Result<NewIncome, String> {
    let parts: Vec<&str> = details.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return Err(format!(
            "Expected 3 fields (amount, source, date) separated by commas but got {}",
            parts.len()
        ));
    }

    let amount = parse_amount(parts[0])?;
    let source = parts[1].to_string();
    if source.is_empty() {
        return Err("Source cannot be empty".to_string());
    }
    let date = parse_date(parts[2])?;

    Ok(NewIncome {
        amount,
        source,
        date,
    })
}

/// Parse "amount, category, description, date"; description may be left
/// blank.
pub fn parse_expense(details: &str) -> Result<NewExpense, String> {
    let parts: Vec<&str> = details.split(',').map(|s| s.trim()).collect();
    if parts.len() != 4 {
        return Err(format!(
            "Expected 4 fields (amount, category, description, date) separated by commas but got {}",
            parts.len()
        ));
    }

    let amount = parse_amount(parts[0])?;
    let category = parts[1].to_string();
    if category.is_empty() {
        return Err("Category cannot be empty".to_string());
    }
    let description = if parts[2].is_empty() {
        None
    } else {
        Some(parts[2].to_string())
    };
    let date = parse_date(parts[3])?;

    Ok(NewExpense {
        amount,
        category,
        description,
        date,
    })
}

pub fn add_income_to_db(conn: &Connection, details: &str) -> Result<i64, String> {
    let income = parse_income(details)?;
    income_repository::add_income(
        conn,
        &income.amount,
        &income.source,
        &income.date.to_string(),
    )
}

pub fn add_expense_to_db(conn: &Connection, details: &str) -> Result<i64, String> {
    let expense = parse_expense(details)?;
    expense_repository::add_expense(
        conn,
        &expense.amount,
        &expense.category,
        expense.description.as_deref(),
        &expense.date.to_string(),
    )
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(raw)
        .map_err(|_| format!("Invalid amount '{}'. Please provide a valid decimal number.", raw))?;
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than 0".to_string());
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Please use YYYY-MM-DD.".to_string())
}
