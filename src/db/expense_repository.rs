use crate::models::expense::ExpenseEntry;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn add_expense(
    conn: &Connection,
    amount: &Decimal,
    category: &str,
    description: Option<&str>,
    date: &str,
) -> Result<i64, String> {
    conn.execute(
        "INSERT INTO expenses (amount, category, description, date) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![amount.to_string(), category, description, date],
    )
    .map_err(|e| format!("Failed to insert expense: {}", e))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_expenses(conn: &Connection) -> Result<Vec<ExpenseEntry>, String> {
    let mut stmt = conn
        .prepare("SELECT id, amount, category, description, date FROM expenses ORDER BY date DESC")
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let expense_iter = stmt
        .query_map([], |row| {
            let amount_str: String = row.get(1)?;
            Ok(ExpenseEntry {
                id: row.get(0)?,
                amount: Decimal::from_str(&amount_str)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                category: row.get(2)?,
                description: row.get(3)?,
                date: row.get(4)?,
            })
        })
        .map_err(|e| format!("Failed to query expenses: {}", e))?;

    let mut expenses = Vec::new();
    for expense in expense_iter {
        expenses.push(expense.map_err(|e| format!("Failed to parse expense: {}", e))?);
    }
    Ok(expenses)
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<(), String> {
    conn.execute("DELETE FROM expenses WHERE id = ?1", [id])
        .map_err(|e| format!("Failed to delete expense: {}", e))?;
    Ok(())
}

pub fn delete_all_expenses(conn: &Connection) -> Result<(), String> {
    conn.execute("DELETE FROM expenses", [])
        .map_err(|e| format!("Failed to clear expenses: {}", e))?;
    Ok(())
}
