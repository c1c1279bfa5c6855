use crate::db::{expense_repository, income_repository, target_repository};
use rusqlite::Connection;

/// Parse a user-typed id and delete the income. Missing ids delete
/// nothing and report nothing; only a malformed id is an error.
pub fn remove_income_from_db(conn: &Connection, id_input: &str) -> Result<(), String> {
    income_repository::delete_income(conn, parse_id(id_input)?)
}

pub fn remove_expense_from_db(conn: &Connection, id_input: &str) -> Result<(), String> {
    expense_repository::delete_expense(conn, parse_id(id_input)?)
}

pub fn remove_target_from_db(conn: &Connection, id_input: &str) -> Result<(), String> {
    target_repository::delete_target(conn, parse_id(id_input)?)
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid id '{}'. Please provide a whole number.", raw.trim()))
}
