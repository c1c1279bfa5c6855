use crate::db::target_repository;
use crate::models::target::Target;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validate and store a savings target. Rejections happen before any
/// write: empty name, non-positive amount, unparseable deadline.
pub fn add_target_to_db(
    conn: &Connection,
    name: &str,
    amount_input: &str,
    date_input: &str,
) -> Result<i64, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Target name cannot be empty".to_string());
    }

    let amount = Decimal::from_str(amount_input.trim()).map_err(|_| {
        format!(
            "Invalid target amount '{}'. Please provide a valid decimal number.",
            amount_input.trim()
        )
    })?;
    if amount <= Decimal::ZERO {
        return Err("Target amount must be greater than 0".to_string());
    }

    let date = NaiveDate::parse_from_str(date_input.trim(), "%Y-%m-%d")
        .map_err(|_| "Invalid target date format. Please use YYYY-MM-DD.".to_string())?;

    target_repository::add_target(conn, name, &amount, &date.to_string())
}

pub fn list_targets_db(conn: &Connection) -> Result<Vec<Target>, String> {
    target_repository::get_all_targets(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    #[test]
    fn test_add_target_success() {
        let conn = establish_test_connection().unwrap();

        let id = add_target_to_db(&conn, "Liburan", "5000000", "2025-06-01").unwrap();
        assert!(id > 0);

        let targets = list_targets_db(&conn).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "Liburan");
        assert_eq!(targets[0].target_amount, Decimal::from(5_000_000));
    }

    #[test]
    fn test_add_target_rejects_empty_name() {
        let conn = establish_test_connection().unwrap();

        let result = add_target_to_db(&conn, "   ", "100", "2025-06-01");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("name cannot be empty"));
        assert!(list_targets_db(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_add_target_rejects_non_positive_amount() {
        let conn = establish_test_connection().unwrap();

        assert!(add_target_to_db(&conn, "Liburan", "0", "2025-06-01").is_err());
        assert!(add_target_to_db(&conn, "Liburan", "-10", "2025-06-01").is_err());
        assert!(list_targets_db(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_add_target_rejects_bad_date() {
        let conn = establish_test_connection().unwrap();

        let result = add_target_to_db(&conn, "Liburan", "100", "June 2025");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid target date"));
    }
}
