use crate::db::{expense_repository, income_repository, target_repository};
use rusqlite::Connection;

/// Clear all three collections unconditionally. There is no undo; the
/// caller is responsible for confirming first.
pub fn reset_all(conn: &Connection) -> Result<(), String> {
    income_repository::delete_all_incomes(conn)?;
    expense_repository::delete_all_expenses(conn)?;
    target_repository::delete_all_targets(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use rust_decimal::Decimal;

    #[test]
    fn test_reset_all_clears_every_collection() {
        let conn = establish_test_connection().unwrap();

        income_repository::add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        expense_repository::add_expense(&conn, &Decimal::from(50), "Makan", None, "2024-01-15")
            .unwrap();
        target_repository::add_target(&conn, "Liburan", &Decimal::from(1000), "2025-01-01")
            .unwrap();

        reset_all(&conn).unwrap();

        assert!(income_repository::get_all_incomes(&conn).unwrap().is_empty());
        assert!(expense_repository::get_all_expenses(&conn).unwrap().is_empty());
        assert!(target_repository::get_all_targets(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_reset_all_on_empty_store() {
        let conn = establish_test_connection().unwrap();
        assert!(reset_all(&conn).is_ok());
    }
}
