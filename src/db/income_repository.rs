use crate::models::income::IncomeEntry;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn add_income(
    conn: &Connection,
    amount: &Decimal,
    source: &str,
    date: &str,
) -> Result<i64, String> {
    conn.execute(
        "INSERT INTO incomes (amount, source, date) VALUES (?1, ?2, ?3)",
        [&amount.to_string(), source, date],
    )
    .map_err(|e| format!("Failed to insert income: {}", e))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_incomes(conn: &Connection) -> Result<Vec<IncomeEntry>, String> {
    let mut stmt = conn
        .prepare("SELECT id, amount, source, date FROM incomes ORDER BY date DESC")
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let income_iter = stmt
        .query_map([], |row| {
            let amount_str: String = row.get(1)?;
            Ok(IncomeEntry {
                id: row.get(0)?,
                amount: Decimal::from_str(&amount_str)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                source: row.get(2)?,
                date: row.get(3)?,
            })
        })
        .map_err(|e| format!("Failed to query incomes: {}", e))?;

    let mut incomes = Vec::new();
    for income in income_iter {
        incomes.push(income.map_err(|e| format!("Failed to parse income: {}", e))?);
    }
    Ok(incomes)
}

pub fn delete_income(conn: &Connection, id: i64) -> Result<(), String> {
    // Deleting an id that is not there is a no-op, not an error.
    conn.execute("DELETE FROM incomes WHERE id = ?1", [id])
        .map_err(|e| format!("Failed to delete income: {}", e))?;
    Ok(())
}

pub fn delete_all_incomes(conn: &Connection) -> Result<(), String> {
    conn.execute("DELETE FROM incomes", [])
        .map_err(|e| format!("Failed to clear incomes: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    #[test]
    fn test_add_income_returns_monotonic_ids() {
        let conn = establish_test_connection().unwrap();

        let first = add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        let second = add_income(&conn, &Decimal::from(200), "Bonus", "2024-01-20").unwrap();

        assert!(first > 0);
        assert!(second > first);
    }

    #[test]
    fn test_get_all_incomes_empty() {
        let conn = establish_test_connection().unwrap();
        assert_eq!(get_all_incomes(&conn).unwrap().len(), 0);
    }

    #[test]
    fn test_get_all_incomes_ordered_by_date_desc() {
        let conn = establish_test_connection().unwrap();

        add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        add_income(&conn, &Decimal::from(200), "Bonus", "2024-03-05").unwrap();
        add_income(&conn, &Decimal::from(300), "Gaji", "2024-02-10").unwrap();

        let incomes = get_all_incomes(&conn).unwrap();
        let dates: Vec<&str> = incomes.iter().map(|i| i.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-02-10", "2024-01-10"]);
    }

    #[test]
    fn test_delete_income_removes_row() {
        let conn = establish_test_connection().unwrap();

        let id = add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        delete_income(&conn, id).unwrap();

        assert!(get_all_incomes(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_delete_income_missing_id_is_noop() {
        let conn = establish_test_connection().unwrap();

        add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        let result = delete_income(&conn, 999);

        assert!(result.is_ok());
        assert_eq!(get_all_incomes(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_listed_ids_are_added_minus_deleted() {
        let conn = establish_test_connection().unwrap();

        let a = add_income(&conn, &Decimal::from(1), "A", "2024-01-01").unwrap();
        let b = add_income(&conn, &Decimal::from(2), "B", "2024-01-02").unwrap();
        let c = add_income(&conn, &Decimal::from(3), "C", "2024-01-03").unwrap();

        delete_income(&conn, b).unwrap();

        let mut ids: Vec<i64> = get_all_incomes(&conn).unwrap().iter().map(|i| i.id).collect();
        ids.sort();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_delete_all_incomes() {
        let conn = establish_test_connection().unwrap();

        add_income(&conn, &Decimal::from(1), "A", "2024-01-01").unwrap();
        add_income(&conn, &Decimal::from(2), "B", "2024-01-02").unwrap();

        delete_all_incomes(&conn).unwrap();
        assert!(get_all_incomes(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_amount_round_trips_exactly() {
        let conn = establish_test_connection().unwrap();
        let amount = Decimal::from_str("1234567.89").unwrap();

        add_income(&conn, &amount, "Gaji", "2024-01-10").unwrap();

        let incomes = get_all_incomes(&conn).unwrap();
        assert_eq!(incomes[0].amount, amount);
    }
}
