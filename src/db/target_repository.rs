use crate::models::target::Target;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn add_target(
    conn: &Connection,
    name: &str,
    target_amount: &Decimal,
    target_date: &str,
) -> Result<i64, String> {
    let created_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO targets (name, target_amount, target_date, created_at) VALUES (?1, ?2, ?3, ?4)",
        [name, &target_amount.to_string(), target_date, &created_at],
    )
    .map_err(|e| format!("Failed to insert target: {}", e))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_targets(conn: &Connection) -> Result<Vec<Target>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, target_amount, target_date, created_at FROM targets \
             ORDER BY created_at DESC",
        )
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let target_iter = stmt
        .query_map([], |row| {
            let amount_str: String = row.get(2)?;
            Ok(Target {
                id: row.get(0)?,
                name: row.get(1)?,
                target_amount: Decimal::from_str(&amount_str)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                target_date: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .map_err(|e| format!("Failed to query targets: {}", e))?;

    let mut targets = Vec::new();
    for target in target_iter {
        targets.push(target.map_err(|e| format!("Failed to parse target: {}", e))?);
    }
    Ok(targets)
}

pub fn delete_target(conn: &Connection, id: i64) -> Result<(), String> {
    conn.execute("DELETE FROM targets WHERE id = ?1", [id])
        .map_err(|e| format!("Failed to delete target: {}", e))?;
    Ok(())
}

pub fn delete_all_targets(conn: &Connection) -> Result<(), String> {
    conn.execute("DELETE FROM targets", [])
        .map_err(|e| format!("Failed to clear targets: {}", e))?;
    Ok(())
}
