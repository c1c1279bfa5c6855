use crate::db::{expense_repository, income_repository, target_repository};
use crate::export;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Write the XLSX dump, the PDF summary, and the raw database backup
/// into `out_dir`, returning the created paths.
pub fn write_exports(
    conn: &Connection,
    db_path: &Path,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, String> {
    let incomes = income_repository::get_all_incomes(conn)?;
    let expenses = expense_repository::get_all_expenses(conn)?;
    let targets = target_repository::get_all_targets(conn)?;

    let workbook = export::xlsx::export_workbook(&incomes, &expenses, &targets)?;
    let summary = export::pdf::export_summary_pdf(&incomes, &expenses)?;
    let backup = export::read_backup(db_path)?;

    let files = [
        ("smart_money_export.xlsx", workbook),
        ("smart_money_summary.pdf", summary),
        ("smart_money_backup.db", backup),
    ];

    std::fs::create_dir_all(out_dir)
        .map_err(|e| format!("Failed to create '{}': {}", out_dir.display(), e))?;

    let mut written = Vec::new();
    for (name, bytes) in files {
        let path = out_dir.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_connection;
    use crate::db::income_repository;
    use rust_decimal::Decimal;

    #[test]
    fn test_write_exports_creates_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("smart_money.db");
        let conn = establish_connection(&db_path).unwrap();
        income_repository::add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();

        let written = write_exports(&conn, &db_path, dir.path()).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "missing {}", path.display());
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_write_exports_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("smart_money.db");
        let conn = establish_connection(&db_path).unwrap();

        let out_dir = dir.path().join("missing");
        let written = write_exports(&conn, &db_path, &out_dir).unwrap();
        assert_eq!(written.len(), 3);
        assert!(out_dir.is_dir());
    }

    #[test]
    fn test_write_exports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("smart_money.db");
        let conn = establish_connection(&db_path).unwrap();

        // The output "directory" sits under a plain file, so it can
        // never be created.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = write_exports(&conn, &db_path, &blocker.join("out"));
        assert!(result.is_err());
    }
}
