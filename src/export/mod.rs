pub mod pdf;
pub mod xlsx;

use std::path::Path;

/// Raw byte-for-byte copy of the database file for the backup export.
pub fn read_backup(db_path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(db_path)
        .map_err(|e| format!("Failed to read database file '{}': {}", db_path.display(), e))
}
