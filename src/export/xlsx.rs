use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::models::target::Target;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

/// One workbook with a sheet per collection, each a header row plus a
/// direct dump of the current contents. Returns the encoded bytes.
pub fn export_workbook(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    targets: &[Target],
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Incomes")
        .map_err(|e| format!("Failed to name sheet: {}", e))?;
    write_header(sheet, &["id", "amount", "source", "date"])?;
    for (row, income) in incomes.iter().enumerate() {
        let row = row as u32 + 1;
        write_cell_number(sheet, row, 0, income.id as f64)?;
        write_cell_number(sheet, row, 1, income.amount.to_f64().unwrap_or(0.0))?;
        write_cell_string(sheet, row, 2, &income.source)?;
        write_cell_string(sheet, row, 3, &income.date)?;
    }

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Expenses")
        .map_err(|e| format!("Failed to name sheet: {}", e))?;
    write_header(sheet, &["id", "amount", "category", "description", "date"])?;
    for (row, expense) in expenses.iter().enumerate() {
        let row = row as u32 + 1;
        write_cell_number(sheet, row, 0, expense.id as f64)?;
        write_cell_number(sheet, row, 1, expense.amount.to_f64().unwrap_or(0.0))?;
        write_cell_string(sheet, row, 2, &expense.category)?;
        write_cell_string(sheet, row, 3, expense.description.as_deref().unwrap_or(""))?;
        write_cell_string(sheet, row, 4, &expense.date)?;
    }

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Targets")
        .map_err(|e| format!("Failed to name sheet: {}", e))?;
    write_header(
        sheet,
        &["id", "name", "target_amount", "target_date", "created_at"],
    )?;
    for (row, target) in targets.iter().enumerate() {
        let row = row as u32 + 1;
        write_cell_number(sheet, row, 0, target.id as f64)?;
        write_cell_string(sheet, row, 1, &target.name)?;
        write_cell_number(sheet, row, 2, target.target_amount.to_f64().unwrap_or(0.0))?;
        write_cell_string(sheet, row, 3, &target.target_date)?;
        write_cell_string(sheet, row, 4, &target.created_at)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to encode workbook: {}", e))
}

fn write_header(
    sheet: &mut rust_xlsxwriter::Worksheet,
    columns: &[&str],
) -> Result<(), String> {
    for (col, name) in columns.iter().enumerate() {
        write_cell_string(sheet, 0, col as u16, name)?;
    }
    Ok(())
}

fn write_cell_string(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &str,
) -> Result<(), String> {
    sheet
        .write_string(row, col, value)
        .map_err(|e| format!("Failed to write cell: {}", e))?;
    Ok(())
}

fn write_cell_number(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: f64,
) -> Result<(), String> {
    sheet
        .write_number(row, col, value)
        .map_err(|e| format!("Failed to write cell: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn income(id: i64, amount: i64, date: &str) -> IncomeEntry {
        IncomeEntry {
            id,
            amount: Decimal::from(amount),
            source: "Gaji".to_string(),
            date: date.to_string(),
        }
    }

    fn expense(id: i64, amount: i64, date: &str) -> ExpenseEntry {
        ExpenseEntry {
            id,
            amount: Decimal::from(amount),
            category: "Makan".to_string(),
            description: Some("warung".to_string()),
            date: date.to_string(),
        }
    }

    fn target(id: i64, amount: i64) -> Target {
        Target {
            id,
            name: "Liburan".to_string(),
            target_amount: Decimal::from(amount),
            target_date: "2025-06-01".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_workbook_round_trip_preserves_rows_and_amounts() {
        let incomes = vec![income(1, 1_000_000, "2024-01-10"), income(2, 250_000, "2024-02-01")];
        let expenses = vec![expense(1, 400_000, "2024-01-15")];
        let targets = vec![target(1, 5_000_000)];

        let bytes = export_workbook(&incomes, &expenses, &targets).unwrap();

        let mut workbook: Xlsx<Cursor<Vec<u8>>> =
            open_workbook_from_rs(Cursor::new(bytes)).unwrap();

        let sheet = workbook.worksheet_range("Incomes").unwrap();
        // header + 2 rows
        assert_eq!(sheet.rows().count(), 3);
        let amounts: Vec<f64> = sheet
            .rows()
            .skip(1)
            .map(|row| match &row[1] {
                Data::Float(v) => *v,
                Data::Int(v) => *v as f64,
                other => panic!("unexpected amount cell: {:?}", other),
            })
            .collect();
        assert_eq!(amounts, vec![1_000_000.0, 250_000.0]);

        let sheet = workbook.worksheet_range("Expenses").unwrap();
        assert_eq!(sheet.rows().count(), 2);

        let sheet = workbook.worksheet_range("Targets").unwrap();
        assert_eq!(sheet.rows().count(), 2);
    }

    #[test]
    fn test_workbook_with_empty_collections() {
        let bytes = export_workbook(&[], &[], &[]).unwrap();

        let mut workbook: Xlsx<Cursor<Vec<u8>>> =
            open_workbook_from_rs(Cursor::new(bytes)).unwrap();

        for name in ["Incomes", "Expenses", "Targets"] {
            let sheet = workbook.worksheet_range(name).unwrap();
            assert_eq!(sheet.rows().count(), 1, "only the header in {}", name);
        }
    }
}
