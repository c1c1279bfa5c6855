use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::operations::format::format_amount;
use crate::operations::summary::{self, MonthRow};
use chrono::Local;
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rect, Rgb};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

const CHART_LEFT: f32 = 20.0;
const CHART_RIGHT: f32 = 190.0;
const CHART_BOTTOM: f32 = 40.0;
const CHART_HEIGHT: f32 = 150.0;

/// One-page summary: title, generation timestamp, the three headline
/// totals, and a stacked bar of monthly income/expense when there is
/// monthly data. Returns the encoded bytes.
pub fn export_summary_pdf(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
) -> Result<Vec<u8>, String> {
    let totals = summary::monthly_summary(incomes, expenses, None);
    let series = summary::monthly_series(incomes, expenses);

    let (doc, page, layer) = PdfDocument::new(
        "Smart Money Summary",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "summary",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| format!("Failed to load PDF font: {}", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| format!("Failed to load PDF font: {}", e))?;

    layer.use_text("Smart Money - Summary", 18.0, Mm(20.0), Mm(275.0), &bold);
    layer.use_text(
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M")),
        10.0,
        Mm(20.0),
        Mm(267.0),
        &font,
    );

    layer.use_text(
        format!("Total income: {}", format_amount(&totals.income_total)),
        12.0,
        Mm(20.0),
        Mm(255.0),
        &font,
    );
    layer.use_text(
        format!("Total expense: {}", format_amount(&totals.expense_total)),
        12.0,
        Mm(20.0),
        Mm(248.0),
        &font,
    );
    layer.use_text(
        format!("Total saved: {}", format_amount(&totals.saved)),
        12.0,
        Mm(20.0),
        Mm(241.0),
        &font,
    );

    if !series.is_empty() {
        layer.use_text(
            "Monthly income vs expense",
            12.0,
            Mm(20.0),
            Mm(CHART_BOTTOM + CHART_HEIGHT + 38.0),
            &bold,
        );
        draw_stacked_bars(&layer, &font, &series);
    }

    doc.save_to_bytes()
        .map_err(|e| format!("Failed to encode PDF: {}", e))
}

fn draw_stacked_bars(
    layer: &printpdf::PdfLayerReference,
    font: &printpdf::IndirectFontRef,
    series: &[MonthRow],
) {
    let income_color = Color::Rgb(Rgb::new(0.16, 0.45, 0.80, None));
    let expense_color = Color::Rgb(Rgb::new(0.90, 0.49, 0.13, None));

    let max_total = series
        .iter()
        .map(|row| (row.income + row.expense).to_f32().unwrap_or(0.0))
        .fold(0.0_f32, f32::max)
        .max(1.0);

    let slot = (CHART_RIGHT - CHART_LEFT) / series.len() as f32;
    let bar_width = slot * 0.7;

    for (idx, row) in series.iter().enumerate() {
        let x0 = CHART_LEFT + slot * idx as f32 + (slot - bar_width) / 2.0;
        let x1 = x0 + bar_width;

        let income_height = scaled_height(&row.income, max_total);
        let expense_height = scaled_height(&row.expense, max_total);

        if income_height > 0.0 {
            layer.set_fill_color(income_color.clone());
            layer.add_rect(Rect::new(
                Mm(x0),
                Mm(CHART_BOTTOM),
                Mm(x1),
                Mm(CHART_BOTTOM + income_height),
            ));
        }
        if expense_height > 0.0 {
            layer.set_fill_color(expense_color.clone());
            layer.add_rect(Rect::new(
                Mm(x0),
                Mm(CHART_BOTTOM + income_height),
                Mm(x1),
                Mm(CHART_BOTTOM + income_height + expense_height),
            ));
        }

        // Month labels only while they still fit under the bars.
        if slot >= 14.0 {
            layer.use_text(
                row.month.to_string(),
                7.0,
                Mm(x0),
                Mm(CHART_BOTTOM - 5.0),
                font,
            );
        }
    }

    layer.set_fill_color(income_color);
    layer.add_rect(legend_swatch(CHART_LEFT, CHART_BOTTOM + CHART_HEIGHT + 25.0));
    layer.use_text(
        "income",
        9.0,
        Mm(CHART_LEFT + 6.0),
        Mm(CHART_BOTTOM + CHART_HEIGHT + 25.0),
        font,
    );
    layer.set_fill_color(expense_color);
    layer.add_rect(legend_swatch(CHART_LEFT + 30.0, CHART_BOTTOM + CHART_HEIGHT + 25.0));
    layer.use_text(
        "expense",
        9.0,
        Mm(CHART_LEFT + 36.0),
        Mm(CHART_BOTTOM + CHART_HEIGHT + 25.0),
        font,
    );
}

fn scaled_height(amount: &Decimal, max_total: f32) -> f32 {
    let value = amount.to_f32().unwrap_or(0.0);
    (value / max_total) * CHART_HEIGHT
}

fn legend_swatch(x: f32, y: f32) -> Rect {
    Rect::new(Mm(x), Mm(y - 0.5), Mm(x + 4.0), Mm(y + 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(amount: i64, date: &str) -> IncomeEntry {
        IncomeEntry {
            id: 0,
            amount: Decimal::from(amount),
            source: "Gaji".to_string(),
            date: date.to_string(),
        }
    }

    fn expense(amount: i64, date: &str) -> ExpenseEntry {
        ExpenseEntry {
            id: 0,
            amount: Decimal::from(amount),
            category: "Makan".to_string(),
            description: None,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_pdf_has_magic_header() {
        let incomes = vec![income(1_000_000, "2024-01-10")];
        let expenses = vec![expense(400_000, "2024-01-15")];

        let bytes = export_summary_pdf(&incomes, &expenses).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_renders_wide_chart() {
        // Thirteen months squeezes the bar slots below the label cutoff
        // and draws both stacked segments in every slot.
        let mut incomes = Vec::new();
        let mut expenses = Vec::new();
        for month in 1..=12 {
            incomes.push(income(1_000_000, &format!("2024-{:02}-10", month)));
            expenses.push(expense(400_000, &format!("2024-{:02}-15", month)));
        }
        incomes.push(income(1_000_000, "2025-01-10"));
        expenses.push(expense(400_000, "2025-01-15"));

        let bytes = export_summary_pdf(&incomes, &expenses).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_renders_without_monthly_data() {
        // No parseable dates means no chart, but the summary page still
        // encodes.
        let incomes = vec![income(100, "unknown")];

        let bytes = export_summary_pdf(&incomes, &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_renders_empty_collections() {
        let bytes = export_summary_pdf(&[], &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
