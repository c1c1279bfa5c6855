use crate::db::{expense_repository, income_repository, target_repository};
use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::models::target::Target;
use crate::operations::format::format_amount;
use crate::operations::summary::{
    MonthRow, MonthlySummary, category_breakdown, monthly_series, monthly_summary,
    overspent_categories, saving_streak, source_breakdown, target_progress,
};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const DEFAULT_STREAK_THRESHOLD: f64 = 10.0;
const STREAK_THRESHOLD_MIN: f64 = 5.0;
const STREAK_THRESHOLD_MAX: f64 = 50.0;

/// User-typed streak threshold; blank falls back to the default.
pub fn parse_streak_threshold(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_STREAK_THRESHOLD);
    }
    let threshold = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid threshold '{}'. Please provide a number.", raw))?;
    if !(STREAK_THRESHOLD_MIN..=STREAK_THRESHOLD_MAX).contains(&threshold) {
        return Err(format!(
            "Threshold must be between {:.0} and {:.0} percent.",
            STREAK_THRESHOLD_MIN, STREAK_THRESHOLD_MAX
        ));
    }
    Ok(threshold)
}

pub fn run_dashboard(conn: &Connection, streak_threshold: f64) -> Result<(), String> {
    let incomes = income_repository::get_all_incomes(conn)?;
    let expenses = expense_repository::get_all_expenses(conn)?;
    let targets = target_repository::get_all_targets(conn)?;

    let data = build_dashboard(&incomes, &expenses, &targets, streak_threshold);
    render_dashboard(&data)
}

struct DashboardData {
    totals: MonthlySummary,
    series: Vec<MonthRow>,
    categories: Vec<(String, Decimal)>,
    sources: Vec<(String, Decimal)>,
    overspent: Vec<(String, f64)>,
    targets: Vec<(Target, Decimal, f64)>,
    streak: usize,
    streak_threshold: f64,
}

fn build_dashboard(
    incomes: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    targets: &[Target],
    streak_threshold: f64,
) -> DashboardData {
    let totals = monthly_summary(incomes, expenses, None);
    let categories = category_breakdown(expenses);
    let overspent = overspent_categories(&categories, totals.income_total);
    let target_rows = targets
        .iter()
        .map(|t| {
            let (saved, percent) = target_progress(t, incomes, expenses);
            (t.clone(), saved, percent)
        })
        .collect();
    let (streak, _) = saving_streak(incomes, expenses, streak_threshold);

    DashboardData {
        totals,
        series: monthly_series(incomes, expenses),
        categories,
        sources: source_breakdown(incomes),
        overspent,
        targets: target_rows,
        streak,
        streak_threshold,
    }
}

fn streak_badge(count: usize) -> Option<&'static str> {
    if count >= 12 {
        Some("Platinum Saver")
    } else if count >= 6 {
        Some("Gold Saver")
    } else if count >= 3 {
        Some("Silver Saver")
    } else {
        None
    }
}

fn render_dashboard(data: &DashboardData) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Failed to enter alternate screen: {}", e))?;

    let result = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| format!("Failed to initialize terminal: {}", e))?;

        loop {
            terminal
                .draw(|frame| {
                    let size = frame.area();
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Length(3),
                            Constraint::Percentage(45),
                            Constraint::Min(5),
                        ])
                        .split(size);

                    render_totals(frame, layout[0], data);
                    render_trend_chart(frame, layout[1], &data.series);

                    let bottom = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([
                            Constraint::Percentage(34),
                            Constraint::Percentage(33),
                            Constraint::Percentage(33),
                        ])
                        .split(layout[2]);

                    render_breakdowns(frame, bottom[0], data);
                    render_targets(frame, bottom[1], data);
                    render_streak(frame, bottom[2], data);
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                match event::read().map_err(|e| format!("Failed to read input: {}", e))? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    Event::Resize(_, _) => continue,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(|e| format!("Failed to disable raw mode: {}", e))?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| format!("Failed to leave alternate screen: {}", e))?;

    result
}

fn render_totals(frame: &mut ratatui::Frame, area: Rect, data: &DashboardData) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let cards = [
        ("Total Income", &data.totals.income_total, Color::Cyan),
        ("Total Expense", &data.totals.expense_total, Color::Red),
        ("Total Saved", &data.totals.saved, Color::Green),
    ];
    for (idx, (title, amount, color)) in cards.iter().enumerate() {
        let card = Paragraph::new(format_amount(amount))
            .style(Style::default().fg(*color))
            .alignment(Alignment::Center)
            .block(Block::default().title(*title).borders(Borders::ALL));
        frame.render_widget(card, columns[idx]);
    }
}

fn render_trend_chart(frame: &mut ratatui::Frame, area: Rect, series: &[MonthRow]) {
    let block = Block::default()
        .title("Monthly Trend  (press q to exit)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if series.is_empty() {
        let empty = Paragraph::new("No dated transactions yet").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let chart_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let bar_height = chart_area[0].height as usize;
    if bar_height == 0 {
        return;
    }
    let bucket_width = std::cmp::max(1, chart_area[0].width as usize / series.len());

    let max_total = series
        .iter()
        .map(|row| (row.income + row.expense).to_f64().unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..bar_height {
        let level = bar_height - row;
        let mut spans: Vec<Span> = Vec::new();

        for month_row in series {
            let income_cells = scaled_cells(&month_row.income, max_total, bar_height);
            let expense_cells = scaled_cells(&month_row.expense, max_total, bar_height);

            let block = "█".repeat(bucket_width);
            if level <= income_cells {
                spans.push(Span::styled(block, Style::default().fg(Color::Cyan)));
            } else if level <= income_cells + expense_cells {
                spans.push(Span::styled(block, Style::default().fg(Color::Red)));
            } else {
                spans.push(Span::raw(" ".repeat(bucket_width)));
            }
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), chart_area[0]);

    let mut labels: Vec<Span> = Vec::new();
    for month_row in series {
        let mut label = month_row.month.to_string();
        if label.len() > bucket_width {
            label.truncate(bucket_width);
        }
        labels.push(Span::raw(format!("{:width$}", label, width = bucket_width)));
    }
    frame.render_widget(Paragraph::new(Line::from(labels)), chart_area[1]);
}

fn scaled_cells(amount: &Decimal, max_total: f64, bar_height: usize) -> usize {
    let value = amount.to_f64().unwrap_or(0.0);
    ((value / max_total) * bar_height as f64).round() as usize
}

fn render_breakdowns(frame: &mut ratatui::Frame, area: Rect, data: &DashboardData) {
    let block = Block::default()
        .title("Expenses by Category / Income by Source")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (category, amount) in &data.categories {
        let flagged = data.overspent.iter().find(|(c, _)| c == category);
        let mut spans = vec![
            Span::raw(format!("{:12}", category)),
            Span::raw(format!("{:>14}", format_amount(amount))),
        ];
        if let Some((_, pct)) = flagged {
            spans.push(Span::styled(
                format!("  ! {:.1}% of income", pct),
                Style::default().fg(Color::Yellow),
            ));
        }
        lines.push(Line::from(spans));
    }
    if !data.sources.is_empty() {
        lines.push(Line::from(""));
        for (source, amount) in &data.sources {
            lines.push(Line::from(vec![
                Span::styled(format!("{:12}", source), Style::default().fg(Color::Cyan)),
                Span::raw(format!("{:>14}", format_amount(amount))),
            ]));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from("No transactions yet"));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_targets(frame: &mut ratatui::Frame, area: Rect, data: &DashboardData) {
    let block = Block::default().title("Targets").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if data.targets.is_empty() {
        let empty = Paragraph::new("No targets yet").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let rows: Vec<Constraint> = data.targets.iter().map(|_| Constraint::Length(2)).collect();
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(inner);

    for (idx, (target, saved, percent)) in data.targets.iter().enumerate() {
        if idx >= slots.len() {
            break;
        }
        let gauge = Gauge::default()
            .label(format!(
                "{}: {} / {} ({:.1}%)",
                target.name,
                format_amount(saved),
                format_amount(&target.target_amount),
                percent
            ))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .gauge_style(Style::default().fg(Color::Green));
        frame.render_widget(gauge, slots[idx]);
    }
}

fn render_streak(frame: &mut ratatui::Frame, area: Rect, data: &DashboardData) {
    let block = Block::default().title("Saving Consistency").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(format!(
        "Months in a row with saving rate >= {:.0}%: {}",
        data.streak_threshold, data.streak
    ))];
    match streak_badge(data.streak) {
        Some(badge) => lines.push(Line::from(Span::styled(
            badge,
            Style::default().fg(Color::Yellow),
        ))),
        None => lines.push(Line::from("No badge yet - keep saving")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Overall saving rate: {:.1}%",
        data.totals.saving_rate
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
