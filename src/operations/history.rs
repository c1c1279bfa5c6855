use crate::db::{expense_repository, income_repository};
use crate::models::expense::ExpenseEntry;
use crate::models::income::IncomeEntry;
use crate::operations::format::format_amount;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Color, Constraint, Direction, Layout, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Incomes,
    Expenses,
}

impl Tab {
    fn toggle(self) -> Self {
        match self {
            Tab::Incomes => Tab::Expenses,
            Tab::Expenses => Tab::Incomes,
        }
    }
}

struct HistoryState {
    tab: Tab,
    incomes: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
    table_state: TableState,
}

impl HistoryState {
    fn load(conn: &Connection) -> Result<Self, String> {
        let mut state = Self {
            tab: Tab::Incomes,
            incomes: income_repository::get_all_incomes(conn)?,
            expenses: expense_repository::get_all_expenses(conn)?,
            table_state: TableState::default(),
        };
        state.clamp_selection();
        Ok(state)
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Incomes => self.incomes.len(),
            Tab::Expenses => self.expenses.len(),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        if count == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0).min(count - 1);
            self.table_state.select(Some(selected));
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, count as i64 - 1) as usize;
        self.table_state.select(Some(next));
    }
}

/// Full-screen transaction browser: tab between incomes and expenses,
/// arrows to scroll, `q` to exit. Deletion happens back in the command
/// loop by typed id.
pub fn run_history(conn: &Connection) -> Result<(), String> {
    let mut state = HistoryState::load(conn)?;

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
                    let layout = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Min(3), Constraint::Length(1)])
                        .split(frame.area());

                    render_table(frame, layout[0], &mut state);

                    let help = Paragraph::new(Line::from(
                        "tab: switch  up/down: scroll  q: back",
                    ))
                    .style(Style::default().fg(Color::DarkGray));
                    frame.render_widget(help, layout[1]);
                })
                .map_err(|e| format!("Failed to draw terminal UI: {}", e))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| format!("Failed to poll input: {}", e))?
            {
                if let Event::Key(key) =
                    event::read().map_err(|e| format!("Failed to read input: {}", e))?
                {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Tab => {
                            state.tab = state.tab.toggle();
                            state.clamp_selection();
                        }
                        KeyCode::Up => state.move_selection(-1),
                        KeyCode::Down => state.move_selection(1),
                        _ => {}
                    }
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

fn render_table(frame: &mut ratatui::Frame, area: ratatui::prelude::Rect, state: &mut HistoryState) {
    let (title, header, rows, widths): (&str, Vec<&str>, Vec<Row>, Vec<Constraint>) = match state.tab
    {
        Tab::Incomes => (
            "History - Incomes",
            vec!["id", "date", "source", "amount"],
            state
                .incomes
                .iter()
                .map(|i| {
                    Row::new(vec![
                        Cell::from(i.id.to_string()),
                        Cell::from(i.date.clone()),
                        Cell::from(i.source.clone()),
                        Cell::from(format_amount(&i.amount)),
                    ])
                })
                .collect(),
            vec![
                Constraint::Length(6),
                Constraint::Length(12),
                Constraint::Min(10),
                Constraint::Length(16),
            ],
        ),
        Tab::Expenses => (
            "History - Expenses",
            vec!["id", "date", "category", "description", "amount"],
            state
                .expenses
                .iter()
                .map(|e| {
                    Row::new(vec![
                        Cell::from(e.id.to_string()),
                        Cell::from(e.date.clone()),
                        Cell::from(e.category.clone()),
                        Cell::from(e.description.clone().unwrap_or_default()),
                        Cell::from(format_amount(&e.amount)),
                    ])
                })
                .collect(),
            vec![
                Constraint::Length(6),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Min(10),
                Constraint::Length(16),
            ],
        ),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().fg(Color::Cyan)))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use rust_decimal::Decimal;

    #[test]
    fn test_state_load_selects_first_row() {
        let conn = establish_test_connection().unwrap();
        income_repository::add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        income_repository::add_income(&conn, &Decimal::from(200), "Bonus", "2024-02-10").unwrap();

        let state = HistoryState::load(&conn).unwrap();
        assert_eq!(state.table_state.selected(), Some(0));
        assert_eq!(state.row_count(), 2);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let conn = establish_test_connection().unwrap();
        income_repository::add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        income_repository::add_income(&conn, &Decimal::from(200), "Bonus", "2024-02-10").unwrap();

        let mut state = HistoryState::load(&conn).unwrap();
        state.move_selection(1);
        assert_eq!(state.table_state.selected(), Some(1));
        state.move_selection(1);
        assert_eq!(state.table_state.selected(), Some(1));
        state.move_selection(-5);
        assert_eq!(state.table_state.selected(), Some(0));
    }

    #[test]
    fn test_tab_switch_reclamps_selection() {
        let conn = establish_test_connection().unwrap();
        income_repository::add_income(&conn, &Decimal::from(100), "Gaji", "2024-01-10").unwrap();
        income_repository::add_income(&conn, &Decimal::from(200), "Bonus", "2024-02-10").unwrap();

        let mut state = HistoryState::load(&conn).unwrap();
        state.move_selection(1);

        // Expenses table is empty, selection must clear.
        state.tab = state.tab.toggle();
        state.clamp_selection();
        assert_eq!(state.table_state.selected(), None);
        assert_eq!(state.row_count(), 0);
    }
}
