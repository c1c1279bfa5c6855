mod db;
mod export;
mod models;
mod operations;

use clap::Parser;
use models::expense::CATEGORIES;
use operations::add::{add_expense_to_db, add_income_to_db};
use operations::format::format_amount;
use operations::remove::{remove_expense_from_db, remove_income_from_db, remove_target_from_db};
use operations::summary::target_progress;
use rusqlite::Connection;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "smoney", about = "Smart Money - personal finance tracker")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "smart_money.db")]
    db: PathBuf,
}

pub enum UserCommands {
    Dashboard,
    Add,
    History,
    Targets,
    Export,
    Settings,
    Exit,
}

fn main() {
    let cli = Cli::parse();
    println!("Welcome to Smart Money!");
    let conn = db::connection::establish_connection(&cli.db)
        .expect("Failed to open the database");

    loop {
        println!("Please enter a command (dashboard, add, history, targets, export, settings, exit):");

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let command = match check_for_command(parts[0]) {
            Some(command) => command,
            None => {
                println!("Unknown command '{}'.", parts[0]);
                continue;
            }
        };
        match command {
            UserCommands::Dashboard => run_dashboard_flow(&conn),
            UserCommands::Add => run_add_flow(&conn),
            UserCommands::History => {
                if let Err(e) = operations::history::run_history(&conn) {
                    println!("Error rendering history: {}", e);
                } else {
                    run_history_delete_flow(&conn);
                }
            }
            UserCommands::Targets => run_targets_flow(&conn),
            UserCommands::Export => run_export_flow(&conn, &cli.db),
            UserCommands::Settings => run_settings_flow(&conn, &cli.db),
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
        }
    }
}

fn run_dashboard_flow(conn: &Connection) {
    let raw = match prompt("Streak threshold in percent, 5-50 (blank = 10):") {
        Some(raw) => raw,
        None => return,
    };
    let threshold = match operations::dashboard::parse_streak_threshold(&raw) {
        Ok(threshold) => threshold,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    if let Err(e) = operations::dashboard::run_dashboard(conn, threshold) {
        println!("Error rendering dashboard: {}", e);
    }
}

fn run_add_flow(conn: &Connection) {
    println!("Add income or expense? (income/expense):");
    let kind = match read_user_input() {
        Ok(kind) => kind,
        Err(e) => {
            println!("Error reading input: {}", e);
            return;
        }
    };
    match kind.to_lowercase().as_str() {
        "income" => {
            println!("Enter income details in the format:\namount, source, date(YYYY-MM-DD)");
            let details = match read_user_input() {
                Ok(details) => details,
                Err(e) => {
                    println!("Error reading input: {}", e);
                    return;
                }
            };
            match add_income_to_db(conn, &details) {
                Ok(id) => println!("Income saved with id {}.", id),
                Err(e) => println!("Error adding income: {}", e),
            }
        }
        "expense" => {
            println!("Suggested categories: {}", CATEGORIES.join(", "));
            println!(
                "Enter expense details in the format:\namount, category, description(optional), date(YYYY-MM-DD)"
            );
            let details = match read_user_input() {
                Ok(details) => details,
                Err(e) => {
                    println!("Error reading input: {}", e);
                    return;
                }
            };
            match add_expense_to_db(conn, &details) {
                Ok(id) => println!("Expense saved with id {}.", id),
                Err(e) => println!("Error adding expense: {}", e),
            }
        }
        other => println!("Unknown entry type '{}'. Use 'income' or 'expense'.", other),
    }
}

fn run_history_delete_flow(conn: &Connection) {
    println!("Delete an entry? (income/expense, blank to skip):");
    let kind = match read_user_input() {
        Ok(kind) => kind,
        Err(e) => {
            println!("Error reading input: {}", e);
            return;
        }
    };
    match kind.to_lowercase().as_str() {
        "" => {}
        "income" => {
            if let Some(id) = prompt("Income id to delete:") {
                match remove_income_from_db(conn, &id) {
                    Ok(()) => println!("Done."),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
        "expense" => {
            if let Some(id) = prompt("Expense id to delete:") {
                match remove_expense_from_db(conn, &id) {
                    Ok(()) => println!("Done."),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
        other => println!("Unknown entry type '{}'. Use 'income' or 'expense'.", other),
    }
}

fn run_targets_flow(conn: &Connection) {
    let incomes = match db::income_repository::get_all_incomes(conn) {
        Ok(incomes) => incomes,
        Err(e) => {
            println!("Error loading incomes: {}", e);
            return;
        }
    };
    let expenses = match db::expense_repository::get_all_expenses(conn) {
        Ok(expenses) => expenses,
        Err(e) => {
            println!("Error loading expenses: {}", e);
            return;
        }
    };
    let targets = match operations::targets::list_targets_db(conn) {
        Ok(targets) => targets,
        Err(e) => {
            println!("Error loading targets: {}", e);
            return;
        }
    };

    if targets.is_empty() {
        println!("No targets yet.");
    } else {
        println!("Current targets:");
        for target in &targets {
            let (saved, percent) = target_progress(target, &incomes, &expenses);
            println!(
                "  [{}] {} - target {} by {} - saved {} ({:.1}%)",
                target.id,
                target.name,
                format_amount(&target.target_amount),
                target.target_date,
                format_amount(&saved),
                percent
            );
        }
    }

    println!("Target action? (add, delete, simulate, back):");
    let action = match read_user_input() {
        Ok(action) => action,
        Err(e) => {
            println!("Error reading input: {}", e);
            return;
        }
    };
    match action.to_lowercase().as_str() {
        "add" => {
            let name = prompt("Target name:");
            let amount = prompt("Target amount:");
            let date = prompt("Target date (YYYY-MM-DD):");
            match (name, amount, date) {
                (Some(name), Some(amount), Some(date)) => {
                    match operations::targets::add_target_to_db(conn, &name, &amount, &date) {
                        Ok(id) => println!("Target saved with id {}.", id),
                        Err(e) => println!("Error adding target: {}", e),
                    }
                }
                _ => println!("Target not saved."),
            }
        }
        "delete" => {
            if let Some(id) = prompt("Target id to delete:") {
                match remove_target_from_db(conn, &id) {
                    Ok(()) => println!("Done."),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
        "simulate" => run_simulation(conn, &incomes, &expenses),
        "back" => {}
        other => println!("Unknown action '{}'.", other),
    }
}

fn run_simulation(
    conn: &Connection,
    incomes: &[models::income::IncomeEntry],
    expenses: &[models::expense::ExpenseEntry],
) {
    let targets = match operations::targets::list_targets_db(conn) {
        Ok(targets) => targets,
        Err(e) => {
            println!("Error loading targets: {}", e);
            return;
        }
    };
    // Simulation runs against the most recently created target.
    let Some(target) = targets.first() else {
        println!("Create a target first to run the simulation.");
        return;
    };

    let reduction = match prompt("Reduce expenses by how many percent? (0-50):") {
        Some(raw) => match raw.parse::<u32>() {
            Ok(pct) => pct,
            Err(_) => {
                println!("Invalid percentage '{}'.", raw);
                return;
            }
        },
        None => return,
    };

    match operations::simulate::project(incomes, expenses, target, reduction) {
        Ok(projection) => {
            println!("Average income per record: {}", format_amount(&projection.avg_income));
            println!("Average expense per record: {}", format_amount(&projection.avg_expense));
            match projection.months_needed {
                Some(months) => println!(
                    "Cutting expenses by {}% saves {} per month; about {:.1} months to reach '{}'.",
                    reduction,
                    format_amount(&projection.monthly_saving),
                    months,
                    target.name
                ),
                None => println!(
                    "At this rate the target is unreachable - nothing would be saved each month."
                ),
            }
        }
        Err(e) => println!("Error running simulation: {}", e),
    }
}

fn run_export_flow(conn: &Connection, db_path: &Path) {
    let out_dir = match prompt("Output directory for exports (blank = current):") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        Some(_) => PathBuf::from("."),
        None => return,
    };

    match operations::export::write_exports(conn, db_path, &out_dir) {
        Ok(written) => {
            println!("Export complete:");
            for path in written {
                println!("  {}", path.display());
            }
        }
        Err(e) => println!("Error exporting: {}", e),
    }
}

fn run_settings_flow(conn: &Connection, db_path: &Path) {
    println!("Database file: {}", db_path.display());
    println!("Type RESET to delete all data (no undo), anything else to cancel:");
    match read_user_input() {
        Ok(answer) if answer == "RESET" => match operations::settings::reset_all(conn) {
            Ok(()) => println!("All data deleted."),
            Err(e) => println!("Error resetting data: {}", e),
        },
        Ok(_) => println!("Reset cancelled."),
        Err(e) => println!("Error reading input: {}", e),
    }
}

fn prompt(message: &str) -> Option<String> {
    println!("{}", message);
    match read_user_input() {
        Ok(value) => Some(value),
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn read_user_input() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> Option<UserCommands> {
    match input {
        "dashboard" => Some(UserCommands::Dashboard),
        "add" => Some(UserCommands::Add),
        "history" => Some(UserCommands::History),
        "targets" => Some(UserCommands::Targets),
        "export" => Some(UserCommands::Export),
        "settings" => Some(UserCommands::Settings),
        "exit" => Some(UserCommands::Exit),
        _ => None,
    }
}
