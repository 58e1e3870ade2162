use super::ui;
use crate::core::config::AppConfig;
use crate::store::expenses::{EXPENSE_CATEGORIES, category_name};
use crate::store::ExpenseLog;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::Cell;
use std::path::PathBuf;
use tracing::info;

/// Sub-actions of the `expenses` command.
#[derive(Debug, Clone)]
pub enum ExpenseAction {
    List,
    Add {
        amount: String,
        category: String,
        description: String,
        date: Option<String>,
    },
    Remove {
        id: i64,
    },
    Export {
        output: Option<PathBuf>,
    },
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn display_as_table(log: &ExpenseLog, currency: &str) -> String {
    if log.entries().is_empty() {
        return ui::style_text("No expenses logged yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Description"),
        ui::header_cell("Amount"),
    ]);
    for entry in log.entries() {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(entry.date.format("%Y-%m-%d")),
            Cell::new(category_name(&entry.category).unwrap_or(entry.category.as_str())),
            Cell::new(&entry.description),
            ui::amount_cell(currency, entry.amount, 2),
        ]);
    }

    format!(
        "{table}\n\n{}: {}",
        ui::style_text("Total", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_amount(currency, log.total(), 2),
            ui::StyleType::TotalValue
        )
    )
}

/// Runs `action` against the log stored at `log_path`.
pub fn execute(log_path: PathBuf, action: &ExpenseAction, currency: &str) -> Result<String> {
    let mut log = ExpenseLog::load(&log_path)?;

    match action {
        ExpenseAction::List => Ok(display_as_table(&log, currency)),
        ExpenseAction::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date = parse_date(date.as_deref())?;
            let category = category.to_lowercase();
            let id = log
                .add(amount.as_str(), &category, description, date)
                .with_context(|| {
                    let known: Vec<&str> = EXPENSE_CATEGORIES.iter().map(|(id, _)| *id).collect();
                    format!("Valid categories: {}", known.join(", "))
                })?;
            log.save()?;
            info!(id, "Expense added");
            Ok(format!("Added expense {id}"))
        }
        ExpenseAction::Remove { id } => {
            if log.remove(*id) {
                log.save()?;
                Ok(format!("Removed expense {id}"))
            } else {
                Ok(format!("No expense with id {id}"))
            }
        }
        ExpenseAction::Export { output } => {
            let path = output.clone().unwrap_or_else(|| {
                PathBuf::from(format!(
                    "expenses_{}.csv",
                    chrono::Local::now().date_naive().format("%Y-%m-%d")
                ))
            });
            log.export_csv(&path)?;
            info!("Exported {} expenses to {}", log.entries().len(), path.display());
            Ok(format!(
                "Exported {} expenses to {}",
                log.entries().len(),
                path.display()
            ))
        }
    }
}

pub fn run(config: &AppConfig, action: &ExpenseAction) -> Result<()> {
    let log_path = config.expense_log_path()?;
    let message = execute(log_path, action, &config.currency)?;
    println!("{message}");
    Ok(())
}
