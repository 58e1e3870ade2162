use super::ui;
use crate::core::config::AppConfig;
use crate::core::{TimeScale, WhatIfImpact};
use crate::store::{BudgetSnapshot, BudgetStore};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

/// Options of the `budget` command.
#[derive(Debug, Clone, Default)]
pub struct BudgetArgs {
    /// Overrides the scale from the config.
    pub scale: Option<TimeScale>,
    pub income_increase: Option<f64>,
    pub expense_reduction: Option<f64>,
}

impl BudgetSnapshot {
    pub fn display_totals(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell(&format!("{} Budget", self.scale)),
            ui::header_cell("Amount"),
        ]);
        table.add_row(vec![
            Cell::new("Total Income"),
            ui::amount_cell(currency, self.totals.total_income, 2),
        ]);
        table.add_row(vec![
            Cell::new("Total Expenses"),
            ui::amount_cell(currency, self.totals.total_expenses, 2),
        ]);
        table.add_row(vec![
            Cell::new("Net Income"),
            ui::signed_amount_cell(currency, self.totals.net_income),
        ]);
        table.to_string()
    }

    pub fn display_breakdown(&self, currency: &str) -> String {
        if self.breakdown.is_empty() {
            return ui::style_text("No expenses recorded.", ui::StyleType::Subtle);
        }
        let total: f64 = self.breakdown.iter().map(|c| c.amount).sum();

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell("Amount"),
            ui::header_cell("Share (%)"),
        ]);
        for item in &self.breakdown {
            table.add_row(vec![
                Cell::new(&item.name),
                ui::amount_cell(currency, item.amount, 2),
                ui::format_percentage_cell(item.amount / total * 100.0),
            ]);
        }
        table.to_string()
    }

    pub fn display_savings(&self, currency: &str) -> String {
        format!(
            "Savings Goal: {} {:.0}% ({} / {})",
            ui::progress_bar(self.savings_progress, 30),
            self.savings_progress * 100.0,
            ui::format_amount(currency, self.current_savings, 0),
            ui::format_amount(currency, self.savings_goal, 0),
        )
    }
}

fn display_what_if(impact: &WhatIfImpact, scale: TimeScale, currency: &str) -> String {
    let change = ui::format_amount(currency, impact.change, 2);
    let change = if impact.change > 0.0 {
        format!("+{change}")
    } else {
        change
    };
    format!(
        "What-if: {} net income would be {} ({})",
        scale,
        ui::style_text(
            &ui::format_amount(currency, impact.net_income, 2),
            ui::StyleType::TotalValue
        ),
        change
    )
}

/// Renders the whole budget report for `store`.
pub fn render(store: &BudgetStore, args: &BudgetArgs, scale: TimeScale, currency: &str) -> String {
    let snapshot = store.derive(scale);

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Budget Overview", ui::StyleType::Title)
    );
    output.push_str(&snapshot.display_totals(currency));
    output.push_str("\n\n");
    output.push_str(&snapshot.display_breakdown(currency));
    output.push_str("\n\n");
    output.push_str(&snapshot.display_savings(currency));

    if args.income_increase.is_some() || args.expense_reduction.is_some() {
        let impact = store.what_if(
            args.income_increase.unwrap_or(0.0),
            args.expense_reduction.unwrap_or(0.0),
            scale,
        );
        output.push_str("\n\n");
        output.push_str(&display_what_if(&impact, scale, currency));
    }
    output
}

pub fn run(config: &AppConfig, args: &BudgetArgs) -> Result<()> {
    let scale = args.scale.unwrap_or(config.budget.scale);
    info!(%scale, "Computing budget");

    let store = config.budget_store();
    println!("{}", render(&store, args, scale, &config.currency));
    Ok(())
}
