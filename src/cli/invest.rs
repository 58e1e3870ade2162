use super::ui;
use crate::core::config::AppConfig;
use crate::core::growth::{RiskProfile, risk_description};
use crate::store::{InvestmentSnapshot, InvestmentStore};
use anyhow::{Result, bail};
use comfy_table::{Cell, CellAlignment};
use tracing::{debug, info};

/// Options of the `invest` command.
#[derive(Debug, Clone, Default)]
pub struct InvestArgs {
    pub years: Option<u32>,
    pub goal: Option<f64>,
    /// Strategy ids to compare instead of the configured selection.
    pub strategies: Vec<String>,
}

impl InvestmentSnapshot {
    pub fn display_as_table(&self, store: &InvestmentStore, currency: &str) -> String {
        let strategies = store.selected_strategies();
        let mut table = ui::new_styled_table();

        let mut header = vec![ui::header_cell("Year")];
        for strategy in &strategies {
            header.push(ui::header_cell(&format!("{} (Nominal)", strategy.name)));
            header.push(ui::header_cell(&format!("{} (Real)", strategy.name)));
        }
        table.set_header(header);

        for point in &self.series {
            let mut row = vec![Cell::new(point.year).set_alignment(CellAlignment::Right)];
            for balance in &point.balances {
                row.push(ui::amount_cell(currency, balance.nominal, 0));
                row.push(ui::amount_cell(currency, balance.inflation_adjusted, 0));
            }
            table.add_row(row);
        }
        table.to_string()
    }

    pub fn display_summary(&self, store: &InvestmentStore, currency: &str) -> String {
        let params = store.params();
        let years = match self.years_to_goal.years() {
            Some(years) => format!("{years:.1} years"),
            None => "over 100 years".to_string(),
        };
        format!(
            "Final Balance ({} years): {}\nInflation Adjusted: {}\nYears to reach {}: {}",
            params.years,
            ui::style_text(
                &ui::format_amount(currency, self.final_nominal, 0),
                ui::StyleType::TotalValue
            ),
            ui::format_amount(currency, self.final_inflation_adjusted, 0),
            ui::format_amount(currency, params.goal, 0),
            ui::style_text(&years, ui::StyleType::TotalLabel),
        )
    }
}

fn display_risk(tolerance: u8) -> String {
    let profile = RiskProfile::for_tolerance(tolerance);
    format!(
        "Risk Tolerance: {} (suggested strategy: {})",
        risk_description(tolerance),
        profile
    )
}

/// Applies command line overrides on top of the configured store.
pub fn apply_args(store: &mut InvestmentStore, args: &InvestArgs) -> Result<()> {
    if let Some(years) = args.years {
        store.set_years(years);
    }
    if let Some(goal) = args.goal {
        store.set_goal(goal);
    }
    if !args.strategies.is_empty() && !store.select_only(&args.strategies) {
        bail!("None of the strategies {:?} are defined", args.strategies);
    }
    debug!(selected = ?store.selected_ids(), "Applied investment overrides");
    Ok(())
}

pub fn render(store: &InvestmentStore, risk_tolerance: u8, currency: &str) -> String {
    let snapshot = store.derive();

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Investment Growth", ui::StyleType::Title)
    );
    output.push_str(&snapshot.display_as_table(store, currency));
    output.push_str("\n\n");
    output.push_str(&snapshot.display_summary(store, currency));
    output.push_str("\n\n");
    output.push_str(&display_risk(risk_tolerance));
    output
}

pub fn run(config: &AppConfig, args: &InvestArgs) -> Result<()> {
    let mut store = config.investment_store();
    apply_args(&mut store, args)?;
    info!(years = store.params().years, "Projecting investment growth");

    println!(
        "{}",
        render(&store, config.investment.risk_tolerance, &config.currency)
    );
    Ok(())
}
