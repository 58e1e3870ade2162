use finsim::core::{GoalEstimate, StrategyDefinition, TimeScale};
use finsim::store::{BudgetStore, InvestmentStore};
use std::fs;
use tracing::info;

mod test_utils {
    use std::path::PathBuf;

    /// Writes `content` as a config file and returns its path.
    pub fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }
}

#[test_log::test]
fn test_budget_edit_cycle_recomputes_everything() {
    let mut store = BudgetStore::default();
    let before = store.derive(TimeScale::Monthly);
    assert_eq!(before.totals.net_income, 850.0);

    let bonus = store.add_income_source().expect("income id available");
    store.set_income_name(bonus, "Side gig");
    store.set_income_amount(bonus, "600");
    let gym = store.add_expense().expect("expense id available");
    store.set_expense_category(gym, 5);
    store.set_expense_amount(gym, "not a number");
    store.set_expense_amount(gym, 50.0);

    let after = store.derive(TimeScale::Annual);
    info!(?after.totals, "Budget after edits");
    assert_eq!(after.totals.total_income, 4600.0 * 12.0);
    assert_eq!(after.totals.total_expenses, 3200.0 * 12.0);
    assert_eq!(after.totals.net_income, 1400.0 * 12.0);

    let healthcare = after
        .breakdown
        .iter()
        .find(|c| c.name == "Healthcare")
        .expect("Healthcare slice");
    assert_eq!(healthcare.amount, 200.0 * 12.0);

    // Dropping Healthcare removes both of its expenses.
    assert!(store.remove_category(5));
    let trimmed = store.derive(TimeScale::Monthly);
    assert_eq!(trimmed.totals.total_expenses, 3000.0);
    assert!(trimmed.breakdown.iter().all(|c| c.category_id != 5));

    // The snapshot taken earlier is unaffected by later edits.
    assert_eq!(before.totals.total_expenses, 3150.0);
}

#[test_log::test]
fn test_strategy_comparison_flow() {
    let mut store = InvestmentStore::default();
    store.set_years(10u32);
    store.set_inflation_rate(0.0);
    store.set_goal(10000.0);
    assert!(store.add_strategy(StrategyDefinition::new("cash", "Cash", 0.0, 1)));
    assert!(store.toggle_strategy_selection("cash"));

    let snapshot = store.derive();
    assert_eq!(snapshot.years_to_goal, GoalEstimate::Reached { months: 0 });
    assert_eq!(snapshot.final_nominal, 106639.0);

    let last = snapshot.series.last().expect("series");
    assert_eq!(last.year, 10);
    assert_eq!(last.balances.len(), 2);
    assert_eq!(
        last.balance_for("cash").map(|b| b.nominal),
        Some(10000.0 + 10.0 * 12.0 * 500.0)
    );

    // Balances never shrink year over year with non-negative inputs.
    for pair in snapshot.series.windows(2) {
        for (a, b) in pair[0].balances.iter().zip(&pair[1].balances) {
            assert!(b.nominal >= a.nominal);
        }
    }
}

#[test_log::test]
fn test_run_commands_with_config_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path().join("data");
    let config_path = test_utils::write_config(
        &temp_dir,
        &format!(
            r#"
budget:
  scale: weekly
investment:
  parameters:
    years: 5
  selected: ["conservative", "aggressive"]
currency: "$"
data_path: "{}"
"#,
            data_dir.display()
        ),
    );
    let config_path = config_path.to_str().expect("utf-8 path");

    let result = finsim::run_command(
        finsim::AppCommand::Budget(finsim::cli::BudgetArgs {
            scale: None,
            income_increase: Some(250.0),
            expense_reduction: Some(100.0),
        }),
        Some(config_path),
    );
    assert!(result.is_ok(), "Budget failed with: {:?}", result.err());

    let result = finsim::run_command(
        finsim::AppCommand::Invest(finsim::cli::InvestArgs::default()),
        Some(config_path),
    );
    assert!(result.is_ok(), "Invest failed with: {:?}", result.err());

    let result = finsim::run_command(
        finsim::AppCommand::Expenses(finsim::cli::ExpenseAction::Add {
            amount: "42".to_string(),
            category: "shopping".to_string(),
            description: "Shoes".to_string(),
            date: Some("2024-06-01".to_string()),
        }),
        Some(config_path),
    );
    assert!(result.is_ok(), "Expense add failed with: {:?}", result.err());

    let log = fs::read_to_string(data_dir.join("expenses.json")).expect("expense log written");
    assert!(log.contains("\"shopping\""));
    assert!(log.contains("2024-06-01"));
}

#[test_log::test]
fn test_invalid_config_is_reported() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, "budget: [not, a, map]");

    let result = finsim::run_command(
        finsim::AppCommand::Budget(finsim::cli::BudgetArgs::default()),
        config_path.to_str(),
    );
    let err = result.expect_err("invalid config must fail");
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test_log::test]
fn test_unknown_strategy_override_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, "currency: \"€\"\n");

    let result = finsim::run_command(
        finsim::AppCommand::Invest(finsim::cli::InvestArgs {
            strategies: vec!["moonshot".to_string()],
            ..Default::default()
        }),
        config_path.to_str(),
    );
    assert!(result.is_err());
}
