//! Entity types shared by the stores, the aggregator and the projector.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A recurring monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: u32,
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: u32,
    pub name: String,
    /// `#RRGGBB`, only used when rendering.
    pub color: String,
}

/// A monthly expense. `category_id` refers to a live [`ExpenseCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: u32,
    pub category_id: u32,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

/// View parameter converting monthly amounts to another period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Weekly,
    #[default]
    Monthly,
    Annual,
}

impl TimeScale {
    pub fn multiplier(&self) -> f64 {
        match self {
            TimeScale::Weekly => 12.0 / 52.0,
            TimeScale::Monthly => 1.0,
            TimeScale::Annual => 12.0,
        }
    }

    pub fn all() -> &'static [TimeScale] {
        &[TimeScale::Weekly, TimeScale::Monthly, TimeScale::Annual]
    }
}

impl Display for TimeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TimeScale::Weekly => "Weekly",
                TimeScale::Monthly => "Monthly",
                TimeScale::Annual => "Annual",
            }
        )
    }
}

impl FromStr for TimeScale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(TimeScale::Weekly),
            "monthly" | "month" => Ok(TimeScale::Monthly),
            "annual" | "yearly" | "year" => Ok(TimeScale::Annual),
            other => Err(anyhow::anyhow!("Unknown time scale: {other}")),
        }
    }
}

/// Inputs of a growth projection. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentParameters {
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub years: u32,
    pub annual_rate: f64,
    pub inflation_rate: f64,
    /// Target balance for the goal search.
    pub goal: f64,
}

impl Default for InvestmentParameters {
    fn default() -> Self {
        Self {
            initial_balance: 10000.0,
            monthly_contribution: 500.0,
            years: 20,
            annual_rate: 7.0,
            inflation_rate: 2.5,
            goal: 1_000_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub id: String,
    pub name: String,
    pub annual_rate: f64,
    /// 1 (very low) to 5 (very high).
    pub risk_level: u8,
}

impl StrategyDefinition {
    pub fn new(id: &str, name: &str, annual_rate: f64, risk_level: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            annual_rate,
            risk_level: risk_level.clamp(1, 5),
        }
    }

    pub fn builtin() -> Vec<StrategyDefinition> {
        vec![
            StrategyDefinition::new("conservative", "Conservative", 4.0, 1),
            StrategyDefinition::new("balanced", "Balanced", 7.0, 3),
            StrategyDefinition::new("aggressive", "Aggressive", 10.0, 5),
        ]
    }
}

/// Balances of one strategy at a given year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyBalance {
    pub strategy_id: String,
    pub nominal: f64,
    pub inflation_adjusted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSeriesPoint {
    pub year: u32,
    pub balances: Vec<StrategyBalance>,
}

impl GrowthSeriesPoint {
    pub fn balance_for(&self, strategy_id: &str) -> Option<&StrategyBalance> {
        self.balances.iter().find(|b| b.strategy_id == strategy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_scale_parse() {
        assert_eq!("weekly".parse::<TimeScale>().unwrap(), TimeScale::Weekly);
        assert_eq!("Monthly".parse::<TimeScale>().unwrap(), TimeScale::Monthly);
        assert_eq!("ANNUAL".parse::<TimeScale>().unwrap(), TimeScale::Annual);
        assert_eq!("yearly".parse::<TimeScale>().unwrap(), TimeScale::Annual);
        assert!("daily".parse::<TimeScale>().is_err());
    }

    #[test]
    fn test_time_scale_multipliers() {
        assert_eq!(TimeScale::Monthly.multiplier(), 1.0);
        assert_eq!(TimeScale::Annual.multiplier(), 12.0);
        assert!((TimeScale::Weekly.multiplier() - 0.230769).abs() < 1e-6);
        assert_eq!(TimeScale::default(), TimeScale::Monthly);
    }

    #[test]
    fn test_builtin_strategies() {
        let strategies = StrategyDefinition::builtin();
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[1].id, "balanced");
        assert_eq!(strategies[1].annual_rate, 7.0);
        assert_eq!(strategies[2].risk_level, 5);
    }

    #[test]
    fn test_strategy_risk_level_is_clamped() {
        assert_eq!(StrategyDefinition::new("x", "X", 1.0, 9).risk_level, 5);
        assert_eq!(StrategyDefinition::new("y", "Y", 1.0, 0).risk_level, 1);
    }
}
