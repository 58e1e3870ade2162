//! Compound growth projections for investment strategies.
//!
//! Balances compound monthly: every month the balance earns
//! `annual_rate / 100 / 12` and then receives the monthly contribution.
//! Internal balances are never rounded; only emitted points are.
use crate::core::model::{
    GrowthSeriesPoint, InvestmentParameters, StrategyBalance, StrategyDefinition,
};
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// Upper bound of the goal search, 100 years.
pub const MAX_GOAL_MONTHS: u32 = 1200;

/// Longest projection horizon; longer horizons are cut to this.
pub const MAX_YEARS: u32 = 100;

pub const CUSTOM_STRATEGY_ID: &str = "custom";

/// Outcome of [`years_to_goal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalEstimate {
    Reached { months: u32 },
    NotReached,
}

impl GoalEstimate {
    /// Elapsed years rounded to one decimal, `None` when the goal is out of reach.
    pub fn years(&self) -> Option<f64> {
        match self {
            GoalEstimate::Reached { months } => Some((*months as f64 / 12.0 * 10.0).round() / 10.0),
            GoalEstimate::NotReached => None,
        }
    }
}

impl Display for GoalEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.years() {
            Some(years) => write!(f, "{years:.1}"),
            None => write!(f, "over 100"),
        }
    }
}

/// Broad investor profile derived from a 1-5 risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskProfile {
    pub fn for_tolerance(tolerance: u8) -> Self {
        match tolerance {
            0..=2 => RiskProfile::Conservative,
            3..=4 => RiskProfile::Balanced,
            _ => RiskProfile::Aggressive,
        }
    }

    /// Id of the built-in strategy matching this profile.
    pub fn strategy_id(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Balanced => "balanced",
            RiskProfile::Aggressive => "aggressive",
        }
    }
}

impl Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RiskProfile::Conservative => "Conservative",
                RiskProfile::Balanced => "Balanced",
                RiskProfile::Aggressive => "Aggressive",
            }
        )
    }
}

pub fn risk_description(level: u8) -> &'static str {
    match level {
        1 => "Very Low Risk",
        2 => "Low Risk",
        3 => "Moderate Risk",
        4 => "High Risk",
        5 => "Very High Risk",
        _ => "Moderate Risk",
    }
}

/// Strategy that follows the rate entered in the parameters.
pub fn custom_strategy(params: &InvestmentParameters) -> StrategyDefinition {
    StrategyDefinition::new(CUSTOM_STRATEGY_ID, "Custom", params.annual_rate, 3)
}

/// Maps negative, NaN and infinite inputs to zero.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn monthly_rate(annual_percent: f64) -> f64 {
    non_negative(annual_percent) / 100.0 / 12.0
}

#[inline]
fn compound_month(balance: f64, rate: f64, contribution: f64) -> f64 {
    balance * (1.0 + rate) + contribution
}

/// Year-end nominal and inflation adjusted balances for a single rate,
/// index 0 being the starting balance.
fn simulate(params: &InvestmentParameters, annual_rate: f64) -> Vec<(f64, f64)> {
    let years = params.years.min(MAX_YEARS);
    let rate = monthly_rate(annual_rate);
    let inflation = monthly_rate(params.inflation_rate);
    let contribution = non_negative(params.monthly_contribution);

    let mut balance = non_negative(params.initial_balance);
    let mut points = Vec::with_capacity(years as usize + 1);
    points.push((balance.round(), balance.round()));

    for year in 1..=years {
        for _ in 0..12 {
            balance = compound_month(balance, rate, contribution);
        }
        // Deflated over `year * 12 + 12` months, counted the same way as
        // the in-year month index (1..=12).
        let elapsed = f64::from(year) * 12.0 + 12.0;
        let adjusted = balance / (1.0 + inflation).powf(elapsed);
        points.push((balance.round(), adjusted.round()));
    }
    points
}

/// Projects every strategy over `params.years`, capped at [`MAX_YEARS`], and
/// merges the results by year.
///
/// An empty strategy list projects the parameters' own rate under the
/// [`CUSTOM_STRATEGY_ID`] strategy.
pub fn project(
    params: &InvestmentParameters,
    strategies: &[StrategyDefinition],
) -> Vec<GrowthSeriesPoint> {
    let custom;
    let strategies = if strategies.is_empty() {
        custom = [custom_strategy(params)];
        &custom[..]
    } else {
        strategies
    };

    let years = params.years.min(MAX_YEARS);
    let per_strategy: Vec<(&str, Vec<(f64, f64)>)> = strategies
        .iter()
        .map(|s| {
            debug!(strategy = %s.id, rate = s.annual_rate, years, "Projecting growth");
            (s.id.as_str(), simulate(params, s.annual_rate))
        })
        .collect();

    (0..=years)
        .map(|year| GrowthSeriesPoint {
            year,
            balances: per_strategy
                .iter()
                .map(|(id, series)| {
                    let (nominal, inflation_adjusted) = series[year as usize];
                    StrategyBalance {
                        strategy_id: id.to_string(),
                        nominal,
                        inflation_adjusted,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Months of saving needed before the balance reaches `params.goal` under
/// `strategy`, searched one month at a time up to [`MAX_GOAL_MONTHS`].
pub fn years_to_goal(params: &InvestmentParameters, strategy: &StrategyDefinition) -> GoalEstimate {
    let initial = non_negative(params.initial_balance);
    if params.goal.is_nan() || params.goal <= 0.0 || params.goal <= initial {
        return GoalEstimate::Reached { months: 0 };
    }

    let rate = monthly_rate(strategy.annual_rate);
    let contribution = non_negative(params.monthly_contribution);
    let mut balance = initial;
    let mut months = 0;
    while balance < params.goal && months < MAX_GOAL_MONTHS {
        balance = compound_month(balance, rate, contribution);
        months += 1;
    }

    let estimate = if months < MAX_GOAL_MONTHS {
        GoalEstimate::Reached { months }
    } else {
        GoalEstimate::NotReached
    };
    debug!(strategy = %strategy.id, goal = params.goal, ?estimate, "Goal search finished");
    estimate
}

/// Balances of `strategy_id` at the last year of a projected series.
pub fn final_balance<'a>(
    series: &'a [GrowthSeriesPoint],
    strategy_id: &str,
) -> Option<&'a StrategyBalance> {
    series.last().and_then(|p| p.balance_for(strategy_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(initial: f64, contribution: f64, years: u32, inflation: f64) -> InvestmentParameters {
        InvestmentParameters {
            initial_balance: initial,
            monthly_contribution: contribution,
            years,
            annual_rate: 7.0,
            inflation_rate: inflation,
            goal: 0.0,
        }
    }

    fn strategy(rate: f64) -> StrategyDefinition {
        StrategyDefinition::new("test", "Test", rate, 3)
    }

    #[test]
    fn test_ten_year_projection_matches_monthly_loop() {
        let series = project(&params(10000.0, 500.0, 10, 0.0), &[strategy(7.0)]);

        assert_eq!(series.len(), 11);
        let last = final_balance(&series, "test").unwrap();
        assert_eq!(last.nominal, 106639.0);
        assert_eq!(last.inflation_adjusted, 106639.0);
    }

    #[test]
    fn test_year_zero_is_initial_balance() {
        let series = project(&params(10000.0, 500.0, 3, 2.5), &[strategy(7.0)]);
        let first = series[0].balance_for("test").unwrap();
        assert_eq!(series[0].year, 0);
        assert_eq!(first.nominal, 10000.0);
        assert_eq!(first.inflation_adjusted, 10000.0);
    }

    #[test]
    fn test_inflation_adjusted_values() {
        let series = project(&params(10000.0, 500.0, 20, 2.5), &[strategy(7.0)]);

        let year_1 = series[1].balance_for("test").unwrap();
        assert_eq!(year_1.nominal, 16919.0);
        assert_eq!(year_1.inflation_adjusted, 16095.0);

        let year_2 = series[2].balance_for("test").unwrap();
        assert_eq!(year_2.nominal, 24339.0);
        assert_eq!(year_2.inflation_adjusted, 22582.0);

        let last = final_balance(&series, "test").unwrap();
        assert_eq!(last.nominal, 300851.0);
        assert_eq!(last.inflation_adjusted, 178067.0);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        for years in [1, 5, 40, 75] {
            let series = project(&params(1234.0, 250.0, years, 0.0), &[strategy(0.0)]);
            let last = final_balance(&series, "test").unwrap();
            assert_eq!(last.nominal, 1234.0 + f64::from(years) * 12.0 * 250.0);
        }
    }

    #[test]
    fn test_negative_inputs_are_treated_as_zero() {
        let series = project(&params(1000.0, -100.0, 2, -3.0), &[strategy(-5.0)]);
        let last = final_balance(&series, "test").unwrap();
        assert_eq!(last.nominal, 1000.0);
        assert_eq!(last.inflation_adjusted, 1000.0);

        let series = project(&params(1000.0, f64::NAN, 1, 0.0), &[strategy(f64::NAN)]);
        assert_eq!(final_balance(&series, "test").unwrap().nominal, 1000.0);
    }

    #[test]
    fn test_multiple_strategies_are_merged_by_year() {
        let strategies = StrategyDefinition::builtin();
        let series = project(&params(10000.0, 500.0, 1, 2.5), &strategies);

        assert_eq!(series.len(), 2);
        for point in &series {
            let ids: Vec<&str> = point.balances.iter().map(|b| b.strategy_id.as_str()).collect();
            assert_eq!(ids, vec!["conservative", "balanced", "aggressive"]);
        }
        let conservative = series[1].balance_for("conservative").unwrap();
        assert_eq!(conservative.nominal, 16519.0);
        assert_eq!(conservative.inflation_adjusted, 15714.0);
        assert_eq!(series[1].balance_for("aggressive").unwrap().nominal, 17330.0);
    }

    #[test]
    fn test_empty_strategy_list_uses_custom_rate() {
        let series = project(&params(10000.0, 500.0, 10, 0.0), &[]);
        let last = final_balance(&series, CUSTOM_STRATEGY_ID).unwrap();
        assert_eq!(last.nominal, 106639.0);
    }

    #[test]
    fn test_zero_year_horizon_only_emits_start() {
        let series = project(&params(500.4, 10.0, 0, 0.0), &[strategy(7.0)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].balances[0].nominal, 500.0);
    }

    #[test]
    fn test_goal_at_or_below_initial_is_immediate() {
        let mut p = params(10000.0, 500.0, 10, 0.0);
        p.goal = 10000.0;
        assert_eq!(years_to_goal(&p, &strategy(7.0)), GoalEstimate::Reached { months: 0 });
        assert_eq!(years_to_goal(&p, &strategy(7.0)).years(), Some(0.0));

        p.goal = 0.0;
        assert_eq!(years_to_goal(&p, &strategy(7.0)).years(), Some(0.0));
    }

    #[test]
    fn test_goal_search_counts_months() {
        let mut p = params(10000.0, 500.0, 10, 0.0);
        p.goal = 1_000_000.0;
        let estimate = years_to_goal(&p, &strategy(7.0));
        assert_eq!(estimate, GoalEstimate::Reached { months: 418 });
        assert_eq!(estimate.years(), Some(34.8));
        assert_eq!(estimate.to_string(), "34.8");

        p.goal = 100_000.0;
        assert_eq!(years_to_goal(&p, &strategy(7.0)).years(), Some(9.5));
    }

    #[test]
    fn test_goal_with_zero_rate() {
        let mut p = params(10000.0, 500.0, 10, 0.0);
        p.goal = 16000.0;
        assert_eq!(
            years_to_goal(&p, &strategy(0.0)),
            GoalEstimate::Reached { months: 12 }
        );
    }

    #[test]
    fn test_unreachable_goal_hits_cap() {
        let mut p = params(10000.0, 0.0, 10, 0.0);
        p.goal = 20000.0;
        let estimate = years_to_goal(&p, &strategy(0.0));
        assert_eq!(estimate, GoalEstimate::NotReached);
        assert_eq!(estimate.years(), None);
        assert_eq!(estimate.to_string(), "over 100");

        p.goal = f64::INFINITY;
        assert_eq!(years_to_goal(&p, &strategy(7.0)), GoalEstimate::NotReached);
    }

    #[test]
    fn test_goal_estimate_is_monotonic_in_goal() {
        let mut p = params(5000.0, 300.0, 10, 0.0);
        let mut previous = 0;
        for goal in (0..60).map(|i| f64::from(i) * 25_000.0) {
            p.goal = goal;
            let months = match years_to_goal(&p, &strategy(6.0)) {
                GoalEstimate::Reached { months } => months,
                GoalEstimate::NotReached => MAX_GOAL_MONTHS,
            };
            assert!(months >= previous, "goal {goal}: {months} < {previous}");
            previous = months;
        }
    }

    #[test]
    fn test_projection_horizon_is_capped() {
        let p = params(1000.0, 0.0, u32::MAX, 0.0);
        let series = project(&p, &[strategy(0.0)]);
        assert_eq!(series.len(), MAX_YEARS as usize + 1);
        assert_eq!(series.last().unwrap().year, MAX_YEARS);
        assert_eq!(series.last().unwrap().balances[0].nominal, 1000.0);
    }

    #[test]
    fn test_risk_helpers() {
        assert_eq!(risk_description(1), "Very Low Risk");
        assert_eq!(risk_description(5), "Very High Risk");
        assert_eq!(risk_description(9), "Moderate Risk");

        assert_eq!(RiskProfile::for_tolerance(1), RiskProfile::Conservative);
        assert_eq!(RiskProfile::for_tolerance(2), RiskProfile::Conservative);
        assert_eq!(RiskProfile::for_tolerance(3), RiskProfile::Balanced);
        assert_eq!(RiskProfile::for_tolerance(4), RiskProfile::Balanced);
        assert_eq!(RiskProfile::for_tolerance(5), RiskProfile::Aggressive);
        assert_eq!(RiskProfile::for_tolerance(5).strategy_id(), "aggressive");
    }
}
