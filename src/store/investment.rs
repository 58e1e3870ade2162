use super::NumericInput;
use crate::core::growth::{self, GoalEstimate, MAX_YEARS};
use crate::core::model::{GrowthSeriesPoint, InvestmentParameters, StrategyDefinition};
use serde::Serialize;
use tracing::debug;

/// Projection results for the current parameters and selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSnapshot {
    pub series: Vec<GrowthSeriesPoint>,
    /// Goal estimate for the first selected strategy.
    pub years_to_goal: GoalEstimate,
    pub final_nominal: f64,
    pub final_inflation_adjusted: f64,
}

/// Investment parameters plus the strategies offered for comparison.
///
/// At least one strategy is selected at all times.
#[derive(Debug, Clone)]
pub struct InvestmentStore {
    params: InvestmentParameters,
    strategies: Vec<StrategyDefinition>,
    selected: Vec<String>,
}

impl Default for InvestmentStore {
    fn default() -> Self {
        Self {
            params: InvestmentParameters::default(),
            strategies: StrategyDefinition::builtin(),
            selected: vec!["balanced".to_string()],
        }
    }
}

impl InvestmentStore {
    /// Builds a store from seed data. Unknown or duplicate selections are
    /// dropped; an empty selection falls back to the first strategy.
    pub fn new(
        params: InvestmentParameters,
        strategies: Vec<StrategyDefinition>,
        selected: Vec<String>,
    ) -> Self {
        let mut store = Self {
            params: InvestmentParameters::default(),
            strategies: Vec::new(),
            selected: Vec::new(),
        };
        store.set_initial_balance(params.initial_balance);
        store.set_monthly_contribution(params.monthly_contribution);
        store.set_years(params.years);
        store.set_annual_rate(params.annual_rate);
        store.set_inflation_rate(params.inflation_rate);
        store.set_goal(params.goal);

        let strategies = if strategies.is_empty() {
            StrategyDefinition::builtin()
        } else {
            strategies
        };
        for strategy in strategies {
            store.add_strategy(strategy);
        }
        for id in selected {
            if store.has_strategy(&id) && !store.is_selected(&id) {
                store.selected.push(id);
            }
        }
        if store.selected.is_empty() {
            if let Some(first) = store.strategies.first() {
                store.selected.push(first.id.clone());
            }
        }
        store
    }

    pub fn params(&self) -> &InvestmentParameters {
        &self.params
    }

    pub fn strategies(&self) -> &[StrategyDefinition] {
        &self.strategies
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Selected strategies in selection order.
    pub fn selected_strategies(&self) -> Vec<StrategyDefinition> {
        self.selected
            .iter()
            .filter_map(|id| self.strategies.iter().find(|s| &s.id == id))
            .cloned()
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    fn has_strategy(&self, id: &str) -> bool {
        self.strategies.iter().any(|s| s.id == id)
    }

    pub fn set_initial_balance(&mut self, value: impl NumericInput) {
        self.params.initial_balance = value.to_amount();
    }

    pub fn set_monthly_contribution(&mut self, value: impl NumericInput) {
        self.params.monthly_contribution = value.to_amount();
    }

    /// Sets the horizon in whole years, at most [`MAX_YEARS`]; fractions are
    /// truncated.
    pub fn set_years(&mut self, value: impl NumericInput) {
        self.params.years = value.to_amount().min(f64::from(MAX_YEARS)) as u32;
    }

    pub fn set_annual_rate(&mut self, value: impl NumericInput) {
        self.params.annual_rate = value.to_amount();
    }

    pub fn set_inflation_rate(&mut self, value: impl NumericInput) {
        self.params.inflation_rate = value.to_amount();
    }

    pub fn set_goal(&mut self, value: impl NumericInput) {
        self.params.goal = value.to_amount();
    }

    /// Registers a strategy; an id that is already taken is rejected.
    pub fn add_strategy(&mut self, mut strategy: StrategyDefinition) -> bool {
        if self.has_strategy(&strategy.id) {
            debug!(id = %strategy.id, "Rejecting duplicate strategy");
            return false;
        }
        strategy.annual_rate = strategy.annual_rate.to_amount();
        strategy.risk_level = strategy.risk_level.clamp(1, 5);
        debug!(id = %strategy.id, rate = strategy.annual_rate, "Added strategy");
        self.strategies.push(strategy);
        true
    }

    /// Flips the selection of a strategy. Deselecting the only selected
    /// strategy is rejected, unknown ids are ignored.
    pub fn toggle_strategy_selection(&mut self, id: &str) -> bool {
        if !self.has_strategy(id) {
            return false;
        }
        if self.is_selected(id) {
            if self.selected.len() <= 1 {
                debug!(id, "Refusing to deselect the last strategy");
                return false;
            }
            self.selected.retain(|s| s != id);
        } else {
            self.selected.push(id.to_string());
        }
        true
    }

    /// Replaces the selection with `ids`, ignoring unknown ones. Rejected
    /// when none of them is known.
    pub fn select_only(&mut self, ids: &[String]) -> bool {
        let mut selection: Vec<String> = Vec::new();
        for id in ids {
            if self.has_strategy(id) && !selection.contains(id) {
                selection.push(id.clone());
            }
        }
        if selection.is_empty() {
            return false;
        }
        self.selected = selection;
        true
    }

    pub fn derive(&self) -> InvestmentSnapshot {
        let strategies = self.selected_strategies();
        let series = growth::project(&self.params, &strategies);
        let primary = strategies
            .first()
            .cloned()
            .unwrap_or_else(|| growth::custom_strategy(&self.params));

        let years_to_goal = growth::years_to_goal(&self.params, &primary);
        let (final_nominal, final_inflation_adjusted) = growth::final_balance(&series, &primary.id)
            .map_or((0.0, 0.0), |b| (b.nominal, b.inflation_adjusted));

        InvestmentSnapshot {
            series,
            years_to_goal,
            final_nominal,
            final_inflation_adjusted,
        }
    }
}
