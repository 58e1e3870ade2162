use crate::core::model::{
    ExpenseCategory, ExpenseRecord, IncomeSource, InvestmentParameters, StrategyDefinition,
    TimeScale,
};
use crate::store::budget::{default_categories, default_expenses, default_income_sources};
use crate::store::{BudgetStore, InvestmentStore};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BudgetConfig {
    pub scale: TimeScale,
    pub income_sources: Vec<IncomeSource>,
    pub categories: Vec<ExpenseCategory>,
    pub expenses: Vec<ExpenseRecord>,
    pub current_savings: f64,
    pub savings_goal: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        BudgetConfig {
            scale: TimeScale::Monthly,
            income_sources: default_income_sources(),
            categories: default_categories(),
            expenses: default_expenses(),
            current_savings: 2000.0,
            savings_goal: 10000.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct InvestmentConfig {
    pub parameters: InvestmentParameters,
    pub strategies: Vec<StrategyDefinition>,
    pub selected: Vec<String>,
    /// 1 (very low) to 5 (very high).
    pub risk_tolerance: u8,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        InvestmentConfig {
            parameters: InvestmentParameters::default(),
            strategies: StrategyDefinition::builtin(),
            selected: vec!["balanced".to_string()],
            risk_tolerance: 3,
        }
    }
}

fn default_currency() -> String {
    "₹".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub investment: InvestmentConfig,
    /// Symbol prefixed to amounts when rendering.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            budget: BudgetConfig::default(),
            investment: InvestmentConfig::default(),
            currency: default_currency(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "finsim", "finsim")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "finsim", "finsim")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn expense_log_path(&self) -> Result<PathBuf> {
        Ok(self.default_data_path()?.join("expenses.json"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn budget_store(&self) -> BudgetStore {
        let mut store = BudgetStore::new(
            self.budget.income_sources.clone(),
            self.budget.categories.clone(),
            self.budget.expenses.clone(),
        );
        store.set_current_savings(self.budget.current_savings);
        store.set_savings_goal(self.budget.savings_goal);
        store
    }

    pub fn investment_store(&self) -> InvestmentStore {
        InvestmentStore::new(
            self.investment.parameters.clone(),
            self.investment.strategies.clone(),
            self.investment.selected.clone(),
        )
    }
}
