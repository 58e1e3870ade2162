//! Budget and growth computations plus their shared types

pub mod budget;
pub mod config;
pub mod growth;
pub mod log;
pub mod model;

// Re-export main types for cleaner imports
pub use budget::{BudgetTotals, CategoryAmount, WhatIfImpact};
pub use growth::{GoalEstimate, RiskProfile};
pub use model::{
    ExpenseCategory, ExpenseRecord, GrowthSeriesPoint, IncomeSource, InvestmentParameters,
    StrategyBalance, StrategyDefinition, TimeScale,
};
