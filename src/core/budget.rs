//! Aggregations over income sources and expense records.
//!
//! All amounts are stored per month; a [`TimeScale`] converts the raw sums at
//! the very end so that totals and net income stay consistent.
use crate::core::model::{ExpenseCategory, ExpenseRecord, IncomeSource, TimeScale};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
}

/// One slice of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category_id: u32,
    pub name: String,
    pub amount: f64,
    pub color: String,
}

/// Net income after applying hypothetical deltas, next to its change from
/// the current budget. Both are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WhatIfImpact {
    pub net_income: f64,
    pub change: f64,
}

fn sum_income(income: &[IncomeSource]) -> f64 {
    income.iter().map(|s| s.amount).sum()
}

fn sum_expenses(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn compute_totals(
    income: &[IncomeSource],
    expenses: &[ExpenseRecord],
    scale: TimeScale,
) -> BudgetTotals {
    let multiplier = scale.multiplier();
    let monthly_income = sum_income(income);
    let monthly_expenses = sum_expenses(expenses);
    debug!(monthly_income, monthly_expenses, %scale, "Computing budget totals");

    BudgetTotals {
        total_income: monthly_income * multiplier,
        total_expenses: monthly_expenses * multiplier,
        // Scale the raw difference, not the difference of scaled totals.
        net_income: (monthly_income - monthly_expenses) * multiplier,
    }
}

/// Sums expenses per category, keeping category order and dropping
/// categories with nothing spent.
pub fn compute_category_breakdown(
    categories: &[ExpenseCategory],
    expenses: &[ExpenseRecord],
    scale: TimeScale,
) -> Vec<CategoryAmount> {
    let multiplier = scale.multiplier();
    categories
        .iter()
        .map(|category| {
            let total: f64 = expenses
                .iter()
                .filter(|e| e.category_id == category.id)
                .map(|e| e.amount)
                .sum();
            CategoryAmount {
                category_id: category.id,
                name: category.name.clone(),
                amount: total * multiplier,
                color: category.color.clone(),
            }
        })
        .filter(|item| item.amount > 0.0)
        .collect()
}

/// Fraction of the savings goal reached, always within `[0, 1]`.
///
/// A goal of zero (or less) counts as already met and yields `1.0`.
pub fn compute_savings_progress(current_savings: f64, savings_goal: f64) -> f64 {
    if savings_goal.is_nan() || savings_goal <= 0.0 {
        return 1.0;
    }
    let current = if current_savings.is_nan() {
        0.0
    } else {
        current_savings
    };
    (current / savings_goal).clamp(0.0, 1.0)
}

/// Recomputes net income as if income rose by `income_increase` and
/// expenses fell by `expense_reduction` (monthly amounts).
pub fn compute_what_if(
    income: &[IncomeSource],
    expenses: &[ExpenseRecord],
    income_increase: f64,
    expense_reduction: f64,
    scale: TimeScale,
) -> WhatIfImpact {
    let monthly_income = sum_income(income);
    let monthly_expenses = sum_expenses(expenses);
    let adjusted_income = monthly_income + income_increase;
    let adjusted_expenses = (monthly_expenses - expense_reduction).max(0.0);

    let multiplier = scale.multiplier();
    let current = (monthly_income - monthly_expenses) * multiplier;
    let net_income = (adjusted_income - adjusted_expenses) * multiplier;
    WhatIfImpact {
        net_income,
        change: net_income - current,
    }
}
