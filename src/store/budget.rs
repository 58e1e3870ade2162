use super::{NumericInput, next_id};
use crate::core::budget::{self, BudgetTotals, CategoryAmount, WhatIfImpact};
use crate::core::model::{ExpenseCategory, ExpenseRecord, IncomeSource, TimeScale};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

const CATEGORY_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#8AC926", "#A0A0A0",
];

pub fn default_categories() -> Vec<ExpenseCategory> {
    [
        "Housing",
        "Transportation",
        "Food",
        "Utilities",
        "Healthcare",
        "Entertainment",
        "Savings",
        "Other",
    ]
    .iter()
    .zip(CATEGORY_PALETTE)
    .enumerate()
    .map(|(i, (name, color))| ExpenseCategory {
        id: i as u32 + 1,
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

pub fn default_income_sources() -> Vec<IncomeSource> {
    vec![IncomeSource {
        id: 1,
        name: "Primary Job".to_string(),
        amount: 4000.0,
    }]
}

pub fn default_expenses() -> Vec<ExpenseRecord> {
    [
        (1, 1200.0, "Rent"),
        (2, 400.0, "Car payment"),
        (3, 500.0, "Groceries"),
        (4, 200.0, "Electricity & Water"),
        (5, 150.0, "Health insurance"),
        (6, 200.0, "Dining out & Movies"),
        (7, 500.0, "Emergency fund"),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(category_id, amount, description))| ExpenseRecord {
        id: i as u32 + 1,
        category_id,
        amount,
        description: description.to_string(),
    })
    .collect()
}

/// Everything derived from a [`BudgetStore`] for one time scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSnapshot {
    pub scale: TimeScale,
    pub totals: BudgetTotals,
    pub breakdown: Vec<CategoryAmount>,
    pub current_savings: f64,
    pub savings_goal: f64,
    pub savings_progress: f64,
}

/// Income sources, expense categories and expense records of a budget.
///
/// Invariants kept by every mutator:
/// * there is at least one income source and one category;
/// * every expense record points at an existing category.
#[derive(Debug, Clone)]
pub struct BudgetStore {
    income_sources: Vec<IncomeSource>,
    categories: Vec<ExpenseCategory>,
    expenses: Vec<ExpenseRecord>,
    current_savings: f64,
    savings_goal: f64,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self {
            income_sources: default_income_sources(),
            categories: default_categories(),
            expenses: default_expenses(),
            current_savings: 2000.0,
            savings_goal: 10000.0,
        }
    }
}

/// Keeps the first entry for every id.
fn dedup_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> u32, kind: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(id(item));
            if !fresh {
                debug!(id = id(item), kind, "Dropping entry with repeated id");
            }
            fresh
        })
        .collect()
}

impl BudgetStore {
    /// Builds a store from seed data, repairing it where it would break an
    /// invariant: repeated ids keep their first entry, empty collections get
    /// a default entry, amounts are coerced and records with unknown
    /// categories are dropped.
    pub fn new(
        income_sources: Vec<IncomeSource>,
        categories: Vec<ExpenseCategory>,
        expenses: Vec<ExpenseRecord>,
    ) -> Self {
        let mut store = Self {
            income_sources: dedup_by_id(income_sources, |s| s.id, "income source"),
            categories: dedup_by_id(categories, |c| c.id, "category"),
            expenses: dedup_by_id(expenses, |e| e.id, "expense"),
            ..Self::default()
        };
        if store.income_sources.is_empty() {
            store.add_income_source();
        }
        if store.categories.is_empty() {
            store.add_category();
        }
        for source in &mut store.income_sources {
            source.amount = source.amount.to_amount();
        }
        let categories = &store.categories;
        store.expenses.retain(|e| {
            let known = categories.iter().any(|c| c.id == e.category_id);
            if !known {
                debug!(expense = e.id, category = e.category_id, "Dropping expense with unknown category");
            }
            known
        });
        for expense in &mut store.expenses {
            expense.amount = expense.amount.to_amount();
        }
        store
    }

    pub fn income_sources(&self) -> &[IncomeSource] {
        &self.income_sources
    }

    pub fn categories(&self) -> &[ExpenseCategory] {
        &self.categories
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn current_savings(&self) -> f64 {
        self.current_savings
    }

    pub fn savings_goal(&self) -> f64 {
        self.savings_goal
    }

    // Income sources

    /// Adds a blank income source, or `None` when no id is left.
    pub fn add_income_source(&mut self) -> Option<u32> {
        let Some(id) = next_id(self.income_sources.iter().map(|s| s.id)) else {
            debug!("No income source id left");
            return None;
        };
        self.income_sources.push(IncomeSource {
            id,
            name: "New Income".to_string(),
            amount: 0.0,
        });
        debug!(id, "Added income source");
        Some(id)
    }

    pub fn set_income_name(&mut self, id: u32, name: &str) -> bool {
        match self.income_sources.iter_mut().find(|s| s.id == id) {
            Some(source) => {
                source.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_income_amount(&mut self, id: u32, amount: impl NumericInput) -> bool {
        match self.income_sources.iter_mut().find(|s| s.id == id) {
            Some(source) => {
                source.amount = amount.to_amount();
                true
            }
            None => false,
        }
    }

    /// Removes an income source unless it is the last one.
    pub fn remove_income_source(&mut self, id: u32) -> bool {
        if self.income_sources.len() <= 1 {
            debug!(id, "Refusing to remove the last income source");
            return false;
        }
        let before = self.income_sources.len();
        self.income_sources.retain(|s| s.id != id);
        self.income_sources.len() != before
    }

    // Categories

    pub fn add_category(&mut self) -> Option<u32> {
        let Some(id) = next_id(self.categories.iter().map(|c| c.id)) else {
            debug!("No category id left");
            return None;
        };
        let color = CATEGORY_PALETTE[(id as usize - 1) % CATEGORY_PALETTE.len()];
        self.categories.push(ExpenseCategory {
            id,
            name: "New Category".to_string(),
            color: color.to_string(),
        });
        debug!(id, "Added expense category");
        Some(id)
    }

    pub fn set_category_name(&mut self, id: u32, name: &str) -> bool {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_category_color(&mut self, id: u32, color: &str) -> bool {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a category together with all expenses filed under it. The
    /// last category cannot be removed.
    pub fn remove_category(&mut self, id: u32) -> bool {
        if self.categories.len() <= 1 {
            debug!(id, "Refusing to remove the last category");
            return false;
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return false;
        }
        let expenses_before = self.expenses.len();
        self.expenses.retain(|e| e.category_id != id);
        debug!(
            id,
            cascaded = expenses_before - self.expenses.len(),
            "Removed category"
        );
        true
    }

    // Expense records

    /// Adds an empty expense filed under the first category.
    pub fn add_expense(&mut self) -> Option<u32> {
        let Some(id) = next_id(self.expenses.iter().map(|e| e.id)) else {
            debug!("No expense id left");
            return None;
        };
        // `categories` is never empty.
        let category_id = self.categories.first().map_or(1, |c| c.id);
        self.expenses.push(ExpenseRecord {
            id,
            category_id,
            amount: 0.0,
            description: "New Expense".to_string(),
        });
        debug!(id, category_id, "Added expense");
        Some(id)
    }

    /// Moves an expense to another category; unknown categories are rejected.
    pub fn set_expense_category(&mut self, id: u32, category_id: u32) -> bool {
        if !self.categories.iter().any(|c| c.id == category_id) {
            debug!(id, category_id, "Rejecting unknown category");
            return false;
        }
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => {
                expense.category_id = category_id;
                true
            }
            None => false,
        }
    }

    pub fn set_expense_amount(&mut self, id: u32, amount: impl NumericInput) -> bool {
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => {
                expense.amount = amount.to_amount();
                true
            }
            None => false,
        }
    }

    pub fn set_expense_description(&mut self, id: u32, description: &str) -> bool {
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => {
                expense.description = description.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_expense(&mut self, id: u32) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() != before
    }

    // Savings

    pub fn set_current_savings(&mut self, amount: impl NumericInput) {
        self.current_savings = amount.to_amount();
    }

    pub fn set_savings_goal(&mut self, amount: impl NumericInput) {
        self.savings_goal = amount.to_amount();
    }

    /// Recomputes every derived figure for `scale`.
    pub fn derive(&self, scale: TimeScale) -> BudgetSnapshot {
        BudgetSnapshot {
            scale,
            totals: budget::compute_totals(&self.income_sources, &self.expenses, scale),
            breakdown: budget::compute_category_breakdown(&self.categories, &self.expenses, scale),
            current_savings: self.current_savings,
            savings_goal: self.savings_goal,
            savings_progress: budget::compute_savings_progress(
                self.current_savings,
                self.savings_goal,
            ),
        }
    }

    pub fn what_if(
        &self,
        income_increase: impl NumericInput,
        expense_reduction: impl NumericInput,
        scale: TimeScale,
    ) -> WhatIfImpact {
        budget::compute_what_if(
            &self.income_sources,
            &self.expenses,
            income_increase.to_amount(),
            expense_reduction.to_amount(),
            scale,
        )
    }
}
