//! Terminal rendering of budgets, projections and the expense log

pub mod budget;
pub mod expenses;
pub mod invest;
pub mod setup;
pub mod ui;

pub use budget::BudgetArgs;
pub use expenses::ExpenseAction;
pub use invest::InvestArgs;
