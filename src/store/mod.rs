//! Editable entity collections.
//!
//! Stores are the only owners of user data. Every mutator leaves the store
//! valid, so callers can re-derive their views after any call.
pub mod budget;
pub mod expenses;
pub mod investment;

pub use budget::{BudgetSnapshot, BudgetStore};
pub use expenses::{ExpenseEntry, ExpenseLog};
pub use investment::{InvestmentSnapshot, InvestmentStore};

/// Numeric input as it arrives from a form field.
///
/// Conversion is forgiving: anything unparsable, non-finite or negative
/// becomes `0.0`.
pub trait NumericInput {
    fn to_amount(&self) -> f64;
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl NumericInput for f64 {
    fn to_amount(&self) -> f64 {
        sanitize(*self)
    }
}

impl NumericInput for i64 {
    fn to_amount(&self) -> f64 {
        sanitize(*self as f64)
    }
}

impl NumericInput for u32 {
    fn to_amount(&self) -> f64 {
        f64::from(*self)
    }
}

impl NumericInput for &str {
    fn to_amount(&self) -> f64 {
        self.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
    }
}

impl NumericInput for String {
    fn to_amount(&self) -> f64 {
        self.as_str().to_amount()
    }
}

/// Next surrogate id: one past the largest existing id, or 1 when empty.
/// `None` once the largest id is `u32::MAX`.
pub(crate) fn next_id(ids: impl Iterator<Item = u32>) -> Option<u32> {
    match ids.max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_input_coercion() {
        assert_eq!(12.5f64.to_amount(), 12.5);
        assert_eq!((-3.0f64).to_amount(), 0.0);
        assert_eq!(f64::NAN.to_amount(), 0.0);
        assert_eq!(f64::INFINITY.to_amount(), 0.0);
        assert_eq!(42i64.to_amount(), 42.0);
        assert_eq!((-42i64).to_amount(), 0.0);
        assert_eq!(7u32.to_amount(), 7.0);
        assert_eq!(" 1200.50 ".to_amount(), 1200.5);
        assert_eq!("abc".to_amount(), 0.0);
        assert_eq!("".to_amount(), 0.0);
        assert_eq!("-10".to_amount(), 0.0);
        assert_eq!("NaN".to_amount(), 0.0);
        assert_eq!(String::from("99").to_amount(), 99.0);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(std::iter::empty()), Some(1));
        assert_eq!(next_id([1, 2, 3].into_iter()), Some(4));
        assert_eq!(next_id([7, 2].into_iter()), Some(8));
        assert_eq!(next_id([u32::MAX - 1].into_iter()), Some(u32::MAX));
        assert_eq!(next_id([3, u32::MAX].into_iter()), None);
    }
}
