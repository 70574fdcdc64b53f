//! Display formatting for monetary amounts.
//!
//! Calculation keeps full precision. Amounts are cut to two decimal places
//! only here, when they are prepared for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DisplayAmounts, IncrementResult};

/// Truncates an amount to two decimal places (towards zero).
///
/// # Examples
///
/// ```
/// use increment_engine::calculation::truncate_for_display;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("2499.99975").unwrap();
/// assert_eq!(truncate_for_display(amount), Decimal::from_str("2499.99").unwrap());
/// ```
pub fn truncate_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Formats an amount with exactly two decimal places, truncating.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", truncate_for_display(amount))
}

/// Builds the display strings for a matched result.
///
/// Returns `None` when no policy matched, since there is no increment to
/// show.
pub fn display_amounts(result: &IncrementResult) -> Option<DisplayAmounts> {
    result.applied().map(|applied| DisplayAmounts {
        current_salary: format_amount(result.current_salary),
        increment_amount: format_amount(applied.increment_amount),
        new_salary: format_amount(applied.new_salary),
    })
}
