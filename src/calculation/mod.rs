//! Calculation logic for the Increment Engine.
//!
//! This module contains policy matching (first policy in order whose
//! experience range covers the employee), increment calculation, display
//! truncation of amounts, and batch report assembly. Everything here is
//! pure: callers pass in the employee and policy snapshots.

mod display;
mod increment;
mod policy_match;
mod report;

pub use display::{display_amounts, format_amount, truncate_for_display};
pub use increment::{SalaryInput, calculate_increment, increment_amount, parse_salary_or_zero};
pub use policy_match::{
    CompiledPolicies, PolicyBand, SkippedPolicy, compile_policies, match_policy,
};
pub use report::{ENGINE_VERSION, build_report};
