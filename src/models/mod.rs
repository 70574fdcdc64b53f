//! Core data models for the Increment Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod experience_range;
mod policy;

use serde::{Deserialize, Deserializer};

pub use calculation_result::{
    AppliedIncrement, AuditStep, AuditTrace, AuditWarning, DisplayAmounts, IncrementOutcome,
    IncrementReport, IncrementResult, ReportEntry, ReportTotals,
};
pub use employee::{Employee, EmployeeSnapshot, EmployeeUpdate, MAX_SALARY};
pub use experience_range::ExperienceRange;
pub use policy::{MAX_INCREMENT_PERCENTAGE, NewPolicy, Policy, PolicyUpdate};

/// Deserializes a present field (including `null`) into `Some`, so that an
/// absent field stays `None` under `#[serde(default)]`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
