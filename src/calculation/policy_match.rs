//! Policy matching.
//!
//! Finds the policy whose experience band covers an employee. Policies are
//! scanned in the order given and the first match wins, so overlapping bands
//! are resolved by position rather than by width or percentage. The store
//! lists policies by ascending `policy_id`, which makes that the effective
//! priority for stored policies.

use tracing::debug;

use crate::models::{ExperienceRange, Policy};

/// A policy together with its parsed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyBand<'a> {
    /// The policy.
    pub policy: &'a Policy,
    /// Its parsed experience range.
    pub range: ExperienceRange,
}

/// A policy left out of matching because its range did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPolicy<'a> {
    /// The policy.
    pub policy: &'a Policy,
    /// The parse failure.
    pub reason: String,
}

/// A policy list parsed once for repeated matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledPolicies<'a> {
    /// Parsed bands in input order.
    pub bands: Vec<PolicyBand<'a>>,
    /// Policies with malformed ranges, in input order.
    pub skipped: Vec<SkippedPolicy<'a>>,
}

impl<'a> CompiledPolicies<'a> {
    /// Returns the first band covering `experience_years`.
    pub fn find(&self, experience_years: u32) -> Option<&PolicyBand<'a>> {
        self.bands
            .iter()
            .find(|band| band.range.contains(experience_years))
    }
}

/// Parses every policy's range, separating usable bands from malformed ones.
///
/// Order is preserved in both lists, so [`CompiledPolicies::find`] returns
/// the same policy as [`match_policy`] over the original slice.
pub fn compile_policies(policies: &[Policy]) -> CompiledPolicies<'_> {
    let mut compiled = CompiledPolicies::default();

    for policy in policies {
        match policy.range() {
            Ok(range) => compiled.bands.push(PolicyBand { policy, range }),
            Err(err) => {
                debug!(
                    policy_id = policy.policy_id,
                    experience_range = %policy.experience_range,
                    "Skipping policy with malformed range"
                );
                compiled.skipped.push(SkippedPolicy {
                    policy,
                    reason: err.to_string(),
                });
            }
        }
    }

    compiled
}

/// Returns the first policy whose experience range contains
/// `experience_years`.
///
/// Policies whose range does not parse are skipped; they never stop the
/// scan. `None` means no policy covers the value.
///
/// # Examples
///
/// ```
/// use increment_engine::calculation::match_policy;
/// use increment_engine::models::Policy;
/// use rust_decimal::Decimal;
///
/// let policy = |id: i64, range: &str, pct: i64| Policy {
///     policy_id: id,
///     category: format!("band {}", id),
///     experience_range: range.to_string(),
///     increment_percentage: Decimal::new(pct, 0),
///     eligibility: None,
/// };
/// let policies = vec![
///     policy(1, "0-2 years", 5),
///     policy(2, "2-5 years", 8),
///     policy(3, "5-10 years", 12),
/// ];
///
/// let matched = match_policy(3, &policies).unwrap();
/// assert_eq!(matched.policy_id, 2);
/// assert!(match_policy(100, &policies).is_none());
/// ```
pub fn match_policy(experience_years: u32, policies: &[Policy]) -> Option<&Policy> {
    policies.iter().find(|policy| match policy.range() {
        Ok(range) => range.contains(experience_years),
        Err(_) => false,
    })
}
