//! HR increment policy model and related types.
//!
//! A [`Policy`] ties an experience band to an increment percentage.
//! [`NewPolicy`] is the submission form (the store assigns `policy_id`) and
//! [`PolicyUpdate`] the partial update.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{ExperienceRange, deserialize_some};

/// Largest increment percentage accepted.
pub const MAX_INCREMENT_PERCENTAGE: i64 = 1000;

/// A stored increment policy.
///
/// `experience_range` is kept as submitted. Stored rows may predate
/// validation, so matching re-parses it with [`Policy::range`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Store-assigned identifier.
    pub policy_id: i64,
    /// Band label such as "Junior" or "Senior".
    pub category: String,
    /// `"A-B years"` or `"A+ years"`.
    pub experience_range: String,
    /// Increment applied to the salary, in percent.
    pub increment_percentage: Decimal,
    /// Free-text eligibility criteria.
    #[serde(default)]
    pub eligibility: Option<String>,
}

impl Policy {
    /// Parses this policy's experience range.
    ///
    /// # Examples
    ///
    /// ```
    /// use increment_engine::models::{ExperienceRange, Policy};
    /// use rust_decimal::Decimal;
    ///
    /// let policy = Policy {
    ///     policy_id: 1,
    ///     category: "Senior".to_string(),
    ///     experience_range: "10+ years".to_string(),
    ///     increment_percentage: Decimal::new(15, 0),
    ///     eligibility: None,
    /// };
    /// assert_eq!(policy.range().unwrap(), ExperienceRange::OpenEnded { min: 10 });
    /// ```
    pub fn range(&self) -> EngineResult<ExperienceRange> {
        self.experience_range.parse()
    }

    /// Checks the percentage of a caller-supplied policy.
    ///
    /// The range is not checked here; matching skips malformed ranges.
    pub fn validate_percentage(&self) -> EngineResult<()> {
        validate_percentage(self.increment_percentage)
    }

    /// Applies the fields present in `update`, leaving the rest unchanged.
    pub fn apply(&mut self, update: &PolicyUpdate) {
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(range) = &update.experience_range {
            self.experience_range = range.clone();
        }
        if let Some(percentage) = update.increment_percentage {
            self.increment_percentage = percentage;
        }
        if let Some(eligibility) = &update.eligibility {
            self.eligibility = eligibility.clone();
        }
    }
}

/// A policy as submitted for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
    /// Band label.
    pub category: String,
    /// `"A-B years"` or `"A+ years"`.
    pub experience_range: String,
    /// Increment in percent, non-negative.
    pub increment_percentage: Decimal,
    /// Free-text eligibility criteria.
    #[serde(default)]
    pub eligibility: Option<String>,
}

impl NewPolicy {
    /// Checks the submission rules, including that the range parses.
    pub fn validate(&self) -> EngineResult<()> {
        validate_category(&self.category)?;
        self.experience_range.parse::<ExperienceRange>()?;
        validate_percentage(self.increment_percentage)
    }

}

/// A partial update of a policy.
///
/// An explicit `null` for `eligibility` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    /// New band label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New experience range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_range: Option<String>,
    /// New percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_percentage: Option<Decimal>,
    /// New eligibility, `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligibility: Option<Option<String>>,
}

impl PolicyUpdate {
    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.experience_range.is_none()
            && self.increment_percentage.is_none()
            && self.eligibility.is_none()
    }

    /// Checks that the update is non-empty and every present field is valid.
    pub fn validate(&self) -> EngineResult<()> {
        if self.is_empty() {
            return Err(EngineError::EmptyUpdate {
                entity: "policy".to_string(),
            });
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(range) = &self.experience_range {
            range.parse::<ExperienceRange>()?;
        }
        if let Some(percentage) = self.increment_percentage {
            validate_percentage(percentage)?;
        }
        Ok(())
    }
}

fn validate_category(category: &str) -> EngineResult<()> {
    if category.trim().is_empty() {
        return Err(EngineError::InvalidPolicy {
            field: "category".to_string(),
            message: "is required".to_string(),
        });
    }
    Ok(())
}

fn validate_percentage(percentage: Decimal) -> EngineResult<()> {
    if percentage < Decimal::ZERO {
        return Err(EngineError::InvalidPolicy {
            field: "increment_percentage".to_string(),
            message: "must be a non-negative number".to_string(),
        });
    }
    if percentage > Decimal::from(MAX_INCREMENT_PERCENTAGE) {
        return Err(EngineError::InvalidPolicy {
            field: "increment_percentage".to_string(),
            message: format!("must not exceed {}", MAX_INCREMENT_PERCENTAGE),
        });
    }
    Ok(())
}
