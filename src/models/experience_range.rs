//! Typed experience ranges.
//!
//! Policies carry their experience band as text such as `"2-5 years"` or
//! `"10+ years"`. [`ExperienceRange`] is the parsed form used for matching.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// An experience band in whole years.
///
/// # Example
///
/// ```
/// use increment_engine::models::ExperienceRange;
///
/// let range: ExperienceRange = "2-5 years".parse().unwrap();
/// assert_eq!(range, ExperienceRange::Bounded { min: 2, max: 5 });
/// assert!(range.contains(5));
/// assert!(!range.contains(6));
///
/// let senior: ExperienceRange = "10+ years".parse().unwrap();
/// assert!(senior.contains(40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceRange {
    /// `min..=max` years, written `"A-B years"`.
    Bounded {
        /// Lowest covered value (inclusive).
        min: u32,
        /// Highest covered value (inclusive).
        max: u32,
    },
    /// `min` years or more, written `"A+ years"`.
    OpenEnded {
        /// Lowest covered value (inclusive).
        min: u32,
    },
}

impl ExperienceRange {
    /// Returns the inclusive lower bound.
    pub fn min(&self) -> u32 {
        match *self {
            ExperienceRange::Bounded { min, .. } | ExperienceRange::OpenEnded { min } => min,
        }
    }

    /// Returns the inclusive upper bound, or `None` for an open-ended range.
    pub fn max(&self) -> Option<u32> {
        match *self {
            ExperienceRange::Bounded { max, .. } => Some(max),
            ExperienceRange::OpenEnded { .. } => None,
        }
    }

    /// Returns true if `years` falls inside the range.
    pub fn contains(&self, years: u32) -> bool {
        match *self {
            ExperienceRange::Bounded { min, max } => min <= years && years <= max,
            ExperienceRange::OpenEnded { min } => min <= years,
        }
    }
}

impl FromStr for ExperienceRange {
    type Err = EngineError;

    /// Parses `"A-B years"` or `"A+ years"`.
    ///
    /// A `-` anywhere selects the bounded grammar, checked before `+`. Each
    /// number is read from the leading digits of its token, so unit words
    /// such as `years` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |message: &str| EngineError::MalformedRange {
            range: s.to_string(),
            message: message.to_string(),
        };

        if let Some((min_token, max_token)) = s.split_once('-') {
            let min = leading_number(min_token)
                .ok_or_else(|| malformed("lower bound is not a whole number"))?;
            let max = leading_number(max_token)
                .ok_or_else(|| malformed("upper bound is not a whole number"))?;
            if min > max {
                return Err(malformed("lower bound exceeds upper bound"));
            }
            return Ok(ExperienceRange::Bounded { min, max });
        }

        if let Some((min_token, _)) = s.split_once('+') {
            let min = leading_number(min_token)
                .ok_or_else(|| malformed("lower bound is not a whole number"))?;
            return Ok(ExperienceRange::OpenEnded { min });
        }

        Err(malformed("expected 'A-B years' or 'A+ years'"))
    }
}

impl fmt::Display for ExperienceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceRange::Bounded { min, max } => write!(f, "{}-{} years", min, max),
            ExperienceRange::OpenEnded { min } => write!(f, "{}+ years", min),
        }
    }
}

/// Reads the run of ASCII digits at the start of a trimmed token.
fn leading_number(token: &str) -> Option<u32> {
    let token = token.trim();
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if end == 0 {
        return None;
    }
    token[..end].parse().ok()
}
