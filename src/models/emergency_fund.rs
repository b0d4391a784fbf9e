//! Emergency-fund tracker
//!
//! A goal/progress pair. Budgets and the global achievements record each
//! carry their own tracker; the two are never reconciled.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Denominator used when no goal has been set (one currency unit)
const UNSET_GOAL_DENOMINATOR: Money = Money::from_units(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyFund {
    #[serde(default)]
    pub goal: Money,

    #[serde(default)]
    pub progress: Money,
}

impl EmergencyFund {
    pub fn new(goal: Money, progress: Money) -> Self {
        Self { goal, progress }
    }

    /// Display ratio of progress to goal; see [`ratio`]
    pub fn ratio(&self) -> f64 {
        ratio(self.goal, self.progress)
    }

    /// Amount still missing, zero once the goal is met
    pub fn remaining(&self) -> Money {
        if self.progress >= self.goal {
            Money::zero()
        } else {
            self.goal - self.progress
        }
    }

    pub fn validate(&self) -> Result<(), EmergencyFundValidationError> {
        if self.goal.is_negative() {
            return Err(EmergencyFundValidationError::NegativeGoal);
        }
        if self.progress.is_negative() {
            return Err(EmergencyFundValidationError::NegativeProgress);
        }
        if self.goal.is_out_of_range() || self.progress.is_out_of_range() {
            return Err(EmergencyFundValidationError::TooLarge);
        }
        Ok(())
    }
}

/// Ratio of progress to goal
///
/// A zero goal is replaced by a denominator of one unit. The result is not
/// clamped: progress beyond the goal yields a ratio above 1.
pub fn ratio(goal: Money, progress: Money) -> f64 {
    let denominator = if goal.is_zero() {
        UNSET_GOAL_DENOMINATOR
    } else {
        goal
    };
    progress.as_f64() / denominator.as_f64()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyFundValidationError {
    NegativeGoal,
    NegativeProgress,
    TooLarge,
}

impl fmt::Display for EmergencyFundValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeGoal => write!(f, "Emergency fund goal cannot be negative"),
            Self::NegativeProgress => write!(f, "Emergency fund progress cannot be negative"),
            Self::TooLarge => write!(f, "Emergency fund amounts cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for EmergencyFundValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_with_goal() {
        let fund = EmergencyFund::new(Money::from_units(1000), Money::from_units(250));
        assert_eq!(fund.ratio(), 0.25);
        assert_eq!(fund.remaining(), Money::from_units(750));
    }

    #[test]
    fn test_zero_goal_uses_unit_denominator() {
        assert_eq!(ratio(Money::zero(), Money::zero()), 0.0);
        assert_eq!(ratio(Money::zero(), Money::from_cents(250)), 2.5);
    }

    #[test]
    fn test_ratio_not_clamped() {
        let fund = EmergencyFund::new(Money::from_units(100), Money::from_units(150));
        assert_eq!(fund.ratio(), 1.5);
        assert!(fund.remaining().is_zero());
    }

    #[test]
    fn test_validation() {
        assert!(EmergencyFund::default().validate().is_ok());
        assert_eq!(
            EmergencyFund::new(Money::from_cents(-1), Money::zero()).validate(),
            Err(EmergencyFundValidationError::NegativeGoal)
        );
        assert_eq!(
            EmergencyFund::new(Money::zero(), Money::from_cents(-1)).validate(),
            Err(EmergencyFundValidationError::NegativeProgress)
        );
        assert_eq!(
            EmergencyFund::new(Money::zero(), Money::from_cents(i64::MAX)).validate(),
            Err(EmergencyFundValidationError::TooLarge)
        );
    }
}
