//! Plan-versus-actual status
//!
//! Both sides are clamped at zero before comparing. Thresholds are checked
//! in integer minor units so that exactly 90% of a plan is always `Near`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Share of the plan at which spending counts as near the limit, in tenths
const NEAR_THRESHOLD_TENTHS: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    None,
    Under,
    Near,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "-",
            Self::Under => "Under",
            Self::Near => "Near",
            Self::Over => "Over",
        };
        f.pad(label)
    }
}

/// Derived comparison of an effective plan against an actual
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanComparison {
    /// `plan - actual`; negative means overspent
    pub difference: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

impl PlanComparison {
    pub fn new(plan: Money, actual: Money) -> Self {
        let p = plan.non_negative().cents();
        let a = actual.non_negative().cents();

        let (percent_used, status) = if p == 0 {
            if a == 0 {
                (0.0, BudgetStatus::None)
            } else {
                (1.0, BudgetStatus::Over)
            }
        } else {
            let ratio = a as f64 / p as f64;
            let status = if a > p {
                BudgetStatus::Over
            } else if (a as i128) * 10 >= (p as i128) * NEAR_THRESHOLD_TENTHS as i128 {
                BudgetStatus::Near
            } else {
                BudgetStatus::Under
            };
            (ratio, status)
        };

        Self {
            difference: plan - actual,
            percent_used,
            status,
        }
    }
}
