//! Cash-flow kinds
//!
//! Money moves in one of a small closed set of directions. Master categories
//! carry a derived [`MasterFlow`]; transactions and budget lines resolve to a
//! [`Flow`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized direction of money for transactions and budget lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    In,
    Interest,
    Out,
    Transfer,
}

impl Flow {
    /// Income-side flows feed the income summary
    pub fn is_income(&self) -> bool {
        matches!(self, Self::In | Self::Interest)
    }

    /// Flow of a bare amount: non-negative is money in, negative is money out
    pub fn from_sign(amount_cents: i64) -> Self {
        if amount_cents >= 0 {
            Self::In
        } else {
            Self::Out
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Interest => write!(f, "interest"),
            Self::Out => write!(f, "out"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// Flow derived from a master category name
///
/// `Other` marks names that match no keyword; it only surfaces in category
/// rollups and is collapsed before it reaches a transaction or a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterFlow {
    Interest,
    In,
    Out,
    Transfers,
    Other,
}

impl MasterFlow {
    /// Collapse to a transaction/line flow; `Other` has no counterpart
    pub fn as_flow(&self) -> Option<Flow> {
        match self {
            Self::Interest => Some(Flow::Interest),
            Self::In => Some(Flow::In),
            Self::Out => Some(Flow::Out),
            Self::Transfers => Some(Flow::Transfer),
            Self::Other => None,
        }
    }
}

impl fmt::Display for MasterFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interest => write!(f, "interest"),
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
            Self::Transfers => write!(f, "transfers"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Explicit per-transaction correction of the derived flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowOverride {
    Transfer,
    Interest,
    Fees,
    In,
    Out,
}

impl FlowOverride {
    pub fn as_flow(&self) -> Flow {
        match self {
            Self::Transfer => Flow::Transfer,
            Self::Interest => Flow::Interest,
            Self::Fees | Self::Out => Flow::Out,
            Self::In => Flow::In,
        }
    }
}
