//! Payment amount held in minor currency units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Transaction amount in the lowest denomination of the currency (cents).
///
/// The gateway only accepts whole minor units, so decimal input is scaled
/// by 100 and rounded half away from zero at that step. Any sign is kept;
/// the gateway decides which amounts it accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Wraps a value that is already expressed in minor units.
    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Converts a major-unit decimal amount (e.g. `12.34` dollars).
    pub fn from_major(amount: Decimal) -> Result<Self, ValidationError> {
        let minor = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(ValidationError::AmountOutOfRange)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(ValidationError::AmountOutOfRange)?;
        Ok(Self(minor))
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
