use serde::{Deserialize, Serialize};

use crate::{Pair, ValidationError};

/// Last traded price for a pair at the moment it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub pair: Pair,
    pub amount: f64,
}

impl Quote {
    pub fn new(pair: Pair, amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "amount" });
        }
        if amount < 0.0 {
            return Err(ValidationError::NegativeValue { field: "amount" });
        }

        Ok(Self { pair, amount })
    }
}
