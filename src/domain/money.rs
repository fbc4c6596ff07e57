use crate::error::{PaymentError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Currencies whose minor unit equals the major unit. Amounts in these are
/// sent to the gateway unscaled.
pub const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "JPY", "BIF", "CLP", "DJF", "GNF", "ISK", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "XAF",
];

/// An ISO 4217 currency code, normalized to uppercase on construction so
/// zero-decimal lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(PaymentError::Validation(format!(
                "invalid currency code: {code:?}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero_decimal(&self) -> bool {
        ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str())
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts a major-unit amount into the gateway's integral minor-unit
/// representation: 10.00 EUR becomes 1000, 500 JPY stays 500.
///
/// Non-integral results are rounded half away from zero on both paths,
/// since the gateway only accepts whole minor units.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Result<i64> {
    let scaled = if currency.is_zero_decimal() {
        amount
    } else {
        amount * Decimal::ONE_HUNDRED
    };

    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| {
            PaymentError::Validation(format!("amount {amount} {currency} is out of range"))
        })
}
