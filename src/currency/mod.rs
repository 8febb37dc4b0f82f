//! Display-only currency handling: a fixed code-to-symbol mapping and the
//! single place where monetary values get their two-decimal presentation
//! rounding. There is no conversion between currencies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
        }
    }

    /// Renders a monetary value with the currency symbol, rounded to two
    /// decimals. Negative values keep a leading sign before the symbol.
    pub fn format_amount(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.symbol(), value.abs())
        } else {
            format!("{}{:.2}", self.symbol(), value)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown currency code `{}`", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "INR" => Ok(Currency::Inr),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_supported_codes() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Inr.symbol(), "₹");
    }

    #[test]
    fn formatting_rounds_to_two_decimals() {
        assert_eq!(Currency::Usd.format_amount(800.0), "$800.00");
        assert_eq!(Currency::Inr.format_amount(12.345), "₹12.35");
        assert_eq!(Currency::Eur.format_amount(-3.5), "-€3.50");
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" inr ".parse::<Currency>().unwrap(), Currency::Inr);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn serde_uses_the_iso_code() {
        let json = serde_json::to_string(&Currency::Eur).unwrap();
        assert_eq!(json, "\"EUR\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Currency::Eur);
    }
}
