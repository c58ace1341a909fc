//! The `["123.45", "BTC"]` amount-with-currency wire pair

use rust_decimal::Decimal;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An amount tagged with its currency, as the exchange transmits it
///
/// The wire format is a two-element array: the amount as a decimal string,
/// then the currency code. Amounts keep full decimal precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCurrency {
    /// Decimal amount
    pub amount: Decimal,
    /// Currency code (e.g., "BTC", "CLP")
    pub currency: String,
}

impl AmountCurrency {
    /// Create a new amount-currency pair
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for AmountCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl Serialize for AmountCurrency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.amount.to_string())?;
        tuple.serialize_element(&self.currency)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for AmountCurrency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = AmountCurrency;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a two-element [amount, currency] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let raw: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let currency: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let amount = raw
                    .parse::<Decimal>()
                    .map_err(|e| de::Error::custom(format!("invalid amount {:?}: {}", raw, e)))?;
                Ok(AmountCurrency { amount, currency })
            }
        }

        deserializer.deserialize_seq(PairVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_wire_pair() {
        let pair: AmountCurrency = serde_json::from_str(r#"["741000.0", "CLP"]"#).unwrap();
        assert_eq!(pair.amount, dec!(741000.0));
        assert_eq!(pair.currency, "CLP");
    }

    #[test]
    fn test_serialize_wire_pair() {
        let pair = AmountCurrency::new(dec!(0.5), "BTC");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"["0.5","BTC"]"#);
    }

    #[test]
    fn test_precision_survives_roundtrip() {
        let pair: AmountCurrency = serde_json::from_str(r#"["0.00000001", "BTC"]"#).unwrap();
        assert_eq!(pair.amount, dec!(0.00000001));
    }

    #[test]
    fn test_rejects_short_array() {
        let result: Result<AmountCurrency, _> = serde_json::from_str(r#"["0.5"]"#);
        assert!(result.is_err());
    }
}
