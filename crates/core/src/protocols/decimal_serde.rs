//! Serde adapter for decimal amounts.
//!
//! Amounts are written as strings. They are read from strings or JSON
//! numbers; integers convert exactly and floats go through their shortest
//! decimal representation.

use rust_decimal::Decimal;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::str::FromStr;

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal amount (either a string or a number)")
    }

    fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        let trimmed = value.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        if !value.is_finite() {
            return Err(E::invalid_value(Unexpected::Float(value), &self));
        }
        Decimal::from_str(&value.to_string())
            .map_err(|_| E::invalid_value(Unexpected::Float(value), &self))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Amount {
        #[serde(with = "super")]
        value: Decimal,
    }

    fn parse(value: serde_json::Value) -> Result<Decimal, serde_json::Error> {
        serde_json::from_value::<Amount>(json!({ "value": value })).map(|amount| amount.value)
    }

    #[test]
    fn test_reads_strings_and_numbers() {
        assert_eq!(parse(json!("100.000000000000000001")).unwrap(), dec!(100.000000000000000001));
        assert_eq!(parse(json!(100)).unwrap(), dec!(100));
        assert_eq!(parse(json!(-7)).unwrap(), dec!(-7));
        assert_eq!(parse(json!(0.1)).unwrap(), dec!(0.1));
        assert_eq!(parse(json!("1e3")).unwrap(), dec!(1000));
    }

    #[test]
    fn test_float_amounts_keep_their_written_digits() {
        let sum = parse(json!(0.1)).unwrap() + parse(json!(0.2)).unwrap();
        assert_eq!(sum, dec!(0.3));
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        assert!(parse(json!("one")).is_err());
        assert!(parse(json!(true)).is_err());
        assert!(parse(json!(null)).is_err());
    }

    #[test]
    fn test_writes_strings() {
        let json = serde_json::to_value(Amount { value: dec!(15.50) }).unwrap();
        assert_eq!(json["value"], "15.50");
    }
}
