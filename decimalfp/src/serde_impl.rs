/*!

`serde` support (§6 "serialization"): a [`Decimal`] serializes as its
canonical decimal string, so the wire form is human-readable and carries
its declared precision (a `"1.50"` round-trips as precision 2, not 1) —
the same reason `rust_decimal` and similar crates serialize through a
string rather than a float.

*/

use alloc::string::ToString;
use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decimal::Decimal;

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal literal string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(|e| E::custom(alloc::format!("{e}")))
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use serde_json::{from_str, to_string};

    #[test]
    fn serializes_as_canonical_string() {
        assert_eq!(to_string(&parse("1.50").unwrap()).unwrap(), "\"1.50\"");
        assert_eq!(to_string(&parse("-0.5").unwrap()).unwrap(), "\"-0.5\"");
    }

    #[test]
    fn deserializes_preserving_precision() {
        let d: Decimal = from_str("\"1.50\"").unwrap();
        assert_eq!(d, parse("1.50").unwrap());
        assert_eq!(d.precision(), 2);
    }

    #[test]
    fn rejects_malformed_literal() {
        assert!(from_str::<Decimal>("\"not a number\"").is_err());
    }
}
