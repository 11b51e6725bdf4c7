//! Identifiers stamped on calculation results
//!
//! Every restatement and tariff quote carries a time-ordered (UUID v7) id so
//! that an exported ledger can be traced back to the request that produced
//! it. Ids travel as prefixed strings (`CALC-0190...`) in logs and JSON alike.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! result_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generates a fresh id; later ids sort after earlier ones
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts the prefixed form or a bare UUID
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

result_id!(
    /// Id of a ledger or aggregate restatement
    CalculationId,
    "CALC"
);

result_id!(
    /// Id of a priced tariff evaluation
    TariffQuoteId,
    "QUOTE"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_prefix() {
        assert!(CalculationId::generate().to_string().starts_with("CALC-"));
        assert!(TariffQuoteId::generate().to_string().starts_with("QUOTE-"));
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let first = CalculationId::generate();
        let second = CalculationId::generate();
        assert!(first < second);
    }
}
