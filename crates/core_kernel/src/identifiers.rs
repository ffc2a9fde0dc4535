//! Strongly-typed identifiers for catalog entities
//!
//! Identifiers are server-generated `BIGSERIAL` keys. Newtype wrappers keep an
//! employee key from being passed where a product key is expected, while
//! staying transparent in JSON bodies and URL paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw key value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw key value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the entity name this identifier belongs to
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(EmployeeId, "Employee");
define_id!(ProductId, "Product");
