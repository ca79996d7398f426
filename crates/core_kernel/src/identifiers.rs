//! Strongly-typed identifiers for catalog entities
//!
//! Every entity is keyed by a numeric identifier assigned by the store on
//! insert. Newtype wrappers keep a `PokemonId` from being passed where an
//! `OwnerId` is expected. The value `0` marks an entity that has not been
//! inserted yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Identifier of an entity the store has not assigned yet
            pub const UNASSIGNED: Self = Self(0);

            /// Creates from a raw store value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns true once the store has assigned this identifier
            pub const fn is_assigned(&self) -> bool {
                self.0 != 0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
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

define_id!(CategoryId, "CAT");
define_id!(CountryId, "CTY");
define_id!(OwnerId, "OWN");
define_id!(PokemonId, "PKM");
define_id!(ReviewId, "REV");
define_id!(ReviewerId, "RVR");
