//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs keep a weighing order id from being passed
//! where a settlement id is expected. The nil UUID is never a valid identity;
//! constructors in the domain crates reject it through [`EntityId::is_nil`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Behaviour shared by every generated identifier type
pub trait EntityId: Copy + fmt::Display {
    /// Returns true for the nil (all zero) UUID
    fn is_nil(&self) -> bool;
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// The nil identifier, only useful to exercise validation
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl EntityId for $name {
            fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Weighing domain identifiers
define_id!(CollectionTripId, "TRIP");
define_id!(WeighingOrderId, "WGH");
define_id!(WeightReadingId, "WRD");
define_id!(DischargeId, "DSC");

// Settlement domain identifiers
define_id!(SettlementId, "STL");
define_id!(ProviderLoadId, "PLD");
define_id!(PenaltyId, "PEN");
