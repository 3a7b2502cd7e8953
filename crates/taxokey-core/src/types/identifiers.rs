//! Typed integer identifiers.
//!
//! Each ID type wraps a `u64` to prevent cross-type confusion.
//! A `TraitId` cannot be accidentally used where a `CharacterId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new ID from its raw value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Taxon (entity) identifier.
    EntityId
);

define_id!(
    /// Character identifier, e.g. "cap color".
    CharacterId
);

define_id!(
    /// Trait value identifier, e.g. "red". May name an alias.
    TraitId
);

define_id!(
    /// Character category identifier, e.g. "cap".
    CategoryId
);

define_id!(
    /// Opaque identifier of a node in a generated key.
    KeyNodeId
);

define_id!(
    /// Opaque identifier of a branch in a generated key.
    KeyBranchId
);
