//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a UserId where a PartId is expected. The inner type is
//! `i64` because the persisted rows use auto-increment integer keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over `i64`.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an integer.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Define all ID types
define_id!(PartId);
define_id!(CartLineId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = PartId::new(7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_id_from_i64() {
        let id: PartId = 42.into();
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_id_display() {
        let id = CartLineId::new(3);
        assert_eq!(format!("{}", id), "3");
    }

    #[test]
    fn test_id_equality_and_order() {
        assert_eq!(PartId::new(1), PartId::new(1));
        assert_ne!(PartId::new(1), PartId::new(2));
        assert!(PartId::new(1) < PartId::new(2));
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
