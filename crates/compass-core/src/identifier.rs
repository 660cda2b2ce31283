//! Dense index identifiers for nodes, shapes and groups.
//!
//! Node ids are index-aligned with the size list supplied to a layout run,
//! so `NodeId::new(3)` is always the fourth node. Shape and group ids are
//! handed out by a [`GeometryProvider`](crate::provider::GeometryProvider).

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Creates an identifier from its index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the underlying index.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Identifier of a node in a layout tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use compass_core::identifier::NodeId;
    ///
    /// let id = NodeId::new(4);
    /// assert_eq!(id.index(), 4);
    /// assert_eq!(id.to_string(), "4");
    /// ```
    NodeId,
    ""
);

index_id!(
    /// Handle to a rectangle owned by a geometry provider.
    ShapeId,
    "shape#"
);

index_id!(
    /// Handle to a footprint group owned by a geometry provider.
    GroupId,
    "group#"
);
