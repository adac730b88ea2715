//! Database-assigned identifiers.
//!
//! Every aggregate is keyed by a 64-bit integer. Each gets its own newtype so
//! an employee id can never be passed where a position id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
                ToSchema,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Wrap a raw identifier.
                #[must_use]
                pub const fn new(value: i64) -> Self {
                    Self(value)
                }

                /// Raw identifier value.
                #[must_use]
                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl From<i64> for $name {
                fn from(value: i64) -> Self {
                    Self(value)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

define_id! {
    /// User account identifier.
    UserId,
    /// Employee identifier.
    EmployeeId,
    /// Organisational unit identifier.
    OrgUnitId,
    /// Position identifier.
    PositionId,
    /// Assignment place identifier.
    AssignmentPlaceId,
    /// Inventory asset identifier.
    AssetId,
    /// Archived employee row identifier.
    ArchivedEmployeeId,
    /// Archived position row identifier.
    ArchivedPositionId,
    /// Archived asset row identifier.
    ArchivedAssetId,
}
