//! Identifier newtypes for board entities.
//!
//! Identifiers are assigned by the persistence layer. The source system's
//! "zero means unassigned" convention is not modelled here; optional
//! references are expressed with `Option` at the use site instead.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! board_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a persistence-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
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
    };
}

board_id!(
    /// Unique identifier for a task record.
    TaskId
);
board_id!(
    /// Unique identifier for a project.
    ProjectId
);
board_id!(
    /// Unique identifier for a board column within a project.
    ColumnId
);
board_id!(
    /// Unique identifier for a swimlane within a project.
    SwimlaneId
);
board_id!(
    /// Unique identifier for a task category within a project.
    CategoryId
);
board_id!(
    /// Unique identifier for a user account.
    UserId
);
board_id!(
    /// Unique identifier for a subtask record.
    SubtaskId
);
