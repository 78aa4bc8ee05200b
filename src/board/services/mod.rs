//! Application services for task duplication and migration.

mod duplication;

pub use duplication::{
    DestinationOverrides, DestinationValues, DuplicationError, DuplicationPorts,
    DuplicationResult, TaskDuplicationService,
};
