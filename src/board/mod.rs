//! Task duplication and cross-project migration for kanban boards.
//!
//! This module implements copying a task's duplicated field set into a new
//! record, spawning the next instance of a recurring task, and moving or
//! copying tasks between projects with project-scoped reference remapping
//! (category, swimlane, column, assignee). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
