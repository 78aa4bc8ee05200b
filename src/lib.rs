//! Tessera: kanban board task duplication and migration.
//!
//! This crate implements the board-side business logic for copying tasks,
//! spawning recurring task instances, and moving or copying tasks across
//! project boundaries, delegating persistence and notification to pluggable
//! collaborators.
//!
//! # Architecture
//!
//! Tessera follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`board`]: Task records, duplication services, and board collaborators

pub mod board;
