//! Unit and service tests for board task duplication and migration.

mod domain_tests;
mod recurrence_tests;
mod support;
