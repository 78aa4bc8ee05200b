//! `PostgreSQL` adapters for board persistence.

mod board;
mod models;
mod schema;

pub use board::{BoardPgPool, PostgresBoard};
