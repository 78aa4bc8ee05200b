//! In-memory adapters for board duplication tests.

mod board;

pub use board::{DispatchedEvent, InMemoryBoard};
