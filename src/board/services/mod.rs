//! Application services for the board client.

mod controller;

pub use controller::{ActionOutcome, BoardController};
