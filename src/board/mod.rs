//! Task board client.
//!
//! A headless model of the board UI: it fetches the task list with the
//! current search, sort and filters, performs every user action against the
//! task store API, and reconciles local state from the responses. Rendering
//! and the drag gesture itself belong to the embedding UI, which reports a
//! finished drag as a [`domain::DragOutcome`].
//!
//! - Domain state and rules in [`domain`]
//! - The API port in [`ports`]
//! - The `reqwest` adapter in [`adapters`]
//! - The controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
