//! Task store for `CollabTask`.
//!
//! Tasks carry a title, a description, a completion flag, a priority, an
//! optional due date, a subject, a board status and an order within their
//! status column. Listing supports exact-match filters, a case-insensitive
//! search and an eleven-field sort.
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
