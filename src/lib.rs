//! `CollabTask`: a collaborative study-task tracker.
//!
//! The crate has two halves that share one task model:
//!
//! - [`task`]: the task store, with domain rules, the repository port and its
//!   in-memory and `PostgreSQL` adapters, and the CRUD service
//! - [`api`]: the JSON-over-HTTP surface for the task store
//! - [`board`]: a headless board client that drives the API from user
//!   actions
//! - [`config`]: startup configuration for both halves
//!
//! Both halves follow hexagonal architecture: pure domain types, trait
//! ports, and adapters that own all I/O.

pub mod api;
pub mod board;
pub mod config;
pub mod task;
