//! Step definitions for task store behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
