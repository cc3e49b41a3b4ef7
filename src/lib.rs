// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod gamelog;
pub mod grading;
pub mod roster;
