//! CLI command implementations.

pub mod classify;
pub mod doctor;
pub mod identify;
pub mod table;
