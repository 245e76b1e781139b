//! Navigation file inputs.

pub mod language;
pub mod nav_file;
mod query;
