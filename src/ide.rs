//! IDE features module.

pub mod backend;
pub mod diagnostics;
mod handlers;
pub mod state;
