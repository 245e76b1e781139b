//! Navigation label tables, one module per language.

pub mod en;
pub mod pt_br;
