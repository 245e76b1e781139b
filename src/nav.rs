//! Navigation label dictionaries and their validation.

mod dictionary;
mod error;
pub mod locales;
pub mod registry;

pub use dictionary::{
    CandidateEntry,
    CanonicalKeys,
    NavDictionary,
    NavEntry,
    Validated,
    ValidationPolicy,
};
pub use error::{
    NavDictionaryError,
    NavError,
    NavIssue,
};
