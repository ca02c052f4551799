//! idea-score command line library: terminal rendering and the `validate` flow.
//!
//! **Public API**: [`run_validate`], [`read_idea`], [`ValidateOptions`], [`display`].

pub mod display;
mod validate;

pub use validate::{read_idea, run_validate, terminal_flags, ValidateError, ValidateOptions};
