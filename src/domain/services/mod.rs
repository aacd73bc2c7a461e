//! Pure domain services.

mod prompt_builder;

pub use prompt_builder::*;
