//! # Application Layer
//!
//! Use cases driving one session through its interaction cycle, and the
//! interfaces they need from the connector layer.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
