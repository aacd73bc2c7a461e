//! Render layer: HTML for chat bubbles and the session page.

mod bubble;
mod page;

pub use bubble::*;
pub use page::*;
