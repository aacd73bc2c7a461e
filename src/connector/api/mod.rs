pub mod container;
pub mod controller;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig, API_KEY_ENV};
pub use error::ApiError;
pub use router::{build_router, AppState};
