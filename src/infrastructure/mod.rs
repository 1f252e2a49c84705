//! Infrastructure layer - Concrete repository implementations

pub mod repositories;

pub use repositories::*;
