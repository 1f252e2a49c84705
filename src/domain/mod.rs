//! Domain layer - Core business logic and entities
//!
//! This layer contains the heart of the business logic, independent of
//! external frameworks, transport, or infrastructure concerns.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
pub use value_objects::*;
