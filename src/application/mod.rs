//! Application layer - Use cases and orchestration
//!
//! This layer orchestrates domain services over injected repository
//! abstractions. It depends on domain but not on infrastructure.

pub mod experiences;

pub use experiences::*;
