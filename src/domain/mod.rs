//! Domain layer - Business abstractions
//!
//! Repository trait definitions, input validation and domain error types.
//! Record types are the ORM models re-exported under domain names.

pub mod errors;
pub mod repositories;
pub mod validation;

pub use errors::{DomainError, FieldError};
pub use repositories::*;
pub use validation::Validate;
