//! Client-facing modules
//!
//! - `storefront`: typed fetch helpers the shop front-end uses, plus its footer
//! - `dashboard`: table declarations, formatting and the admin form controller

pub mod dashboard;
pub mod error;
pub mod storefront;

pub use error::ClientError;
