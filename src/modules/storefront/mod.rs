pub mod client;
pub mod footer;
pub mod query;

pub use client::StorefrontClient;
pub use query::ProductQuery;
