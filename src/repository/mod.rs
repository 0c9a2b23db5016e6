//! Database repository layer

pub mod lead_repo;
pub mod privacy_repo;

pub use lead_repo::*;
pub use privacy_repo::*;
