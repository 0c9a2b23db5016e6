//! Business logic services layer

pub mod catalog;
pub mod lead_service;
pub mod policy_engine;
pub mod privacy_service;
pub mod route_gate;

pub use lead_service::LeadService;
pub use privacy_service::PrivacyService;
