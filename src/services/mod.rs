pub mod campaign_service;
pub mod link_service;
pub mod participant_service;

pub use campaign_service::*;
pub use link_service::*;
pub use participant_service::*;
