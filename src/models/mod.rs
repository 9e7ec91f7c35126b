pub mod campaign;
pub mod common;
pub mod link;
pub mod participant;

pub use campaign::*;
pub use common::*;
pub use link::*;
pub use participant::*;
