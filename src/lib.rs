pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod handlers;
pub mod link;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;
pub mod swagger;

pub use config::Config;
pub use error::{AppError, AppResult};
