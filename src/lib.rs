pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod prediction;
pub mod server;
pub mod vision;

pub use error::{Error, Result};
