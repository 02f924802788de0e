pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod network;
pub mod ops;
pub mod persistence;
pub mod refinery;

pub use error::ScoutError;
