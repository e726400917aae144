pub mod config;
pub mod error;
pub mod output;
pub mod traits;
pub mod types;
