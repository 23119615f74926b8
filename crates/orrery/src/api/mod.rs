pub mod config;
pub mod system;
pub mod types;
