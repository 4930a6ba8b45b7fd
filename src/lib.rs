pub mod cache;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod providers;
pub mod server;
