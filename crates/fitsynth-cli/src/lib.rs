pub mod app;
pub mod archive;
pub mod config;
pub mod error;
pub mod export;
pub mod summary;
