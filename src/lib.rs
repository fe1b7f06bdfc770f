pub mod api;
pub mod config;
pub mod error;
pub mod estimation;
pub mod maintenance;
pub mod records;
pub mod state;
