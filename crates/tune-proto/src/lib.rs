pub mod assistant;
pub mod catalog;
pub mod config;
pub mod platform;
pub mod protocol;
pub mod query;
pub mod selection;
pub mod state;
