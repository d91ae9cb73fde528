pub mod actions;
pub mod bot;
pub mod config;
pub mod gate;
pub mod pending;
pub mod store;
pub mod types;
