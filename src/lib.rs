pub mod catalog;
pub mod config;
pub mod error;
pub mod global;
pub mod notifier;
pub mod poller;
pub mod types;
