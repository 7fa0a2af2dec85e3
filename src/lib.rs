pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
