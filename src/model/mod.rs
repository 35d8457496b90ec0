pub mod config;
pub mod kit;
pub mod project;
