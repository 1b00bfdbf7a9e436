pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod lockout;
pub mod prompt;
pub mod reporter;
pub mod session;
pub mod store;
