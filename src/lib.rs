pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod languages;
pub mod openai;
pub mod prompt;
pub mod server;
pub mod translator;
