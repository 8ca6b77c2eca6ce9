pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod export;
pub mod filter;
pub mod logging;
pub mod models;
pub mod server;
pub mod validation;

pub use client::NotesClient;
pub use db::Database;
