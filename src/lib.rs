pub mod alerts;
pub mod chat;
pub mod config;
pub mod models;
pub mod server;
