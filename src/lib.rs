pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod templates;

pub use app::{app, AppState};
