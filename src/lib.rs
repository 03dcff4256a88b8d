pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod expenses;
pub mod state;
pub mod web;

pub use app::build_app;
pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;
