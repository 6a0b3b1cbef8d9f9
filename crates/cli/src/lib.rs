//! HMS CLI Library
//!
//! Сборка зависимостей и терминальные экраны регистрации / landing.

pub mod app;
pub mod bootstrap;
pub mod views;

pub use app::{initial_screen, run, Screen};
pub use bootstrap::configure_container;
