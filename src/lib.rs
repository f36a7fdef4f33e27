pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logs;
pub mod ui;
pub mod unsubscribe;
