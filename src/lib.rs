pub mod app;
pub mod config;
pub mod context;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod ui;
pub mod usecase;
