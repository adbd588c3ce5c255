//! Application service layer - config, image intake, pipelines, export

pub mod app;
pub mod config;
pub mod export;
pub mod scanner;
