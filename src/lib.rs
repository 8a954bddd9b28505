pub mod config;
pub mod docx;
pub mod fetch;
pub mod infra;
pub mod pipeline;
pub mod render;
pub mod services;
