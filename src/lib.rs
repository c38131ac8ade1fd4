pub mod app;
pub mod config;
pub mod error;
pub mod excel;
pub mod extract;
pub mod graph_export;
pub mod metamodel;
pub mod utils;
