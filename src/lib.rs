pub mod app;
pub mod chart;
pub mod cli;
pub mod client;
pub mod config;
pub mod fetch;
pub mod markup;
pub mod schema;
pub mod state;
pub mod transform;
pub mod ui;
