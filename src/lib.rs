pub mod analyzers;
pub mod cleaner;
pub mod collector;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod nlp;
pub mod output;
pub mod sentiment;
pub mod services;
pub mod stage;
pub mod table;
pub mod visualizer;
