pub mod cleaner;
pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod merger;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod sink;
pub mod types;
