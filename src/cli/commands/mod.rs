pub mod config;
pub mod models;
pub mod serve;
pub mod weave;
