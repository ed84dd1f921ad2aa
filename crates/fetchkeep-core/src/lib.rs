pub mod config;
pub mod error;
pub mod logging;

pub mod fetch;
pub mod pipeline;
pub mod prune;
pub mod self_erase;
pub mod url_model;
