pub mod completions;
pub mod config;
pub mod plan;
pub mod run;
