//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod optimizer;
pub mod output;
pub mod processing;
pub mod ranking;
pub mod scoring;

pub use config::Config;
pub use error::{Result, ResumeRankerError};
