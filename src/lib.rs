pub mod audit;
pub mod config;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod questionnaire;
pub mod ranking;
pub mod scoring;
pub mod usecase;
