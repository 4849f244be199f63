pub mod config;
pub mod content;
pub mod demo;
pub mod history;
pub mod llm;
pub mod orchestrator;
pub mod readability;
pub mod terminal;
