pub mod catalog;
pub mod config;
pub mod job;
pub mod language;
