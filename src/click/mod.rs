pub mod config;
pub mod event;
pub mod handler;
pub mod label;
pub mod report;
pub mod sink;
