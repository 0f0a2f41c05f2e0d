pub mod selector_log;
pub mod writer;
