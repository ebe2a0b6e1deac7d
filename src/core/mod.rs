pub mod backup;
pub mod calculator;
pub mod config;
pub mod dashboard;
pub mod listing;
pub mod log;
pub mod records;
