pub mod executors;
pub mod filesystem;
pub mod fsutil;
pub mod models;
pub mod persistence;
pub mod registry;
