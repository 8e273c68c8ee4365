//! Command handlers. Each one snapshots storage, calls the engine, and prints.

pub mod display;
pub mod due;
pub mod history;
pub mod init;
pub mod log;
pub mod odometer;
pub mod tasks;
pub mod undo;
