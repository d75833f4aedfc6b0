pub mod commands;
pub mod console;
pub mod launcher;
pub mod tracing;
pub mod worker;
