pub mod filter;
pub mod log_record;
pub mod target;
