pub mod u601_log_sync;
