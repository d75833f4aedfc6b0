pub mod log_category;
pub mod log_type;
pub mod sort_order;
pub mod sync_mode;

pub use log_category::LogCategory;
pub use log_type::LogType;
pub use sort_order::SortOrder;
pub use sync_mode::SyncMode;
