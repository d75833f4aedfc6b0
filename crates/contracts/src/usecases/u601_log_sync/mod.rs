pub mod progress;
pub mod request;
pub mod response;

pub use progress::SyncPhase;
pub use request::UserAction;
pub use response::{PageInfo, RenderView};
