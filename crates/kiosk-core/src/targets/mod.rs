pub mod errors;
pub mod persistence;
pub mod types;

pub use errors::TargetError;
pub use persistence::{ensure_offline_page, load_or_create};
pub use types::{Target, TargetList};
