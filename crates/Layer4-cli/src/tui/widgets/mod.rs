//! Dashboard widgets

mod cache_table;
mod header;
mod input;
mod status;

pub use cache_table::CacheTable;
pub use header::Header;
pub use input::InputBox;
pub use status::{ResultPanel, StatusPanel};
