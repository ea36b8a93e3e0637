//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (raw key names/codes to logical keys)
//! - Storage (a JSON file natively, LocalStorage on web)

pub mod input;
pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use input::key_from_crossterm;
pub use input::{HeldKeys, key_from_dom};
pub use storage::default_store;
