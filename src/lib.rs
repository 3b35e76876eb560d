//! Bucket Console: a browser console over an S3-compatible object store / 对象存储管理控制台
//!
//! Every route maps to one provider call (move is two), records a one-shot
//! status message and renders or redirects back to the listing.

pub mod api;
pub mod config;
pub mod error;
pub mod flash;
pub mod operations;
pub mod state;
pub mod storage;
pub mod utils;
pub mod views;

// Driver modules (point to project root drivers via path attribute) / 驱动模块
#[path = "../drivers/mod.rs"]
pub mod drivers;

pub use api::create_router;
pub use state::AppState;
