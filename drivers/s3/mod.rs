//! S3对象存储驱动 / S3 and S3-compatible object storage

pub mod config;
pub mod driver;

pub use config::S3Config;
pub use driver::S3Driver;
