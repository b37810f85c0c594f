pub mod config;
pub mod info;

pub use config::{AppConfig, EncodingName, FlatImageMode, OverflowMode, CONFIG_ENV};
pub use info::ImageInfo;
