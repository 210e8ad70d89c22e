pub mod types;

pub use types::{Config, ConfigError, FramesConfig};
