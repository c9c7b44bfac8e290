//! Application-level settings
//!
//! Everything outside the console core that a host program needs to stand
//! a console up: currently the JSON configuration.

mod config;

pub use config::{ConfigError, ConsoleConfig};
