//! Configuration module for rootdeductor

mod settings;

pub use settings::{CheckConfig, ConfigBuilder};
