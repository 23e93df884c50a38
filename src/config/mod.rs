//! Engine configuration: tuning knobs and TOML file loading.

mod loader;
mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{QuizConfig, SkipPolicy};
