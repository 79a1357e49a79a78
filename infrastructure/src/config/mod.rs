//! Configuration file loading for crew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CREW_*` environment variables (`CREW_TEAM__MODE=route`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./crew.toml` or `./.crew.toml`
//! 4. Global: `<config_dir>/crew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCommandConfig, FileConfig, FileLoggingConfig, FileMemberConfig, FileOutputConfig,
    FileSessionConfig, FileStreamConfig, FileTeamConfig,
};
pub use loader::ConfigLoader;
