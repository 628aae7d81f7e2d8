//! Command handlers for CLI subcommands
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

mod completions;
mod config;
mod generate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use generate::handle_generate;
