pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::SiteConfig};
pub use core::{engine::BuildEngine, pipeline::CoursePipeline};
pub use domain::model::{BuildSummary, CourseDefaults, Lecture, Module, Resource};
pub use utils::error::{BuildError, Result};
