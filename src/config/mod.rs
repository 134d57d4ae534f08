pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::SiteConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "course-site")]
#[command(about = "Builds the course website from annotated markdown files")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the module markdown files
    #[arg(long, global = true)]
    pub content_dir: Option<String>,

    /// Directory the site is written to
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// HTML template containing the modules placeholder
    #[arg(long, global = true)]
    pub template: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Build the site once (default)
    Build,
    /// Build, then rebuild whenever a content file changes
    Watch,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Build)
    }

    /// 載入設定檔 (若有指定) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut SiteConfig) {
        if let Some(dir) = &self.content_dir {
            config.paths.content_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(template) = &self.template {
            config.paths.template = template.clone();
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_build() {
        let cli = CliConfig::parse_from(["course-site"]);
        assert_eq!(cli.command(), Command::Build);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_watch_with_global_flags_after_subcommand() {
        let cli = CliConfig::parse_from(["course-site", "watch", "--content-dir", "notes", "-v"]);

        assert_eq!(cli.command(), Command::Watch);
        assert_eq!(cli.content_dir.as_deref(), Some("notes"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = CliConfig::parse_from([
            "course-site",
            "--output-dir",
            "dist",
            "--template",
            "site.html",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.paths.output_dir, "dist");
        assert_eq!(config.paths.template, "site.html");
        assert_eq!(config.paths.content_dir, "./content");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = CliConfig::parse_from(["course-site", "--config", "/nonexistent/site.toml"]);
        assert!(cli.resolve().is_err());
    }
}
