use crate::core::render::DEFAULT_PLACEHOLDER;
use crate::core::ConfigProvider;
use crate::domain::model::CourseDefaults;
use crate::utils::error::{BuildError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub paths: PathsConfig,
    pub assets: AssetsConfig,
    pub defaults: CourseDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub content_dir: String,
    pub content_extension: String,
    pub output_dir: String,
    pub data_file: String,
    pub template: String,
    pub html_file: String,
    pub placeholder: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: "./content".to_string(),
            content_extension: "md".to_string(),
            output_dir: "./public".to_string(),
            data_file: "courseData.json".to_string(),
            template: "./template.html".to_string(),
            html_file: "index.html".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dirs: Vec<String>, // 存在時複製到輸出目錄
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dirs: ["presentations", "materials", "css", "js"]
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| BuildError::ConfigError {
            message: format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BuildError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_ROOT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("paths.content_dir", &self.paths.content_dir)?;
        validate_path("paths.output_dir", &self.paths.output_dir)?;
        validate_path("paths.template", &self.paths.template)?;
        validate_non_empty_string("paths.content_extension", &self.paths.content_extension)?;
        if self.paths.content_extension.starts_with('.') {
            return Err(BuildError::InvalidConfigValueError {
                field: "paths.content_extension".to_string(),
                value: self.paths.content_extension.clone(),
                reason: "Extension must not start with a dot, e.g. \"md\"".to_string(),
            });
        }
        validate_file_extension("paths.data_file", &self.paths.data_file, &["json"])?;
        validate_file_extension("paths.html_file", &self.paths.html_file, &["html", "htm"])?;
        validate_non_empty_string("paths.placeholder", &self.paths.placeholder)?;

        for dir in &self.assets.dirs {
            validate_path("assets.dirs", dir)?;
        }

        validate_positive_number("defaults.lecture_duration", self.defaults.lecture_duration, 1)?;

        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn content_dir(&self) -> &str {
        &self.paths.content_dir
    }

    fn content_extension(&self) -> &str {
        &self.paths.content_extension
    }

    fn output_dir(&self) -> &str {
        &self.paths.output_dir
    }

    fn data_file(&self) -> &str {
        &self.paths.data_file
    }

    fn template_path(&self) -> &str {
        &self.paths.template
    }

    fn html_file(&self) -> &str {
        &self.paths.html_file
    }

    fn placeholder(&self) -> &str {
        &self.paths.placeholder
    }

    fn asset_dirs(&self) -> &[String] {
        &self.assets.dirs
    }

    fn defaults(&self) -> &CourseDefaults {
        &self.defaults
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.content_dir(), "./content");
        assert_eq!(config.output_dir(), "./public");
        assert_eq!(config.data_file(), "courseData.json");
        assert_eq!(config.placeholder(), "modules: [/* MODULES_DATA */]");
        assert_eq!(config.asset_dirs().len(), 4);
        assert_eq!(config.defaults().module_order, 999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[paths]
content_dir = "./lectures"
output_dir = "./dist"

[assets]
dirs = ["css"]

[defaults]
lecture_type = "Lecture"
module_order = 100
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.content_dir(), "./lectures");
        assert_eq!(config.output_dir(), "./dist");
        assert_eq!(config.data_file(), "courseData.json");
        assert_eq!(config.asset_dirs(), &["css".to_string()]);
        assert_eq!(config.defaults().lecture_type, "Lecture");
        assert_eq!(config.defaults().lecture_duration, 45);
        assert_eq!(config.defaults().module_order, 100);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_SITE_TEST_OUT", "/tmp/course-out");

        let toml_content = r#"
[paths]
output_dir = "${COURSE_SITE_TEST_OUT}"
content_dir = "${COURSE_SITE_TEST_UNSET_VAR}"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_dir(), "/tmp/course-out");
        assert_eq!(config.content_dir(), "${COURSE_SITE_TEST_UNSET_VAR}");

        std::env::remove_var("COURSE_SITE_TEST_OUT");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = SiteConfig::from_toml_str("[paths\ncontent_dir = 1");
        assert!(matches!(
            result,
            Err(BuildError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = SiteConfig::default();
        config.paths.data_file = "courseData.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.defaults.lecture_duration = 0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.paths.placeholder = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dotted_content_extension_is_rejected() {
        let config = SiteConfig::from_toml_str("[paths]\ncontent_extension = \".md\"\n").unwrap();

        match config.validate() {
            Err(BuildError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "paths.content_extension");
                assert_eq!(value, ".md");
            }
            other => panic!("expected invalid extension error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_config_file_is_config_error() {
        let result = SiteConfig::from_file("/nonexistent/course-site.toml");

        match result {
            Err(BuildError::ConfigError { message }) => {
                assert!(message.contains("/nonexistent/course-site.toml"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[paths]\ntemplate = \"./site/template.html\"\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.template_path(), "./site/template.html");
    }
}
