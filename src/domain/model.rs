use serde::{Deserialize, Serialize};

pub const DEFAULT_LECTURE_DURATION: u32 = 45;
pub const DEFAULT_LECTURE_TYPE: &str = "Лекция";
pub const DEFAULT_MODULE_ORDER: i64 = 999;
pub const DEFAULT_MODULE_TITLE: &str = "Untitled Module";

/// 缺少欄位時套用的預設值，可由設定檔 `[defaults]` 覆蓋
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseDefaults {
    pub lecture_duration: u32,
    pub lecture_type: String,
    pub module_order: i64,
    pub module_title: String,
}

impl Default for CourseDefaults {
    fn default() -> Self {
        Self {
            lecture_duration: DEFAULT_LECTURE_DURATION,
            lecture_type: DEFAULT_LECTURE_TYPE.to_string(),
            module_order: DEFAULT_MODULE_ORDER,
            module_title: DEFAULT_MODULE_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub title: String,
    pub duration: u32,
    #[serde(rename = "type")]
    pub lecture_type: String,
    pub completed: bool,
    pub video_url: String,
    pub presentation_url: String,
    pub materials_url: String,
    pub description: String,
    pub resources: Vec<Resource>,
}

impl Lecture {
    pub fn new(title: impl Into<String>, defaults: &CourseDefaults) -> Self {
        Self {
            title: title.into(),
            duration: defaults.lecture_duration,
            lecture_type: defaults.lecture_type.clone(),
            completed: false,
            video_url: String::new(),
            presentation_url: String::new(),
            materials_url: String::new(),
            description: String::new(),
            resources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub description: String,
    pub order: i64,
    pub completed: bool,
    pub lectures: Vec<Lecture>,
}

/// 讀取自內容目錄的單一 markdown 檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub modules: Vec<Module>,
    pub json_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_path: String,
    pub module_count: usize,
    pub lecture_count: usize,
}
