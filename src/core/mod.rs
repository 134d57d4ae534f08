pub mod course;
pub mod engine;
pub mod frontmatter;
pub mod lectures;
pub mod pipeline;
pub mod render;
pub mod watch;

pub use crate::domain::model::{BuildSummary, SourceDocument, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
