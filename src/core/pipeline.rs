use crate::core::course::build_course;
use crate::core::render::{render_html, render_json};
use crate::core::{BuildSummary, ConfigProvider, Pipeline, SourceDocument, Storage, TransformResult};
use crate::utils::error::{BuildError, Result};
use std::path::Path;

pub(crate) fn join_path(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().into_owned()
}

pub struct CoursePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CoursePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn write_html(&self, result: &TransformResult) -> Result<()> {
        let template_path = self.config.template_path();
        if !self.storage.exists(template_path).await {
            tracing::info!("No template at {}, skipping HTML", template_path);
            return Ok(());
        }

        let template = self.storage.read_to_string(template_path).await?;
        let html = render_html(&template, self.config.placeholder(), &result.modules)?;
        let html_path = join_path(self.config.output_dir(), self.config.html_file());
        self.storage.write_file(&html_path, html.as_bytes()).await?;
        tracing::info!("🌐 Generated {}", self.config.html_file());
        Ok(())
    }

    async fn copy_assets(&self) -> Result<()> {
        for dir in self.config.asset_dirs() {
            if !self.storage.exists(dir).await {
                continue;
            }
            let target = join_path(self.config.output_dir(), dir);
            let copied = self.storage.copy_dir(dir, &target).await?;
            tracing::info!("📁 Copied {}/ ({} files)", dir, copied);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CoursePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        let content_dir = self.config.content_dir();

        if !self.storage.exists(content_dir).await {
            tracing::info!("Creating content directory: {}", content_dir);
            self.storage.ensure_dir(content_dir).await?;
            return Ok(Vec::new());
        }

        let file_names = self
            .storage
            .list_files(content_dir, self.config.content_extension())
            .await?;

        let mut documents = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            let path = join_path(content_dir, &file_name);
            match self.storage.read_to_string(&path).await {
                Ok(content) => documents.push(SourceDocument { file_name, content }),
                Err(BuildError::IoError(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::warn!("Skipping {}: not valid UTF-8", path);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("Read {} content files from {}", documents.len(), content_dir);
        Ok(documents)
    }

    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<TransformResult> {
        let modules = build_course(documents, self.config.defaults());
        let json_output = render_json(&modules)?;

        Ok(TransformResult {
            modules,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<BuildSummary> {
        let output_dir = self.config.output_dir();
        self.storage.ensure_dir(output_dir).await?;

        let data_path = join_path(output_dir, self.config.data_file());
        self.storage
            .write_file(&data_path, result.json_output.as_bytes())
            .await?;
        tracing::info!("📄 Generated {}", self.config.data_file());

        self.write_html(&result).await?;
        self.copy_assets().await?;

        Ok(BuildSummary {
            output_path: output_dir.to_string(),
            module_count: result.modules.len(),
            lecture_count: result.modules.iter().map(|m| m.lectures.len()).sum(),
        })
    }
}
