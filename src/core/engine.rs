use crate::core::{BuildSummary, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct BuildEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BuildEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BuildSummary> {
        let started = Instant::now();
        tracing::info!("🚀 Building course site...");

        // Extract
        let documents = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} source files", documents.len());

        // Transform
        let result = self.pipeline.transform(documents).await?;
        tracing::info!("📚 Found {} modules", result.modules.len());

        // Load
        let summary = self.pipeline.load(result).await?;
        tracing::info!(
            "✅ Build complete in {:?}: {} modules, {} lectures -> {}",
            started.elapsed(),
            summary.module_count,
            summary.lecture_count,
            summary.output_path
        );

        Ok(summary)
    }
}
