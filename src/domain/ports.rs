use crate::domain::model::{BuildSummary, CourseDefaults, SourceDocument, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_to_string(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Regular files directly inside `dir` with the given extension, as file names.
    fn list_files(
        &self,
        dir: &str,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn ensure_dir(&self, dir: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// Recursively copies `from` into `to`, returning the number of files copied.
    fn copy_dir(
        &self,
        from: &str,
        to: &str,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn content_dir(&self) -> &str;
    fn content_extension(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn data_file(&self) -> &str;
    fn template_path(&self) -> &str;
    fn html_file(&self) -> &str;
    fn placeholder(&self) -> &str;
    fn asset_dirs(&self) -> &[String];
    fn defaults(&self) -> &CourseDefaults;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceDocument>>;
    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<BuildSummary>;
}
