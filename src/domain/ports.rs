use crate::domain::model::{BuildSummary, DistBundle, RawDatasets, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Output sink. Paths are relative to the storage root.
pub trait Storage: Send + Sync {
    /// Idempotent recursive create.
    fn ensure_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Creates or truncates `path`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location shown to the user, e.g. in the success summary.
    fn display_path(&self, path: &str) -> String;
}

/// Where raw records come from; HTTP in production, canned data in tests.
pub trait RecordSource: Send + Sync {
    fn fetch(&self, url: &str)
        -> impl std::future::Future<Output = Result<Vec<RawRecord>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn states_url(&self) -> &str;
    fn cities_url(&self) -> &str;
    fn country_code(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawDatasets>;
    async fn transform(&self, data: RawDatasets) -> Result<DistBundle>;
    /// What `load` would produce for `bundle`, without touching storage.
    fn plan(&self, bundle: &DistBundle) -> Result<BuildSummary>;
    async fn load(&self, bundle: DistBundle) -> Result<BuildSummary>;
}
