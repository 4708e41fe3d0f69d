use crate::domain::model::{ParcelRecord, SearchArtifacts, SearchKind};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn client_key(&self) -> &str;
    fn region(&self) -> &str;
    fn search_term(&self) -> &str;
    fn search_kind(&self) -> SearchKind;
    fn output_path(&self) -> &str;
    fn strict_geometry(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ParcelRecord>>;
    async fn transform(&self, records: Vec<ParcelRecord>) -> Result<SearchArtifacts>;
    async fn load(&self, artifacts: SearchArtifacts) -> Result<String>;
}
