use crate::core::policy::TransformPolicy;
use crate::domain::model::{EntityMode, GenerationResult, ProfileType, Row};
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
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn entity_mode(&self) -> EntityMode;
    fn profile_type(&self) -> ProfileType;
    fn policy(&self) -> &TransformPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Row>>;
    async fn transform(&self, rows: Vec<Row>) -> Result<GenerationResult>;
    async fn load(&self, result: GenerationResult) -> Result<String>;
}
