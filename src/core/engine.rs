use crate::core::Pipeline;
use crate::domain::model::GenerationResult;
use crate::utils::error::Result;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub result: GenerationResult,
}

pub struct BulkEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BulkEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("📥 Extracting rows...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        tracing::info!("🔄 Generating JSON...");
        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Generated {} {} {} records",
            result.document.individuals.len(),
            result.profile_type,
            result.entity_mode
        );

        let output_path = self.pipeline.load(result.clone()).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(RunOutcome {
            output_path,
            result,
        })
    }
}
