use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting parcel search");

        let records = self.pipeline.extract().await?;
        tracing::info!("Fetched {} results", records.len());

        let artifacts = self.pipeline.transform(records).await?;
        if artifacts.skipped > 0 {
            tracing::warn!(
                "{} results had missing or malformed geometry and were skipped",
                artifacts.skipped
            );
        }
        tracing::info!("Parsed {} parcel polygons", artifacts.parsed);

        let output_path = self.pipeline.load(artifacts).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
