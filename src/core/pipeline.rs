use crate::adapters::tabular::read_rows;
use crate::core::assembler::generate_result;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::document::export_filename;
use crate::domain::model::{GenerationResult, Row};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::path::Path;

/// CSV file in, bulk JSON file out.
pub struct BulkPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    export_date: Option<NaiveDate>,
}

impl<S: Storage, C: ConfigProvider> BulkPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            export_date: None,
        }
    }

    /// Pin the date used in the export filename (defaults to today).
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    fn export_path(&self) -> String {
        let date = self
            .export_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let filename = export_filename(self.config.profile_type(), self.config.entity_mode(), date);
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BulkPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Row>> {
        tracing::debug!("Reading rows from: {}", self.config.input_file());
        let data = self.storage.read_file(self.config.input_file()).await?;
        read_rows(data.as_slice())
    }

    async fn transform(&self, rows: Vec<Row>) -> Result<GenerationResult> {
        generate_result(
            &rows,
            self.config.entity_mode(),
            self.config.profile_type(),
            self.config.policy(),
        )
    }

    async fn load(&self, result: GenerationResult) -> Result<String> {
        let output_path = self.export_path();
        tracing::debug!(
            "Writing {} bytes of JSON to {}",
            result.json.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.json.as_bytes())
            .await?;
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::TransformPolicy;
    use crate::domain::model::{EntityMode, ProfileType};
    use crate::utils::error::BulkError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                BulkError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_file: String,
        output_path: String,
        mode: EntityMode,
        profile: ProfileType,
        policy: TransformPolicy,
    }

    impl MockConfig {
        fn new(mode: EntityMode, profile: ProfileType) -> Self {
            Self {
                input_file: "rows.csv".to_string(),
                output_path: "out".to_string(),
                mode,
                profile,
                policy: TransformPolicy::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_file(&self) -> &str {
            &self.input_file
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn entity_mode(&self) -> EntityMode {
            self.mode
        }

        fn profile_type(&self) -> ProfileType {
            self.profile
        }

        fn policy(&self) -> &TransformPolicy {
            &self.policy
        }
    }

    fn export_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[tokio::test]
    async fn test_extract_reads_csv_rows() {
        let storage = MockStorage::new();
        storage
            .put_file("rows.csv", "full_name,gender\nJohn Doe,Male\n,\n")
            .await;
        let pipeline = BulkPipeline::new(
            storage,
            MockConfig::new(EntityMode::Create, ProfileType::Rel),
        );

        let rows = pipeline.extract().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(crate::domain::model::Column::Gender), "Male");
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let pipeline = BulkPipeline::new(
            MockStorage::new(),
            MockConfig::new(EntityMode::Create, ProfileType::Rel),
        );
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, BulkError::IoError(_)));
    }

    #[tokio::test]
    async fn test_load_writes_dated_export_file() {
        let storage = MockStorage::new();
        storage
            .put_file("rows.csv", "reference_id,gender\nR-9,Female\n")
            .await;
        let pipeline = BulkPipeline::new(
            storage.clone(),
            MockConfig::new(EntityMode::Update, ProfileType::Pep),
        )
        .with_export_date(export_date());

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        let path = pipeline.load(result).await.unwrap();

        let expected = Path::new("out")
            .join("PEP_UPDATE_2025-01-31.json")
            .to_string_lossy()
            .into_owned();
        assert_eq!(path, expected);

        let written = storage.get_file(&expected).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"individuals": [{"referenceNumber": "R-9", "gender": "Female"}]})
        );
    }
}
