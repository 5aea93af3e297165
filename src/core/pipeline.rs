use crate::core::aggregator::domain_count;
use crate::core::extractor::{domains_from_customers, TracingSink};
use crate::core::loader::parse_customer_csv;
use crate::core::output::render;
use crate::core::{ConfigProvider, CustomerBatch, InvalidAddressSink, Pipeline, Storage};
use crate::domain::model::TransformResult;
use crate::utils::error::{ImportError, Result};
use std::io::Write;

pub const STDOUT_DESTINATION: &str = "stdout";

/// Customer CSV → sorted domain counts.
pub struct DomainCountPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sink: Box<dyn InvalidAddressSink>,
}

impl<S: Storage, C: ConfigProvider> DomainCountPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            sink: Box::new(TracingSink),
        }
    }

    /// Replaces the default `tracing` sink for invalid addresses.
    pub fn with_sink(mut self, sink: impl InvalidAddressSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DomainCountPipeline<S, C> {
    async fn extract(&self) -> Result<CustomerBatch> {
        let input = self.config.input_path();
        tracing::debug!("Reading customer file: {}", input);

        let data = self.storage.read_file(input).await.map_err(|e| match e {
            ImportError::IoError(source) => ImportError::FileError {
                path: input.into(),
                source,
            },
            other => other,
        })?;

        parse_customer_csv(data.as_slice())
    }

    async fn transform(&self, batch: CustomerBatch) -> Result<TransformResult> {
        let column = self.config.email_column();
        let email_index = column.resolve(&batch.headers)?;
        let policy = self.config.invalid_address_policy();
        tracing::debug!(
            "Email column '{}' resolved to position {}, invalid addresses: {:?}",
            column,
            email_index,
            policy
        );

        let rows_processed = batch.rows.len();
        let extracted =
            domains_from_customers(&batch.rows, email_index, policy, self.sink.as_ref())?;
        let rows_skipped = rows_processed - extracted.domains.len();

        Ok(TransformResult {
            domain_counts: domain_count(extracted.domains),
            rows_processed,
            invalid_addresses: extracted.invalid_addresses,
            rows_skipped,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let data = render(&result.domain_counts, self.config.output_format())?;

        match self.config.output_path() {
            Some(path) => {
                tracing::debug!("Writing {} bytes to {}", data.len(), path);
                self.storage.write_file(path, &data).await?;
                Ok(path.to_string())
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&data)?;
                stdout.flush()?;
                Ok(STDOUT_DESTINATION.to_string())
            }
        }
    }
}
