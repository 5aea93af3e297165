use crate::domain::model::{
    CustomerBatch, EmailColumn, InvalidAddressPolicy, OutputFormat, TransformResult,
};
use crate::utils::error::{InvalidAddress, Result};
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
    fn input_path(&self) -> &str;
    /// `None` 代表輸出到 stdout
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn email_column(&self) -> EmailColumn;
    fn invalid_address_policy(&self) -> InvalidAddressPolicy;
}

/// Receives the non-fatal invalid-address conditions found while extracting.
pub trait InvalidAddressSink: Send + Sync {
    fn invalid_address(&self, line: u64, error: &InvalidAddress);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CustomerBatch>;
    async fn transform(&self, batch: CustomerBatch) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<String>;
}
