pub mod aggregator;
pub mod etl;
pub mod extractor;
pub mod loader;
pub mod output;
pub mod pipeline;

pub use crate::domain::model::{CustomerBatch, DomainCount, Row, TransformResult};
pub use crate::domain::ports::{ConfigProvider, InvalidAddressSink, Pipeline, Storage};
pub use crate::utils::error::Result;

use crate::domain::model::{EmailColumn, InvalidAddressPolicy};
use std::path::Path;

/// Loads `path` and returns the customer count per email domain, sorted by
/// domain.
///
/// Uses the third column as the email, counts invalid addresses under the
/// empty domain and reports them through `tracing`.
pub fn customer_csv_to_domain_count<P: AsRef<Path>>(path: P) -> Result<Vec<DomainCount>> {
    let batch = loader::load_customer_csv(path)?;
    let email_index = EmailColumn::default().resolve(&batch.headers)?;
    let extracted = extractor::domains_from_customers(
        &batch.rows,
        email_index,
        InvalidAddressPolicy::Keep,
        &extractor::TracingSink,
    )?;
    Ok(aggregator::domain_count(extracted.domains))
}
