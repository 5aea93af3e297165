pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::JobConfig};
pub use crate::core::{
    customer_csv_to_domain_count, etl::EtlEngine, pipeline::DomainCountPipeline, DomainCount,
};
pub use domain::model::{EmailColumn, EtlReport, InvalidAddressPolicy, OutputFormat};
pub use utils::error::{ImportError, InvalidAddress, Result};
