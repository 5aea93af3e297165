pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::JobConfig;
    use crate::core::ConfigProvider;
    use crate::domain::model::{EmailColumn, InvalidAddressPolicy, OutputFormat};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "customer-importer")]
    #[command(about = "Counts customers per email domain in a CSV file")]
    pub struct CliConfig {
        /// Customer CSV file (header row, then name,surname,email,...)
        pub input: Option<String>,

        /// Write results to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        #[arg(short, long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Zero-based position or header name of the email column [default: 2]
        #[arg(long, value_parser = EmailColumn::parse)]
        pub email_column: Option<EmailColumn>,

        /// What to do with emails that have no '@' [default: keep]
        #[arg(long, value_enum)]
        pub invalid_addresses: Option<InvalidAddressPolicy>,

        /// TOML job file; command line flags take precedence
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// Fills every option not given on the command line from `job`.
        pub fn merge_job_config(mut self, job: &JobConfig) -> Self {
            self.input = self.input.or_else(|| job.input_path().map(str::to_string));
            self.output = self.output.or_else(|| job.output_path().map(str::to_string));
            self.format = self.format.or(job.output_format());
            self.email_column = self.email_column.or_else(|| job.email_column().cloned());
            self.invalid_addresses = self.invalid_addresses.or(job.invalid_addresses());
            self.monitor = self.monitor || job.monitoring_enabled();
            self
        }

        /// Loads the `--config` file, if any, and merges it in.
        pub fn resolve(self) -> Result<Self> {
            match self.config.as_deref() {
                Some(path) => {
                    let job = JobConfig::from_file(path)?;
                    job.validate()?;
                    tracing::debug!("Loaded job config from {}", path);
                    Ok(self.merge_job_config(&job))
                }
                None => Ok(self),
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            let input = validation::validate_required_field("input", &self.input)?;
            validation::validate_path("input", input)?;
            // 副檔名不符只警告，內容能否解析由 loader 判斷
            if let Err(e) = validation::validate_file_extension("input", input, &["csv", "txt"]) {
                tracing::warn!("⚠️ {}", e);
            }

            if let Some(output) = &self.output {
                validation::validate_path("output", output)?;
            }
            if let Some(column) = &self.email_column {
                validation::validate_email_column("email_column", column)?;
            }
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            self.input.as_deref().unwrap_or_default()
        }

        fn output_path(&self) -> Option<&str> {
            self.output.as_deref()
        }

        fn output_format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }

        fn email_column(&self) -> EmailColumn {
            self.email_column.clone().unwrap_or_default()
        }

        fn invalid_address_policy(&self) -> InvalidAddressPolicy {
            self.invalid_addresses.unwrap_or_default()
        }
    }

}
